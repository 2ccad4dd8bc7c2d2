use crate::text::{
    ends_with_terminal_punctuation, has_digit, has_internal_capital, is_acronym, is_title_case,
    letter_count, normalize_token, trim_to_core,
};
use crate::tokenizer::Chunk;

/// Non-detail words at least this long tolerate one typo.
const TYPO_TOLERANT_LETTERS: usize = 5;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WordMatch {
    pub known: bool,
    pub exact: bool,
    pub detail: bool,
}

/// A chunk starts a sentence when it is first or the previous chunk ends one.
pub fn is_sentence_initial(chunks: &[Chunk], index: usize) -> bool {
    match index.checked_sub(1).and_then(|prev| chunks.get(prev)) {
        Some(prev) => prev.is_break() || ends_with_terminal_punctuation(&prev.text),
        None => true,
    }
}

/// Numbers and names (outside sentence-initial position) are detail words.
pub fn is_detail_word(word: &str, sentence_initial: bool) -> bool {
    let core = trim_to_core(word);
    if has_digit(core) {
        return true;
    }
    if sentence_initial {
        return false;
    }
    is_acronym(core) || has_internal_capital(core) || is_title_case(core)
}

pub fn is_detail_chunk(chunks: &[Chunk], index: usize) -> bool {
    chunks
        .get(index)
        .map(|c| is_detail_word(&c.text, is_sentence_initial(chunks, index)))
        .unwrap_or(false)
}

/// Compares a typed token against the expected word.
///
/// `exact`: identical core, letter case included.
/// `known`: identical after normalization, or one edit away for longer non-detail words.
pub fn evaluate_word(expected: &str, typed: &str, is_detail: bool) -> WordMatch {
    let want = normalize_token(expected);
    let got = normalize_token(typed);

    if got.is_empty() {
        return WordMatch {
            detail: is_detail,
            ..WordMatch::default()
        };
    }

    let normalized_equal = want == got;
    let exact = normalized_equal && fold_apostrophes(trim_to_core(expected)) == fold_apostrophes(trim_to_core(typed));
    let near = !is_detail
        && letter_count(&want) >= TYPO_TOLERANT_LETTERS
        && within_one_edit(&want, &got);

    WordMatch {
        known: normalized_equal || near,
        exact,
        detail: is_detail,
    }
}

fn fold_apostrophes(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            '’' | '‘' | '`' => '\'',
            other => other,
        })
        .collect()
}

/// True when `a` and `b` differ by at most one insertion, deletion,
/// substitution, or swap of adjacent chars.
pub fn within_one_edit(a: &str, b: &str) -> bool {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a == b {
        return true;
    }

    let (la, lb) = (a.len(), b.len());
    if la.abs_diff(lb) > 1 {
        return false;
    }

    let prefix = a.iter().zip(&b).take_while(|(x, y)| x == y).count();

    if la == lb {
        // substitution
        if a[prefix + 1..] == b[prefix + 1..] {
            return true;
        }
        // transposition
        return prefix + 1 < la
            && a[prefix] == b[prefix + 1]
            && a[prefix + 1] == b[prefix]
            && a[prefix + 2..] == b[prefix + 2..];
    }

    let (long, short) = if la > lb { (&a, &b) } else { (&b, &a) };
    long[prefix + 1..] == short[prefix..]
}
