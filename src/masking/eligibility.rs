use crate::text::{
    ends_with_terminal_punctuation, has_digit, has_internal_capital, is_acronym,
    is_function_word, is_title_case, normalize_token, trim_to_core,
};

/// Lines longer than this are never treated as headings.
const HEADING_MAX_WORDS: usize = 12;
/// Share of capitalised content words needed for a heading-like line.
const HEADING_CAPITALISED_SHARE: f64 = 0.8;

/// Where a token sits on its line, as far as name detection cares.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TokenContext {
    pub sentence_initial: bool,
    pub heading_like_line: bool,
    pub adjacent_name_like: bool,
}

/// Title-Case content word ("Alice", not "The").
pub fn is_name_like_title_word(token: &str) -> bool {
    let core = trim_to_core(token);
    is_title_case(core) && !is_function_word(&normalize_token(core))
}

/// Title-style line: short, unpunctuated, mostly capitalised content words.
pub fn is_heading_like_line(tokens: &[&str]) -> bool {
    let Some(last) = tokens.last() else {
        return false;
    };
    if tokens.len() > HEADING_MAX_WORDS || ends_with_terminal_punctuation(last) {
        return false;
    }

    let (content, capitalised) = tokens
        .iter()
        .map(|t| trim_to_core(t))
        .filter(|core| !core.is_empty() && core.chars().all(|c| c.is_alphabetic() || c == '\'' || c == '-'))
        .filter(|core| !is_function_word(&normalize_token(core)))
        .fold((0usize, 0usize), |(n, caps), core| {
            let cap = is_title_case(core) || is_acronym(core);
            (n + 1, caps + usize::from(cap))
        });

    content > 0 && capitalised as f64 >= content as f64 * HEADING_CAPITALISED_SHARE
}

pub fn is_proper_noun(core: &str, ctx: &TokenContext) -> bool {
    if has_internal_capital(core) {
        return true;
    }
    is_title_case(core)
        && !ctx.sentence_initial
        && (!ctx.heading_like_line || ctx.adjacent_name_like)
}

/// Whether any letters of `token` may be masked.
pub fn is_mask_eligible(token: &str, ctx: &TokenContext) -> bool {
    let core = trim_to_core(token);
    if core.is_empty() || has_digit(core) || is_acronym(core) {
        return false;
    }
    if is_proper_noun(core, ctx) {
        return false;
    }
    !is_function_word(&normalize_token(core))
}
