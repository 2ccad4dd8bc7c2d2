//! Small token classifiers shared by pacing, scoring, masking and capture.

/// Closing quotes and brackets that may trail sentence punctuation.
pub fn is_closing_wrapper(ch: char) -> bool {
    matches!(ch, '"' | '\'' | ')' | ']' | '}' | '”' | '’' | '»')
}

/// Last char of the token that is not a closing quote or bracket.
pub fn last_significant_char(token: &str) -> Option<char> {
    token.trim_end().chars().rev().find(|c| !is_closing_wrapper(*c))
}

/// `.`, `?` or `!` at the end of the token, looking through closers.
pub fn ends_with_terminal_punctuation(token: &str) -> bool {
    matches!(last_significant_char(token), Some('.' | '?' | '!'))
}

/// The token with leading and trailing non-alphanumeric chars removed.
/// Inner apostrophes and hyphens survive: `"well-known,"` -> `well-known`.
pub fn trim_to_core(token: &str) -> &str {
    token.trim_matches(|c: char| !c.is_alphanumeric())
}

pub fn has_digit(token: &str) -> bool {
    token.chars().any(|c| c.is_ascii_digit())
}

pub fn letter_count(token: &str) -> usize {
    token.chars().filter(|c| c.is_alphabetic()).count()
}

/// Two or more letters, all upper case ("NASA", "U.S").
pub fn is_acronym(core: &str) -> bool {
    let mut letters = 0usize;
    for c in core.chars().filter(|c| c.is_alphabetic()) {
        if !c.is_uppercase() {
            return false;
        }
        letters += 1;
    }
    letters >= 2
}

/// Upper-case first letter followed only by lower-case letters ("Alice").
pub fn is_title_case(core: &str) -> bool {
    let mut letters = core.chars().filter(|c| c.is_alphabetic());
    match letters.next() {
        Some(first) if first.is_uppercase() => {}
        _ => return false,
    }
    let mut rest = 0usize;
    for c in letters {
        if !c.is_lowercase() {
            return false;
        }
        rest += 1;
    }
    rest >= 1
}

/// Mixed case with a capital after the first letter ("McDonald", "iPhone").
pub fn has_internal_capital(core: &str) -> bool {
    let letters: Vec<char> = core.chars().filter(|c| c.is_alphabetic()).collect();
    letters.len() >= 2
        && letters.iter().skip(1).any(|c| c.is_uppercase())
        && letters.iter().any(|c| c.is_lowercase())
}

/// Lower-cases and folds typographic apostrophes, then trims to the core.
pub fn normalize_token(token: &str) -> String {
    let folded: String = token
        .chars()
        .map(|c| match c {
            '’' | '‘' | '`' => '\'',
            other => other,
        })
        .collect::<String>()
        .to_lowercase();
    trim_to_core(&folded).to_string()
}

/// Closed list of English function words that carry no recall value.
pub const FUNCTION_WORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "am", "an", "and", "any", "are",
    "as", "at", "be", "because", "been", "before", "being", "below", "between", "both", "but",
    "by", "can", "could", "did", "do", "does", "doing", "down", "during", "each", "few", "for",
    "from", "further", "had", "has", "have", "having", "he", "her", "here", "hers", "herself",
    "him", "himself", "his", "how", "i", "if", "in", "into", "is", "it", "it's", "its", "itself",
    "just", "me", "more", "most", "my", "myself", "no", "nor", "not", "now", "of", "off", "on",
    "once", "only", "or", "other", "our", "ours", "ourselves", "out", "over", "own", "same",
    "she", "should", "so", "some", "such", "than", "that", "the", "their", "theirs", "them",
    "themselves", "then", "there", "these", "they", "this", "those", "through", "to", "too",
    "under", "until", "up", "very", "was", "we", "were", "what", "when", "where", "which",
    "while", "who", "whom", "why", "will", "with", "would", "you", "your", "yours", "yourself",
    "yourselves",
];

pub fn is_function_word(normalized: &str) -> bool {
    FUNCTION_WORDS.binary_search(&normalized).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn function_words_are_sorted_for_binary_search() {
        let mut sorted = FUNCTION_WORDS.to_vec();
        sorted.sort_unstable();
        assert_eq!(sorted, FUNCTION_WORDS);
    }

    #[test]
    fn terminal_punctuation_looks_through_quotes() {
        assert!(ends_with_terminal_punctuation("end.\""));
        assert!(ends_with_terminal_punctuation("why?)"));
        assert!(!ends_with_terminal_punctuation("pause,"));
    }

    #[test]
    fn case_shapes() {
        assert!(is_title_case("Alice"));
        assert!(!is_title_case("A"));
        assert!(is_acronym("NASA"));
        assert!(!is_acronym("I"));
        assert!(has_internal_capital("McDonald"));
        assert!(!has_internal_capital("Alice"));
    }
}
