//! Readability metrics used to rank drill units.

use regex::Regex;
use std::sync::LazyLock;

static WORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Za-z']+").expect("word pattern"));

static SENTENCE_END_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?]+").expect("sentence end pattern"));

static BURDEN_TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[\w'-]+\b").expect("burden token pattern"));

const SYLLABLE_STRIP: &[char] = &['.', ',', ';', ':', '!', '?', '"', '\'', '(', ')', '[', ']'];

fn is_vowel(c: char) -> bool {
    matches!(c, 'a' | 'e' | 'i' | 'o' | 'u' | 'y' | 'A' | 'E' | 'I' | 'O' | 'U' | 'Y')
}

pub fn count_words(text: &str) -> usize {
    WORD_RE.find_iter(text).count()
}

/// Vowel-group heuristic; a trailing silent `e` is dropped. Never below 1.
pub fn count_syllables(word: &str) -> usize {
    let token = word.trim_matches(SYLLABLE_STRIP);
    if token.is_empty() {
        return 1;
    }

    let mut count = 0usize;
    let mut prev_vowel = false;
    for c in token.chars() {
        let vowel = is_vowel(c);
        if vowel && !prev_vowel {
            count += 1;
        }
        prev_vowel = vowel;
    }
    if token.ends_with('e') && count > 1 {
        count -= 1;
    }
    count.max(1)
}

/// Runs of `.!?` count once each. Never below 1.
pub fn sentence_count(text: &str) -> usize {
    SENTENCE_END_RE.find_iter(text).count().max(1)
}

pub fn flesch_kincaid_grade(text: &str) -> f64 {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.is_empty() {
        return 0.0;
    }
    let n_words = words.len() as f64;
    let n_sentences = sentence_count(text) as f64;
    let n_syllables: usize = words.iter().map(|w| count_syllables(w)).sum();

    0.39 * (n_words / n_sentences) + 11.8 * (n_syllables as f64 / n_words) - 15.59
}

/// Share of words with three or more syllables.
pub fn pct_polysyllabic(text: &str) -> f64 {
    let words: Vec<&str> = WORD_RE.find_iter(text).map(|m| m.as_str()).collect();
    if words.is_empty() {
        return 0.0;
    }
    let poly = words.iter().filter(|w| count_syllables(w) >= 3).count();
    poly as f64 / words.len() as f64
}

/// Share of tokens that are numbers or capitalised names.
pub fn factual_burden_score(text: &str) -> f64 {
    let tokens: Vec<&str> = BURDEN_TOKEN_RE.find_iter(text).map(|m| m.as_str()).collect();
    if tokens.is_empty() {
        return 0.0;
    }

    let digits = tokens
        .iter()
        .filter(|t| t.chars().any(|c| c.is_ascii_digit()))
        .count();
    let capitalised = tokens.iter().filter(|t| is_capitalised(t)).count();

    (digits + capitalised) as f64 / tokens.len() as f64
}

/// Upper-case first char, and a remainder with cased chars all lower-case.
fn is_capitalised(token: &str) -> bool {
    let mut chars = token.chars();
    match chars.next() {
        Some(first) if first.is_uppercase() => {}
        _ => return false,
    }
    let rest = chars.as_str();
    rest.chars().any(char::is_lowercase) && !rest.chars().any(char::is_uppercase)
}

/// Rounds to `places` decimals.
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}
