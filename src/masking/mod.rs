//! Deterministic letter masking for the "fill in the blank" reading mode.

pub mod eligibility;
pub mod hash;
pub mod select;

pub use eligibility::{is_heading_like_line, is_mask_eligible, is_name_like_title_word, TokenContext};
pub use hash::{candidate_cost, fnv1a32};
pub use select::select_mask_candidates;

use crate::consts::{HARD_MASK_RATIO, MASK_CHAR, NORMAL_MASK_RATIO};
use crate::text::{ends_with_terminal_punctuation, is_function_word, normalize_token, trim_to_core};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum MaskDifficulty {
    #[default]
    Normal,
    Hard,
}

impl MaskDifficulty {
    /// Largest share of a word's letters that may be masked.
    pub fn ratio(self) -> f64 {
        match self {
            MaskDifficulty::Normal => NORMAL_MASK_RATIO,
            MaskDifficulty::Hard => HARD_MASK_RATIO,
        }
    }
}

/// Masks one rendered line. Whitespace is preserved byte for byte.
///
/// The output depends only on the arguments: the same line, difficulty,
/// seed and index always mask the same letters.
pub fn mask_generation_line(
    line: &str,
    difficulty: MaskDifficulty,
    seed: u64,
    line_index: usize,
) -> String {
    let spans = token_spans(line);
    if spans.is_empty() {
        return line.to_string();
    }

    let tokens: Vec<&str> = spans.iter().map(|&(s, e)| &line[s..e]).collect();
    let heading_like_line = is_heading_like_line(&tokens);
    let seed = seed.to_string();

    let mut out = String::with_capacity(line.len());
    let mut cursor = 0usize;

    for (token_index, (&(start, end), token)) in spans.iter().zip(&tokens).enumerate() {
        out.push_str(&line[cursor..start]);
        cursor = end;

        let sentence_initial = token_index == 0
            || ends_with_terminal_punctuation(tokens[token_index - 1]);
        let adjacent_name_like = heading_like_line
            && [token_index.checked_sub(1), Some(token_index + 1)]
                .into_iter()
                .flatten()
                .filter_map(|i| tokens.get(i))
                .any(|t| is_name_like_title_word(t));

        let ctx = TokenContext {
            sentence_initial,
            heading_like_line,
            adjacent_name_like,
        };

        if is_mask_eligible(token, &ctx) {
            out.push_str(&mask_token(token, difficulty.ratio(), &seed, line_index, token_index));
        } else {
            out.push_str(token);
        }
    }
    out.push_str(&line[cursor..]);
    out
}

/// Byte ranges of whitespace-delimited tokens.
fn token_spans(line: &str) -> Vec<(usize, usize)> {
    let mut spans = Vec::new();
    let mut start: Option<usize> = None;
    for (i, c) in line.char_indices() {
        match (c.is_whitespace(), start) {
            (true, Some(s)) => {
                spans.push((s, i));
                start = None;
            }
            (false, None) => start = Some(i),
            _ => {}
        }
    }
    if let Some(s) = start {
        spans.push((s, line.len()));
    }
    spans
}

/// Hyphenated compounds are masked one segment at a time with a seed
/// qualified by the segment's position. Hyphens and function-word
/// segments ("of", "the") are kept.
fn mask_token(token: &str, ratio: f64, seed: &str, line_index: usize, token_index: usize) -> String {
    if !token.contains('-') {
        return mask_segment(token, ratio, seed, line_index, token_index);
    }
    token
        .split('-')
        .enumerate()
        .map(|(i, segment)| {
            if is_function_word(&normalize_token(trim_to_core(segment))) {
                return segment.to_string();
            }
            let segment_seed = format!("{}~{}", seed, i);
            mask_segment(segment, ratio, &segment_seed, line_index, token_index)
        })
        .collect::<Vec<_>>()
        .join("-")
}

fn mask_segment(
    segment: &str,
    ratio: f64,
    seed: &str,
    line_index: usize,
    token_index: usize,
) -> String {
    let mut chars: Vec<char> = segment.chars().collect();
    let letters: Vec<usize> = chars
        .iter()
        .enumerate()
        .filter(|(_, c)| c.is_alphabetic())
        .map(|(i, _)| i)
        .collect();

    // first and last letters always stay visible, so short segments have no candidates
    let target = (letters.len() as f64 * ratio).floor() as usize;
    if letters.len() < 3 || target == 0 {
        return segment.to_string();
    }
    let candidates = &letters[1..letters.len() - 1];

    let core = trim_to_core(segment);
    let costs: Vec<f64> = (0..candidates.len())
        .map(|i| candidate_cost(seed, line_index, token_index, core, i))
        .collect();

    for picked in select_mask_candidates(candidates, &costs, target) {
        chars[candidates[picked]] = MASK_CHAR;
    }
    chars.into_iter().collect()
}
