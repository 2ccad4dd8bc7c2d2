//! Per-chunk display durations under a words-per-minute model.

use crate::consts::{
    AVG_WORD_LENGTH, BREAK_CHUNK_WORDS, MAJOR_PAUSE_BONUS, MINOR_PAUSE_BONUS, MIN_DISPLAY_MS,
    WORD_MODE_EXPONENT,
};
use crate::text::last_significant_char;
use crate::tokenizer::{is_break_chunk, Chunk};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ChunkMode {
    /// Word-unit pacing with diminishing cost for longer chunks.
    #[default]
    Word,
    /// Strictly proportional to lexical characters.
    Custom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pause {
    Major,
    Minor,
}

fn classify_pause(ch: char) -> Option<Pause> {
    match ch {
        '.' | '?' | '!' => Some(Pause::Major),
        ',' | ';' => Some(Pause::Minor),
        _ => None,
    }
}

/// Letters and digits only.
pub fn lexical_len(text: &str) -> usize {
    text.chars().filter(|c| c.is_alphanumeric()).count()
}

/// Punctuation at the end of the chunk, looking through closing quotes and brackets.
fn trailing_pause(text: &str) -> Option<Pause> {
    last_significant_char(text).and_then(classify_pause)
}

pub fn ms_per_word(wpm: u32) -> f64 {
    60_000.0 / f64::from(wpm.max(1))
}

pub fn calculate_display_time(chunk: &Chunk, wpm: u32, mode: ChunkMode) -> f64 {
    let ms_word = ms_per_word(wpm);

    if is_break_chunk(chunk) {
        return (BREAK_CHUNK_WORDS * ms_word).max(MIN_DISPLAY_MS);
    }

    let units = lexical_len(&chunk.text) as f64 / AVG_WORD_LENGTH;

    let time = match mode {
        ChunkMode::Word => {
            // at least one unit per word
            let ratio = units.max(chunk.word_count.max(1) as f64).powf(WORD_MODE_EXPONENT);
            let bonus = match trailing_pause(&chunk.text) {
                Some(Pause::Major) => MAJOR_PAUSE_BONUS,
                Some(Pause::Minor) => MINOR_PAUSE_BONUS,
                None => 0.0,
            };
            ms_word * ratio * (1.0 + bonus)
        }
        ChunkMode::Custom => {
            let pauses: f64 = chunk
                .text
                .chars()
                .filter_map(classify_pause)
                .map(|p| match p {
                    Pause::Major => MAJOR_PAUSE_BONUS,
                    Pause::Minor => MINOR_PAUSE_BONUS,
                })
                .sum();
            ms_word * units + ms_word * pauses
        }
    };

    time.max(MIN_DISPLAY_MS)
}

/// Sum of display times from `from_index` to the end; 0 past the end.
pub fn calculate_remaining_time(
    chunks: &[Chunk],
    from_index: usize,
    wpm: u32,
    mode: ChunkMode,
) -> f64 {
    chunks
        .get(from_index..)
        .unwrap_or(&[])
        .iter()
        .map(|c| calculate_display_time(c, wpm, mode))
        .sum()
}
