/// Average English word length (letters) used to convert character counts into word units.
pub const AVG_WORD_LENGTH: f64 = 4.7;

/// Exponent applied to the word-unit count in word-mode pacing.
/// Below 1.0 so that longer chunks cost less than the sum of their words.
pub const WORD_MODE_EXPONENT: f64 = 0.75;

/// No chunk is ever shown for less than this, regardless of WPM.
pub const MIN_DISPLAY_MS: f64 = 80.0;

/// Multiplicative bonus for a chunk ending in `.`, `?` or `!` (word mode).
pub const MAJOR_PAUSE_BONUS: f64 = 0.5;

/// Multiplicative bonus for a chunk ending in `,` or `;` (word mode).
pub const MINOR_PAUSE_BONUS: f64 = 0.25;

/// Break chunks always cost this many words.
pub const BREAK_CHUNK_WORDS: f64 = 2.0;

/// Rendered text of a paragraph separator in the RSVP stream.
pub const BREAK_MARKER: &str = "· · ·";

/// Saccade layout defaults.
pub const SACCADE_LINE_WIDTH: usize = 80;
pub const SACCADE_LINES_PER_PAGE: usize = 10;

/// Article training thresholds (score percent).
pub const SLOW_DOWN_BELOW: u32 = 90;
pub const SPEED_UP_AT: u32 = 95;

/// Article training WPM adjustment.
pub const ARTICLE_WPM_DECREASE: u32 = 25;
pub const ARTICLE_WPM_INCREASE: u32 = 15;
pub const ARTICLE_MIN_WPM: u32 = 100;
pub const ARTICLE_MAX_WPM: u32 = 800;

/// Masking ratios per difficulty.
pub const NORMAL_MASK_RATIO: f64 = 0.25;
pub const HARD_MASK_RATIO: f64 = 0.40;

/// Placeholder written in place of a masked letter.
pub const MASK_CHAR: char = '_';

/// Corpus unit policy.
pub const DEFAULT_TARGET_WORDS: usize = 6000;
pub const DEFAULT_MAX_WORDS: usize = 8000;
pub const DEFAULT_MIN_WORDS: usize = 1200;
pub const DEFAULT_MIN_SECTION_WORDS: usize = 250;
pub const DEFAULT_MIN_UNIT_WORDS: usize = 800;

/// Hard ceiling on `max_words` so every unit stays drillable.
pub const MAX_DRILL_UNIT_WORDS: usize = 8000;
