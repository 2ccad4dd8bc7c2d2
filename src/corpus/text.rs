//! Cleanup, sectioning and unit chunking for source works.

use super::metrics::count_words;
use crate::error::{ReaderError, ReaderResult};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use strum_macros::{Display, EnumString};

static GUTENBERG_START_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\*\*\*\s*START OF (?:THE|THIS) PROJECT GUTENBERG EBOOK .*?\*\*\*")
        .expect("gutenberg start pattern")
});

static GUTENBERG_END_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\*\*\*\s*END OF (?:THE|THIS) PROJECT GUTENBERG EBOOK .*?\*\*\*")
        .expect("gutenberg end pattern")
});

static INLINE_SPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ \t]+").expect("inline space pattern"));
static EXTRA_NEWLINES_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{3,}").expect("newline pattern"));
static SENTENCE_GAP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?](\s+)").expect("sentence gap pattern"));

static TITLE_WORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z][A-Za-z'’-]*$").expect("title word pattern"));
static UPPER_WORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z][A-Z'’-]*$").expect("upper word pattern"));
static SINGLE_WORD_HEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z][a-z]{4,}$").expect("single word heading pattern"));
static NUMERIC_HEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+[.)]?$").expect("numeric heading pattern"));
static ROMAN_HEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^[IVXLCDM]+[.)]?$").expect("roman heading pattern"));
static EMPHASIZED_HEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[_*][^_*]{2,120}[_*]$").expect("emphasized heading pattern"));
static HEADING_WORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Za-z'’-]+").expect("heading word pattern"));

const HEADING_WRAPPERS: &[char] = &[
    ' ', '"', '\'', '“', '”', '‘', '’', '(', ')', '[', ']', '{', '}',
];
const HEADING_PREFIXES: &[&str] = &["chapter ", "book ", "part ", "section "];
const EXCLUDED_SECTION_NAMES: &[&str] = &["INDEX", "THE END", "CONTENTS", "TABLE OF CONTENTS"];
const MAX_HEADING_CHARS: usize = 100;
const MAX_HEADING_WORDS: usize = 12;
const TITLE_LIKE_SHARE: f64 = 0.8;

pub const FULL_TEXT_SECTION: &str = "Full text";
pub const LEAD_SECTION: &str = "Introduction";

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SplitMode {
    #[default]
    Headings,
    None,
}

/// A named run of paragraphs inside a work.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub title: String,
    pub paragraphs: Vec<String>,
}

/// Word-count policy for cutting sections into units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkPolicy {
    pub target_words: usize,
    pub max_words: usize,
    pub min_words: usize,
}

/// Drops the Project Gutenberg header and footer blocks when present.
pub fn strip_gutenberg_boilerplate(text: &str) -> &str {
    let mut body = text;
    if let Some(m) = GUTENBERG_START_RE.find(body) {
        body = &body[m.end()..];
    }
    if let Some(m) = GUTENBERG_END_RE.find(body) {
        body = &body[..m.start()];
    }
    body.trim()
}

pub fn normalize_text(raw: &str) -> String {
    let text = raw.replace("\r\n", "\n").replace('\r', "\n").replace('\u{feff}', "");
    let text = strip_gutenberg_boilerplate(&text);
    let text = INLINE_SPACE_RE.replace_all(text, " ");
    let text = EXTRA_NEWLINES_RE.replace_all(&text, "\n\n");
    text.trim().to_string()
}

/// Blank-line separated paragraphs with their inner lines joined by a space.
pub fn to_paragraphs(text: &str) -> Vec<String> {
    let mut paragraphs = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for line in text.split('\n') {
        let stripped = line.trim();
        if stripped.is_empty() {
            if !current.is_empty() {
                paragraphs.push(current.join(" "));
                current.clear();
            }
            continue;
        }
        current.push(stripped);
    }
    if !current.is_empty() {
        paragraphs.push(current.join(" "));
    }
    paragraphs.retain(|p| !p.trim().is_empty());
    paragraphs
}

fn title_like_share<'a>(words: impl Iterator<Item = &'a str>) -> f64 {
    let (total, title_like) = words.fold((0usize, 0usize), |(n, t), w| {
        let hit = TITLE_WORD_RE.is_match(w) || UPPER_WORD_RE.is_match(w);
        (n + 1, t + usize::from(hit))
    });
    title_like as f64 / total.max(1) as f64
}

/// Chapter and section headings used to split a work into sections.
pub fn looks_like_heading(paragraph: &str) -> bool {
    let p = paragraph.trim();
    if p.is_empty() || p.chars().count() > MAX_HEADING_CHARS {
        return false;
    }
    let trimmed = p.trim_matches(HEADING_WRAPPERS);
    if trimmed.ends_with(['.', '!', '?']) {
        return false;
    }
    let words: Vec<&str> = p.split_whitespace().collect();
    if words.len() > MAX_HEADING_WORDS {
        return false;
    }

    let lower = p.to_lowercase();
    if HEADING_PREFIXES.iter().any(|prefix| lower.starts_with(prefix)) {
        return true;
    }

    if let [only] = words.as_slice() {
        // single title-case words only; roman numerals and all-caps fragments are not headings
        let token: String = only
            .chars()
            .filter(|c| c.is_alphanumeric() || matches!(c, '_' | '\'' | '’' | '-'))
            .collect();
        return SINGLE_WORD_HEADING_RE.is_match(&token);
    }

    title_like_share(words.iter().copied()) >= TITLE_LIKE_SHARE
}

/// Heading stubs inside a section: numbers, roman numerals, emphasised
/// titles, or short unpunctuated title-case lines.
pub fn is_structural_heading_paragraph(paragraph: &str) -> bool {
    let p = paragraph.trim();
    if p.is_empty() {
        return false;
    }
    let plain = p.trim_matches(HEADING_WRAPPERS);

    if NUMERIC_HEADING_RE.is_match(plain)
        || ROMAN_HEADING_RE.is_match(plain)
        || EMPHASIZED_HEADING_RE.is_match(p)
    {
        return true;
    }
    if plain.contains(['.', '!', '?']) {
        return false;
    }

    let words: Vec<&str> = HEADING_WORD_RE.find_iter(plain).map(|m| m.as_str()).collect();
    if words.is_empty() || words.len() > MAX_HEADING_WORDS {
        return false;
    }
    title_like_share(words.into_iter()) >= TITLE_LIKE_SHARE
}

pub fn is_excluded_section_name(name: &str) -> bool {
    let cleaned = name.split_whitespace().collect::<Vec<_>>().join(" ").to_uppercase();
    EXCLUDED_SECTION_NAMES.contains(&cleaned.as_str())
}

fn words_in(paragraphs: &[String]) -> usize {
    paragraphs.iter().map(|p| count_words(p)).sum()
}

pub fn split_sections(
    paragraphs: &[String],
    split_mode: SplitMode,
    min_section_words: usize,
) -> Vec<Section> {
    let full_text = || {
        vec![Section {
            title: FULL_TEXT_SECTION.to_string(),
            paragraphs: paragraphs.to_vec(),
        }]
    };

    if split_mode == SplitMode::None {
        return full_text();
    }

    let headings: Vec<usize> = paragraphs
        .iter()
        .enumerate()
        .filter(|(_, p)| looks_like_heading(p))
        .map(|(i, _)| i)
        .collect();
    let Some(&first_heading) = headings.first() else {
        return full_text();
    };

    let mut sections = Vec::new();

    if first_heading > 0 {
        let lead = &paragraphs[..first_heading];
        if words_in(lead) >= min_section_words {
            sections.push(Section {
                title: LEAD_SECTION.to_string(),
                paragraphs: lead.to_vec(),
            });
        }
    }

    for (n, &heading_index) in headings.iter().enumerate() {
        let body_end = headings.get(n + 1).copied().unwrap_or(paragraphs.len());
        let body = &paragraphs[heading_index + 1..body_end];
        let heading = &paragraphs[heading_index];

        if body.is_empty()
            || words_in(body) < min_section_words
            || is_excluded_section_name(heading)
        {
            continue;
        }
        sections.push(Section {
            title: heading.clone(),
            paragraphs: body.to_vec(),
        });
    }

    if sections.is_empty() {
        return full_text();
    }
    sections
}

/// Splits a paragraph on sentence gaps, keeping the punctuation with its sentence.
fn split_sentences(paragraph: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0usize;
    for caps in SENTENCE_GAP_RE.captures_iter(paragraph) {
        if let Some(gap) = caps.get(1) {
            sentences.push(paragraph[start..gap.start()].trim());
            start = gap.end();
        }
    }
    sentences.push(paragraph[start..].trim());
    sentences.retain(|s| !s.is_empty());
    sentences
}

/// Cuts a paragraph longer than `max_words` at sentence boundaries.
pub fn split_oversized_paragraph(paragraph: &str, policy: &ChunkPolicy) -> Vec<String> {
    let sentences = split_sentences(paragraph);
    if sentences.is_empty() {
        return vec![paragraph.to_string()];
    }

    let mut pieces: Vec<Vec<&str>> = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    let mut current_words = 0usize;

    for sentence in sentences {
        let w = count_words(sentence);
        if !current.is_empty() && current_words + w > policy.max_words {
            pieces.push(std::mem::take(&mut current));
            current_words = 0;
        }
        current.push(sentence);
        current_words += w;

        if current_words >= policy.target_words {
            pieces.push(std::mem::take(&mut current));
            current_words = 0;
        }
    }
    if !current.is_empty() {
        pieces.push(current);
    }

    pieces
        .into_iter()
        .map(|piece| piece.join(" ").trim().to_string())
        .collect()
}

fn emit(current: &mut Vec<&str>, current_words: &mut usize, units: &mut Vec<String>) {
    if current.is_empty() {
        return;
    }
    let text = current.join("\n\n").trim().to_string();
    if !text.is_empty() {
        units.push(text);
    }
    current.clear();
    *current_words = 0;
}

/// Groups a section's paragraphs into units near `target_words`, never above
/// `max_words`. Heading stubs end the current unit and are dropped. Units
/// under `min_words` are folded into the previous one when it has room.
pub fn chunk_section(section: &Section, policy: &ChunkPolicy) -> Vec<(String, String)> {
    let mut units: Vec<String> = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    let mut current_words = 0usize;

    for paragraph in &section.paragraphs {
        if is_structural_heading_paragraph(paragraph) {
            emit(&mut current, &mut current_words, &mut units);
            continue;
        }

        let pw = count_words(paragraph);
        if pw > policy.max_words {
            emit(&mut current, &mut current_words, &mut units);
            units.extend(split_oversized_paragraph(paragraph, policy));
            continue;
        }

        if !current.is_empty() && current_words + pw > policy.max_words {
            emit(&mut current, &mut current_words, &mut units);
        }
        current.push(paragraph);
        current_words += pw;

        if current_words >= policy.target_words {
            emit(&mut current, &mut current_words, &mut units);
        }
    }
    emit(&mut current, &mut current_words, &mut units);

    let mut merged: Vec<String> = Vec::with_capacity(units.len());
    for text in units {
        let w = count_words(&text);
        match merged.last_mut() {
            Some(prev) if w < policy.min_words && count_words(prev) + w <= policy.max_words => {
                prev.push_str("\n\n");
                prev.push_str(&text);
            }
            _ => merged.push(text),
        }
    }

    merged
        .into_iter()
        .map(|text| (section.title.clone(), text))
        .collect()
}

impl ChunkPolicy {
    pub fn validate(&self, ceiling: usize) -> ReaderResult<()> {
        if self.max_words > ceiling {
            return Err(ReaderError::Config(format!(
                "max_words ({}) cannot exceed {} for drillability",
                self.max_words, ceiling
            )));
        }
        if self.target_words > self.max_words {
            return Err(ReaderError::Config(format!(
                "target_words ({}) cannot exceed max_words ({})",
                self.target_words, self.max_words
            )));
        }
        Ok(())
    }
}
