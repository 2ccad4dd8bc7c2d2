//! Picks a sentence, paragraph, or trailing span of lines around a focus
//! point so it can be queued for spaced review.

use crate::text::{ends_with_terminal_punctuation, last_significant_char, trim_to_core};
use crate::tokenizer::{word_spans, LineType, SaccadePage};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// Abbreviations whose trailing period does not end a sentence.
const ABBREVIATIONS: &[&str] = &[
    "capt", "co", "col", "corp", "dr", "e.g", "etc", "fig", "gen", "gov", "i.e", "inc", "jr",
    "lt", "ltd", "mr", "mrs", "ms", "mt", "no", "prof", "rev", "sgt", "sr", "st", "vol", "vs",
];

/// A rendered line with its position in the whole document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlatLine {
    pub global_index: usize,
    pub page_index: usize,
    pub line_index: usize,
    pub text: String,
    #[serde(rename = "type")]
    pub line_type: LineType,
}

impl FlatLine {
    fn is_blank(&self) -> bool {
        self.line_type == LineType::Blank || self.text.trim().is_empty()
    }
}

pub fn flatten_pages(pages: &[SaccadePage]) -> Vec<FlatLine> {
    pages
        .iter()
        .enumerate()
        .flat_map(|(page_index, page)| {
            page.lines
                .iter()
                .enumerate()
                .map(move |(line_index, line)| (page_index, line_index, line))
        })
        .enumerate()
        .map(|(global_index, (page_index, line_index, line))| FlatLine {
            global_index,
            page_index,
            line_index,
            text: line.text.clone(),
            line_type: line.line_type,
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum CaptureKind {
    Sentence,
    Paragraph,
    LastLines,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapturePlan {
    pub kind: CaptureKind,
    pub text: String,
    pub lines: Vec<FlatLine>,
}

/// Inclusive range of non-blank lines around `focus`, bounded by blank lines
/// or the ends of `lines`. `None` when the focus line is blank or missing.
pub fn get_contiguous_non_blank_line_range(
    lines: &[FlatLine],
    focus: usize,
) -> Option<(usize, usize)> {
    if lines.get(focus)?.is_blank() {
        return None;
    }
    let mut start = focus;
    while start > 0 && !lines[start - 1].is_blank() {
        start -= 1;
    }
    let mut end = focus;
    while end + 1 < lines.len() && !lines[end + 1].is_blank() {
        end += 1;
    }
    Some((start, end))
}

/// Token-level sentence end: `.?!` (through closing quotes) that is not an
/// abbreviation or a single-letter initial.
pub fn is_sentence_boundary_token(token: &str) -> bool {
    if !ends_with_terminal_punctuation(token) {
        return false;
    }
    if last_significant_char(token) != Some('.') {
        return true;
    }

    let stem = token
        .trim_end_matches(|c: char| crate::text::is_closing_wrapper(c) || c == '.')
        .trim_start_matches(|c: char| !c.is_alphanumeric())
        .to_lowercase();

    let mut letters = stem.chars();
    if let (Some(c), None) = (letters.next(), letters.next()) {
        if c.is_alphabetic() {
            return false;
        }
    }
    ABBREVIATIONS.binary_search(&stem.as_str()).is_err()
}

/// Paragraph text joined with single spaces, with each line's char span.
struct Joined {
    text: Vec<char>,
    segments: Vec<(usize, usize)>,
}

fn join_lines(lines: &[FlatLine]) -> Joined {
    let mut text: Vec<char> = Vec::new();
    let mut segments = Vec::with_capacity(lines.len());
    for line in lines {
        if !text.is_empty() {
            text.push(' ');
        }
        let start = text.len();
        text.extend(line.text.trim().chars());
        segments.push((start, text.len()));
    }
    Joined { text, segments }
}

pub fn plan_paragraph_capture(lines: &[FlatLine], focus: usize) -> Option<CapturePlan> {
    let (start, end) = get_contiguous_non_blank_line_range(lines, focus)?;
    let span = &lines[start..=end];
    Some(CapturePlan {
        kind: CaptureKind::Paragraph,
        text: join_lines(span).text.into_iter().collect(),
        lines: span.to_vec(),
    })
}

pub fn plan_sentence_capture(lines: &[FlatLine], focus: usize) -> Option<CapturePlan> {
    let (start, end) = get_contiguous_non_blank_line_range(lines, focus)?;
    let span = &lines[start..=end];
    let joined = join_lines(span);
    let text: String = joined.text.iter().collect();

    let tokens = word_spans(&text);
    if tokens.is_empty() {
        return None;
    }

    let focus_segment = joined.segments[focus - start];
    let (seg_start, seg_end) = if focus_segment.0 < focus_segment.1 {
        focus_segment
    } else {
        joined.segments[joined.segments.len() / 2]
    };
    let anchor = (seg_start + seg_end) / 2;

    let anchor_token = tokens
        .iter()
        .rposition(|&(s, _, _)| s <= anchor)
        .unwrap_or(0);

    let mut first = anchor_token;
    while first > 0 && !is_sentence_boundary_token(tokens[first - 1].2) {
        first -= 1;
    }
    let mut last = anchor_token;
    while last + 1 < tokens.len() && !is_sentence_boundary_token(tokens[last].2) {
        last += 1;
    }

    let (from, to) = (tokens[first].0, tokens[last].1);
    let sentence: String = joined.text[from..to].iter().collect();
    let covered = span
        .iter()
        .zip(&joined.segments)
        .filter(|&(_, &(s, e))| s < to && e > from)
        .map(|(line, _)| line.clone())
        .collect();

    Some(CapturePlan {
        kind: CaptureKind::Sentence,
        text: sentence,
        lines: covered,
    })
}

/// Up to `count` non-blank lines ending at `focus`, same page only, in reading order.
pub fn plan_last_lines_capture(
    lines: &[FlatLine],
    focus: usize,
    count: usize,
) -> Option<CapturePlan> {
    let page = lines.get(focus)?.page_index;
    let mut picked: Vec<FlatLine> = lines[..=focus]
        .iter()
        .rev()
        .take_while(|l| l.page_index == page)
        .filter(|l| !l.is_blank() && !trim_to_core(&l.text).is_empty())
        .take(count)
        .cloned()
        .collect();

    if picked.is_empty() {
        return None;
    }
    picked.reverse();

    let text = picked
        .iter()
        .map(|l| l.text.trim())
        .collect::<Vec<_>>()
        .join("\n");
    Some(CapturePlan {
        kind: CaptureKind::LastLines,
        text,
        lines: picked,
    })
}
