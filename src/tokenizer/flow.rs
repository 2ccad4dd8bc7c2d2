use super::types::SaccadeLine;
use regex::Regex;
use std::sync::LazyLock;

static HEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(#{1,6})\s+(.+)$").expect("heading pattern"));

static BLOCK_SPLIT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n[ \t\r]*\n").expect("block pattern"));

static MISSING_SPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([.!?])([A-Z])").expect("sentence spacing pattern"));

/// Inserts the space that extraction sometimes drops between sentences ("end.Next").
pub fn normalize_sentence_spacing(text: &str) -> String {
    MISSING_SPACE_RE.replace_all(text, "$1 $2").into_owned()
}

/// Splits normalized text into blank-line separated blocks, dropping empty ones.
pub fn split_blocks(text: &str) -> Vec<String> {
    let unified = text.replace("\r\n", "\n");
    BLOCK_SPLIT_RE
        .split(&unified)
        .map(str::trim)
        .filter(|b| !b.is_empty())
        .map(str::to_string)
        .collect()
}

/// Returns `(level, heading_text)` if the line is a markdown heading.
pub fn parse_heading(line: &str) -> Option<(u8, &str)> {
    let caps = HEADING_RE.captures(line.trim())?;
    let level = caps.get(1)?.as_str().len() as u8;
    let text = caps.get(2)?.as_str().trim();
    if text.is_empty() {
        return None;
    }
    Some((level, text))
}

/// Greedy word wrap. A word longer than `line_width` gets a line of its own, unbroken.
pub fn wrap_words<'a, I>(words: I, line_width: usize) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for word in words {
        let word_len = word.chars().count();
        if current.is_empty() {
            current.push_str(word);
            current_len = word_len;
        } else if current_len + 1 + word_len <= line_width {
            current.push(' ');
            current.push_str(word);
            current_len += 1 + word_len;
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
            current_len = word_len;
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

fn push_blank(lines: &mut Vec<SaccadeLine>) {
    if matches!(lines.last(), Some(last) if !last.is_blank()) {
        lines.push(SaccadeLine::blank());
    }
}

pub fn flow_text_into_lines(text: &str, line_width: usize) -> Vec<SaccadeLine> {
    let normalized = normalize_sentence_spacing(text);
    let mut lines: Vec<SaccadeLine> = Vec::new();

    for block in split_blocks(&normalized) {
        push_blank(&mut lines);

        let (first, rest) = match block.split_once('\n') {
            Some((first, rest)) => (first, rest),
            None => (block.as_str(), ""),
        };

        let body = if let Some((level, heading)) = parse_heading(first) {
            lines.push(SaccadeLine::heading(heading, level));
            // Headings are always followed by a separator, even at the end of input.
            lines.push(SaccadeLine::blank());
            rest
        } else {
            block.as_str()
        };

        for wrapped in wrap_words(body.split_whitespace(), line_width) {
            lines.push(SaccadeLine::body(wrapped));
        }
    }

    lines
}

/// Whitespace-delimited words with their `[start, end)` char offsets.
pub fn word_spans(text: &str) -> Vec<(usize, usize, &str)> {
    let mut spans = Vec::new();
    let mut start: Option<(usize, usize)> = None;
    let mut char_pos = 0usize;

    for (byte_idx, ch) in text.char_indices() {
        if ch.is_whitespace() {
            if let Some((s_char, s_byte)) = start.take() {
                spans.push((s_char, char_pos, &text[s_byte..byte_idx]));
            }
        } else if start.is_none() {
            start = Some((char_pos, byte_idx));
        }
        char_pos += 1;
    }

    if let Some((s_char, s_byte)) = start {
        spans.push((s_char, char_pos, &text[s_byte..]));
    }
    spans
}
