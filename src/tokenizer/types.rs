use crate::consts::BREAK_MARKER;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// Where a chunk sits on a rendered saccade page. Offsets are in chars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaccadeInfo {
    pub page_index: usize,
    pub line_index: usize,
    pub start_char: usize,
    pub end_char: usize,
}

/// The unit of paced display and of recall scoring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chunk {
    pub text: String,
    pub word_count: usize,
    pub orp_index: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saccade: Option<SaccadeInfo>,
}

impl Chunk {
    /// Paragraph separator in a free-floating word stream.
    pub fn break_marker() -> Self {
        Self {
            text: BREAK_MARKER.to_string(),
            word_count: 0,
            orp_index: 0,
            saccade: None,
        }
    }

    pub fn is_break(&self) -> bool {
        is_break_chunk(self)
    }
}

pub fn is_break_chunk(chunk: &Chunk) -> bool {
    chunk.text.trim() == BREAK_MARKER
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum LineType {
    Body,
    Heading,
    Blank,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaccadeLine {
    pub text: String,
    #[serde(rename = "type")]
    pub line_type: LineType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<u8>,
}

impl SaccadeLine {
    pub fn body(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            line_type: LineType::Body,
            level: None,
        }
    }

    pub fn heading(text: impl Into<String>, level: u8) -> Self {
        Self {
            text: text.into(),
            line_type: LineType::Heading,
            level: Some(level),
        }
    }

    pub fn blank() -> Self {
        Self {
            text: String::new(),
            line_type: LineType::Blank,
            level: None,
        }
    }

    pub fn is_blank(&self) -> bool {
        self.line_type == LineType::Blank
    }
}

/// `line_chunks[i]` holds the chunks rendered on `lines[i]`; empty for blank lines.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaccadePage {
    pub lines: Vec<SaccadeLine>,
    pub line_chunks: Vec<Vec<Chunk>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tokenized {
    pub pages: Vec<SaccadePage>,
    pub chunks: Vec<Chunk>,
}
