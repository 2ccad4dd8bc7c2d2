use super::stats::StatsDelta;
use crate::tokenizer::Chunk;
use serde::{Deserialize, Serialize};

/// Stable position key for a chunk: `"page:line:startChar"`, or
/// `"fallback:index"` when the chunk has no saccade metadata.
///
/// Fallback keys follow chunk order, so they only stay stable while the
/// chunk sequence itself is unchanged between calls.
pub fn chunk_key(chunk: &Chunk, index: usize) -> String {
    match &chunk.saccade {
        Some(s) => format!("{}:{}:{}", s.page_index, s.line_index, s.start_char),
        None => format!("fallback:{}", index),
    }
}

/// One reviewed word, appended in order and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredWord {
    pub key: String,
    pub text: String,
    pub correct: bool,
    pub forfeited: bool,
}

/// The last word of a sequence. Its delta is merged when the phase is finalized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinalWord {
    pub key: String,
    pub text: String,
    pub correct: bool,
    pub stats_delta: StatsDelta,
}

impl FinalWord {
    pub fn scored(&self) -> ScoredWord {
        ScoredWord {
            key: self.key.clone(),
            text: self.text.clone(),
            correct: self.correct,
            forfeited: false,
        }
    }
}

/// What the user typed against what the text said, for miss feedback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecallMiss {
    pub key: String,
    pub index: usize,
    pub actual: String,
    pub predicted: String,
    pub is_detail: bool,
}
