use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Outcome of one scored article paragraph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResult {
    pub paragraph_index: usize,
    /// 0.0..=1.0
    pub score: f64,
    pub wpm: u32,
    pub repeat: bool,
    pub word_count: u32,
    pub exact_matches: u32,
}

/// Record handed to the persistence layer after each article paragraph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryUpdate {
    pub article_id: String,
    pub session: SessionResult,
    pub next_wpm: u32,
    pub completed_at_ms: u64,
}

/// Per-article training history as the host application stores it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TrainingHistory {
    pub current_wpm: Option<u32>,
    pub sessions: Vec<SessionResult>,
    /// Best normalized score per paragraph.
    pub best_scores: BTreeMap<usize, f64>,
    pub last_completed_at_ms: Option<u64>,
}

impl TrainingHistory {
    pub fn apply(&mut self, update: &HistoryUpdate) {
        let entry = self
            .best_scores
            .entry(update.session.paragraph_index)
            .or_insert(update.session.score);
        if update.session.score > *entry {
            *entry = update.session.score;
        }

        self.sessions.push(update.session.clone());
        self.current_wpm = Some(update.next_wpm);
        self.last_completed_at_ms = Some(update.completed_at_ms);
    }

    /// Whether the paragraph has been scored before; a new attempt is a repeat.
    pub fn has_attempted(&self, paragraph_index: usize) -> bool {
        self.best_scores.contains_key(&paragraph_index)
    }
}
