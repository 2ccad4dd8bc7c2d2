use crate::recall::RecallStats;
use serde::{Deserialize, Serialize};

/// Derived from stats on demand, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainingScoreResult {
    /// 0..=100
    pub score_percent: u32,
    /// 0.0..=1.0
    pub score_norm: f64,
    pub effective_total: u32,
    pub effective_known: u32,
}

/// Scores a finished phase. Detail words are left out unless `include_details` is set.
pub fn compute_training_score(stats: &RecallStats, include_details: bool) -> TrainingScoreResult {
    let (effective_total, effective_known) = if include_details {
        (stats.total_words, stats.known_words)
    } else {
        (
            stats.total_words.saturating_sub(stats.detail_total),
            stats.known_words.saturating_sub(stats.detail_known),
        )
    };

    if effective_total == 0 {
        return TrainingScoreResult {
            score_percent: 0,
            score_norm: 0.0,
            effective_total,
            effective_known,
        };
    }

    let known = u64::from(effective_known.min(effective_total));
    let total = u64::from(effective_total);
    // integer round-half-up
    let score_percent = ((200 * known + total) / (2 * total)) as u32;
    let score_norm = (f64::from(effective_known) / f64::from(effective_total)).clamp(0.0, 1.0);

    TrainingScoreResult {
        score_percent,
        score_norm,
        effective_total,
        effective_known,
    }
}
