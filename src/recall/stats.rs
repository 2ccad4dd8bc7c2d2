use serde::{Deserialize, Serialize};
use std::iter::Sum;
use std::ops::{Add, AddAssign};

/// Running recall counters. Only ever grows.
///
/// Invariant: `known_words <= total_words` and
/// `detail_known <= detail_total <= total_words`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecallStats {
    pub total_words: u32,
    pub exact_matches: u32,
    pub known_words: u32,
    pub detail_total: u32,
    pub detail_known: u32,
}

/// A delta has the same shape as the totals it is folded into.
pub type StatsDelta = RecallStats;

impl RecallStats {
    /// Delta for one attempted word.
    pub fn for_word(is_known: bool, is_exact: bool, is_detail: bool) -> Self {
        Self {
            total_words: 1,
            exact_matches: u32::from(is_known && is_exact),
            known_words: u32::from(is_known),
            detail_total: u32::from(is_detail),
            detail_known: u32::from(is_detail && is_known),
        }
    }

    /// Delta for an attempted-and-missed word.
    pub fn miss(is_detail: bool) -> Self {
        Self::for_word(false, false, is_detail)
    }

    pub fn is_consistent(&self) -> bool {
        self.known_words <= self.total_words
            && self.exact_matches <= self.known_words
            && self.detail_known <= self.detail_total
            && self.detail_total <= self.total_words
            && self.detail_known <= self.known_words
    }
}

/// Folds a delta into running totals. Associative and commutative.
pub fn apply_stats_delta(stats: RecallStats, delta: StatsDelta) -> RecallStats {
    RecallStats {
        total_words: stats.total_words.saturating_add(delta.total_words),
        exact_matches: stats.exact_matches.saturating_add(delta.exact_matches),
        known_words: stats.known_words.saturating_add(delta.known_words),
        detail_total: stats.detail_total.saturating_add(delta.detail_total),
        detail_known: stats.detail_known.saturating_add(delta.detail_known),
    }
}

impl Add for RecallStats {
    type Output = RecallStats;

    fn add(self, rhs: RecallStats) -> RecallStats {
        apply_stats_delta(self, rhs)
    }
}

impl AddAssign for RecallStats {
    fn add_assign(&mut self, rhs: RecallStats) {
        *self = apply_stats_delta(*self, rhs);
    }
}

impl Sum for RecallStats {
    fn sum<I: Iterator<Item = RecallStats>>(iter: I) -> Self {
        iter.fold(RecallStats::default(), apply_stats_delta)
    }
}
