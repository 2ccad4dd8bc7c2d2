use super::history::{HistoryUpdate, SessionResult};
use super::score::{compute_training_score, TrainingScoreResult};
use super::wpm::{adjust_article_training_wpm, adjust_drill_difficulty, needs_adjustment, DrillSettings};
use crate::recall::{apply_stats_delta, FinalWord, RecallStats};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};
use tracing::debug;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TrainingMode {
    /// Paragraph-sequential reading of a full article.
    #[default]
    Article,
    /// Short repeating recall exercise.
    Drill,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum RecallGranularity {
    #[default]
    Sentence,
    Paragraph,
}

#[derive(Debug, Clone)]
pub struct FinishRecallContext {
    pub mode: TrainingMode,
    pub granularity: RecallGranularity,
    pub stats: RecallStats,
    pub final_word: Option<FinalWord>,

    pub article_id: String,
    pub paragraph_index: usize,
    pub sentence_index: usize,
    pub sentence_count: usize,
    pub is_repeat: bool,

    pub wpm: u32,
    pub include_details_in_score: bool,
    pub auto_adjust_difficulty: bool,
    pub drill: DrillSettings,

    /// Supplied by the caller so the planner stays free of clocks.
    pub completed_at_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "camelCase")]
pub enum FeedbackPlan {
    #[serde(rename_all = "camelCase")]
    Drill {
        stats: RecallStats,
        score: TrainingScoreResult,
        wpm: u32,
        next_wpm: u32,
        message: String,
    },
    #[serde(rename_all = "camelCase")]
    Article {
        stats: RecallStats,
        score: TrainingScoreResult,
        wpm: u32,
        next_wpm: u32,
        message: String,
        session_result: SessionResult,
        history_update: HistoryUpdate,
    },
}

impl FeedbackPlan {
    pub fn next_wpm(&self) -> u32 {
        match self {
            FeedbackPlan::Drill { next_wpm, .. } | FeedbackPlan::Article { next_wpm, .. } => {
                *next_wpm
            }
        }
    }

    pub fn score(&self) -> &TrainingScoreResult {
        match self {
            FeedbackPlan::Drill { score, .. } | FeedbackPlan::Article { score, .. } => score,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum FinishRecallPhasePlan {
    #[serde(rename_all = "camelCase")]
    AdvanceSentence {
        stats: RecallStats,
        next_sentence_index: usize,
    },
    ToFeedback(FeedbackPlan),
}

/// One-line summary shown on the feedback screen.
pub fn feedback_message(score_percent: u32, wpm: u32, next_wpm: u32) -> String {
    use std::cmp::Ordering;
    match next_wpm.cmp(&wpm) {
        Ordering::Less => format!(
            "{}% recalled. Slowing down to {} WPM.",
            score_percent, next_wpm
        ),
        Ordering::Greater => format!(
            "{}% recalled. Speeding up to {} WPM.",
            score_percent, next_wpm
        ),
        Ordering::Equal => format!("{}% recalled. Staying at {} WPM.", score_percent, wpm),
    }
}

/// Closes a recall phase: merges the trailing word, then either moves to the
/// next sentence or scores the phase and plans the WPM change.
pub fn plan_finish_recall_phase(ctx: &FinishRecallContext) -> FinishRecallPhasePlan {
    let stats = match &ctx.final_word {
        Some(word) => apply_stats_delta(ctx.stats, word.stats_delta),
        None => ctx.stats,
    };

    if ctx.mode == TrainingMode::Article
        && ctx.granularity == RecallGranularity::Sentence
        && ctx.sentence_index + 1 < ctx.sentence_count
    {
        return FinishRecallPhasePlan::AdvanceSentence {
            stats,
            next_sentence_index: ctx.sentence_index + 1,
        };
    }

    let score = compute_training_score(&stats, ctx.include_details_in_score);

    let plan = match ctx.mode {
        TrainingMode::Drill => {
            let next_wpm = if ctx.auto_adjust_difficulty && needs_adjustment(score.score_percent) {
                adjust_drill_difficulty(ctx.wpm, score.score_percent, &ctx.drill)
            } else {
                ctx.wpm
            };
            FeedbackPlan::Drill {
                stats,
                score,
                wpm: ctx.wpm,
                next_wpm,
                message: feedback_message(score.score_percent, ctx.wpm, next_wpm),
            }
        }
        TrainingMode::Article => {
            let next_wpm = adjust_article_training_wpm(ctx.wpm, score.score_percent);
            let session_result = SessionResult {
                paragraph_index: ctx.paragraph_index,
                score: score.score_norm,
                wpm: ctx.wpm,
                repeat: ctx.is_repeat,
                word_count: stats.total_words,
                exact_matches: stats.exact_matches,
            };
            let history_update = HistoryUpdate {
                article_id: ctx.article_id.clone(),
                session: session_result.clone(),
                next_wpm,
                completed_at_ms: ctx.completed_at_ms,
            };
            FeedbackPlan::Article {
                stats,
                score,
                wpm: ctx.wpm,
                next_wpm,
                message: feedback_message(score.score_percent, ctx.wpm, next_wpm),
                session_result,
                history_update,
            }
        }
    };

    debug!(
        "{} phase scored {}% ({} -> {} WPM)",
        ctx.mode,
        score.score_percent,
        ctx.wpm,
        plan.next_wpm()
    );

    FinishRecallPhasePlan::ToFeedback(plan)
}
