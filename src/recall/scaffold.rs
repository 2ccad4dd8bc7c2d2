use super::matching::{evaluate_word, is_detail_chunk};
use super::stats::{RecallStats, StatsDelta};
use super::word::{chunk_key, FinalWord, RecallMiss, ScoredWord};
use crate::error::{ReaderError, ReaderResult};
use crate::tokenizer::Chunk;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecallTransitionInput {
    pub is_known: bool,
    pub is_exact: bool,
    pub is_detail: bool,
    pub is_drill: bool,
    pub current_index: usize,
    pub chunk_count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScaffoldTransition {
    Advance {
        next_index: usize,
        stats_delta: StatsDelta,
    },
    /// Last chunk answered. The delta is not merged yet; the caller finalizes it.
    Finish { stats_delta: StatsDelta },
    /// Re-prompt the same chunk. No stats change, no index change.
    ShowMiss,
}

/// Pure per-submission rule of the scaffold.
///
/// Drills never stop on a miss: they advance and record the failure.
pub fn plan_scaffold_recall_transition(input: RecallTransitionInput) -> ScaffoldTransition {
    if !input.is_known && !input.is_drill {
        return ScaffoldTransition::ShowMiss;
    }

    let stats_delta = if input.is_known {
        RecallStats::for_word(true, input.is_exact, input.is_detail)
    } else {
        RecallStats::miss(input.is_detail)
    };

    let next_index = input.current_index + 1;
    if next_index < input.chunk_count {
        ScaffoldTransition::Advance {
            next_index,
            stats_delta,
        }
    } else {
        ScaffoldTransition::Finish { stats_delta }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScaffoldRecallPlan {
    Advance {
        next_index: usize,
        stats_delta: StatsDelta,
        scored: ScoredWord,
    },
    Finish {
        final_word: FinalWord,
    },
    ShowMiss {
        miss: RecallMiss,
    },
}

#[derive(Debug, Clone, Copy)]
pub struct RecallSubmission<'a> {
    pub chunks: &'a [Chunk],
    pub current_index: usize,
    pub typed: &'a str,
    pub is_drill: bool,
}

/// Scores one typed token against the current chunk.
///
/// A wrong answer always comes back as `ShowMiss` so the miss can be shown;
/// drills then move on through [`plan_scaffold_miss_continue`].
pub fn plan_scaffold_recall_submission(
    submission: RecallSubmission<'_>,
) -> ReaderResult<ScaffoldRecallPlan> {
    let RecallSubmission {
        chunks,
        current_index,
        typed,
        is_drill,
    } = submission;

    let chunk = chunks.get(current_index).ok_or_else(|| {
        ReaderError::Sequencing(format!(
            "submission at index {} but only {} chunks",
            current_index,
            chunks.len()
        ))
    })?;

    let key = chunk_key(chunk, current_index);
    let is_detail = is_detail_chunk(chunks, current_index);
    let verdict = evaluate_word(&chunk.text, typed, is_detail);

    if !verdict.known {
        return Ok(ScaffoldRecallPlan::ShowMiss {
            miss: RecallMiss {
                key,
                index: current_index,
                actual: chunk.text.clone(),
                predicted: typed.trim().to_string(),
                is_detail,
            },
        });
    }

    let transition = plan_scaffold_recall_transition(RecallTransitionInput {
        is_known: true,
        is_exact: verdict.exact,
        is_detail,
        is_drill,
        current_index,
        chunk_count: chunks.len(),
    });

    into_plan(transition, key, &chunk.text, true)
}

/// Drill-only continuation after a miss was shown: records the failure and moves on.
pub fn plan_scaffold_miss_continue(
    miss: &RecallMiss,
    chunk_count: usize,
    is_drill: bool,
) -> ReaderResult<ScaffoldRecallPlan> {
    let transition = plan_scaffold_recall_transition(RecallTransitionInput {
        is_known: false,
        is_exact: false,
        is_detail: miss.is_detail,
        is_drill,
        current_index: miss.index,
        chunk_count,
    });

    if transition == ScaffoldTransition::ShowMiss {
        warn!("miss-continue requested outside drill mode at {}", miss.key);
    }

    into_plan(transition, miss.key.clone(), &miss.actual, false).map_err(|_| {
        ReaderError::Sequencing("miss continuation is only valid in drill mode".to_string())
    })
}

fn into_plan(
    transition: ScaffoldTransition,
    key: String,
    text: &str,
    correct: bool,
) -> ReaderResult<ScaffoldRecallPlan> {
    match transition {
        ScaffoldTransition::Advance {
            next_index,
            stats_delta,
        } => Ok(ScaffoldRecallPlan::Advance {
            next_index,
            stats_delta,
            scored: ScoredWord {
                key,
                text: text.to_string(),
                correct,
                forfeited: false,
            },
        }),
        ScaffoldTransition::Finish { stats_delta } => Ok(ScaffoldRecallPlan::Finish {
            final_word: FinalWord {
                key,
                text: text.to_string(),
                correct,
                stats_delta,
            },
        }),
        ScaffoldTransition::ShowMiss => Err(ReaderError::Sequencing(
            "a known answer cannot produce a miss".to_string(),
        )),
    }
}
