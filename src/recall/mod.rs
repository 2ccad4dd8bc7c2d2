//! Recall and prediction scoring.
//!
//! Every function here is a pure transition: the caller owns the running
//! [`RecallStats`] and folds the returned deltas in.

pub mod consume;
pub mod matching;
pub mod scaffold;
pub mod stats;
pub mod word;

pub use consume::{
    build_remaining_miss_stats, consume_recall_tokens, ConsumeRecallInput, ConsumeRecallResult,
    ForfeitSet,
};
pub use matching::{evaluate_word, is_detail_chunk, is_sentence_initial, WordMatch};
pub use scaffold::{
    plan_scaffold_miss_continue, plan_scaffold_recall_submission,
    plan_scaffold_recall_transition, RecallSubmission, RecallTransitionInput, ScaffoldRecallPlan,
    ScaffoldTransition,
};
pub use stats::{apply_stats_delta, RecallStats, StatsDelta};
pub use word::{chunk_key, FinalWord, RecallMiss, ScoredWord};
