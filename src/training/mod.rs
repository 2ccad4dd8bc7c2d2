//! Turns finished recall phases into feedback and pacing changes.

pub mod history;
pub mod plan;
pub mod score;
pub mod wpm;

pub use history::{HistoryUpdate, SessionResult, TrainingHistory};
pub use plan::{
    feedback_message, plan_finish_recall_phase, FeedbackPlan, FinishRecallContext,
    FinishRecallPhasePlan, RecallGranularity, TrainingMode,
};
pub use score::{compute_training_score, TrainingScoreResult};
pub use wpm::{adjust_article_training_wpm, adjust_drill_difficulty, DrillSettings};
