use crate::config::TrainingParams;
use crate::consts::{
    ARTICLE_MAX_WPM, ARTICLE_MIN_WPM, ARTICLE_WPM_DECREASE, ARTICLE_WPM_INCREASE, SLOW_DOWN_BELOW,
    SPEED_UP_AT,
};
use serde::{Deserialize, Serialize};

/// Whether a score falls outside the "hold steady" band.
pub fn needs_adjustment(score_percent: u32) -> bool {
    score_percent < SLOW_DOWN_BELOW || score_percent >= SPEED_UP_AT
}

/// Article pacing: -25 below 90%, +15 at 95% or above, clamped to 100..=800.
pub fn adjust_article_training_wpm(wpm: u32, score_percent: u32) -> u32 {
    if score_percent < SLOW_DOWN_BELOW {
        wpm.saturating_sub(ARTICLE_WPM_DECREASE).max(ARTICLE_MIN_WPM)
    } else if score_percent >= SPEED_UP_AT {
        wpm.saturating_add(ARTICLE_WPM_INCREASE).min(ARTICLE_MAX_WPM)
    } else {
        wpm
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrillSettings {
    pub min_wpm: u32,
    pub max_wpm: u32,
    pub step: u32,
}

impl DrillSettings {
    pub fn clamp_wpm(&self, wpm: u32) -> u32 {
        // A reversed range collapses onto min_wpm rather than panicking in clamp.
        wpm.min(self.max_wpm).max(self.min_wpm)
    }
}

impl From<&TrainingParams> for DrillSettings {
    fn from(p: &TrainingParams) -> Self {
        Self {
            min_wpm: p.drill_min_wpm,
            max_wpm: p.drill_max_wpm,
            step: p.drill_wpm_step,
        }
    }
}

impl Default for DrillSettings {
    fn default() -> Self {
        DrillSettings::from(&TrainingParams::default())
    }
}

/// Drill pacing: one step down below 90%, one step up at 95%, bounded by the drill range.
pub fn adjust_drill_difficulty(wpm: u32, score_percent: u32, settings: &DrillSettings) -> u32 {
    let next = if score_percent < SLOW_DOWN_BELOW {
        wpm.saturating_sub(settings.step)
    } else if score_percent >= SPEED_UP_AT {
        wpm.saturating_add(settings.step)
    } else {
        wpm
    };
    settings.clamp_wpm(next)
}
