use crate::error::{ReaderError, ReaderResult};
use crate::masking::MaskDifficulty;
use crate::timing::ChunkMode;
use crate::training::RecallGranularity;
use clap::{parser::ValueSource, ArgMatches, Args};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Args, Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    #[command(flatten)]
    pub pacing: PacingParams,
    #[command(flatten)]
    pub training: TrainingParams,
    #[command(flatten)]
    pub flow: FlowParams,
    #[command(flatten)]
    pub masking: MaskingParams,
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PacingParams {
    #[arg(long, default_value_t = 300)]
    pub wpm: u32,
    #[arg(long, default_value_t = ChunkMode::Word)]
    pub chunk_mode: ChunkMode,
}

impl Default for PacingParams {
    fn default() -> Self {
        Self {
            wpm: 300,
            chunk_mode: ChunkMode::Word,
        }
    }
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingParams {
    // === DRILL ===
    #[arg(long, default_value_t = 250)]
    pub drill_min_wpm: u32,
    #[arg(long, default_value_t = 360)]
    pub drill_max_wpm: u32,
    #[arg(long, default_value_t = 10)]
    pub drill_wpm_step: u32,
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    pub auto_adjust_difficulty: bool,

    // === SCORING ===
    #[arg(long, default_value_t = false)]
    pub include_details_in_score: bool,
    #[arg(long, default_value_t = RecallGranularity::Sentence)]
    pub granularity: RecallGranularity,
}

impl Default for TrainingParams {
    fn default() -> Self {
        Self {
            drill_min_wpm: 250,
            drill_max_wpm: 360,
            drill_wpm_step: 10,
            auto_adjust_difficulty: true,
            include_details_in_score: false,
            granularity: RecallGranularity::Sentence,
        }
    }
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FlowParams {
    #[arg(long, default_value_t = 80)]
    pub line_width: usize,
    #[arg(long, default_value_t = 10)]
    pub lines_per_page: usize,
}

impl Default for FlowParams {
    fn default() -> Self {
        Self {
            line_width: crate::consts::SACCADE_LINE_WIDTH,
            lines_per_page: crate::consts::SACCADE_LINES_PER_PAGE,
        }
    }
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MaskingParams {
    #[arg(long, default_value_t = MaskDifficulty::Normal)]
    pub difficulty: MaskDifficulty,
    #[arg(long, default_value_t = 0)]
    pub mask_seed: u64,
}

impl Default for MaskingParams {
    fn default() -> Self {
        Self {
            difficulty: MaskDifficulty::Normal,
            mask_seed: 0,
        }
    }
}

macro_rules! update_if_present {
    ($target:ident, $cli:ident, $matches:ident, $field:ident) => {
        if $matches.value_source(stringify!($field)) == Some(ValueSource::CommandLine) {
            $target.$field = $cli.$field.clone();
        }
    };
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> ReaderResult<Self> {
        let content = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Copies every value the user typed on the command line over the file-based config.
    pub fn merge_from_cli(&mut self, cli: &Config, matches: &ArgMatches) {
        let pacing = &mut self.pacing;
        let cli_pacing = &cli.pacing;
        update_if_present!(pacing, cli_pacing, matches, wpm);
        update_if_present!(pacing, cli_pacing, matches, chunk_mode);

        let training = &mut self.training;
        let cli_training = &cli.training;
        update_if_present!(training, cli_training, matches, drill_min_wpm);
        update_if_present!(training, cli_training, matches, drill_max_wpm);
        update_if_present!(training, cli_training, matches, drill_wpm_step);
        update_if_present!(training, cli_training, matches, auto_adjust_difficulty);
        update_if_present!(training, cli_training, matches, include_details_in_score);
        update_if_present!(training, cli_training, matches, granularity);

        let flow = &mut self.flow;
        let cli_flow = &cli.flow;
        update_if_present!(flow, cli_flow, matches, line_width);
        update_if_present!(flow, cli_flow, matches, lines_per_page);

        let masking = &mut self.masking;
        let cli_masking = &cli.masking;
        update_if_present!(masking, cli_masking, matches, difficulty);
        update_if_present!(masking, cli_masking, matches, mask_seed);
    }

    pub fn validate(&self) -> ReaderResult<()> {
        if self.pacing.wpm == 0 {
            return Err(ReaderError::Config("wpm must be greater than 0".to_string()));
        }
        if self.training.drill_min_wpm > self.training.drill_max_wpm {
            return Err(ReaderError::Config(format!(
                "drill_min_wpm ({}) exceeds drill_max_wpm ({})",
                self.training.drill_min_wpm, self.training.drill_max_wpm
            )));
        }
        if self.flow.line_width == 0 || self.flow.lines_per_page == 0 {
            return Err(ReaderError::Config(
                "line_width and lines_per_page must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}
