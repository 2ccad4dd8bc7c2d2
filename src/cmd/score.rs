use crate::cmd::read_input;
use crate::reports;
use clap::Args;
use reader::config::Config;
use reader::error::ReaderResult;
use reader::recall::{
    build_remaining_miss_stats, consume_recall_tokens, ConsumeRecallInput, ForfeitSet,
    RecallStats,
};
use reader::tokenizer::tokenize_recall_with;
use reader::training::{
    plan_finish_recall_phase, DrillSettings, FinishRecallContext, FinishRecallPhasePlan,
    TrainingMode,
};
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct ScoreArgs {
    #[command(flatten)]
    pub config: Config,

    /// Source passage.
    #[arg(short, long)]
    pub input: PathBuf,

    /// What the reader typed back, whitespace separated.
    #[arg(short, long)]
    pub typed: PathBuf,

    #[arg(long, default_value_t = TrainingMode::Article)]
    pub mode: TrainingMode,

    /// Position keys ("page:line:start") whose credit is forfeited.
    #[arg(long)]
    pub forfeit: Vec<String>,

    #[arg(long, default_value = "cli")]
    pub article_id: String,
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

pub fn run(args: &ScoreArgs, config: &Config) -> ReaderResult<()> {
    let source = read_input(&args.input)?;
    let typed = read_input(&args.typed)?;

    let chunks = tokenize_recall_with(&source, &config.flow).chunks;
    let tokens: Vec<&str> = typed.split_whitespace().collect();
    let forfeited: ForfeitSet = args.forfeit.iter().cloned().collect();

    let consumed = consume_recall_tokens(ConsumeRecallInput {
        chunks: &chunks,
        start_index: 0,
        tokens: &tokens,
        stats: RecallStats::default(),
        forfeited_word_keys: &forfeited,
    });

    let stats = if consumed.next_index < chunks.len() {
        info!(
            "{} of {} words typed; the rest count as missed",
            consumed.next_index,
            chunks.len()
        );
        build_remaining_miss_stats(&chunks, consumed.next_index, consumed.stats)
    } else {
        consumed.stats
    };

    reports::print_recall_report(&consumed.scored_words);

    let plan = plan_finish_recall_phase(&FinishRecallContext {
        mode: args.mode,
        granularity: config.training.granularity,
        stats,
        final_word: None,
        article_id: args.article_id.clone(),
        paragraph_index: 0,
        sentence_index: 0,
        sentence_count: 1,
        is_repeat: false,
        wpm: config.pacing.wpm,
        include_details_in_score: config.training.include_details_in_score,
        auto_adjust_difficulty: config.training.auto_adjust_difficulty,
        drill: DrillSettings::from(&config.training),
        completed_at_ms: now_ms(),
    });

    if let FinishRecallPhasePlan::ToFeedback(feedback) = &plan {
        reports::print_score_summary(&stats, feedback.score(), feedback.next_wpm());
    }
    println!("{}", serde_json::to_string_pretty(&plan)?);
    Ok(())
}
