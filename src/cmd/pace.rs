use crate::cmd::read_input;
use crate::cmd::tokenize::{tokenize, TokenizeMode};
use crate::reports;
use clap::Args;
use reader::config::Config;
use reader::error::ReaderResult;
use reader::progress::map_chunk_index_by_progress;
use reader::timing::{calculate_display_time, calculate_remaining_time};
use std::path::PathBuf;

#[derive(Args, Debug, Clone)]
pub struct PaceArgs {
    #[command(flatten)]
    pub config: Config,

    #[arg(short, long)]
    pub input: PathBuf,

    #[arg(long, default_value_t = TokenizeMode::Rsvp)]
    pub mode: TokenizeMode,

    /// Rows shown in the timing table.
    #[arg(long, default_value_t = 20)]
    pub limit: usize,

    /// Chunk to resume from; also shows where it lands in the other layouts.
    #[arg(long, default_value_t = 0)]
    pub resume_at: usize,
}

pub fn run(args: &PaceArgs, config: &Config) -> ReaderResult<()> {
    let text = read_input(&args.input)?;
    let chunks = tokenize(&text, args.mode, config).chunks;
    let wpm = config.pacing.wpm;
    let mode = config.pacing.chunk_mode;

    let rows: Vec<(usize, &str, f64)> = chunks
        .iter()
        .enumerate()
        .skip(args.resume_at)
        .take(args.limit)
        .map(|(i, c)| (i, c.text.as_str(), calculate_display_time(c, wpm, mode)))
        .collect();
    reports::print_timing_table(&rows);

    let total_ms = calculate_remaining_time(&chunks, 0, wpm, mode);
    let remaining_ms = calculate_remaining_time(&chunks, args.resume_at, wpm, mode);
    println!(
        "{} chunks at {} WPM ({} mode): total {}, remaining from #{} {}",
        chunks.len(),
        wpm,
        mode,
        reports::format_duration(total_ms),
        args.resume_at,
        reports::format_duration(remaining_ms)
    );

    for other in [TokenizeMode::Saccade, TokenizeMode::Recall, TokenizeMode::Rsvp] {
        if other == args.mode {
            continue;
        }
        let target_len = tokenize(&text, other, config).chunks.len();
        let mapped = map_chunk_index_by_progress(args.resume_at, chunks.len(), target_len);
        println!("  #{} in {} -> #{} in {}", args.resume_at, args.mode, mapped, other);
    }
    Ok(())
}
