use crate::cmd::read_input;
use crate::reports;
use clap::Args;
use reader::config::Config;
use reader::error::ReaderResult;
use reader::tokenizer::{
    tokenize_recall_with, tokenize_rsvp, tokenize_saccade_with, Chunk, Tokenized,
};
use std::path::PathBuf;
use strum_macros::{Display, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum TokenizeMode {
    /// One chunk per rendered line.
    Saccade,
    /// One chunk per word, with line offsets.
    Recall,
    /// Free-floating word stream with paragraph breaks.
    Rsvp,
}

#[derive(Args, Debug, Clone)]
pub struct TokenizeArgs {
    #[command(flatten)]
    pub config: Config,

    #[arg(short, long)]
    pub input: PathBuf,

    #[arg(long, default_value_t = TokenizeMode::Saccade)]
    pub mode: TokenizeMode,

    /// Print the full result as JSON instead of a summary.
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

/// Tokenizes `text` the way `mode` asks. RSVP output has no pages.
pub fn tokenize(text: &str, mode: TokenizeMode, config: &Config) -> Tokenized {
    match mode {
        TokenizeMode::Saccade => tokenize_saccade_with(text, &config.flow),
        TokenizeMode::Recall => tokenize_recall_with(text, &config.flow),
        TokenizeMode::Rsvp => Tokenized {
            pages: Vec::new(),
            chunks: tokenize_rsvp(text),
        },
    }
}

pub fn run(args: &TokenizeArgs, config: &Config) -> ReaderResult<()> {
    let text = read_input(&args.input)?;
    let tokenized = tokenize(&text, args.mode, config);

    if args.json {
        if args.mode == TokenizeMode::Rsvp {
            println!("{}", serde_json::to_string_pretty(&tokenized.chunks)?);
        } else {
            println!("{}", serde_json::to_string_pretty(&tokenized)?);
        }
        return Ok(());
    }

    if tokenized.pages.is_empty() {
        let preview: Vec<&Chunk> = tokenized.chunks.iter().take(40).collect();
        reports::print_chunk_preview(&preview);
    } else {
        reports::print_page_summary(&tokenized);
    }
    println!(
        "{} chunks across {} pages ({} mode)",
        tokenized.chunks.len(),
        tokenized.pages.len(),
        args.mode
    );
    Ok(())
}
