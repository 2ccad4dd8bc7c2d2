use crate::reports;
use clap::Args;
use reader::consts::{
    DEFAULT_MAX_WORDS, DEFAULT_MIN_SECTION_WORDS, DEFAULT_MIN_UNIT_WORDS, DEFAULT_MIN_WORDS,
    DEFAULT_TARGET_WORDS,
};
use reader::corpus::{assign_tiers, build_records, load_manifest, write_tiers, CorpusPolicy};
use reader::error::{ReaderError, ReaderResult};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct CorpusArgs {
    #[arg(long)]
    pub manifest: PathBuf,

    /// Directory holding cached `gutenberg-<id>.txt` sources.
    #[arg(long, default_value = ".prose-cache")]
    pub cache_dir: PathBuf,

    /// Soft per-unit word target.
    #[arg(long, default_value_t = DEFAULT_TARGET_WORDS)]
    pub target_words: usize,
    /// Hard per-unit word limit.
    #[arg(long, default_value_t = DEFAULT_MAX_WORDS)]
    pub max_words: usize,
    /// Units below this are merged into the previous one when possible.
    #[arg(long, default_value_t = DEFAULT_MIN_WORDS)]
    pub min_words: usize,
    #[arg(long, default_value_t = DEFAULT_MIN_SECTION_WORDS)]
    pub min_section_words: usize,
    /// Units below this are dropped.
    #[arg(long, default_value_t = DEFAULT_MIN_UNIT_WORDS)]
    pub min_unit_words: usize,

    #[arg(long, default_value = ".")]
    pub output_dir: PathBuf,
    #[arg(long, default_value = "corpus-prose")]
    pub output_prefix: String,

    /// Deterministic shuffle before tiering.
    #[arg(long)]
    pub shuffle_seed: Option<u64>,
}

impl CorpusArgs {
    pub fn policy(&self) -> CorpusPolicy {
        CorpusPolicy {
            target_words: self.target_words,
            max_words: self.max_words,
            min_words: self.min_words,
            min_section_words: self.min_section_words,
            min_unit_words: self.min_unit_words,
        }
    }
}

pub fn run(args: &CorpusArgs) -> ReaderResult<()> {
    let policy = args.policy();
    policy.validate()?;

    let works = load_manifest(&args.manifest)?;
    if works.is_empty() {
        return Err(ReaderError::Validation(
            "no works found in manifest".to_string(),
        ));
    }
    info!(
        "Loaded manifest with {} works; unit policy target={}, max={}, min={} words",
        works.len(),
        policy.target_words,
        policy.max_words,
        policy.min_words
    );

    let manifest_dir = args.manifest.parent().unwrap_or(Path::new("."));
    let records = build_records(
        &works,
        manifest_dir,
        &args.cache_dir,
        &policy,
        args.shuffle_seed,
    )?;

    let tiers = assign_tiers(records);
    reports::print_tier_summary(&tiers);

    for (tier, path) in write_tiers(&args.output_dir, &args.output_prefix, &tiers)? {
        println!("{:6} -> {}", tier.to_string(), path.display());
    }
    Ok(())
}
