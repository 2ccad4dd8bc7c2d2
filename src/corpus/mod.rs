//! Prose drill corpus: turns local source works into tiered drill units.

pub mod manifest;
pub mod metrics;
pub mod text;
pub mod tiers;

pub use manifest::{load_manifest, load_work_text, Manifest, WorkEntry, WorkSource};
pub use text::{
    chunk_section, normalize_text, split_sections, to_paragraphs, ChunkPolicy, Section, SplitMode,
};
pub use tiers::{assign_tiers, Tier, TieredCorpus};

use crate::consts::{
    DEFAULT_MAX_WORDS, DEFAULT_MIN_SECTION_WORDS, DEFAULT_MIN_UNIT_WORDS, DEFAULT_MIN_WORDS,
    DEFAULT_TARGET_WORDS, MAX_DRILL_UNIT_WORDS,
};
use crate::error::{ReaderError, ReaderResult};
use metrics::{
    count_words, factual_burden_score, flesch_kincaid_grade, pct_polysyllabic, round_to,
    sentence_count,
};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use strum::IntoEnumIterator;
use tracing::{info, warn};

/// One drill unit. Field names follow the host app's corpus contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitRecord {
    pub title: String,
    pub text: String,
    pub domain: String,
    pub fk_grade: f64,
    pub words: usize,
    pub sentences: usize,
    pub author: String,
    pub work_title: String,
    pub work_id: String,
    pub unit_type: String,
    pub tags: Vec<String>,
    pub section: String,
    /// Ranking inputs; not part of the written contract.
    #[serde(skip)]
    pub pct_poly: f64,
    #[serde(skip)]
    pub factual_burden: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorpusPolicy {
    pub target_words: usize,
    pub max_words: usize,
    pub min_words: usize,
    pub min_section_words: usize,
    pub min_unit_words: usize,
}

impl Default for CorpusPolicy {
    fn default() -> Self {
        Self {
            target_words: DEFAULT_TARGET_WORDS,
            max_words: DEFAULT_MAX_WORDS,
            min_words: DEFAULT_MIN_WORDS,
            min_section_words: DEFAULT_MIN_SECTION_WORDS,
            min_unit_words: DEFAULT_MIN_UNIT_WORDS,
        }
    }
}

impl CorpusPolicy {
    pub fn chunk_policy(&self) -> ChunkPolicy {
        ChunkPolicy {
            target_words: self.target_words,
            max_words: self.max_words,
            min_words: self.min_words,
        }
    }

    pub fn validate(&self) -> ReaderResult<()> {
        self.chunk_policy().validate(MAX_DRILL_UNIT_WORDS)
    }
}

/// Units for a single work from its raw text. Unit numbering runs across sections.
pub fn build_work_units(work: &WorkEntry, raw_text: &str, policy: &CorpusPolicy) -> Vec<UnitRecord> {
    let paragraphs = to_paragraphs(&normalize_text(raw_text));
    if paragraphs.is_empty() {
        warn!("Skipped {}: no paragraphs after normalization", work.id);
        return Vec::new();
    }

    let chunk_policy = policy.chunk_policy();
    let mut records = Vec::new();

    for section in split_sections(&paragraphs, work.split_mode, policy.min_section_words) {
        for (section_name, unit_text) in chunk_section(&section, &chunk_policy) {
            let words = count_words(&unit_text);
            if words < policy.min_unit_words {
                continue;
            }
            let unit_index = records.len() + 1;
            records.push(UnitRecord {
                title: format!(
                    "{} - {} - {} ({})",
                    work.author, work.title, section_name, unit_index
                ),
                domain: work.domain.clone(),
                fk_grade: round_to(flesch_kincaid_grade(&unit_text), 1),
                words,
                sentences: sentence_count(&unit_text),
                author: work.author.clone(),
                work_title: work.title.clone(),
                work_id: work.id.clone(),
                unit_type: work.unit_type.clone(),
                tags: work.tags.clone(),
                section: section_name,
                pct_poly: round_to(pct_polysyllabic(&unit_text), 4),
                factual_burden: round_to(factual_burden_score(&unit_text), 4),
                text: unit_text,
            });
        }
    }

    info!(
        "{} - {}: {} units built",
        work.author,
        work.title,
        records.len()
    );
    records
}

/// Loads and chunks every work in parallel, keeping manifest order, then
/// optionally shuffles with a seeded RNG.
pub fn build_records(
    works: &[WorkEntry],
    manifest_dir: &Path,
    cache_dir: &Path,
    policy: &CorpusPolicy,
    shuffle_seed: Option<u64>,
) -> ReaderResult<Vec<UnitRecord>> {
    policy.validate()?;

    let per_work: Vec<Vec<UnitRecord>> = works
        .par_iter()
        .map(|work| -> ReaderResult<Vec<UnitRecord>> {
            let raw = load_work_text(work, manifest_dir, cache_dir)?;
            Ok(build_work_units(work, &raw, policy))
        })
        .collect::<ReaderResult<_>>()?;

    let mut records: Vec<UnitRecord> = per_work.into_iter().flatten().collect();

    if let Some(seed) = shuffle_seed {
        let mut rng = fastrand::Rng::with_seed(seed);
        rng.shuffle(&mut records);
    }
    Ok(records)
}

pub fn write_jsonl<P: AsRef<Path>>(path: P, records: &[UnitRecord]) -> ReaderResult<()> {
    let mut out = BufWriter::new(File::create(path)?);
    for record in records {
        serde_json::to_writer(&mut out, record)?;
        out.write_all(b"\n")?;
    }
    out.flush()?;
    Ok(())
}

/// Writes `<prefix>-<tier>.jsonl` for each tier and returns the paths written.
pub fn write_tiers(
    output_dir: &Path,
    prefix: &str,
    tiers: &TieredCorpus,
) -> ReaderResult<Vec<(Tier, PathBuf)>> {
    if tiers.is_empty() {
        return Err(ReaderError::Validation("no records generated".to_string()));
    }

    let mut written = Vec::new();
    for tier in Tier::iter() {
        let path = output_dir.join(format!("{}-{}.jsonl", prefix, tier));
        write_jsonl(&path, tiers.tier(tier))?;
        info!(
            "Wrote {} rows to {}",
            tiers.tier(tier).len(),
            path.display()
        );
        written.push((tier, path));
    }
    Ok(written)
}
