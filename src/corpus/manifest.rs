use super::text::SplitMode;
use crate::error::{ReaderError, ReaderResult};
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum WorkSource {
    /// Read from `<cache_dir>/gutenberg-<id>.txt`.
    Gutenberg { id: u64 },
    /// Relative paths resolve against the manifest's directory.
    File { path: PathBuf },
    /// Listed for manifest compatibility; never fetched.
    Url { url: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkEntry {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub author: String,
    pub title: String,
    pub source: WorkSource,
    #[serde(default = "default_domain")]
    pub domain: String,
    #[serde(default = "default_unit_type")]
    pub unit_type: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub split_mode: SplitMode,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    pub works: Vec<WorkEntry>,
}

fn default_domain() -> String {
    "Prose".to_string()
}

fn default_unit_type() -> String {
    "prose".to_string()
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(de::Error::custom(format!(
            "work id must be a string or number, got {}",
            other
        ))),
    }
}

pub fn load_manifest<P: AsRef<Path>>(path: P) -> ReaderResult<Vec<WorkEntry>> {
    let content = fs::read_to_string(path.as_ref())?;
    let manifest: Manifest = serde_json::from_str(&content)?;
    debug!(
        "Loaded manifest {} with {} works",
        path.as_ref().display(),
        manifest.works.len()
    );
    Ok(manifest.works)
}

/// Raw text of a work. Invalid UTF-8 is replaced rather than rejected.
pub fn load_work_text(work: &WorkEntry, manifest_dir: &Path, cache_dir: &Path) -> ReaderResult<String> {
    match &work.source {
        WorkSource::Gutenberg { id } => {
            let cached = cache_dir.join(format!("gutenberg-{}.txt", id));
            if !cached.exists() {
                return Err(ReaderError::Source(format!(
                    "work {}: Gutenberg text {} is not cached at {}",
                    work.id,
                    id,
                    cached.display()
                )));
            }
            read_lossy(&cached)
        }
        WorkSource::File { path } => {
            let resolved = if path.is_absolute() {
                path.clone()
            } else {
                manifest_dir.join(path)
            };
            read_lossy(&resolved)
        }
        WorkSource::Url { url } => Err(ReaderError::Source(format!(
            "work {}: url sources are not fetched ({})",
            work.id, url
        ))),
    }
}

fn read_lossy(path: &Path) -> ReaderResult<String> {
    let bytes = fs::read(path)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
