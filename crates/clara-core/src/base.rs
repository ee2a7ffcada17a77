//! Knowledge-base records and loading.
//!
//! The base is a flat ordered list of entries parsed from plain-text topic
//! files. Entry order is definition order and decides ties during matching,
//! so loading is deterministic end to end. A built base is never mutated;
//! reload builds a fresh one and swaps it in (see `store`).
//!
//! Record format, after blank lines are dropped:
//!
//! ```text
//! [Topic Title]
//! trigger one, multi word trigger, another
//! Literal answer text.
//! ```
//!
//! The bracketed title is documentation only. Free-form commentary between
//! records is ignored, and a truncated trailing record is skipped rather
//! than treated as an error.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// One knowledge-base record: trigger keywords plus the canned response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Trigger words and phrases, trimmed and lower-cased at load time.
    pub triggers: Vec<String>,
    /// Answer text returned verbatim when this entry wins.
    pub response: String,
}

/// Immutable snapshot of all entries, in definition order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnowledgeBase {
    entries: Vec<Entry>,
    /// When this snapshot was built. Diagnostic only.
    pub built_at: DateTime<Utc>,
}

impl KnowledgeBase {
    /// Create an empty base.
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
            built_at: Utc::now(),
        }
    }

    /// Build a base from entries already in memory, e.g. from an editor.
    /// Triggers must already be trimmed and lower-cased.
    pub fn from_entries(entries: Vec<Entry>) -> Self {
        Self {
            entries,
            built_at: Utc::now(),
        }
    }

    /// Build a base from raw text sources, one per topic file.
    ///
    /// Entries are concatenated in source-iteration order, then
    /// source-internal order. Malformed records are skipped, never fatal.
    pub fn from_sources<I, S>(sources: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut entries = Vec::new();
        for source in sources {
            parse_source(source.as_ref(), &mut entries);
        }
        let base = Self {
            entries,
            built_at: Utc::now(),
        };
        info!("Knowledge base built: {} entries", base.entries.len());
        base
    }

    /// Build a base from topic files on disk.
    ///
    /// A missing file contributes zero entries; an unreadable one is logged
    /// and skipped. Loading never fails.
    pub fn load_paths(paths: &[PathBuf]) -> Self {
        let mut sources = Vec::new();
        for path in paths {
            match std::fs::read_to_string(path) {
                Ok(text) => sources.push(text),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                    warn!("Topic file {} not found, skipping", path.display());
                }
                Err(e) => {
                    warn!("Failed to read {}: {}", path.display(), e);
                }
            }
        }
        Self::from_sources(sources)
    }

    /// Build a base from every `.txt` file under `dir`.
    ///
    /// Files are read in file-name order so the base is deterministic no
    /// matter what order the directory listing returns. An absent directory
    /// yields an empty base.
    pub fn load_dir(dir: &Path) -> Self {
        let mut paths: Vec<PathBuf> = match std::fs::read_dir(dir) {
            Ok(entries) => entries
                .filter_map(|e| e.ok())
                .map(|e| e.path())
                .filter(|p| p.extension().is_some_and(|ext| ext == "txt"))
                .collect(),
            Err(_) => {
                warn!("Base directory {} not readable, starting empty", dir.display());
                return Self::empty();
            }
        };
        paths.sort();
        Self::load_paths(&paths)
    }

    /// All entries, in definition order.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check whether the base has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Directory holding the topic files (`~/.clara/base`).
pub fn default_base_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".clara")
        .join("base")
}

/// Check whether a trimmed line opens a record.
fn is_title_marker(line: &str) -> bool {
    line.starts_with('[') && line.ends_with(']')
}

/// Parse one raw source into `entries`.
///
/// Scans trimmed, non-blank lines. A title marker consumes the next two
/// lines as triggers and response; anything else is commentary and skipped.
fn parse_source(raw: &str, entries: &mut Vec<Entry>) {
    let lines: Vec<&str> = raw
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();

    let mut i = 0;
    while i < lines.len() {
        if !is_title_marker(lines[i]) {
            i += 1;
            continue;
        }
        if i + 2 >= lines.len() {
            // Truncated trailing record: tolerated, not an error.
            warn!("Skipping dangling record marker {}", lines[i]);
            i += 1;
            continue;
        }
        let triggers: Vec<String> = lines[i + 1]
            .split(',')
            .map(|t| t.trim().to_lowercase())
            .filter(|t| !t.is_empty())
            .collect();
        let response = lines[i + 2].to_string();
        if triggers.is_empty() {
            warn!("Skipping record {} with no usable triggers", lines[i]);
            i += 3;
            continue;
        }
        entries.push(Entry { triggers, response });
        i += 3;
    }
}
