//! Engine configuration.
//!
//! Loaded from `~/.clara/config.toml`. Every field has a default, so a
//! missing or broken config file never stops the engine from answering.

use crate::base::{self, KnowledgeBase};
use crate::error::ClaraError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::warn;

/// Engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClaraConfig {
    /// Returned when no entry scores above zero.
    #[serde(default = "default_fallback_response")]
    pub fallback_response: String,

    /// Directory holding the per-topic `.txt` sources.
    #[serde(default = "base::default_base_dir")]
    pub base_dir: PathBuf,

    /// Explicit topic files, relative to `base_dir`, loaded in list order.
    /// Empty means every `.txt` in `base_dir`, in file-name order.
    #[serde(default)]
    pub sources: Vec<String>,
}

fn default_fallback_response() -> String {
    "Ainda não encontrei essa resposta na minha base. Tente perguntar de outro jeito ou fale com a secretaria paroquial."
        .to_string()
}

impl Default for ClaraConfig {
    fn default() -> Self {
        Self {
            fallback_response: default_fallback_response(),
            base_dir: base::default_base_dir(),
            sources: Vec::new(),
        }
    }
}

impl ClaraConfig {
    /// Default config file path (`~/.clara/config.toml`).
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".clara")
            .join("config.toml")
    }

    /// Load from the default path, or defaults when the file is missing or
    /// unparseable. Never fails.
    pub fn load() -> Self {
        let path = Self::default_path();
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(config) => config,
            Err(e) => {
                warn!("Failed to load {}: {}, using defaults", path.display(), e);
                Self::default()
            }
        }
    }

    /// Load from a specific path. Strict: errors are returned, not masked.
    pub fn load_from(path: &Path) -> Result<Self, ClaraError> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| ClaraError::Config(format!("Failed to parse {}: {}", path.display(), e)))
    }

    /// The topic files this config points at.
    pub fn source_paths(&self) -> Vec<PathBuf> {
        self.sources.iter().map(|s| self.base_dir.join(s)).collect()
    }

    /// Build a knowledge base from the configured sources.
    pub fn load_base(&self) -> KnowledgeBase {
        if self.sources.is_empty() {
            KnowledgeBase::load_dir(&self.base_dir)
        } else {
            KnowledgeBase::load_paths(&self.source_paths())
        }
    }
}
