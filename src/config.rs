use crate::fs::resolve::canonicalize_best_effort;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub allowed_roots: Vec<PathBuf>,
}

impl Config {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = fs::read_to_string(path)?;
        if path.extension().map(|e| e == "json").unwrap_or(false) {
            Ok(serde_json::from_str(&raw)?)
        } else {
            Ok(toml::from_str(&raw)?)
        }
    }
}

/// Live view of the configured allow-list. The file is re-read on every call
/// so edits take effect without a restart; a broken or missing file degrades
/// to an empty list instead of failing requests.
#[derive(Debug, Clone)]
pub struct RootRegistry {
    config_path: PathBuf,
}

impl RootRegistry {
    pub fn new(config_path: PathBuf) -> Self {
        Self { config_path }
    }

    /// Configured roots, in order, each in canonical form. Existence is not
    /// checked here; the gate validates the chosen root per request.
    pub fn allowed_roots(&self) -> Vec<PathBuf> {
        let cfg = match Config::load(&self.config_path) {
            Ok(cfg) => cfg,
            Err(err) => {
                warn!(config = %self.config_path.display(), error = %err, "config unreadable, no roots");
                return Vec::new();
            }
        };
        cfg.allowed_roots
            .iter()
            .map(|root| canonicalize_best_effort(root).unwrap_or_else(|_| root.clone()))
            .collect()
    }

    /// First configured root, or the filesystem top level when none are set.
    pub fn default_root(&self) -> PathBuf {
        self.allowed_roots()
            .into_iter()
            .next()
            .unwrap_or_else(|| PathBuf::from("/"))
    }
}
