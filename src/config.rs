use crate::error::Result;
use crate::error_ext::ResultExt;
use crate::session::SESSIONS_STORAGE_KEY;

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const CHATKEEP_DIR: &str = ".chatkeep";
const CONFIG_FILE: &str = "config.toml";
const DATA_DIR: &str = "data";

/// Central configuration for chatkeep
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChatkeepConfig {
    /// Where session data lives; relative paths resolve against the workspace
    pub data_dir: Option<PathBuf>,
    pub storage_key: String,
    /// Characters of the first user message shown in session listings
    pub preview_length: usize,
}

impl Default for ChatkeepConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            storage_key: SESSIONS_STORAGE_KEY.to_string(),
            preview_length: 120,
        }
    }
}

impl ChatkeepConfig {
    /// Loads `.chatkeep/config.toml` from the workspace, falling back to
    /// `~/.chatkeep/config.toml`, then to defaults.
    pub fn load(workspace: &Path) -> Result<Self> {
        let mut candidates = vec![workspace.join(CHATKEEP_DIR).join(CONFIG_FILE)];
        if let Some(home) = std::env::var_os("HOME") {
            candidates.push(PathBuf::from(home).join(CHATKEEP_DIR).join(CONFIG_FILE));
        }
        Self::load_first(&candidates)
    }

    fn load_first(candidates: &[PathBuf]) -> Result<Self> {
        for path in candidates {
            if path.exists() {
                tracing::debug!(path = %path.display(), "loading config");
                return Self::load_from_file(path);
            }
        }
        Ok(Self::default())
    }

    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;
        toml::from_str::<Self>(&content).with_context(|| format!("Invalid config in {:?}", path))
    }

    pub fn data_dir(&self, workspace: &Path) -> PathBuf {
        match &self.data_dir {
            Some(dir) if dir.is_absolute() => dir.clone(),
            Some(dir) => workspace.join(dir),
            None => workspace.join(CHATKEEP_DIR).join(DATA_DIR),
        }
    }
}
