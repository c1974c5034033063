//! Engine configuration loaded from TOML.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{EngineError, Result};
use crate::queries::DEFAULT_TREE_DEPTH;

/// Main configuration structure. Every section may be omitted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub data: DataConfig,
    pub tree: TreeConfig,
    pub logging: LoggingConfig,
}

impl EngineConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self> {
        let config: EngineConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.tree.max_depth == 0 {
            return Err(EngineError::InvalidConfig(
                "tree.max_depth must be >= 1".to_string(),
            ));
        }
        if self.data.csv_path.as_os_str().is_empty() {
            return Err(EngineError::InvalidConfig(
                "data.csv_path must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Where the population and its attachments live on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    pub csv_path: PathBuf,
    pub photo_dir: PathBuf,
    pub bio_dir: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            csv_path: PathBuf::from("data/persons.csv"),
            photo_dir: PathBuf::from("data/photos"),
            bio_dir: PathBuf::from("data/bio"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeConfig {
    /// Generations expanded below (or above) the root.
    pub max_depth: usize,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_TREE_DEPTH,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is unset.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}
