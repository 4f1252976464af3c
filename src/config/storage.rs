//! Storage configuration.

use serde::Deserialize;
use std::path::PathBuf;

use super::ConfigError;

fn default_dir() -> PathBuf {
    PathBuf::from("./data")
}

/// Where the persisted plan document lives.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Base directory for the plan state file.
    #[serde(default = "default_dir")]
    pub dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self { dir: default_dir() }
    }
}

impl StorageConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.dir.as_os_str().is_empty() {
            return Err(ConfigError::invalid("storage.dir", "must not be empty"));
        }
        Ok(())
    }
}
