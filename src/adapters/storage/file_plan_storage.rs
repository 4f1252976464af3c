//! File-based Plan Storage Adapter
//!
//! Persists the plan as one JSON file under a base directory, addressed
//! by the fixed storage key. Writes go through a temp file and rename so
//! a crash mid-write never leaves a truncated document behind.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::StorageConfig;
use crate::ports::{PlanStorage, StorageError};

/// The fixed slot the plan document lives under.
pub const STORAGE_KEY: &str = "success-plan-state";

/// File-backed storage for the plan document.
#[derive(Debug, Clone)]
pub struct FilePlanStorage {
    base_dir: PathBuf,
}

impl FilePlanStorage {
    /// Creates a file storage rooted at `base_dir`.
    ///
    /// The directory is created lazily on first write.
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
        }
    }

    /// Creates a file storage from typed configuration.
    pub fn from_config(config: &StorageConfig) -> Self {
        Self::new(&config.dir)
    }

    fn document_path(&self) -> PathBuf {
        self.base_dir.join(format!("{STORAGE_KEY}.json"))
    }

    fn temp_path(&self) -> PathBuf {
        self.base_dir.join(format!("{STORAGE_KEY}.json.tmp"))
    }
}

impl PlanStorage for FilePlanStorage {
    fn read(&self) -> Result<Option<String>, StorageError> {
        let path = self.document_path();
        if !path.exists() {
            return Ok(None);
        }
        fs::read_to_string(&path)
            .map(Some)
            .map_err(|e| StorageError::io(e.to_string()))
    }

    fn write(&self, json: &str) -> Result<(), StorageError> {
        fs::create_dir_all(&self.base_dir).map_err(|e| StorageError::io(e.to_string()))?;

        let temp = self.temp_path();
        fs::write(&temp, json).map_err(|e| StorageError::io(e.to_string()))?;
        fs::rename(&temp, self.document_path()).map_err(|e| StorageError::io(e.to_string()))
    }

    fn clear(&self) -> Result<(), StorageError> {
        let path = self.document_path();
        if path.exists() {
            fs::remove_file(&path).map_err(|e| StorageError::io(e.to_string()))?;
        }
        Ok(())
    }
}
