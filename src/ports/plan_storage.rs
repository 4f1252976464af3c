//! Plan Storage Port - durable key-value persistence for the document.
//!
//! The store writes the whole plan as one JSON string under a fixed key
//! and reads it back on startup. Implementations decide where the bytes
//! live (a file, a browser bridge, memory for tests).

use thiserror::Error;

/// Errors that can occur during plan persistence.
#[derive(Debug, Clone, Error)]
pub enum StorageError {
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    #[error("I/O error: {0}")]
    Io(String),

    #[error("Storage quota exceeded: {0}")]
    QuotaExceeded(String),
}

impl StorageError {
    pub fn unavailable(reason: impl Into<String>) -> Self {
        StorageError::Unavailable(reason.into())
    }

    pub fn io(reason: impl Into<String>) -> Self {
        StorageError::Io(reason.into())
    }
}

/// Port for persisting the serialized plan document.
///
/// All operations address one fixed slot. Failures here never abort an
/// edit; the store logs them and keeps working in memory.
pub trait PlanStorage: Send + Sync {
    /// Reads the stored document JSON, if any was ever written.
    fn read(&self) -> Result<Option<String>, StorageError>;

    /// Writes the document JSON, replacing any previous value.
    fn write(&self, json: &str) -> Result<(), StorageError>;

    /// Removes the stored document.
    fn clear(&self) -> Result<(), StorageError>;
}
