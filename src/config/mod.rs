//! Application configuration module
//!
//! Type-safe configuration loading from environment variables using the
//! `config` and `dotenvy` crates. Values are read with the
//! `SUCCESS_PLAN` prefix; nested values use double underscores as
//! separators.
//!
//! # Example
//!
//! ```no_run
//! use success_plan::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Plan state lives under {}", config.storage.dir.display());
//! ```

mod error;
mod export;
mod storage;

pub use error::ConfigError;
pub use export::ExportConfig;
pub use storage::StorageConfig;

use serde::Deserialize;

/// Root application configuration.
///
/// Everything has a sensible default; a host with no environment at all
/// gets a working local setup.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Plan persistence (state file location).
    #[serde(default)]
    pub storage: StorageConfig,

    /// Workbook export and PDF rendering.
    #[serde(default)]
    pub export: ExportConfig,
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// Loads `.env` if present (development), then reads variables with
    /// the `SUCCESS_PLAN` prefix:
    ///
    /// - `SUCCESS_PLAN__STORAGE__DIR=/var/lib/plans` -> `storage.dir`
    /// - `SUCCESS_PLAN__EXPORT__PANDOC_PATH=/usr/bin/pandoc` -> `export.pandoc_path`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when a value cannot be parsed into the
    /// expected type.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("SUCCESS_PLAN")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.storage.validate()?;
        self.export.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Env vars are process-global; keep these tests serialized.
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    #[test]
    fn load_with_no_environment_yields_defaults() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::remove_var("SUCCESS_PLAN__STORAGE__DIR");

        let config = AppConfig::load().unwrap();
        assert_eq!(config.storage.dir, std::path::PathBuf::from("./data"));
        assert!(config.export.pandoc_path.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn environment_overrides_storage_dir() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("SUCCESS_PLAN__STORAGE__DIR", "/var/lib/plans");

        let config = AppConfig::load().unwrap();
        assert_eq!(config.storage.dir, std::path::PathBuf::from("/var/lib/plans"));

        env::remove_var("SUCCESS_PLAN__STORAGE__DIR");
    }

    #[test]
    fn validate_flags_bad_sections() {
        let config = AppConfig {
            storage: StorageConfig {
                dir: std::path::PathBuf::new(),
            },
            export: ExportConfig::default(),
        };
        assert!(config.validate().is_err());
    }
}
