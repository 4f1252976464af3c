//! Export and print configuration.

use serde::Deserialize;
use std::path::PathBuf;

use super::ConfigError;

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

/// Settings for workbook export and PDF rendering.
#[derive(Debug, Clone, Deserialize)]
pub struct ExportConfig {
    /// Directory exported workbooks are written into.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Explicit path to the Pandoc executable for PDF output.
    /// Left unset, the renderer searches PATH.
    #[serde(default)]
    pub pandoc_path: Option<String>,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            pandoc_path: None,
        }
    }
}

impl ExportConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.output_dir.as_os_str().is_empty() {
            return Err(ConfigError::invalid("export.output_dir", "must not be empty"));
        }
        if let Some(path) = &self.pandoc_path {
            if path.trim().is_empty() {
                return Err(ConfigError::invalid(
                    "export.pandoc_path",
                    "must not be blank when set",
                ));
            }
        }
        Ok(())
    }
}
