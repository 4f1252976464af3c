//! Print Renderer Port - paginated output from the print tree.
//!
//! The mapper builds a [`PrintDocument`]; implementations turn it into
//! HTML (always available) or PDF (may require an external converter,
//! hence the availability check).

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::interchange::PrintDocument;

/// Output formats for a printed plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrintFormat {
    Html,
    Pdf,
}

impl PrintFormat {
    /// MIME content type for this format.
    pub fn content_type(&self) -> &'static str {
        match self {
            PrintFormat::Html => "text/html; charset=utf-8",
            PrintFormat::Pdf => "application/pdf",
        }
    }

    /// File extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            PrintFormat::Html => "html",
            PrintFormat::Pdf => "pdf",
        }
    }
}

impl std::fmt::Display for PrintFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PrintFormat::Html => write!(f, "html"),
            PrintFormat::Pdf => write!(f, "pdf"),
        }
    }
}

impl std::str::FromStr for PrintFormat {
    type Err = PrintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "html" | "htm" => Ok(PrintFormat::Html),
            "pdf" => Ok(PrintFormat::Pdf),
            _ => Err(PrintError::UnsupportedFormat(s.to_string())),
        }
    }
}

/// A rendered plan with the metadata a download needs.
#[derive(Debug, Clone)]
pub struct RenderedDocument {
    pub content: Vec<u8>,
    pub content_type: String,
    pub filename: String,
    pub format: PrintFormat,
}

impl RenderedDocument {
    pub fn new(content: Vec<u8>, format: PrintFormat, base_filename: &str) -> Self {
        Self {
            content,
            content_type: format.content_type().to_string(),
            filename: format!("{}.{}", base_filename, format.extension()),
            format,
        }
    }
}

/// Errors that can occur while rendering.
#[derive(Debug, Clone, Error)]
pub enum PrintError {
    #[error("Unsupported print format: {0}")]
    UnsupportedFormat(String),

    #[error("PDF renderer unavailable: {0}")]
    PdfUnavailable(String),

    #[error("PDF conversion failed: {0}")]
    PdfConversionFailed(String),

    #[error("I/O error during rendering: {0}")]
    Io(String),
}

impl PrintError {
    pub fn pdf_unavailable(reason: impl Into<String>) -> Self {
        PrintError::PdfUnavailable(reason.into())
    }

    pub fn pdf_failed(reason: impl Into<String>) -> Self {
        PrintError::PdfConversionFailed(reason.into())
    }
}

/// Port for rendering the print tree.
pub trait PrintRenderer: Send + Sync {
    /// Renders a complete HTML document with print styling.
    fn render_html(&self, doc: &PrintDocument) -> Result<String, PrintError>;

    /// Renders a paginated PDF.
    ///
    /// Returns `PrintError::PdfUnavailable` when the external converter
    /// is missing.
    fn render_pdf(&self, doc: &PrintDocument) -> Result<Vec<u8>, PrintError>;

    /// Whether PDF rendering can be expected to work.
    fn pdf_available(&self) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_metadata_is_correct() {
        assert_eq!(PrintFormat::Html.content_type(), "text/html; charset=utf-8");
        assert_eq!(PrintFormat::Pdf.content_type(), "application/pdf");
        assert_eq!(PrintFormat::Html.extension(), "html");
        assert_eq!(PrintFormat::Pdf.extension(), "pdf");
    }

    #[test]
    fn format_parses_from_string() {
        assert_eq!("pdf".parse::<PrintFormat>().unwrap(), PrintFormat::Pdf);
        assert_eq!("HTML".parse::<PrintFormat>().unwrap(), PrintFormat::Html);
        assert!("docx".parse::<PrintFormat>().is_err());
    }

    #[test]
    fn rendered_document_builds_filename_from_stem() {
        let doc = RenderedDocument::new(vec![1, 2, 3], PrintFormat::Pdf, "success-plan-acme");
        assert_eq!(doc.filename, "success-plan-acme.pdf");
        assert_eq!(doc.content_type, "application/pdf");
    }

    #[test]
    fn print_renderer_is_object_safe() {
        fn check<T: PrintRenderer + ?Sized>() {}
        check::<dyn PrintRenderer>();
    }
}
