//! PrintPlanHandler - Command handler for print/PDF output.

use std::sync::Arc;

use thiserror::Error;

use crate::domain::interchange::{plan_to_print, print_file_stem};
use crate::ports::{PlanState, PrintError, PrintFormat, PrintRenderer, RenderedDocument};

/// Command to render the plan for printing.
#[derive(Debug, Clone)]
pub struct PrintPlanCommand {
    pub format: PrintFormat,
}

/// Error type for plan printing.
#[derive(Debug, Clone, Error)]
pub enum PrintPlanError {
    #[error(transparent)]
    Render(#[from] PrintError),
}

/// Handler producing a downloadable rendering of the plan.
pub struct PrintPlanHandler {
    store: Arc<dyn PlanState>,
    renderer: Arc<dyn PrintRenderer>,
}

impl PrintPlanHandler {
    pub fn new(store: Arc<dyn PlanState>, renderer: Arc<dyn PrintRenderer>) -> Self {
        Self { store, renderer }
    }

    pub fn handle(&self, cmd: PrintPlanCommand) -> Result<RenderedDocument, PrintPlanError> {
        let document = self.store.document();
        let print = plan_to_print(&document);
        let stem = print_file_stem(&document);

        let rendered = match cmd.format {
            PrintFormat::Html => {
                let html = self.renderer.render_html(&print)?;
                RenderedDocument::new(html.into_bytes(), PrintFormat::Html, &stem)
            }
            PrintFormat::Pdf => {
                let pdf = self.renderer.render_pdf(&print)?;
                RenderedDocument::new(pdf, PrintFormat::Pdf, &stem)
            }
        };

        tracing::info!(format = %cmd.format, filename = %rendered.filename, "Rendered plan");
        Ok(rendered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::InMemoryPlanStorage;
    use crate::application::PlanStore;
    use crate::domain::interchange::PrintDocument;

    struct StubRenderer {
        pdf_available: bool,
    }

    impl PrintRenderer for StubRenderer {
        fn render_html(&self, doc: &PrintDocument) -> Result<String, PrintError> {
            Ok(format!("<html>{}</html>", doc.customer_name))
        }

        fn render_pdf(&self, _doc: &PrintDocument) -> Result<Vec<u8>, PrintError> {
            if !self.pdf_available {
                return Err(PrintError::pdf_unavailable("converter missing"));
            }
            Ok(b"%PDF-1.4".to_vec())
        }

        fn pdf_available(&self) -> bool {
            self.pdf_available
        }
    }

    fn test_store() -> Arc<PlanStore> {
        Arc::new(PlanStore::open(Arc::new(InMemoryPlanStorage::new())))
    }

    #[test]
    fn html_rendering_names_the_file_after_the_customer() {
        let handler = PrintPlanHandler::new(
            test_store(),
            Arc::new(StubRenderer {
                pdf_available: false,
            }),
        );

        let rendered = handler
            .handle(PrintPlanCommand {
                format: PrintFormat::Html,
            })
            .unwrap();

        assert!(rendered.filename.starts_with("success-plan-techcorp-solutions-"));
        assert!(rendered.filename.ends_with(".html"));
        assert!(String::from_utf8(rendered.content)
            .unwrap()
            .contains("TechCorp Solutions"));
    }

    #[test]
    fn pdf_rendering_surfaces_unavailable_converter() {
        let handler = PrintPlanHandler::new(
            test_store(),
            Arc::new(StubRenderer {
                pdf_available: false,
            }),
        );

        let result = handler.handle(PrintPlanCommand {
            format: PrintFormat::Pdf,
        });
        assert!(matches!(
            result,
            Err(PrintPlanError::Render(PrintError::PdfUnavailable(_)))
        ));
    }

    #[test]
    fn pdf_rendering_returns_pdf_bytes() {
        let handler = PrintPlanHandler::new(
            test_store(),
            Arc::new(StubRenderer {
                pdf_available: true,
            }),
        );

        let rendered = handler
            .handle(PrintPlanCommand {
                format: PrintFormat::Pdf,
            })
            .unwrap();
        assert_eq!(rendered.content_type, "application/pdf");
        assert!(rendered.content.starts_with(b"%PDF"));
    }
}
