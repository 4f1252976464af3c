//! Print adapters.

mod html_print_renderer;

pub use html_print_renderer::HtmlPrintRenderer;
