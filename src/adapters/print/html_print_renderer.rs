//! HTML print renderer adapter.
//!
//! Renders the print tree to a complete HTML document with print CSS
//! (page-break classes for the hints the mapper emits). PDF output
//! shells out to Pandoc when it is installed; HTML rendering is pure
//! Rust and always available.

use std::io::Write;
use std::process::{Command, Stdio};

use crate::config::ExportConfig;
use crate::domain::interchange::{
    BreakHint, PrintBlock, PrintCard, PrintDocument, PrintSection,
};
use crate::domain::plan::PlanHealth;
use crate::ports::{PrintError, PrintRenderer};

/// Print renderer producing HTML directly and PDF via Pandoc.
#[derive(Debug, Clone, Default)]
pub struct HtmlPrintRenderer {
    /// Path to the pandoc executable. If None, searches PATH.
    pandoc_path: Option<String>,
}

impl HtmlPrintRenderer {
    pub fn new() -> Self {
        Self { pandoc_path: None }
    }

    /// Sets a custom path to the Pandoc executable.
    pub fn with_pandoc_path(mut self, path: impl Into<String>) -> Self {
        self.pandoc_path = Some(path.into());
        self
    }

    /// Creates a renderer from typed configuration.
    pub fn from_config(config: &ExportConfig) -> Self {
        Self {
            pandoc_path: config.pandoc_path.clone(),
        }
    }

    fn pandoc_command(&self) -> &str {
        self.pandoc_path.as_deref().unwrap_or("pandoc")
    }

    fn check_pandoc(&self) -> bool {
        Command::new(self.pandoc_command())
            .arg("--version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|status| status.success())
            .unwrap_or(false)
    }
}

impl PrintRenderer for HtmlPrintRenderer {
    fn render_html(&self, doc: &PrintDocument) -> Result<String, PrintError> {
        let mut body = String::new();

        body.push_str(&format!(
            "<header class=\"plan-header\">\n\
             <h1>{}</h1>\n\
             <div class=\"customer\">{}</div>\n\
             <div class=\"updated\">Last updated: {}</div>\n\
             </header>\n",
            html_escape(&doc.title),
            html_escape(&doc.customer_name),
            html_escape(&doc.last_updated),
        ));

        for section in &doc.sections {
            render_section(&mut body, section);
        }

        Ok(wrap_html(body, &doc.title))
    }

    fn render_pdf(&self, doc: &PrintDocument) -> Result<Vec<u8>, PrintError> {
        if !self.check_pandoc() {
            return Err(PrintError::pdf_unavailable(
                "Pandoc is not installed. PDF output requires Pandoc. \
                 Install from https://pandoc.org/installing.html",
            ));
        }

        let html = self.render_html(doc)?;

        let mut child = Command::new(self.pandoc_command())
            .args([
                "-f",
                "html",
                "-t",
                "pdf",
                "-V",
                "geometry:margin=0.75in",
                "-V",
                "fontsize=11pt",
            ])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| PrintError::pdf_failed(format!("Failed to start Pandoc: {e}")))?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(html.as_bytes())
                .map_err(|e| PrintError::pdf_failed(format!("Failed to write to Pandoc: {e}")))?;
        }

        let output = child
            .wait_with_output()
            .map_err(|e| PrintError::pdf_failed(format!("Pandoc execution failed: {e}")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(PrintError::pdf_failed(format!(
                "Pandoc returned error: {}",
                stderr.trim()
            )));
        }

        Ok(output.stdout)
    }

    fn pdf_available(&self) -> bool {
        self.check_pandoc()
    }
}

fn render_section(body: &mut String, section: &PrintSection) {
    body.push_str(&format!(
        "<section class=\"{}\">\n<h2>{}</h2>\n",
        break_class(section.break_hint),
        html_escape(&section.heading)
    ));
    for block in &section.blocks {
        match block {
            PrintBlock::Paragraph(text) => {
                body.push_str(&format!("<p>{}</p>\n", html_escape(text)));
            }
            PrintBlock::HealthBadge(health) => render_health(body, *health),
            PrintBlock::Card(card) => render_card(body, card),
        }
    }
    body.push_str("</section>\n");
}

fn render_health(body: &mut String, health: PlanHealth) {
    body.push_str(&format!(
        "<div class=\"health-badge health-{}\">{}</div>\n",
        health.key(),
        health.label()
    ));
}

fn render_card(body: &mut String, card: &PrintCard) {
    body.push_str("<div class=\"card avoid-break\">\n");
    body.push_str(&format!("<h3>{}</h3>\n", html_escape(&card.title)));
    if let Some(subtitle) = &card.subtitle {
        body.push_str(&format!(
            "<div class=\"subtitle\">{}</div>\n",
            html_escape(subtitle)
        ));
    }
    for line in &card.lines {
        body.push_str(&format!("<p>{}</p>\n", html_escape(line)));
    }
    if !card.kpis.is_empty() {
        body.push_str("<div class=\"kpi-row\">\n");
        for kpi in &card.kpis {
            body.push_str("<div class=\"kpi-card avoid-break\">\n");
            body.push_str(&format!(
                "<div class=\"kpi-label\">{}</div>\n<div class=\"kpi-value\">{}</div>\n",
                html_escape(&kpi.label),
                html_escape(&kpi.value)
            ));
            if let Some(delta) = &kpi.delta {
                let arrow = if delta.percent >= 0.0 { "&uarr;" } else { "&darr;" };
                let class = if delta.improved { "positive" } else { "negative" };
                body.push_str(&format!(
                    "<div class=\"kpi-delta {class}\">{arrow} {}% {}</div>\n",
                    delta.percent.abs(),
                    delta.period.comparison_label()
                ));
            }
            body.push_str("</div>\n");
        }
        body.push_str("</div>\n");
    }
    body.push_str("</div>\n");
}

fn break_class(hint: BreakHint) -> &'static str {
    match hint {
        BreakHint::None => "section",
        BreakHint::AvoidInside => "section avoid-break",
        BreakHint::PageBefore => "section page-break-before",
    }
}

/// Wraps rendered body content in a complete document with print styles.
fn wrap_html(body: String, title: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>
{css}
    </style>
</head>
<body>
    <article class="success-plan">
{body}
    </article>
</body>
</html>"#,
        title = html_escape(title),
        css = PRINT_CSS,
        body = body
    )
}

/// Escape HTML special characters.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Print styling, including the page-break classes the hints map to.
const PRINT_CSS: &str = r#"
body {
    font-family: 'Inter', -apple-system, sans-serif;
    font-size: 11pt;
    line-height: 1.6;
    color: #111827;
    background: white;
    margin: 0 auto;
    max-width: 7.5in;
}

.plan-header {
    background: #14b8a6;
    color: white;
    padding: 1.5rem;
    margin-bottom: 1.5rem;
}

.plan-header h1 {
    font-size: 28pt;
    font-weight: 800;
    margin: 0 0 0.5rem 0;
}

.plan-header .customer {
    font-size: 18pt;
    font-weight: 500;
}

.plan-header .updated {
    font-size: 10pt;
    opacity: 0.9;
}

section {
    margin-bottom: 2rem;
}

h2 {
    font-size: 18pt;
    font-weight: 700;
    margin-bottom: 1rem;
}

.card {
    background: white;
    border: 1px solid #e5e7eb;
    border-radius: 0.5rem;
    padding: 1rem;
    margin-bottom: 1rem;
}

.card .subtitle {
    color: #6b7280;
    font-size: 10pt;
    margin-bottom: 0.5rem;
}

.kpi-row {
    display: flex;
    flex-wrap: wrap;
    gap: 0.75rem;
}

.kpi-card {
    border: 1px solid #e5e7eb;
    border-radius: 0.5rem;
    padding: 0.75rem;
    min-width: 2in;
}

.kpi-label {
    color: #6b7280;
    font-size: 9pt;
}

.kpi-value {
    font-size: 16pt;
    font-weight: 700;
}

.kpi-delta.positive { color: #10b981; }
.kpi-delta.negative { color: #ef4444; }

.health-badge {
    display: inline-block;
    padding: 0.5rem 1rem;
    border-radius: 0.5rem;
    font-weight: 600;
    color: white;
}

.health-green { background: #10b981; }
.health-yellow { background: #f59e0b; }
.health-red { background: #ef4444; }

@media print {
    .avoid-break {
        page-break-inside: avoid !important;
    }

    .page-break-before {
        page-break-before: always !important;
    }
}
"#;
