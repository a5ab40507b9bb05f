//! Output renderers for document models.
//! Each back end turns the same layout blocks into bytes of one format.

pub mod blocks;
pub mod docx;
pub mod html;
pub mod pdf;
pub mod styles;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::config::PageSettings;
use crate::document::DocumentModel;
use crate::error::Result;

pub use docx::DocxRenderer;
pub use html::HtmlRenderer;
pub use pdf::PdfRenderer;

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Pdf,
    Docx,
    Html,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Pdf => "pdf",
            OutputFormat::Docx => "docx",
            OutputFormat::Html => "html",
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            OutputFormat::Pdf => "application/pdf",
            OutputFormat::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            OutputFormat::Html => "text/html; charset=utf-8",
        }
    }
}

/// Trait for document rendering back ends.
pub trait DocumentRenderer {
    /// The format this renderer produces.
    fn format(&self) -> OutputFormat;

    /// Renders a document model to bytes.
    ///
    /// # Arguments
    /// * `document` - Document model to render
    ///
    /// # Returns
    /// * `Result<Vec<u8>>` - Encoded document
    ///
    /// # Errors
    /// * `Error::RenderError` if the back end fails to encode the document
    fn render(&self, document: &DocumentModel) -> Result<Vec<u8>>;
}

/// A rendered document ready to be written or served.
#[derive(Debug, Clone, PartialEq)]
pub struct Artifact {
    pub filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Returns the renderer for `format`.
pub fn renderer_for(format: OutputFormat, page: &PageSettings) -> Box<dyn DocumentRenderer> {
    match format {
        OutputFormat::Pdf => Box::new(PdfRenderer::new(page.clone())),
        OutputFormat::Docx => Box::new(DocxRenderer::new(page.clone())),
        OutputFormat::Html => Box::new(HtmlRenderer),
    }
}
