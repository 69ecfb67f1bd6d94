//! Rendering backends. Both consume the same [`Document`]; pagination and
//! layout happen before either is involved.

use crate::error::FolioError;
use crate::markup::convert::Converter;
use crate::markup::html_document;
use crate::model::Document;
use crate::pdf::PdfWriter;

pub trait Backend {
    fn render(&self, document: &Document) -> Result<Vec<u8>, FolioError>;

    /// Label for log lines.
    fn name(&self) -> &'static str;
}

/// Lays pages out into display lists and writes them with [`PdfWriter`].
#[derive(Debug, Clone, Copy, Default)]
pub struct CanvasBackend;

impl Backend for CanvasBackend {
    fn render(&self, document: &Document) -> Result<Vec<u8>, FolioError> {
        let pages = document.layout()?;
        Ok(PdfWriter::new().write(&pages, &document.metadata))
    }

    fn name(&self) -> &'static str {
        "canvas"
    }
}

/// Emits HTML and hands it to an external converter.
#[derive(Debug, Clone, Default)]
pub struct MarkupBackend<C: Converter> {
    pub converter: C,
}

impl<C: Converter> MarkupBackend<C> {
    pub fn new(converter: C) -> Self {
        Self { converter }
    }
}

impl<C: Converter> Backend for MarkupBackend<C> {
    fn render(&self, document: &Document) -> Result<Vec<u8>, FolioError> {
        let first = document.pages.first().ok_or(FolioError::ContextCreationFailed)?;
        let (width, height) = first.size.dimensions();
        if !(width > 0.0 && height > 0.0) {
            return Err(FolioError::ContextCreationFailed);
        }
        self.converter.convert(&html_document(document), width, height)
    }

    fn name(&self) -> &'static str {
        "markup"
    }
}
