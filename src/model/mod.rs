//! # Document Model
//!
//! A document is an ordered list of pages. A page is a fixed-size canvas
//! with a uniform margin, an ordered body content list, and an optional
//! footer pinned to the bottom of the margin box:
//!
//! ```text
//! ┌───────────────────────────┐
//! │          margin           │
//! │   ┌───────────────────┐   │
//! │   │ body (flows down) │   │
//! │   │                   │   │
//! │   ├───────────────────┤   │
//! │   │ footer (pinned)   │   │
//! │   └───────────────────┘   │
//! │          margin           │
//! └───────────────────────────┘
//! ```
//!
//! The footer band is reserved before the body lays out, so body content
//! never draws into it.

use std::path::Path;
use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::backend::{Backend, CanvasBackend};
use crate::content::Content;
use crate::error::FolioError;
use crate::layout::{layout_page, Bounds, LayoutPage};

/// Standard page sizes in points.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PageSize {
    #[default]
    A4,
    Letter,
    Legal,
    Custom { width: f64, height: f64 },
}

impl PageSize {
    /// Returns (width, height) in points.
    pub fn dimensions(&self) -> (f64, f64) {
        match self {
            PageSize::A4 => (595.0, 842.0),
            PageSize::Letter => (612.0, 792.0),
            PageSize::Legal => (612.0, 1008.0),
            PageSize::Custom { width, height } => (*width, *height),
        }
    }
}

/// Content pinned to the bottom of the body area.
#[derive(Debug, Clone)]
pub struct Footer {
    pub height: f64,
    pub contents: Vec<Content>,
}

impl Default for Footer {
    fn default() -> Self {
        Self {
            height: 40.0,
            contents: Vec::new(),
        }
    }
}

impl Footer {
    pub fn new(height: f64) -> Self {
        Self {
            height,
            contents: Vec::new(),
        }
    }

    pub fn push(mut self, content: impl Into<Content>) -> Self {
        self.contents.push(content.into());
        self
    }
}

#[derive(Debug, Clone)]
pub struct Page {
    pub size: PageSize,
    pub margin: f64,
    pub contents: Vec<Content>,
    pub footer: Option<Footer>,
}

impl Page {
    pub fn new(size: PageSize) -> Self {
        Self {
            size,
            margin: 40.0,
            contents: Vec::new(),
            footer: None,
        }
    }

    pub fn margin(mut self, margin: f64) -> Self {
        self.margin = margin;
        self
    }

    pub fn push(mut self, content: impl Into<Content>) -> Self {
        self.contents.push(content.into());
        self
    }

    pub fn extend(mut self, contents: impl IntoIterator<Item = Content>) -> Self {
        self.contents.extend(contents);
        self
    }

    pub fn footer(mut self, footer: Footer) -> Self {
        self.footer = Some(footer);
        self
    }

    pub fn footer_height(&self) -> f64 {
        self.footer.as_ref().map_or(0.0, |f| f.height)
    }

    /// The area body content flows through: inside the margins, above the footer.
    pub fn body_bounds(&self) -> Bounds {
        let (width, height) = self.size.dimensions();
        let footer = self.footer_height();
        Bounds::new(
            self.margin,
            self.margin + footer,
            width - self.margin * 2.0,
            height - self.margin * 2.0 - footer,
        )
    }

    /// The reserved footer band at the bottom of the margin box.
    pub fn footer_bounds(&self) -> Option<Bounds> {
        let footer = self.footer.as_ref()?;
        let (width, _) = self.size.dimensions();
        Some(Bounds::new(
            self.margin,
            self.margin,
            width - self.margin * 2.0,
            footer.height,
        ))
    }
}

/// Document metadata embedded in the PDF info dictionary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    pub title: Option<String>,
    pub author: Option<String>,
    pub subject: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct Document {
    pub pages: Vec<Page>,
    pub metadata: Metadata,
}

impl Document {
    pub fn new(pages: Vec<Page>) -> Self {
        Self {
            pages,
            metadata: Metadata::default(),
        }
    }

    pub fn metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = metadata;
        self
    }

    /// Lay every page out into a display list.
    ///
    /// Fails only when there is no first page to draw on, or it has no area.
    pub fn layout(&self) -> Result<Vec<LayoutPage>, FolioError> {
        let first = self.pages.first().ok_or(FolioError::ContextCreationFailed)?;
        let (width, height) = first.size.dimensions();
        if !(width > 0.0 && height > 0.0) {
            return Err(FolioError::ContextCreationFailed);
        }
        Ok(self.pages.iter().map(layout_page).collect())
    }

    /// Render to PDF bytes with the built-in canvas backend.
    pub fn render(&self) -> Result<Vec<u8>, FolioError> {
        self.render_with(&CanvasBackend)
    }

    /// Render through any backend.
    pub fn render_with<B: Backend>(&self, backend: &B) -> Result<Vec<u8>, FolioError> {
        let start = Instant::now();
        let bytes = backend.render(self)?;
        log::info!(
            "rendered {} pages ({} bytes) with the {} backend in {:.1}ms",
            self.pages.len(),
            bytes.len(),
            backend.name(),
            start.elapsed().as_secs_f64() * 1000.0
        );
        Ok(bytes)
    }

    /// The full HTML document the markup backend hands to its converter.
    pub fn render_markup(&self) -> String {
        crate::markup::html_document(self)
    }

    /// Render with the canvas backend and write the PDF to `path`.
    pub fn write_to(&self, path: impl AsRef<Path>) -> Result<(), FolioError> {
        let bytes = self.render()?;
        std::fs::write(path, bytes)?;
        Ok(())
    }
}
