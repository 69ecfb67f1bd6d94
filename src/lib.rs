//! # Folio
//!
//! A page-composition engine for business documents.
//!
//! Invoices, quotes, and delivery notes share one shape: fixed regions (a
//! header and metadata block on page one, totals and payment details after
//! the last row, a footer on every page) around a table of arbitrary
//! length. Folio paginates the table *into* pages whose fixed regions stay
//! intact: rows are split into per-page chunks using the page geometry and
//! estimated heights of the fixed regions, and the trailing block is moved
//! to a page of its own when it would not fit after the last chunk.
//!
//! ## Architecture
//!
//! ```text
//! Input (JSON/API)
//!       ↓
//!   [invoice]  : Reference document type, sections and overhead estimates
//!       ↓
//!   [compose]  : Rows → chunks → pages (layout::page_break)
//!       ↓
//!   [model]    : Document, pages, footers, content nodes
//!       ↓
//!   [backend]  : canvas: layout → pdf          markup: html → converter
//! ```
//!
//! Both backends measure through [`text`] and share the content nodes'
//! fixed sizes, so a document takes the same vertical space whichever one
//! renders it.

pub mod backend;
pub mod compose;
pub mod content;
pub mod error;
pub mod image_loader;
pub mod invoice;
pub mod layout;
pub mod markup;
pub mod model;
pub mod pdf;
pub mod style;
pub mod text;

pub use backend::{Backend, CanvasBackend, MarkupBackend};
pub use error::FolioError;
pub use invoice::{Invoice, InvoiceLayout, Theme};
pub use markup::convert::{Converter, WkHtmlToPdf};
pub use model::{Document, Page, PageSize};

/// Render a document to PDF bytes with the canvas backend.
pub fn render(document: &Document) -> Result<Vec<u8>, FolioError> {
    document.render()
}

/// Render an invoice described as JSON to PDF bytes.
pub fn render_invoice_json(json: &str, layout: InvoiceLayout) -> Result<Vec<u8>, FolioError> {
    let invoice = Invoice::from_json(json)?;
    invoice.document(layout, &Theme::default(), PageSize::A4).render()
}
