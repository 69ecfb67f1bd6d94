//! Integration tests for the folio pipeline.
//!
//! These tests exercise the public API end to end:
//! - pagination partitions rows and repairs the trailing block fit
//! - column containers and resolved widths
//! - both backends consume the same document
//! - invoice JSON renders to a structurally valid PDF

use std::cell::RefCell;

use folio::backend::{Backend, CanvasBackend, MarkupBackend};
use folio::compose::{Arrangement, Overheads, TableDocument, TableTemplate};
use folio::content::{draw_all, Column, ColumnItem, Columns, Content, Spacer, TableStyle, Text};
use folio::layout::flex::{resolve_widths, ColumnWidth};
use folio::layout::page_break::Pagination;
use folio::layout::{Bounds, LayoutPage};
use folio::markup::convert::Converter;
use folio::model::{Document, Footer, Page, PageSize};
use folio::{FolioError, Invoice, InvoiceLayout, Theme};

// ─── Helpers ────────────────────────────────────────────────────

/// B = 430, H1 = 170, h = hh = 20: 12 rows on page one, 20 per continuation page.
fn pagination(trailing_height: f64) -> Pagination {
    Pagination {
        row_height: 20.0,
        header_row_height: 20.0,
        first_page_overhead: 170.0,
        continuation_overhead: 0.0,
        body_height: 430.0,
        trailing_height,
    }
}

fn records(n: usize) -> Vec<usize> {
    (0..n).collect()
}

fn contains(bytes: &[u8], needle: &str) -> bool {
    bytes.windows(needle.len()).any(|w| w == needle.as_bytes())
}

fn count(bytes: &[u8], needle: &str) -> usize {
    bytes.windows(needle.len()).filter(|w| *w == needle.as_bytes()).count()
}

fn invoice_json(lines: usize) -> String {
    let lines: Vec<String> = (0..lines)
        .map(|i| format!(r#"{{ "description": "Line item {i}", "quantity": 2, "unitPrice": 12.5, "vatRate": 21 }}"#))
        .collect();
    format!(
        r#"{{
            "header": {{ "invoiceNumber": "INV-9", "issueDate": "2026-04-01", "notes": "Thanks" }},
            "supplier": {{ "name": "Acme Corp", "street": "1 Main St", "iban": "BE71 0961 2345 6769" }},
            "client": {{ "name": "Widget Industries" }},
            "lines": [{}],
            "footer": {{ "lines": ["Acme Corp"], "height": 40 }}
        }}"#,
        lines.join(",")
    )
}

#[derive(Default)]
struct FakeConverter {
    calls: RefCell<Vec<(usize, f64, f64)>>,
}

impl Converter for FakeConverter {
    fn convert(&self, html: &str, page_width: f64, page_height: f64) -> Result<Vec<u8>, FolioError> {
        self.calls.borrow_mut().push((html.len(), page_width, page_height));
        Ok(b"%PDF-1.4 converted".to_vec())
    }
}

// ─── Pagination ─────────────────────────────────────────────────

#[test]
fn scenario_a_no_records_still_one_page() {
    let mut p = pagination(150.0);
    p.first_page_overhead = 100.0;
    p.body_height = 700.0;
    let rows: Vec<usize> = Vec::new();
    let chunks = p.split(&rows);
    assert_eq!(chunks.len(), 1);
    assert!(chunks[0].is_empty());
}

#[test]
fn scenario_b_trailing_fits() {
    let p = pagination(100.0);
    assert_eq!(p.max_rows_first(), 12);
    assert_eq!(p.max_rows_continuation(), 20);
    let rows = records(100);
    let chunks = p.split(&rows);
    assert_eq!(chunks.len(), 6);
    let sizes: Vec<usize> = chunks.iter().map(|c| c.len()).collect();
    assert_eq!(sizes, [12, 20, 20, 20, 20, 8]);
}

#[test]
fn scenario_c_trailing_moves_to_its_own_page() {
    // last page: 20 + 8 * 20 = 180 used, 180 + 300 > 430
    let p = pagination(300.0);
    let rows = records(100);
    let chunks = p.split(&rows);
    assert_eq!(chunks.len(), 7);
    assert!(chunks[6].is_empty());
}

#[test]
fn chunks_partition_the_records() {
    for trailing in [0.0, 120.0, 300.0] {
        let p = pagination(trailing);
        for n in [0, 1, 11, 12, 13, 32, 33, 99, 250] {
            let rows = records(n);
            let chunks = p.split(&rows);
            assert!(!chunks.is_empty());
            let joined: Vec<usize> = chunks.iter().flat_map(|c| c.iter().copied()).collect();
            assert_eq!(joined, rows, "n = {n}, trailing = {trailing}");

            // every chunk but the last non-empty one is full
            let filled: Vec<usize> = chunks.iter().map(|c| c.len()).filter(|&len| len > 0).collect();
            if let Some((_, full)) = filled.split_last() {
                for (i, len) in full.iter().enumerate() {
                    let capacity = if i == 0 { 12 } else { 20 };
                    assert_eq!(*len, capacity, "n = {n}, chunk {i}");
                }
            }
        }
    }
}

// ─── Columns ────────────────────────────────────────────────────

#[test]
fn scenario_d_flex_takes_the_remainder() {
    let widths = resolve_widths(
        &[ColumnWidth::Fixed(160.0), ColumnWidth::Flex, ColumnWidth::Fixed(70.0)],
        595.0,
        20.0,
    );
    assert_eq!(widths, vec![160.0, 325.0, 70.0]);
    let total: f64 = widths.iter().sum::<f64>() + 2.0 * 20.0;
    assert!((total - 595.0).abs() < 1e-9);
}

#[test]
fn column_container_advances_by_its_tallest_child() {
    let columns: Content = Columns::new(10.0)
        .column(ColumnItem::fixed(100.0).push(Spacer::new(30.0)))
        .column(ColumnItem::flex().push(Spacer::new(55.0)).push(Spacer::new(15.0)))
        .column(ColumnItem::fixed(50.0).push(Spacer::new(5.0)))
        .into();
    let mut page = LayoutPage::new(595.0, 842.0);
    let bounds = Bounds::new(40.0, 40.0, 515.0, 762.0);
    let end = draw_all(&[columns], &mut page, bounds, 802.0);
    assert_eq!(802.0 - end, 70.0);
}

// ─── Backends ───────────────────────────────────────────────────

#[test]
fn markup_backend_uses_the_injected_converter() {
    let doc = Document::new(vec![
        Page::new(PageSize::Letter).push(Text::new("First")),
        Page::new(PageSize::Letter).push(Text::new("Second")),
    ]);
    let backend = MarkupBackend::new(FakeConverter::default());
    let bytes = doc.render_with(&backend).unwrap();
    assert_eq!(bytes, b"%PDF-1.4 converted");
    let calls = backend.converter.calls.borrow();
    assert_eq!(calls.len(), 1);
    assert_eq!((calls[0].1, calls[0].2), (612.0, 792.0));
    assert_eq!(calls[0].0, doc.render_markup().len());
}

#[test]
fn both_backends_reject_an_empty_document() {
    let doc = Document::default();
    assert!(matches!(CanvasBackend.render(&doc), Err(FolioError::ContextCreationFailed)));
    let markup = MarkupBackend::new(FakeConverter::default());
    assert!(matches!(markup.render(&doc), Err(FolioError::ContextCreationFailed)));
}

#[test]
fn canvas_pdf_is_structurally_valid() {
    let doc = Document::new(vec![
        Page::new(PageSize::A4)
            .push(Text::new("Hello, folio").size(14.0).bold())
            .footer(Footer::new(30.0).push(Text::new("page footer"))),
        Page::new(PageSize::A4).push(Text::new("Page two")),
    ]);
    let bytes = doc.render().unwrap();
    assert!(bytes.starts_with(b"%PDF-1.7"));
    assert!(bytes.ends_with(b"%%EOF\n"));
    assert!(contains(&bytes, "/Count 2"));
    assert!(contains(&bytes, "/Helvetica-Bold"));
    assert!(contains(&bytes, "startxref"));
}

// ─── Table documents ────────────────────────────────────────────

#[test]
fn table_document_pages_follow_the_chunks() {
    let template = TableTemplate::new(
        vec![Column::new("Item", ColumnWidth::Flex), Column::new("Qty", ColumnWidth::Fixed(40.0))],
        TableStyle::default(),
    );
    let mut doc = TableDocument::new(PageSize::Custom { width: 400.0, height: 510.0 }, 40.0, template);
    doc.rows = (0..100).map(|i| vec![format!("row {i}"), "1".to_string()]).collect();
    doc.header = vec![Spacer::new(170.0).into()];
    doc.trailing = vec![Spacer::new(300.0).into()];
    doc.overheads = Overheads {
        first_page: 170.0,
        continuation: 0.0,
        trailing: 300.0,
    };
    assert_eq!(doc.pagination(), pagination(300.0));
    assert_eq!(doc.build().pages.len(), 7);

    doc.arrangement = Arrangement::SummaryFirst;
    // summary page + ceil(100 / 20)
    assert_eq!(doc.build().pages.len(), 6);
}

// ─── Invoices ───────────────────────────────────────────────────

#[test]
fn invoice_json_renders_for_every_layout() {
    let json = invoice_json(45);
    for layout in [
        InvoiceLayout::Classic,
        InvoiceLayout::Sidebar,
        InvoiceLayout::Minimal,
        InvoiceLayout::Stacked,
        InvoiceLayout::SummaryFirst,
    ] {
        let bytes = folio::render_invoice_json(&json, layout).unwrap();
        assert!(bytes.starts_with(b"%PDF-1.7"), "{layout:?}");
        assert!(contains(&bytes, "/Title (Invoice INV-9)"), "{layout:?}");
    }
}

#[test]
fn invoice_page_count_matches_the_pdf() {
    let invoice = Invoice::from_json(&invoice_json(120)).unwrap();
    let doc = invoice.document(InvoiceLayout::Classic, &Theme::default(), PageSize::A4);
    let bytes = doc.render().unwrap();
    assert_eq!(count(&bytes, "/Type /Page "), doc.pages.len());
    assert!(doc.pages.len() >= 4);
}

#[test]
fn minimal_invoice_fits_fewer_rows_per_page() {
    // B = 722. Classic: [22, 28] leaves room for the 118pt totals.
    // Minimal: 22pt rows give [20, 30], and 22 + 660 + 110 > 722.
    let invoice = Invoice::from_json(&invoice_json(50)).unwrap();
    let minimal = invoice.document(InvoiceLayout::Minimal, &Theme::default(), PageSize::A4);
    let classic = invoice.document(InvoiceLayout::Classic, &Theme::default(), PageSize::A4);
    assert_eq!(minimal.pages.len(), 3);
    assert_eq!(classic.pages.len(), 2);
    let bytes = minimal.render().unwrap();
    assert_eq!(count(&bytes, "/Type /Page "), 3);
}

#[test]
fn invoice_markup_carries_every_page() {
    let invoice = Invoice::from_json(&invoice_json(60)).unwrap();
    let doc = invoice.document(InvoiceLayout::Stacked, &Theme::default(), PageSize::A4);
    let html = doc.render_markup();
    assert_eq!(html.matches("class=\"page\"").count(), doc.pages.len());
    assert!(html.contains("Line item 59"));
}

#[test]
fn malformed_invoice_json_is_a_parse_error() {
    let err = folio::render_invoice_json("{ \"header\": ", InvoiceLayout::Classic).unwrap_err();
    match err {
        FolioError::Parse { hint, .. } => assert!(hint.contains("truncated")),
        other => panic!("expected a parse error, got {other:?}"),
    }
}
