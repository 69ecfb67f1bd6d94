//! # Paginated Table Documents
//!
//! Builds a multi-page [`Document`] around one long table. The caller
//! supplies the fixed sections (first-page header, optional running header
//! on continuation pages, trailing block, footer) together with *estimated*
//! heights for them; the rows are split with [`Pagination`] and each chunk
//! becomes one page:
//!
//! - page one gets the header sections, later pages the running header;
//! - every page gets the table header row plus its chunk of rows;
//! - the last page gets the trailing block after the table;
//! - every page gets the footer.
//!
//! The estimates are trusted. If a section is taller than its estimate the
//! page overflows visually instead of failing.

use crate::content::{Column, ColumnItem, Columns, Content, FilledBox, Table, TableStyle};
use crate::layout::page_break::{chunk_pages, Pagination};
use crate::model::{Document, Footer, Metadata, Page, PageSize};
use crate::style::Color;

/// Estimated heights of the fixed sections around the table.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Overheads {
    /// Content above the table on page one.
    pub first_page: f64,
    /// Running header above the table on continuation pages.
    ///
    /// Only the trailing-block fit check on the last page reads this; the
    /// continuation row capacity ignores it, so a full continuation page runs
    /// this far past the body area (into the footer band when there is one).
    pub continuation: f64,
    /// Content that follows the last row.
    pub trailing: f64,
}

/// How chunks are arranged into pages.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum Arrangement {
    #[default]
    Standard,
    /// Page one carries the header sections and the trailing block; rows
    /// start on page two.
    SummaryFirst,
    /// Every page body sits to the right of a full-height colored strip.
    Sidebar { width: f64, gap: f64, color: Color },
}

/// Columns and styling shared by every page's table.
#[derive(Debug, Clone, PartialEq)]
pub struct TableTemplate {
    pub columns: Vec<Column>,
    pub style: TableStyle,
    pub show_header: bool,
}

impl TableTemplate {
    pub fn new(columns: Vec<Column>, style: TableStyle) -> Self {
        Self {
            columns,
            style,
            show_header: true,
        }
    }

    fn with_rows(&self, rows: &[Vec<String>]) -> Table {
        Table::new(self.columns.clone())
            .style(self.style)
            .show_header(self.show_header)
            .rows(rows.to_vec())
    }
}

#[derive(Debug, Clone)]
pub struct TableDocument {
    pub size: PageSize,
    pub margin: f64,
    pub header: Vec<Content>,
    pub continuation_header: Vec<Content>,
    pub table: TableTemplate,
    pub rows: Vec<Vec<String>>,
    pub trailing: Vec<Content>,
    pub footer: Option<Footer>,
    pub overheads: Overheads,
    pub arrangement: Arrangement,
    pub metadata: Metadata,
}

impl TableDocument {
    pub fn new(size: PageSize, margin: f64, table: TableTemplate) -> Self {
        Self {
            size,
            margin,
            header: Vec::new(),
            continuation_header: Vec::new(),
            table,
            rows: Vec::new(),
            trailing: Vec::new(),
            footer: None,
            overheads: Overheads::default(),
            arrangement: Arrangement::Standard,
            metadata: Metadata::default(),
        }
    }

    /// Page body height: page height less both margins and the footer.
    pub fn body_height(&self) -> f64 {
        let (_, height) = self.size.dimensions();
        let footer = self.footer.as_ref().map_or(0.0, |f| f.height);
        height - self.margin * 2.0 - footer
    }

    pub fn pagination(&self) -> Pagination {
        let header_row_height = if self.table.show_header {
            self.table.style.header_height
        } else {
            0.0
        };
        Pagination {
            row_height: self.table.style.row_height,
            header_row_height,
            first_page_overhead: self.overheads.first_page,
            continuation_overhead: self.overheads.continuation,
            body_height: self.body_height(),
            trailing_height: self.overheads.trailing,
        }
    }

    /// Rows per page, in page order.
    pub fn chunks(&self) -> Vec<&[Vec<String>]> {
        let pagination = self.pagination();
        match self.arrangement {
            Arrangement::SummaryFirst => pagination.split_summary_first(&self.rows),
            Arrangement::Standard | Arrangement::Sidebar { .. } => pagination.split(&self.rows),
        }
    }

    /// Assemble one page per chunk.
    pub fn build(&self) -> Document {
        let chunks = self.chunks();
        let summary_first = self.arrangement == Arrangement::SummaryFirst;

        let pages = chunk_pages(&chunks)
            .into_iter()
            .map(|chunk| {
                let mut body: Vec<Content> = Vec::new();
                if chunk.is_first {
                    body.extend(self.header.iter().cloned());
                } else {
                    body.extend(self.continuation_header.iter().cloned());
                }

                if summary_first && chunk.is_first {
                    // The summary page carries no rows.
                    body.extend(self.trailing.iter().cloned());
                } else {
                    body.push(self.table.with_rows(chunk.rows).into());
                    if chunk.is_last && !summary_first {
                        body.extend(self.trailing.iter().cloned());
                    }
                }

                let mut page = Page::new(self.size)
                    .margin(self.margin)
                    .extend(self.arrange(body));
                if let Some(footer) = &self.footer {
                    page = page.footer(footer.clone());
                }
                page
            })
            .collect();

        Document::new(pages).metadata(self.metadata.clone())
    }

    fn arrange(&self, body: Vec<Content>) -> Vec<Content> {
        match self.arrangement {
            Arrangement::Sidebar { width, gap, color } => {
                let strip = FilledBox::new(self.body_height(), color);
                let mut main = ColumnItem::flex();
                main.contents = body;
                vec![Columns::new(gap)
                    .column(ColumnItem::fixed(width).push(strip))
                    .column(main)
                    .into()]
            }
            Arrangement::Standard | Arrangement::SummaryFirst => body,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{Spacer, Text};
    use crate::layout::flex::ColumnWidth;

    /// A4, margin 40, no footer: B = 762. Rows 20pt, header row 20pt.
    fn document(rows: usize, trailing: f64) -> TableDocument {
        let template = TableTemplate::new(
            vec![
                Column::new("Item", ColumnWidth::Flex),
                Column::new("Amount", ColumnWidth::Fixed(70.0)),
            ],
            TableStyle::default(),
        );
        let mut doc = TableDocument::new(PageSize::A4, 40.0, template);
        doc.rows = (0..rows).map(|i| vec![format!("row {i}"), format!("{i}.00")]).collect();
        doc.header = vec![Text::new("HEADER").into(), Spacer::new(182.0).into()];
        doc.continuation_header = vec![Text::new("CONTINUED").into()];
        doc.trailing = vec![Text::new("TOTALS").into()];
        doc.overheads = Overheads {
            first_page: 200.0,
            continuation: 0.0,
            trailing,
        };
        doc
    }

    fn page_texts(doc: &Document, index: usize) -> Vec<String> {
        let pages = doc.layout().unwrap();
        pages[index].texts().map(str::to_string).collect()
    }

    #[test]
    fn capacities_follow_page_geometry() {
        let p = document(0, 0.0).pagination();
        assert_eq!(p.body_height, 762.0);
        // (762 - 200 - 20) / 20 = 27.1, (762 - 20) / 20 = 37.1
        assert_eq!(p.max_rows_first(), 27);
        assert_eq!(p.max_rows_continuation(), 37);
    }

    #[test]
    fn continuation_overhead_only_moves_the_trailing_block() {
        // [27, 30]: 20 + 600 + 40 = 660 fits without a running header
        let mut doc = document(57, 40.0);
        assert_eq!(doc.build().pages.len(), 2);

        // 120 + 20 + 600 + 40 > 762, yet continuation capacity stays at 37
        doc.overheads.continuation = 120.0;
        assert_eq!(doc.pagination().max_rows_continuation(), 37);
        assert_eq!(doc.build().pages.len(), 3);
    }

    #[test]
    fn sections_land_on_first_and_last_pages() {
        let doc = document(50, 40.0).build();
        assert_eq!(doc.pages.len(), 2);
        let first = page_texts(&doc, 0);
        let last = page_texts(&doc, 1);
        assert_eq!(first[0], "HEADER");
        assert!(!first.contains(&"TOTALS".to_string()));
        assert_eq!(last[0], "CONTINUED");
        assert_eq!(last.last().map(String::as_str), Some("TOTALS"));
    }

    #[test]
    fn trailing_overflow_gets_its_own_page() {
        // 27 rows fill page one exactly: 200 + 20 + 540 = 760, 2pt left
        let doc = document(27, 40.0).build();
        assert_eq!(doc.pages.len(), 2);
        let last = page_texts(&doc, 1);
        assert!(last.contains(&"TOTALS".to_string()));
        assert!(!last.iter().any(|t| t.starts_with("row ")));
    }

    #[test]
    fn footer_reduces_body_height() {
        let mut doc = document(0, 0.0);
        doc.footer = Some(Footer::new(42.0).push(Text::new("page footer")));
        assert_eq!(doc.body_height(), 720.0);
        let built = doc.build();
        assert!(page_texts(&built, 0).contains(&"page footer".to_string()));
    }

    #[test]
    fn summary_first_moves_rows_off_page_one() {
        let mut doc = document(40, 1000.0);
        doc.arrangement = Arrangement::SummaryFirst;
        let built = doc.build();
        assert_eq!(built.pages.len(), 3);
        let first = page_texts(&built, 0);
        assert!(first.contains(&"TOTALS".to_string()));
        assert!(!first.iter().any(|t| t.starts_with("row ")));
        let second = page_texts(&built, 1);
        assert!(second.contains(&"row 0".to_string()));
        assert!(!second.contains(&"TOTALS".to_string()));
    }

    #[test]
    fn sidebar_wraps_every_page() {
        let mut doc = document(60, 0.0);
        doc.arrangement = Arrangement::Sidebar {
            width: 14.0,
            gap: 16.0,
            color: Color::DARK_GRAY,
        };
        let built = doc.build();
        assert_eq!(built.pages.len(), 2);
        for page in &built.pages {
            assert_eq!(page.contents.len(), 1);
            assert!(matches!(page.contents[0], Content::Columns(_)));
        }
        let texts = page_texts(&built, 0);
        assert_eq!(texts[0], "HEADER");
    }
}
