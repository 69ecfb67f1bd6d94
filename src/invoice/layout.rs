//! Invoice page layouts.
//!
//! Every layout is a [`TableDocument`]: fixed sections around the line-item
//! table, with overheads estimated from the sections' nominal sizes rather
//! than measured. The estimates run generous, so a real
//! section is usually shorter than its reservation.
//!
//! | layout        | page one                         | later pages       | last page        |
//! |---------------|----------------------------------|-------------------|------------------|
//! | classic       | logo/addresses, meta, rows       | rows              | totals, payment  |
//! | sidebar       | classic, right of an accent strip| same              | same             |
//! | stacked       | title banner, parties, meta strip| running header    | totals, payment  |
//! | minimal       | classic, borderless table        | rows              | plain totals     |
//! | summary-first | header, meta, totals, payment    | rows only         | rows only        |

use serde::{Deserialize, Serialize};

use crate::compose::{Arrangement, Overheads, TableDocument, TableTemplate};
use crate::content::{
    Column, ColumnItem, Columns, Content, FilledBox, Image, QrCode, Rule, Spacer, Table, TableStyle, Text,
};
use crate::layout::flex::ColumnWidth;
use crate::model::{Document, Footer, Metadata, PageSize};
use crate::style::{Color, Font, TextAlign};
use crate::text::line_height;

use super::{Client, Invoice, InvoiceLayout, Supplier};

/// Page-one reservation for the logo/address and meta blocks, excluding the
/// logo itself: address block (65), two 20pt gaps, meta block (80).
const CLASSIC_HEADER_OVERHEAD: f64 = 13.0 + 52.0 + 20.0 + 80.0 + 20.0;

/// Title banner 50, supplier 52, client 52, meta strip 28, plus the gaps
/// and rule between them.
const STACKED_HEADER_OVERHEAD: f64 = 50.0 + 8.0 + 52.0 + 8.0 + 1.0 + 8.0 + 52.0 + 8.0 + 28.0 + 12.0;

/// Running header on stacked continuation pages: a 20pt band plus 10pt gap.
const STACKED_CONTINUATION_OVERHEAD: f64 = 30.0;

/// Plain-text totals rows in the minimal layout, rule included.
const MINIMAL_TOTALS_ROW_HEIGHT: f64 = 16.0;

const SIDEBAR_WIDTH: f64 = 14.0;
const SIDEBAR_GAP: f64 = 16.0;

/// Colors, fonts, and geometry shared by every layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Theme {
    pub accent_color: Color,
    pub table_header_background: Color,
    pub table_header_text_color: Color,
    pub table_alternate_row_color: Option<Color>,
    pub table_border_color: Color,
    pub rule_color: Color,
    /// Background of the payment-reference banner; plain text when unset.
    pub payment_banner_color: Option<Color>,
    pub payment_banner_text_color: Color,
    pub body_font: Font,
    pub title_font: Font,
    pub body_font_size: f64,
    pub title_font_size: f64,
    pub table_header_font_size: f64,
    pub table_cell_font_size: f64,
    pub page_margins: f64,
    pub logo_max_width: f64,
    pub logo_max_height: f64,
    pub line_item_row_height: f64,
    pub totals_row_height: f64,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            accent_color: Color::gray(0.15),
            table_header_background: Color::gray(0.88),
            table_header_text_color: Color::BLACK,
            table_alternate_row_color: Some(Color::gray(0.96)),
            table_border_color: Color::gray(0.5),
            rule_color: Color::gray(0.3),
            payment_banner_color: Some(Color::gray(0.15)),
            payment_banner_text_color: Color::WHITE,
            body_font: Font::HELVETICA,
            title_font: Font::TIMES,
            body_font_size: 10.0,
            title_font_size: 14.0,
            table_header_font_size: 10.0,
            table_cell_font_size: 10.0,
            page_margins: 40.0,
            logo_max_width: 120.0,
            logo_max_height: 70.0,
            line_item_row_height: 20.0,
            totals_row_height: 18.0,
        }
    }
}

impl Theme {
    fn text(&self, text: impl Into<String>) -> Text {
        Text::new(text).font(self.body_font).size(self.body_font_size)
    }

    fn small(&self, text: impl Into<String>, size: f64) -> Text {
        Text::new(text).font(self.body_font).size(size)
    }

    /// Taller rows and a smaller body font for the minimal layout.
    fn minimal(&self) -> Theme {
        Theme {
            line_item_row_height: self.line_item_row_height.max(22.0),
            body_font_size: self.body_font_size.min(9.0),
            ..self.clone()
        }
    }

    fn borderless_line_items(&self) -> TableTemplate {
        let mut template = self.line_items();
        template.style = TableStyle {
            header_background: None,
            header_size: self.body_font_size,
            stripe: None,
            cell_size: self.body_font_size,
            border_width: 0.0,
            ..template.style
        };
        template
    }

    fn line_items(&self) -> TableTemplate {
        let style = TableStyle {
            row_height: self.line_item_row_height,
            header_height: self.line_item_row_height,
            header_background: Some(self.table_header_background),
            header_color: self.table_header_text_color,
            header_font: self.body_font.bold(),
            header_size: self.table_header_font_size,
            stripe: self.table_alternate_row_color,
            cell_font: self.body_font,
            cell_size: self.table_cell_font_size,
            cell_padding: 4.0,
            border_color: self.table_border_color,
            border_width: 0.5,
            ..TableStyle::default()
        };
        let trailing = |title: &str, width: f64| Column::new(title, ColumnWidth::Fixed(width)).align(TextAlign::Trailing);
        TableTemplate::new(
            vec![
                Column::new("Description", ColumnWidth::Flex),
                trailing("Qty", 40.0),
                trailing("Unit Price", 65.0),
                trailing("Discount", 60.0),
                trailing("VAT %", 45.0),
                trailing("Subtotal", 70.0),
            ],
            style,
        )
    }
}

impl Invoice {
    /// Lay the invoice out as a paginated table document.
    pub fn table_document(&self, layout: InvoiceLayout, theme: &Theme, size: PageSize) -> TableDocument {
        let minimal;
        let theme = if layout == InvoiceLayout::Minimal {
            minimal = theme.minimal();
            &minimal
        } else {
            theme
        };

        let mut doc = TableDocument::new(size, theme.page_margins, theme.line_items());
        doc.rows = self.lines.iter().map(|line| line.cells()).collect();
        doc.footer = self.footer.as_ref().map(|f| footer(&f.lines, f.height, theme));
        doc.metadata = Metadata {
            title: Some(format!("{} {}", self.header.document_title, self.header.invoice_number)),
            author: Some(self.supplier.name.clone()).filter(|n| !n.is_empty()),
            subject: None,
        };

        let (totals, totals_row_height) = match layout {
            InvoiceLayout::Minimal => (self.plain_totals(theme), MINIMAL_TOTALS_ROW_HEIGHT),
            _ => (self.totals_table(theme).into(), theme.totals_row_height),
        };
        let closing = self.closing_sections(theme, totals);
        let trailing_estimate = self.trailing_estimate(totals_row_height);
        let classic_first = theme.logo_max_height + CLASSIC_HEADER_OVERHEAD;

        match layout {
            InvoiceLayout::Classic | InvoiceLayout::Sidebar => {
                doc.header = self.classic_header(theme);
                doc.trailing = std::iter::once(Content::from(Spacer::new(12.0))).chain(closing).collect();
                doc.overheads = Overheads {
                    first_page: classic_first,
                    continuation: 0.0,
                    trailing: trailing_estimate,
                };
                if layout == InvoiceLayout::Sidebar {
                    doc.arrangement = Arrangement::Sidebar {
                        width: SIDEBAR_WIDTH,
                        gap: SIDEBAR_GAP,
                        color: theme.accent_color,
                    };
                }
            }
            InvoiceLayout::Minimal => {
                doc.table = theme.borderless_line_items();
                doc.header = self.classic_header(theme);
                doc.trailing = std::iter::once(Content::from(Spacer::new(12.0))).chain(closing).collect();
                doc.overheads = Overheads {
                    first_page: classic_first,
                    continuation: 0.0,
                    trailing: trailing_estimate,
                };
            }
            InvoiceLayout::Stacked => {
                doc.header = self.stacked_header(theme);
                doc.continuation_header = vec![
                    banner(
                        20.0,
                        theme.accent_color,
                        theme
                            .small(format!("Invoice {}", self.header.invoice_number), 9.0)
                            .color(Color::WHITE)
                            .align(TextAlign::Center),
                    )
                    .into(),
                    Spacer::new(10.0).into(),
                ];
                doc.trailing = std::iter::once(Content::from(Spacer::new(12.0))).chain(closing).collect();
                doc.overheads = Overheads {
                    first_page: STACKED_HEADER_OVERHEAD,
                    continuation: STACKED_CONTINUATION_OVERHEAD,
                    trailing: trailing_estimate,
                };
            }
            InvoiceLayout::SummaryFirst => {
                doc.header = self.classic_header(theme);
                doc.trailing = closing;
                doc.overheads = Overheads {
                    first_page: classic_first,
                    continuation: 0.0,
                    trailing: trailing_estimate,
                };
                doc.arrangement = Arrangement::SummaryFirst;
            }
        }
        doc
    }

    pub fn document(&self, layout: InvoiceLayout, theme: &Theme, size: PageSize) -> Document {
        self.table_document(layout, theme, size).build()
    }

    /// Reserved height for totals, notes, and payment blocks.
    fn trailing_estimate(&self, totals_row_height: f64) -> f64 {
        let totals = self.totals().estimated_rows() as f64 * totals_row_height + 12.0;
        let notes = if self.header.notes.is_some() { 20.0 + 14.0 } else { 0.0 };
        let payment = if self.header.has_payment_section() { 16.0 + 80.0 } else { 0.0 };
        totals + notes + payment
    }

    fn classic_header(&self, theme: &Theme) -> Vec<Content> {
        vec![
            Columns::new(20.0)
                .column(
                    ColumnItem::fixed(160.0)
                        .push(logo_or_initials(&self.supplier, theme, TextAlign::Leading))
                        .push(Spacer::new(6.0))
                        .push(Rule::new(0.5, theme.accent_color))
                        .push(Spacer::new(6.0))
                        .push(supplier_block(&self.supplier, theme, TextAlign::Leading)),
                )
                .column(ColumnItem::flex().push(Spacer::new(4.0)).push(client_block(&self.client, theme)))
                .into(),
            Spacer::new(20.0).into(),
            self.meta_section(theme),
            Spacer::new(20.0).into(),
        ]
    }

    fn meta_section(&self, theme: &Theme) -> Content {
        let header = &self.header;
        let fields = [
            ("Invoice No.", Some(&header.invoice_number)),
            ("Date", Some(&header.issue_date).filter(|d| !d.is_empty())),
            ("Due Date", header.due_date.as_ref()),
            ("Service Date", header.service_date.as_ref()),
            ("Client No.", self.client.client_number.as_ref()),
            ("PO Number", self.client.po_number.as_ref()),
        ];
        let (mut labels, mut values) = (ColumnItem::fixed(90.0), ColumnItem::flex());
        for (label, value) in fields {
            if let Some(value) = value {
                labels = labels.push(theme.text(label).bold());
                values = values.push(theme.text(format!(": {value}")).bold());
            }
        }

        let mut right = ColumnItem::flex();
        if let Some(vat) = &self.supplier.vat_number {
            right = right
                .push(
                    Columns::new(4.0)
                        .column(ColumnItem::fixed(60.0).push(theme.text("VAT No.").bold()))
                        .column(ColumnItem::flex().push(theme.text(vat.as_str()))),
                )
                .push(Spacer::new(8.0));
        }
        right = right.push(
            Text::new(header.document_title.as_str())
                .font(theme.title_font)
                .size(theme.title_font_size)
                .bold()
                .italic()
                .align(TextAlign::Center),
        );

        Columns::new(20.0)
            .column(ColumnItem::fixed(240.0).push(Columns::new(0.0).column(labels).column(values)))
            .column(right)
            .into()
    }

    fn stacked_header(&self, theme: &Theme) -> Vec<Content> {
        let header = &self.header;
        let strip: Vec<String> = [
            Some(format!("No. {}", header.invoice_number)),
            Some(&header.issue_date).filter(|d| !d.is_empty()).map(|d| format!("Date: {d}")),
            header.due_date.as_ref().map(|d| format!("Due: {d}")),
            Some(header.currency.clone()).filter(|c| !c.is_empty()),
        ]
        .into_iter()
        .flatten()
        .collect();

        vec![
            banner(
                50.0,
                theme.accent_color,
                Text::new(header.document_title.as_str())
                    .font(theme.title_font)
                    .size(theme.title_font_size + 4.0)
                    .bold()
                    .color(Color::WHITE)
                    .align(TextAlign::Center),
            )
            .into(),
            Spacer::new(8.0).into(),
            supplier_block(&self.supplier, theme, TextAlign::Center),
            Spacer::new(8.0).into(),
            Rule::new(0.5, theme.rule_color).into(),
            Spacer::new(8.0).into(),
            client_block(&self.client, theme),
            Spacer::new(8.0).into(),
            banner(
                22.0,
                theme.accent_color.tint(0.15),
                theme.small(strip.join("   ·   "), 9.0).bold().align(TextAlign::Center),
            )
            .into(),
            Spacer::new(12.0).into(),
        ]
    }

    /// Totals, then notes and payment when present.
    fn closing_sections(&self, theme: &Theme, totals: Content) -> Vec<Content> {
        let mut out = vec![totals];
        if let Some(notes) = &self.header.notes {
            out.push(Spacer::new(12.0).into());
            out.push(theme.small(notes.as_str(), theme.body_font_size - 1.0).into());
        }
        if self.header.has_payment_section() {
            out.push(Spacer::new(16.0).into());
            out.push(self.payment_section(theme));
        }
        out
    }

    fn totals_table(&self, theme: &Theme) -> Table {
        let rows = self
            .totals()
            .rows(&self.header.currency)
            .into_iter()
            .map(|(label, amount)| vec![label, String::new(), amount])
            .collect();
        let style = TableStyle {
            row_height: theme.totals_row_height,
            stripe: None,
            cell_bold: true,
            ..theme.line_items().style
        };
        Table::new(vec![
            Column::new("", ColumnWidth::Flex),
            Column::new("", ColumnWidth::Flex),
            Column::new("Amount", ColumnWidth::Fixed(100.0)).align(TextAlign::Trailing),
        ])
        .style(style)
        .show_header(false)
        .rows(rows)
    }

    /// Labels and amounts as two text columns under a hairline, no table.
    fn plain_totals(&self, theme: &Theme) -> Content {
        let rule = || Rule::new(0.5, theme.rule_color);
        let rows = self.totals().rows(&self.header.currency);
        let last = rows.len().saturating_sub(1);
        let (mut labels, mut amounts) = (
            ColumnItem::flex().push(rule()).push(Spacer::new(4.0)),
            ColumnItem::fixed(100.0).push(rule()).push(Spacer::new(4.0)),
        );
        for (i, (label, amount)) in rows.into_iter().enumerate() {
            labels = labels.push(theme.text(label).bold());
            let amount = theme.text(amount).align(TextAlign::Trailing);
            amounts = amounts.push(if i == last { amount.bold() } else { amount });
        }
        Columns::new(0.0).column(labels).column(amounts).into()
    }

    fn payment_section(&self, theme: &Theme) -> Content {
        let header = &self.header;
        let mut details = ColumnItem::flex();
        if let Some(reference) = &header.payment_reference {
            let label = theme.small(format!("Payment reference: {reference}"), 9.0).bold();
            details = match theme.payment_banner_color {
                Some(color) => details.push(banner(
                    22.0,
                    color,
                    label.color(theme.payment_banner_text_color).align(TextAlign::Center),
                )),
                None => details.push(label),
            };
        }
        if let Some(terms) = &header.payment_terms {
            details = details.push(Spacer::new(4.0)).push(theme.small(terms.as_str(), 9.0));
        }
        if let Some(iban) = &self.supplier.iban {
            let bic = self.supplier.bic.as_ref().map(|b| format!("  BIC: {b}")).unwrap_or_default();
            details = details
                .push(Spacer::new(4.0))
                .push(theme.small(format!("IBAN: {iban}{bic}"), 9.0));
        }

        let mut section = Columns::new(16.0).column(details);
        if let Some(payload) = &header.qr_payload {
            section = section.column(ColumnItem::fixed(70.0).push(QrCode::new(payload.as_str(), 65.0).align(TextAlign::Trailing)));
        }
        section.into()
    }
}

/// A filled band with one line of text centred vertically inside it.
fn banner(height: f64, color: Color, text: Text) -> FilledBox {
    let padding = ((height - line_height(text.size)) / 2.0).max(0.0);
    FilledBox::new(height, color).padding(padding).push(text)
}

fn footer(lines: &[String], height: f64, theme: &Theme) -> Footer {
    lines.iter().fold(
        Footer::new(height)
            .push(Rule::new(0.5, theme.rule_color))
            .push(Spacer::new(4.0)),
        |footer, line| footer.push(theme.small(line.as_str(), 8.0).align(TextAlign::Center)),
    )
}

/// The supplier logo, or up to three initials in the accent color when no
/// logo is configured or it fails to load.
fn logo_or_initials(supplier: &Supplier, theme: &Theme, align: TextAlign) -> Content {
    if let Some(src) = supplier.logo_path.as_deref() {
        match Image::load(src, theme.logo_max_width) {
            Ok(image) => return image.max_height(theme.logo_max_height).align(align).into(),
            Err(e) => log::warn!("logo for '{}' not usable, falling back to initials: {e}", supplier.name),
        }
    }
    let initials: String = supplier
        .name
        .split_whitespace()
        .take(3)
        .filter_map(|word| word.chars().next())
        .collect();
    let label = if initials.is_empty() { supplier.name.clone() } else { initials };
    Text::new(label)
        .font(theme.body_font)
        .size(26.0)
        .bold()
        .color(theme.accent_color)
        .align(align)
        .into()
}

fn supplier_block(supplier: &Supplier, theme: &Theme, align: TextAlign) -> Content {
    let mut column = ColumnItem::flex().push(theme.text(supplier.name.as_str()).bold().align(align));
    for line in [&supplier.street, &supplier.city, &supplier.country].into_iter().flatten() {
        column = column.push(theme.text(line.as_str()).align(align));
    }
    Columns::new(0.0).column(column).into()
}

fn client_block(client: &Client, theme: &Theme) -> Content {
    let mut column = ColumnItem::flex().push(theme.text(client.name.as_str()).bold());
    if let Some(attention) = &client.attention {
        column = column.push(theme.text(format!("Attn: {attention}")));
    }
    for line in [&client.street, &client.city, &client.country].into_iter().flatten() {
        column = column.push(theme.text(line.as_str()));
    }
    if let Some(vat) = &client.vat_number {
        column = column.push(Spacer::new(4.0)).push(theme.text(format!("VAT: {vat}")));
    }
    Columns::new(0.0).column(column).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::invoice::{Header, InvoiceFooter, Line, Totals};

    fn invoice(lines: usize) -> Invoice {
        Invoice {
            header: Header {
                invoice_number: "INV-42".into(),
                issue_date: "2026-03-01".into(),
                ..Header::default()
            },
            supplier: Supplier {
                name: "Acme Widget Works".into(),
                city: Some("Ghent".into()),
                ..Supplier::default()
            },
            client: Client {
                name: "Client BV".into(),
                ..Client::default()
            },
            lines: (0..lines)
                .map(|i| Line {
                    description: format!("Item {i}"),
                    quantity: 1.0,
                    unit_price: 10.0,
                    vat_rate: 21.0,
                    ..Line::default()
                })
                .collect(),
            ..Invoice::default()
        }
    }

    fn pages(invoice: &Invoice, layout: InvoiceLayout) -> usize {
        invoice.document(layout, &Theme::default(), PageSize::A4).pages.len()
    }

    fn texts(doc: &Document, page: usize) -> Vec<String> {
        let laid_out = doc.layout().unwrap();
        laid_out[page].texts().map(str::to_string).collect()
    }

    #[test]
    fn classic_estimates() {
        // B = 842 - 80 = 762; H1 = 70 + 185 = 255; L = 4 * 18 + 12 = 84
        let doc = invoice(0).table_document(InvoiceLayout::Classic, &Theme::default(), PageSize::A4);
        let p = doc.pagination();
        assert_eq!(p.body_height, 762.0);
        assert_eq!(p.first_page_overhead, 255.0);
        assert_eq!(p.trailing_height, 84.0);
        assert_eq!(p.max_rows_first(), 24);
        assert_eq!(p.max_rows_continuation(), 37);
    }

    #[test]
    fn classic_page_counts() {
        assert_eq!(pages(&invoice(0), InvoiceLayout::Classic), 1);
        assert_eq!(pages(&invoice(10), InvoiceLayout::Classic), 1);
        // 255 + 20 + 24 * 20 = 755, no room for the totals
        assert_eq!(pages(&invoice(24), InvoiceLayout::Classic), 2);
        assert_eq!(pages(&invoice(50), InvoiceLayout::Classic), 2);
        // [24, 37]: 20 + 740 = 760 on page two
        assert_eq!(pages(&invoice(61), InvoiceLayout::Classic), 3);
    }

    #[test]
    fn optional_blocks_grow_the_trailing_estimate() {
        let mut inv = invoice(0);
        inv.header.notes = Some("Thank you".into());
        inv.header.payment_reference = Some("+++123/4567/89012+++".into());
        inv.totals = Some(Totals {
            amount_paid: Some(50.0),
            ..Totals::from_lines(&inv.lines)
        });
        // 5 * 18 + 12 + 34 + 96
        assert_eq!(inv.trailing_estimate(Theme::default().totals_row_height), 232.0);
    }

    #[test]
    fn footer_is_on_every_page_and_shrinks_the_body() {
        let mut inv = invoice(50);
        inv.footer = Some(InvoiceFooter {
            lines: vec!["Acme Widget Works, Ghent".into()],
            ..InvoiceFooter::default()
        });
        let doc = inv.table_document(InvoiceLayout::Classic, &Theme::default(), PageSize::A4);
        assert_eq!(doc.body_height(), 690.0);
        let built = doc.build();
        for page in 0..built.pages.len() {
            assert!(texts(&built, page).contains(&"Acme Widget Works, Ghent".to_string()));
        }
    }

    #[test]
    fn first_page_sections() {
        let doc = invoice(3).document(InvoiceLayout::Classic, &Theme::default(), PageSize::A4);
        let page = texts(&doc, 0);
        // logo fallback initials come first
        assert_eq!(page[0], "AWW");
        for expected in ["Client BV", "Invoice No.", ": INV-42", "Invoice", "Qty", "Item 2", "Total incl. VAT (EUR)", "36.30"] {
            assert!(page.contains(&expected.to_string()), "missing {expected}");
        }
    }

    #[test]
    fn unreadable_logo_falls_back_to_initials() {
        let mut inv = invoice(1);
        inv.supplier.logo_path = Some("/nonexistent/logo.png".into());
        let doc = inv.document(InvoiceLayout::Classic, &Theme::default(), PageSize::A4);
        assert_eq!(texts(&doc, 0)[0], "AWW");
    }

    #[test]
    fn stacked_repeats_a_running_header() {
        let inv = invoice(80);
        let doc = inv.table_document(InvoiceLayout::Stacked, &Theme::default(), PageSize::A4);
        assert_eq!(doc.overheads.first_page, 227.0);
        assert_eq!(doc.overheads.continuation, 30.0);
        let built = doc.build();
        assert_eq!(built.pages.len(), 3);
        assert_eq!(texts(&built, 0)[0], "Invoice");
        assert_eq!(texts(&built, 1)[0], "Invoice INV-42");
        assert!(texts(&built, 0).contains(&"No. INV-42 · Date: 2026-03-01 · EUR".to_string()));
    }

    #[test]
    fn summary_first_puts_totals_before_rows() {
        let inv = invoice(40);
        let doc = inv.document(InvoiceLayout::SummaryFirst, &Theme::default(), PageSize::A4);
        // summary page, then [37, 3]
        assert_eq!(doc.pages.len(), 3);
        let first = texts(&doc, 0);
        assert!(first.contains(&"Subtotal excl. VAT".to_string()));
        assert!(!first.iter().any(|t| t.starts_with("Item ")));
        assert!(texts(&doc, 1).contains(&"Item 0".to_string()));
        assert!(texts(&doc, 2).contains(&"Item 39".to_string()));
        assert_eq!(pages(&invoice(0), InvoiceLayout::SummaryFirst), 1);
    }

    #[test]
    fn minimal_uses_taller_rows_and_plain_totals() {
        // h = hh = 22, L = 4 * 16 + 12 = 76
        let doc = invoice(0).table_document(InvoiceLayout::Minimal, &Theme::default(), PageSize::A4);
        let p = doc.pagination();
        assert_eq!(p.row_height, 22.0);
        assert_eq!(p.header_row_height, 22.0);
        assert_eq!(p.first_page_overhead, 255.0);
        assert_eq!(p.trailing_height, 76.0);
        assert_eq!(p.max_rows_first(), 22);
        assert_eq!(p.max_rows_continuation(), 33);
        assert_eq!(doc.table.style.border_width, 0.0);
        assert_eq!(doc.table.style.cell_size, 9.0);

        let built = doc.build();
        let page = texts(&built, 0);
        assert!(page.contains(&"Total incl. VAT (EUR)".to_string()));
        assert!(page.contains(&"0.00".to_string()));
    }

    #[test]
    fn minimal_page_counts() {
        // 255 + 22 + 18 * 22 = 673, + 76 fits in 762
        assert_eq!(pages(&invoice(18), InvoiceLayout::Minimal), 1);
        // 695 + 76 does not
        assert_eq!(pages(&invoice(19), InvoiceLayout::Minimal), 2);
        // [22, 28]: 22 + 616 + 76 = 714
        assert_eq!(pages(&invoice(50), InvoiceLayout::Minimal), 2);
        // [22, 33]: 22 + 726 + 76 > 762
        assert_eq!(pages(&invoice(55), InvoiceLayout::Minimal), 3);
    }

    #[test]
    fn sidebar_matches_classic_pagination() {
        for lines in [0, 24, 61] {
            assert_eq!(
                pages(&invoice(lines), InvoiceLayout::Sidebar),
                pages(&invoice(lines), InvoiceLayout::Classic)
            );
        }
    }

    #[test]
    fn payment_section_with_qr() {
        let mut inv = invoice(1);
        inv.header.payment_reference = Some("+++090/9337/55493+++".into());
        inv.header.payment_terms = Some("Net 30".into());
        inv.header.qr_payload = Some("BCD\n002\n1\nSCT\nGEBABEBB\nAcme\nBE71096123456769\nEUR36.30".into());
        inv.supplier.iban = Some("BE71 0961 2345 6769".into());
        inv.supplier.bic = Some("GEBABEBB".into());
        let doc = inv.document(InvoiceLayout::Classic, &Theme::default(), PageSize::A4);
        let page = texts(&doc, 0);
        // wrapping collapses runs of spaces
        assert!(page.contains(&"Payment reference: +++090/9337/55493+++".to_string()));
        assert!(page.contains(&"IBAN: BE71 0961 2345 6769 BIC: GEBABEBB".to_string()));
    }
}
