use serde::{Deserialize, Serialize};

use crate::layout::flex::{resolve_widths, ColumnWidth};
use crate::layout::{Bounds, LayoutPage};
use crate::markup::{escape, pt};
use crate::style::{Color, Font, TextAlign};
use crate::text;

/// A table column: title, width request, and alignment for header and body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    pub title: String,
    #[serde(default)]
    pub width: ColumnWidth,
    #[serde(default)]
    pub header_align: TextAlign,
    #[serde(default)]
    pub align: TextAlign,
}

impl Column {
    pub fn new(title: impl Into<String>, width: ColumnWidth) -> Self {
        Self {
            title: title.into(),
            width,
            header_align: TextAlign::Leading,
            align: TextAlign::Leading,
        }
    }

    /// Same alignment for header and body cells.
    pub fn align(mut self, align: TextAlign) -> Self {
        self.header_align = align;
        self.align = align;
        self
    }

    pub fn header_align(mut self, align: TextAlign) -> Self {
        self.header_align = align;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TableStyle {
    pub row_height: f64,
    pub header_height: f64,
    pub header_background: Option<Color>,
    pub header_color: Color,
    pub header_font: Font,
    pub header_size: f64,
    /// Background of even-indexed data rows.
    pub stripe: Option<Color>,
    pub cell_color: Color,
    pub cell_font: Font,
    pub cell_size: f64,
    pub cell_bold: bool,
    pub cell_padding: f64,
    pub border_color: Color,
    pub border_width: f64,
}

impl Default for TableStyle {
    fn default() -> Self {
        Self {
            row_height: 20.0,
            header_height: 20.0,
            header_background: Some(Color::gray(0.85)),
            header_color: Color::BLACK,
            header_font: Font::HELVETICA.bold(),
            header_size: 10.0,
            stripe: None,
            cell_color: Color::BLACK,
            cell_font: Font::HELVETICA,
            cell_size: 10.0,
            cell_bold: false,
            cell_padding: 4.0,
            border_color: Color::gray(0.7),
            border_width: 0.25,
        }
    }
}

/// Fixed-height rows against resolved column widths.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub columns: Vec<Column>,
    pub rows: Vec<Vec<String>>,
    pub style: TableStyle,
    pub show_header: bool,
}

struct RowLook<'a> {
    cells: Vec<&'a str>,
    height: f64,
    background: Option<Color>,
    font: Font,
    size: f64,
    color: Color,
    header: bool,
}

impl Table {
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
            style: TableStyle::default(),
            show_header: true,
        }
    }

    pub fn rows(mut self, rows: Vec<Vec<String>>) -> Self {
        self.rows = rows;
        self
    }

    pub fn style(mut self, style: TableStyle) -> Self {
        self.style = style;
        self
    }

    pub fn show_header(mut self, show: bool) -> Self {
        self.show_header = show;
        self
    }

    /// Header row height when shown, else 0.
    pub fn header_height(&self) -> f64 {
        if self.show_header {
            self.style.header_height
        } else {
            0.0
        }
    }

    pub fn height(&self) -> f64 {
        if self.columns.is_empty() {
            return 0.0;
        }
        self.header_height() + self.rows.len() as f64 * self.style.row_height
    }

    fn looks(&self) -> Vec<RowLook<'_>> {
        let s = &self.style;
        let mut looks = Vec::with_capacity(self.rows.len() + 1);
        if self.show_header {
            looks.push(RowLook {
                cells: self.columns.iter().map(|c| c.title.as_str()).collect(),
                height: s.header_height,
                background: s.header_background,
                font: s.header_font,
                size: s.header_size,
                color: s.header_color,
                header: true,
            });
        }
        let cell_font = if s.cell_bold { s.cell_font.bold() } else { s.cell_font };
        for (index, row) in self.rows.iter().enumerate() {
            looks.push(RowLook {
                // Missing cells render empty
                cells: (0..self.columns.len())
                    .map(|i| row.get(i).map(String::as_str).unwrap_or(""))
                    .collect(),
                height: s.row_height,
                background: if index % 2 == 0 { s.stripe } else { None },
                font: cell_font,
                size: s.cell_size,
                color: s.cell_color,
                header: false,
            });
        }
        looks
    }

    fn alignment(&self, column: &Column, header: bool) -> TextAlign {
        if header {
            column.header_align
        } else {
            column.align
        }
    }

    pub(super) fn draw(&self, page: &mut LayoutPage, bounds: Bounds, cursor: f64) -> f64 {
        if self.columns.is_empty() {
            return cursor;
        }
        let specs: Vec<ColumnWidth> = self.columns.iter().map(|c| c.width).collect();
        let widths = resolve_widths(&specs, bounds.width, 0.0);
        let pad = self.style.cell_padding;

        let mut top = cursor;
        for row in self.looks() {
            let bottom = top - row.height;
            if let Some(bg) = row.background {
                page.fill_rect(bounds.x, bottom, bounds.width, row.height, bg);
            }

            // Center the cap height vertically in the row
            let baseline = top - row.height / 2.0 - row.size * 0.35;
            let mut x = bounds.x;
            for ((column, width), cell) in self.columns.iter().zip(&widths).zip(&row.cells) {
                if !cell.is_empty() {
                    let w = text::measure(cell, row.font, row.size);
                    let cx = self
                        .alignment(column, row.header)
                        .offset(x + pad, width - pad * 2.0, w);
                    page.draw_text(cx, baseline, cell, row.font, row.size, row.color);
                }
                x += width;
            }

            if self.style.border_width > 0.0 {
                page.stroke_line(
                    (bounds.x, bottom),
                    (bounds.right(), bottom),
                    self.style.border_width,
                    self.style.border_color,
                );
            }
            top = bottom;
        }
        top
    }

    pub(super) fn render_markup(&self, bounds: Bounds, cursor: f64) -> (String, f64) {
        if self.columns.is_empty() {
            return (String::new(), cursor);
        }
        let specs: Vec<ColumnWidth> = self.columns.iter().map(|c| c.width).collect();
        let widths = resolve_widths(&specs, bounds.width, 0.0);
        let s = &self.style;

        let mut html = format!("<div style=\"width:{}\">", pt(bounds.width));
        for row in self.looks() {
            let background = row
                .background
                .map(|c| format!("background:{};", c.css()))
                .unwrap_or_default();
            let border = if s.border_width > 0.0 {
                format!("border-bottom:{} solid {};", pt(s.border_width), s.border_color.css())
            } else {
                String::new()
            };
            html.push_str(&format!(
                "<div style=\"position:relative;height:{h};box-sizing:border-box;{background}{border}\
                 font-family:{family};font-size:{size};font-weight:{weight};color:{color}\">",
                h = pt(row.height),
                family = row.font.css_family(),
                size = pt(row.size),
                weight = if row.font.bold { "bold" } else { "normal" },
                color = row.color.css(),
            ));
            let mut left = 0.0;
            for ((column, width), cell) in self.columns.iter().zip(&widths).zip(&row.cells) {
                html.push_str(&format!(
                    "<div style=\"position:absolute;top:0;left:{left};width:{width};height:{h};\
                     line-height:{h};padding:0 {pad};box-sizing:border-box;text-align:{align};\
                     white-space:nowrap;overflow:hidden\">{text}</div>",
                    left = pt(left),
                    width = pt(*width),
                    h = pt(row.height),
                    pad = pt(s.cell_padding),
                    align = self.alignment(column, row.header).css(),
                    text = escape(cell),
                ));
                left += width;
            }
            html.push_str("</div>");
        }
        html.push_str("</div>");
        (html, cursor - self.height())
    }
}
