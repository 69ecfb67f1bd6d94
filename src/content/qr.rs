use qrcode::{EcLevel, QrCode as Symbol};

use crate::layout::{Bounds, LayoutPage};
use crate::markup::{escape, pt};
use crate::style::{Color, TextAlign};

/// A QR symbol drawn as a `size × size` square.
#[derive(Debug, Clone, PartialEq)]
pub struct QrCode {
    pub data: String,
    pub size: f64,
    pub color: Color,
    pub align: TextAlign,
}

/// Encoded symbol: module count per side and dark flags, row-major from the top.
struct Modules {
    width: usize,
    dark: Vec<bool>,
}

impl Modules {
    /// Runs of dark modules per row as `(row, first_col, len)`.
    fn runs(&self) -> Vec<(usize, usize, usize)> {
        let mut runs = Vec::new();
        for row in 0..self.width {
            let line = &self.dark[row * self.width..(row + 1) * self.width];
            let mut col = 0;
            while col < self.width {
                if !line[col] {
                    col += 1;
                    continue;
                }
                let start = col;
                while col < self.width && line[col] {
                    col += 1;
                }
                runs.push((row, start, col - start));
            }
        }
        runs
    }
}

impl QrCode {
    pub fn new(data: impl Into<String>, size: f64) -> Self {
        Self {
            data: data.into(),
            size,
            color: Color::BLACK,
            align: TextAlign::Leading,
        }
    }

    pub fn align(mut self, align: TextAlign) -> Self {
        self.align = align;
        self
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    fn encode(&self) -> Option<Modules> {
        match Symbol::with_error_correction_level(self.data.as_bytes(), EcLevel::M) {
            Ok(code) => Some(Modules {
                width: code.width(),
                dark: code
                    .to_colors()
                    .into_iter()
                    .map(|c| c == qrcode::Color::Dark)
                    .collect(),
            }),
            Err(e) => {
                log::warn!("QR payload of {} bytes cannot be encoded: {e}", self.data.len());
                None
            }
        }
    }

    pub(super) fn draw(&self, page: &mut LayoutPage, bounds: Bounds, cursor: f64) -> f64 {
        let Some(modules) = self.encode() else {
            return cursor;
        };
        let unit = self.size / modules.width as f64;
        let left = self.align.offset(bounds.x, bounds.width, self.size);
        for (row, col, len) in modules.runs() {
            page.fill_rect(
                left + col as f64 * unit,
                cursor - (row + 1) as f64 * unit,
                len as f64 * unit,
                unit,
                self.color,
            );
        }
        cursor - self.size
    }

    pub(super) fn render_markup(&self, _bounds: Bounds, cursor: f64) -> (String, f64) {
        let Some(modules) = self.encode() else {
            return (String::new(), cursor);
        };
        let path: String = modules
            .runs()
            .into_iter()
            .map(|(row, col, len)| format!("M{col} {row}h{len}v1h-{len}z"))
            .collect();
        let html = format!(
            "<div style=\"height:{s};text-align:{align}\" title=\"{title}\">\
             <svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{s}\" height=\"{s}\" viewBox=\"0 0 {n} {n}\" \
             shape-rendering=\"crispEdges\"><path d=\"{path}\" fill=\"{fill}\"/></svg></div>",
            s = pt(self.size),
            n = modules.width,
            align = self.align.css(),
            title = escape(&self.data),
            fill = self.color.css(),
        );
        (html, cursor - self.size)
    }
}
