//! # Flow Layout
//!
//! Content flows top-to-bottom through a single vertical cursor. Every node
//! receives the bounds it may draw into and the cursor where it starts, and
//! hands back the cursor where the next node starts. Nothing else is shared
//! between nodes, so a page is a fold over its content list.
//!
//! Coordinates are PDF user space: origin at the bottom-left corner of the
//! page, y growing upward. A cursor therefore *decreases* as content is
//! placed, and "the tallest column" is the one with the smallest cursor.
//!
//! The imperative backend draws onto a [`LayoutPage`]: a display list of
//! [`DrawCommand`]s that the PDF writer serializes afterwards.
//!
//! ```text
//!   bounds.top() ┌──────────────┐  <- cursor starts here
//!                │ node 1       │
//!                ├──────────────┤  <- cursor after node 1
//!                │ node 2       │
//!                ├──────────────┤  <- cursor after node 2
//!                │              │
//!      bounds.y  └──────────────┘
//! ```

pub mod flex;
pub mod page_break;

use std::sync::Arc;

use crate::content::{draw_all, Content};
use crate::image_loader::LoadedImage;
use crate::model::Page;
use crate::style::{Color, Font};

/// Draw one page: body top-down from the top of the body area, then the
/// footer into its own band.
pub fn layout_page(page: &Page) -> LayoutPage {
    let (width, height) = page.size.dimensions();
    let mut out = LayoutPage::new(width, height);

    let body = page.body_bounds();
    let end = draw_all(&page.contents, &mut out, body, body.top());
    if end < body.y {
        log::debug!(
            "page body overflows its area by {:.1}pt (last node: {})",
            body.y - end,
            page.contents.last().map_or("none", Content::kind)
        );
    }

    if let (Some(footer), Some(band)) = (&page.footer, page.footer_bounds()) {
        draw_all(&footer.contents, &mut out, band, band.top());
    }
    out
}

/// A rectangle confining where a node may draw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub x: f64,
    /// Bottom edge.
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn top(&self) -> f64 {
        self.y + self.height
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Shrink horizontally by `inset` on both sides; vertical extent is kept.
    pub fn inset_horizontal(&self, inset: f64) -> Self {
        Self {
            x: self.x + inset,
            width: self.width - inset * 2.0,
            ..*self
        }
    }

    /// Same vertical extent, different horizontal span.
    pub fn with_span(&self, x: f64, width: f64) -> Self {
        Self { x, width, ..*self }
    }
}

/// What to actually draw.
#[derive(Debug, Clone)]
pub enum DrawCommand {
    /// Fill an axis-aligned rectangle whose bottom-left corner is `(x, y)`.
    FillRect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        color: Color,
    },
    /// Stroke a straight line.
    Line {
        from: (f64, f64),
        to: (f64, f64),
        width: f64,
        color: Color,
    },
    /// Draw a single line of text with its baseline starting at `(x, y)`.
    Text {
        x: f64,
        y: f64,
        text: String,
        font: Font,
        size: f64,
        color: Color,
    },
    /// Draw an image scaled into a rectangle.
    Image {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        image: Arc<LoadedImage>,
    },
}

/// One page of drawing commands: the canvas surface.
#[derive(Debug, Clone)]
pub struct LayoutPage {
    pub width: f64,
    pub height: f64,
    pub commands: Vec<DrawCommand>,
}

impl LayoutPage {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
        }
    }

    pub fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Color) {
        self.commands.push(DrawCommand::FillRect {
            x,
            y,
            width,
            height,
            color,
        });
    }

    pub fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), width: f64, color: Color) {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            width,
            color,
        });
    }

    pub fn draw_text(&mut self, x: f64, y: f64, text: &str, font: Font, size: f64, color: Color) {
        self.commands.push(DrawCommand::Text {
            x,
            y,
            text: text.to_string(),
            font,
            size,
            color,
        });
    }

    pub fn draw_image(&mut self, x: f64, y: f64, width: f64, height: f64, image: Arc<LoadedImage>) {
        self.commands.push(DrawCommand::Image {
            x,
            y,
            width,
            height,
            image,
        });
    }

    /// All text drawn on this page, in drawing order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|cmd| match cmd {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_edges() {
        let b = Bounds::new(40.0, 80.0, 515.0, 722.0);
        assert_eq!(b.top(), 802.0);
        assert_eq!(b.right(), 555.0);
        let inner = b.inset_horizontal(8.0);
        assert_eq!(inner.x, 48.0);
        assert_eq!(inner.width, 499.0);
        assert_eq!(inner.top(), b.top());
    }

    #[test]
    fn texts_lists_only_text_commands() {
        let mut page = LayoutPage::new(595.0, 842.0);
        page.fill_rect(0.0, 0.0, 10.0, 10.0, Color::BLACK);
        page.draw_text(0.0, 0.0, "Total", Font::HELVETICA, 10.0, Color::BLACK);
        assert_eq!(page.texts().collect::<Vec<_>>(), vec!["Total"]);
    }

    #[test]
    fn footer_draws_in_its_band_after_the_body() {
        use crate::content::{Spacer, Text};
        use crate::model::{Footer, PageSize};

        let page = Page::new(PageSize::A4)
            .margin(40.0)
            .push(Spacer::new(2000.0))
            .push(Text::new("overflowing body"))
            .footer(Footer::new(30.0).push(Text::new("Page 1")));
        let out = layout_page(&page);
        let texts: Vec<(String, f64)> = out
            .commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, y, .. } => Some((text.clone(), *y)),
                _ => None,
            })
            .collect();
        assert_eq!(texts[1].0, "Page 1");
        // footer band spans 40..70, first line baseline 9pt under its top
        assert_eq!(texts[1].1, 61.0);
    }
}
