use crate::layout::{Bounds, LayoutPage};
use crate::markup::pt;
use crate::style::{Color, Font, TextAlign};
use crate::text::{self, BASELINE_OFFSET};

use super::escape_lines;

/// A wrapped paragraph.
#[derive(Debug, Clone, PartialEq)]
pub struct Text {
    pub text: String,
    pub font: Font,
    pub size: f64,
    pub color: Color,
    pub align: TextAlign,
}

impl Text {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            font: Font::HELVETICA,
            size: 10.0,
            color: Color::BLACK,
            align: TextAlign::Leading,
        }
    }

    pub fn size(mut self, size: f64) -> Self {
        self.size = size;
        self
    }

    pub fn font(mut self, font: Font) -> Self {
        self.font = font;
        self
    }

    pub fn bold(mut self) -> Self {
        self.font = self.font.bold();
        self
    }

    pub fn italic(mut self) -> Self {
        self.font = self.font.italic();
        self
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn align(mut self, align: TextAlign) -> Self {
        self.align = align;
        self
    }

    fn lines(&self, width: f64) -> Vec<String> {
        text::wrap(&self.text, width, self.font, self.size)
    }

    /// Height this paragraph takes when wrapped to `width`.
    pub fn height(&self, width: f64) -> f64 {
        advance(self.lines(width).len(), self.size)
    }

    pub(super) fn draw(&self, page: &mut LayoutPage, bounds: Bounds, cursor: f64) -> f64 {
        let lines = self.lines(bounds.width);
        let line_height = text::line_height(self.size);
        for (i, line) in lines.iter().enumerate() {
            if line.is_empty() {
                continue;
            }
            let top = cursor - i as f64 * line_height;
            let width = text::measure(line, self.font, self.size);
            let x = self.align.offset(bounds.x, bounds.width, width);
            page.draw_text(x, top - self.size * BASELINE_OFFSET, line, self.font, self.size, self.color);
        }
        cursor - advance(lines.len(), self.size)
    }

    pub(super) fn render_markup(&self, bounds: Bounds, cursor: f64) -> (String, f64) {
        let lines = self.lines(bounds.width);
        if lines.is_empty() {
            return (String::new(), cursor);
        }
        let height = advance(lines.len(), self.size);
        let html = format!(
            "<div style=\"height:{h};font-family:{family};font-size:{size};font-weight:{weight};\
             font-style:{style};color:{color};text-align:{align};line-height:1.2;white-space:pre\">{body}</div>",
            h = pt(height),
            family = self.font.css_family(),
            size = pt(self.size),
            weight = if self.font.bold { "bold" } else { "normal" },
            style = if self.font.italic { "italic" } else { "normal" },
            color = self.color.css(),
            align = self.align.css(),
            body = escape_lines(&lines),
        );
        (html, cursor - height)
    }
}

/// Vertical space taken by `lines` lines; both backends advance by this.
fn advance(lines: usize, size: f64) -> f64 {
    lines as f64 * text::line_height(size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::DrawCommand;

    fn bounds() -> Bounds {
        Bounds::new(40.0, 40.0, 200.0, 700.0)
    }

    #[test]
    fn empty_text_leaves_cursor_alone() {
        let mut page = LayoutPage::new(595.0, 842.0);
        let t = Text::new("");
        assert_eq!(t.draw(&mut page, bounds(), 700.0), 700.0);
        assert!(page.commands.is_empty());
        assert_eq!(t.render_markup(bounds(), 700.0), (String::new(), 700.0));
    }

    #[test]
    fn advance_is_lines_times_line_height() {
        let mut page = LayoutPage::new(595.0, 842.0);
        let t = Text::new("first\nsecond\nthird").size(10.0);
        assert_eq!(t.draw(&mut page, bounds(), 700.0), 700.0 - 36.0);
        assert_eq!(page.texts().count(), 3);
    }

    #[test]
    fn baseline_sits_below_line_top() {
        let mut page = LayoutPage::new(595.0, 842.0);
        Text::new("Invoice").size(20.0).draw(&mut page, bounds(), 700.0);
        match &page.commands[0] {
            DrawCommand::Text { y, x, .. } => {
                assert_eq!(*y, 682.0);
                assert_eq!(*x, 40.0);
            }
            other => panic!("expected text, got {other:?}"),
        }
    }

    #[test]
    fn trailing_alignment_ends_at_right_edge() {
        let mut page = LayoutPage::new(595.0, 842.0);
        let t = Text::new("1,234.50").align(TextAlign::Trailing);
        t.draw(&mut page, bounds(), 700.0);
        match &page.commands[0] {
            DrawCommand::Text { x, text: s, font, size, .. } => {
                let w = text::measure(s, *font, *size);
                assert!((x + w - bounds().right()).abs() < 1e-9);
            }
            other => panic!("expected text, got {other:?}"),
        }
    }

    #[test]
    fn canvas_and_markup_cursors_agree() {
        let t = Text::new("alpha\nbeta\ngamma\ndelta\nepsilon\nzeta\neta").size(14.0);
        let mut page = LayoutPage::new(595.0, 842.0);
        let canvas = t.draw(&mut page, bounds(), 800.0);
        let (_, markup) = t.render_markup(bounds(), 800.0);
        assert_eq!(canvas, markup);
        assert_eq!(canvas, 800.0 - t.height(bounds().width));
    }

    #[test]
    fn markup_carries_style() {
        let (html, end) = Text::new("Total").bold().size(12.0).render_markup(bounds(), 500.0);
        assert!(html.contains("font-weight:bold"));
        assert!(html.contains("font-size:12.00pt"));
        assert!((end - (500.0 - 14.4)).abs() < 1e-9);
    }
}
