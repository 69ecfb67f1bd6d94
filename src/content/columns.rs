use crate::layout::flex::{resolve_widths, ColumnWidth};
use crate::layout::{Bounds, LayoutPage};
use crate::markup::pt;

use super::{draw_all, render_all, Content};

/// One vertical stack inside a [`Columns`] container.
#[derive(Debug, Clone, Default)]
pub struct ColumnItem {
    pub width: ColumnWidth,
    pub contents: Vec<Content>,
}

impl ColumnItem {
    pub fn fixed(width: f64) -> Self {
        Self {
            width: ColumnWidth::Fixed(width),
            contents: Vec::new(),
        }
    }

    pub fn flex() -> Self {
        Self::default()
    }

    pub fn push(mut self, content: impl Into<Content>) -> Self {
        self.contents.push(content.into());
        self
    }
}

/// Side-by-side stacks. Each stack runs its own cursor from the container's
/// starting point; the container ends where the tallest stack ends.
#[derive(Debug, Clone, Default)]
pub struct Columns {
    pub items: Vec<ColumnItem>,
    pub spacing: f64,
}

impl Columns {
    pub fn new(spacing: f64) -> Self {
        Self {
            items: Vec::new(),
            spacing,
        }
    }

    pub fn column(mut self, item: ColumnItem) -> Self {
        self.items.push(item);
        self
    }

    /// Horizontal bounds of each item.
    fn spans(&self, bounds: Bounds) -> Vec<Bounds> {
        let specs: Vec<ColumnWidth> = self.items.iter().map(|i| i.width).collect();
        let mut x = bounds.x;
        resolve_widths(&specs, bounds.width, self.spacing)
            .into_iter()
            .map(|w| {
                let span = bounds.with_span(x, w);
                x += w + self.spacing;
                span
            })
            .collect()
    }

    pub(super) fn draw(&self, page: &mut LayoutPage, bounds: Bounds, cursor: f64) -> f64 {
        self.items
            .iter()
            .zip(self.spans(bounds))
            .map(|(item, span)| draw_all(&item.contents, page, span, cursor))
            .fold(cursor, f64::min)
    }

    pub(super) fn render_markup(&self, bounds: Bounds, cursor: f64) -> (String, f64) {
        if self.items.is_empty() {
            return (String::new(), cursor);
        }
        let mut lowest = cursor;
        let mut html = String::new();
        for (item, span) in self.items.iter().zip(self.spans(bounds)) {
            let (inner, end) = render_all(&item.contents, span, cursor);
            lowest = lowest.min(end);
            html.push_str(&format!(
                "<div style=\"position:absolute;top:0;left:{};width:{}\">{inner}</div>",
                pt(span.x - bounds.x),
                pt(span.width)
            ));
        }
        let wrapped = format!(
            "<div style=\"position:relative;height:{}\">{html}</div>",
            pt(cursor - lowest)
        );
        (wrapped, lowest)
    }
}
