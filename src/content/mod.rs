//! # Content Nodes
//!
//! The closed set of things a page body can hold. Every node takes the
//! bounds it may draw into plus the cursor it starts at, and returns the
//! cursor where the next node starts. The same node renders through two
//! paths:
//!
//! - [`Content::draw`] issues commands against a [`LayoutPage`] (canvas).
//! - [`Content::render_markup`] returns an HTML fragment (markup).
//!
//! Both paths measure with [`crate::text`] and the node's own fixed sizes,
//! so the cursor advance is identical whichever backend runs. Markup is
//! emitted as normal-flow blocks whose height equals that advance.

mod columns;
mod image;
mod qr;
mod table;
mod text;

pub use columns::{ColumnItem, Columns};
pub use image::Image;
pub use qr::QrCode;
pub use table::{Column, Table, TableStyle};
pub use text::Text;

use crate::layout::{Bounds, LayoutPage};
use crate::markup::{escape, pt};
use crate::style::Color;

#[derive(Debug, Clone)]
pub enum Content {
    Text(Text),
    Spacer(Spacer),
    Rule(Rule),
    FilledBox(FilledBox),
    Columns(Columns),
    Table(Table),
    Image(Image),
    QrCode(QrCode),
}

impl Content {
    /// Draw onto the canvas and return the new cursor.
    pub fn draw(&self, page: &mut LayoutPage, bounds: Bounds, cursor: f64) -> f64 {
        match self {
            Content::Text(t) => t.draw(page, bounds, cursor),
            Content::Spacer(s) => cursor - s.height,
            Content::Rule(r) => r.draw(page, bounds, cursor),
            Content::FilledBox(b) => b.draw(page, bounds, cursor),
            Content::Columns(c) => c.draw(page, bounds, cursor),
            Content::Table(t) => t.draw(page, bounds, cursor),
            Content::Image(i) => i.draw(page, bounds, cursor),
            Content::QrCode(q) => q.draw(page, bounds, cursor),
        }
    }

    /// Emit an HTML fragment and return it with the new cursor.
    pub fn render_markup(&self, bounds: Bounds, cursor: f64) -> (String, f64) {
        match self {
            Content::Text(t) => t.render_markup(bounds, cursor),
            Content::Spacer(s) => (block(s.height, ""), cursor - s.height),
            Content::Rule(r) => r.render_markup(cursor),
            Content::FilledBox(b) => b.render_markup(bounds, cursor),
            Content::Columns(c) => c.render_markup(bounds, cursor),
            Content::Table(t) => t.render_markup(bounds, cursor),
            Content::Image(i) => i.render_markup(bounds, cursor),
            Content::QrCode(q) => q.render_markup(bounds, cursor),
        }
    }

    /// Short label for overflow log lines.
    pub fn kind(&self) -> &'static str {
        match self {
            Content::Text(_) => "text",
            Content::Spacer(_) => "spacer",
            Content::Rule(_) => "rule",
            Content::FilledBox(_) => "box",
            Content::Columns(_) => "columns",
            Content::Table(_) => "table",
            Content::Image(_) => "image",
            Content::QrCode(_) => "qr",
        }
    }
}

/// Draw a content list top-down starting at `cursor`.
pub fn draw_all(contents: &[Content], page: &mut LayoutPage, bounds: Bounds, cursor: f64) -> f64 {
    contents
        .iter()
        .fold(cursor, |cursor, node| node.draw(page, bounds, cursor))
}

/// Markup for a content list, concatenated in order.
pub fn render_all(contents: &[Content], bounds: Bounds, cursor: f64) -> (String, f64) {
    let mut html = String::new();
    let mut cursor = cursor;
    for node in contents {
        let (fragment, next) = node.render_markup(bounds, cursor);
        html.push_str(&fragment);
        cursor = next;
    }
    (html, cursor)
}

/// A normal-flow block of a fixed height.
pub(crate) fn block(height: f64, inner: &str) -> String {
    format!(
        "<div style=\"height:{};overflow:visible;position:relative\">{inner}</div>",
        pt(height)
    )
}

/// Empty vertical space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spacer {
    pub height: f64,
}

impl Spacer {
    pub fn new(height: f64) -> Self {
        Self { height }
    }
}

impl Default for Spacer {
    fn default() -> Self {
        Self { height: 12.0 }
    }
}

/// A horizontal line across the bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rule {
    pub thickness: f64,
    pub color: Color,
}

impl Default for Rule {
    fn default() -> Self {
        Self {
            thickness: 0.5,
            color: Color::LIGHT_GRAY,
        }
    }
}

impl Rule {
    pub fn new(thickness: f64, color: Color) -> Self {
        Self { thickness, color }
    }

    fn advance(&self) -> f64 {
        self.thickness + 4.0
    }

    fn draw(&self, page: &mut LayoutPage, bounds: Bounds, cursor: f64) -> f64 {
        let y = cursor - self.thickness / 2.0;
        page.stroke_line((bounds.x, y), (bounds.right(), y), self.thickness, self.color);
        cursor - self.advance()
    }

    fn render_markup(&self, cursor: f64) -> (String, f64) {
        let line = format!(
            "<div style=\"border-top:{} solid {}\"></div>",
            pt(self.thickness),
            self.color.css()
        );
        (block(self.advance(), &line), cursor - self.advance())
    }
}

/// A filled rectangle of fixed height, with children laid out inside.
///
/// The box always advances by exactly `height`; children that need more
/// space spill out of it.
#[derive(Debug, Clone)]
pub struct FilledBox {
    pub height: f64,
    pub color: Color,
    pub padding: f64,
    pub contents: Vec<Content>,
}

impl FilledBox {
    pub fn new(height: f64, color: Color) -> Self {
        Self {
            height,
            color,
            padding: 0.0,
            contents: Vec::new(),
        }
    }

    pub fn padding(mut self, padding: f64) -> Self {
        self.padding = padding;
        self
    }

    pub fn push(mut self, content: impl Into<Content>) -> Self {
        self.contents.push(content.into());
        self
    }

    fn inner(&self, bounds: Bounds, cursor: f64) -> Bounds {
        Bounds::new(
            bounds.x + self.padding,
            cursor - self.height + self.padding,
            bounds.width - self.padding * 2.0,
            self.height - self.padding * 2.0,
        )
    }

    fn draw(&self, page: &mut LayoutPage, bounds: Bounds, cursor: f64) -> f64 {
        page.fill_rect(bounds.x, cursor - self.height, bounds.width, self.height, self.color);
        let inner = self.inner(bounds, cursor);
        let end = draw_all(&self.contents, page, inner, cursor - self.padding);
        if end < inner.y {
            let kinds: Vec<&str> = self.contents.iter().map(Content::kind).collect();
            log::debug!("box content [{}] overflows by {:.1}pt", kinds.join(", "), inner.y - end);
        }
        cursor - self.height
    }

    fn render_markup(&self, bounds: Bounds, cursor: f64) -> (String, f64) {
        let inner = self.inner(bounds, cursor);
        let (children, _) = render_all(&self.contents, inner, cursor - self.padding);
        let html = format!(
            "<div style=\"height:{h};background:{bg};padding:{p};box-sizing:border-box\">{children}</div>",
            h = pt(self.height),
            bg = self.color.css(),
            p = pt(self.padding),
        );
        (html, cursor - self.height)
    }
}

impl From<Text> for Content {
    fn from(t: Text) -> Self {
        Content::Text(t)
    }
}

impl From<Spacer> for Content {
    fn from(s: Spacer) -> Self {
        Content::Spacer(s)
    }
}

impl From<Rule> for Content {
    fn from(r: Rule) -> Self {
        Content::Rule(r)
    }
}

impl From<FilledBox> for Content {
    fn from(b: FilledBox) -> Self {
        Content::FilledBox(b)
    }
}

impl From<Columns> for Content {
    fn from(c: Columns) -> Self {
        Content::Columns(c)
    }
}

impl From<Table> for Content {
    fn from(t: Table) -> Self {
        Content::Table(t)
    }
}

impl From<Image> for Content {
    fn from(i: Image) -> Self {
        Content::Image(i)
    }
}

impl From<QrCode> for Content {
    fn from(q: QrCode) -> Self {
        Content::QrCode(q)
    }
}

impl From<&str> for Content {
    fn from(s: &str) -> Self {
        Content::Text(Text::new(s))
    }
}

/// Markup text with HTML special characters escaped and newlines kept.
pub(crate) fn escape_lines(lines: &[String]) -> String {
    lines
        .iter()
        .map(|l| escape(l))
        .collect::<Vec<_>>()
        .join("<br>")
}
