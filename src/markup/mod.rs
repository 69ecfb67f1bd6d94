//! # Markup Backend
//!
//! Assembles one HTML document for the whole [`Document`]: a fixed-size,
//! absolutely positioned box per page with the body and footer placed at
//! the same offsets the canvas backend uses. Content nodes emit normal-flow
//! blocks whose heights equal their cursor advance, so a page body stacks
//! exactly like its display list.
//!
//! Turning the HTML into PDF bytes is a [`convert::Converter`]'s job.

pub mod convert;

use std::fmt::Write;

use crate::content::{render_all, Content};
use crate::model::{Document, Page};

/// A length in points, as CSS.
pub fn pt(value: f64) -> String {
    format!("{value:.2}pt")
}

/// Escape text for HTML element content and attribute values.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// The complete HTML document; empty when there are no pages.
pub fn html_document(doc: &Document) -> String {
    let Some(first) = doc.pages.first() else {
        return String::new();
    };
    let (width, height) = first.size.dimensions();
    let title = doc.metadata.title.as_deref().unwrap_or("");

    let mut html = String::new();
    let _ = write!(
        html,
        "<!DOCTYPE html>\n<html><head><meta charset=\"utf-8\"><title>{title}</title><style>\
         @page{{size:{w} {h};margin:0}}\
         html,body{{margin:0;padding:0}}\
         .page{{position:relative;overflow:hidden;page-break-after:always}}\
         .page:last-child{{page-break-after:auto}}\
         </style></head><body>\n",
        title = escape(title),
        w = pt(width),
        h = pt(height),
    );
    for page in &doc.pages {
        html.push_str(&page_markup(page));
        html.push('\n');
    }
    html.push_str("</body></html>\n");
    html
}

/// One page as a positioned box.
pub fn page_markup(page: &Page) -> String {
    let (width, height) = page.size.dimensions();
    let body = page.body_bounds();
    let (body_html, end) = render_all(&page.contents, body, body.top());
    if end < body.y {
        log::debug!(
            "page body overflows its area by {:.1}pt (last node: {})",
            body.y - end,
            page.contents.last().map_or("none", Content::kind)
        );
    }

    let mut html = format!(
        "<div class=\"page\" style=\"width:{};height:{}\">",
        pt(width),
        pt(height)
    );
    let _ = write!(
        html,
        "<div style=\"position:absolute;left:{};top:{};width:{};height:{}\">{body_html}</div>",
        pt(body.x),
        pt(height - body.top()),
        pt(body.width),
        pt(body.height),
    );
    if let (Some(footer), Some(band)) = (&page.footer, page.footer_bounds()) {
        let (footer_html, _) = render_all(&footer.contents, band, band.top());
        let _ = write!(
            html,
            "<div style=\"position:absolute;left:{};top:{};width:{};height:{}\">{footer_html}</div>",
            pt(band.x),
            pt(height - band.top()),
            pt(band.width),
            pt(band.height),
        );
    }
    html.push_str("</div>");
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::Text;
    use crate::model::{Footer, Metadata, PageSize};

    #[test]
    fn escapes_markup_characters() {
        assert_eq!(escape("<b>\"Tom\" & 'Jerry'</b>"), "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;");
    }

    #[test]
    fn no_pages_no_markup() {
        assert_eq!(html_document(&Document::default()), "");
    }

    #[test]
    fn pages_are_sized_and_footers_pinned() {
        let doc = Document::new(vec![
            Page::new(PageSize::A4)
                .margin(40.0)
                .push(Text::new("Body"))
                .footer(Footer::new(30.0).push(Text::new("Thanks"))),
            Page::new(PageSize::A4).push(Text::new("Second")),
        ])
        .metadata(Metadata {
            title: Some("Invoice <1>".into()),
            ..Metadata::default()
        });
        let html = html_document(&doc);
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("@page{size:595.00pt 842.00pt;margin:0}"));
        assert!(html.contains("<title>Invoice &lt;1&gt;</title>"));
        assert_eq!(html.matches("class=\"page\"").count(), 2);
        // footer band top edge: 842 - (40 + 30)
        assert!(html.contains("top:772.00pt;width:515.00pt;height:30.00pt"));
        assert!(html.contains("Thanks"));
    }
}
