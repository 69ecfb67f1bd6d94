//! # Style Primitives
//!
//! Colors, fonts, and alignment shared by every content node. The set is
//! deliberately small: business documents need a handful of colors, the
//! standard PDF faces, and three alignments. Everything here serializes so
//! themes can be read from JSON.

use serde::{Deserialize, Serialize};

/// An RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f64, // 0.0 - 1.0
    pub g: f64,
    pub b: f64,
    #[serde(default = "opaque")]
    pub a: f64,
}

fn opaque() -> f64 {
    1.0
}

impl Color {
    pub const BLACK: Color = Color::gray(0.0);
    pub const WHITE: Color = Color::gray(1.0);
    pub const GRAY: Color = Color::gray(0.5);
    pub const LIGHT_GRAY: Color = Color::gray(0.75);
    pub const DARK_GRAY: Color = Color::gray(0.25);

    pub const fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// A neutral gray where every channel equals `white`.
    pub const fn gray(white: f64) -> Self {
        Self::rgb(white, white, white)
    }

    pub fn hex(hex: &str) -> Self {
        let hex = hex.trim_start_matches('#');
        let (r, g, b) = match hex.len() {
            3 => {
                let r = u8::from_str_radix(&hex[0..1].repeat(2), 16).unwrap_or(0);
                let g = u8::from_str_radix(&hex[1..2].repeat(2), 16).unwrap_or(0);
                let b = u8::from_str_radix(&hex[2..3].repeat(2), 16).unwrap_or(0);
                (r, g, b)
            }
            6 => {
                let r = u8::from_str_radix(&hex[0..2], 16).unwrap_or(0);
                let g = u8::from_str_radix(&hex[2..4], 16).unwrap_or(0);
                let b = u8::from_str_radix(&hex[4..6], 16).unwrap_or(0);
                (r, g, b)
            }
            _ => (0, 0, 0),
        };
        Self::rgb(r as f64 / 255.0, g as f64 / 255.0, b as f64 / 255.0)
    }

    /// Mix toward white, keeping `amount` of the original color.
    pub fn tint(&self, amount: f64) -> Self {
        let mix = |c: f64| c * amount + (1.0 - amount);
        Self::rgb(mix(self.r), mix(self.g), mix(self.b))
    }

    /// CSS color string, e.g. `rgb(255,0,0)` or `rgba(255,0,0,0.50)`.
    pub fn css(&self) -> String {
        let channel = |c: f64| (c.clamp(0.0, 1.0) * 255.0) as u8;
        let (r, g, b) = (channel(self.r), channel(self.g), channel(self.b));
        if self.a < 1.0 {
            format!("rgba({r},{g},{b},{:.2})", self.a)
        } else {
            format!("rgb({r},{g},{b})")
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::BLACK
    }
}

/// Horizontal placement of text, images, and QR symbols inside their bounds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TextAlign {
    #[default]
    Leading,
    Center,
    Trailing,
}

impl TextAlign {
    pub fn css(&self) -> &'static str {
        match self {
            TextAlign::Leading => "left",
            TextAlign::Center => "center",
            TextAlign::Trailing => "right",
        }
    }

    /// X offset of an item `item_width` wide placed inside `[x, x + width]`.
    pub fn offset(&self, x: f64, width: f64, item_width: f64) -> f64 {
        match self {
            TextAlign::Leading => x,
            TextAlign::Center => x + (width - item_width) / 2.0,
            TextAlign::Trailing => x + width - item_width,
        }
    }
}

/// The base families of the PDF standard 14 fonts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FontFamily {
    #[default]
    Helvetica,
    Times,
    Courier,
}

/// A concrete face: family plus weight and slant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Font {
    pub family: FontFamily,
    #[serde(default)]
    pub bold: bool,
    #[serde(default)]
    pub italic: bool,
}

impl Font {
    pub const HELVETICA: Font = Font::regular(FontFamily::Helvetica);
    pub const TIMES: Font = Font::regular(FontFamily::Times);
    pub const COURIER: Font = Font::regular(FontFamily::Courier);

    pub const fn regular(family: FontFamily) -> Self {
        Self {
            family,
            bold: false,
            italic: false,
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    /// The standard 14 base-font name for this face.
    pub fn pdf_name(&self) -> &'static str {
        match (self.family, self.bold, self.italic) {
            (FontFamily::Helvetica, false, false) => "Helvetica",
            (FontFamily::Helvetica, true, false) => "Helvetica-Bold",
            (FontFamily::Helvetica, false, true) => "Helvetica-Oblique",
            (FontFamily::Helvetica, true, true) => "Helvetica-BoldOblique",
            (FontFamily::Times, false, false) => "Times-Roman",
            (FontFamily::Times, true, false) => "Times-Bold",
            (FontFamily::Times, false, true) => "Times-Italic",
            (FontFamily::Times, true, true) => "Times-BoldItalic",
            (FontFamily::Courier, false, false) => "Courier",
            (FontFamily::Courier, true, false) => "Courier-Bold",
            (FontFamily::Courier, false, true) => "Courier-Oblique",
            (FontFamily::Courier, true, true) => "Courier-BoldOblique",
        }
    }

    pub fn css_family(&self) -> &'static str {
        match self.family {
            FontFamily::Helvetica => "Helvetica,Arial,sans-serif",
            FontFamily::Times => "'Times New Roman',Times,serif",
            FontFamily::Courier => "'Courier New',Courier,monospace",
        }
    }
}
