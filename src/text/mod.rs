//! # Approximate Text Metrics
//!
//! Both backends measure text through this module so a paragraph consumes
//! the same vertical space whether it is drawn onto a canvas or emitted as
//! markup. Widths approximate the standard-14 AFM tables by character class;
//! that is close enough to align cells and wrap paragraphs, and exact metrics
//! are the renderer's business.

use unicode_linebreak::{linebreaks, BreakOpportunity};

use crate::style::{Font, FontFamily};

/// Line advance as a multiple of the font size.
pub const LINE_HEIGHT_FACTOR: f64 = 1.2;

/// Distance from the top of a line box to its baseline, in ems.
pub const BASELINE_OFFSET: f64 = 0.9;

pub fn line_height(font_size: f64) -> f64 {
    font_size * LINE_HEIGHT_FACTOR
}

/// Advance width of one character in points.
pub fn char_width(ch: char, font: Font, font_size: f64) -> f64 {
    if font.family == FontFamily::Courier {
        return 0.6 * font_size;
    }
    let em = match ch {
        ' ' | 'i' | 'j' | 'l' | '.' | ',' | ':' | ';' | '\'' | '!' | '|' => 0.278,
        'f' | 't' | 'r' | 'I' | '(' | ')' | '[' | ']' | '-' | '/' => 0.333,
        'm' | 'w' | 'M' | 'W' | '@' | '%' => 0.833,
        '0'..='9' | '$' | '€' | '#' | '+' | '=' | '<' | '>' => 0.556,
        c if c.is_uppercase() => 0.667,
        _ => 0.5,
    };
    let em = if font.bold { em * 1.05 } else { em };
    em * font_size
}

/// Width of a single-line string in points.
pub fn measure(text: &str, font: Font, font_size: f64) -> f64 {
    text.chars().map(|ch| char_width(ch, font, font_size)).sum()
}

/// Greedy wrap into lines no wider than `width`, breaking only at UAX#14
/// opportunities.
///
/// Mandatory breaks (`\n` and friends) end the line, runs of whitespace
/// collapse to one space, a segment wider than the line is split by
/// character, and an empty string produces no lines at all.
pub fn wrap(text: &str, width: f64, font: Font, font_size: f64) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }

    let space = char_width(' ', font, font_size);
    let mut lines = Vec::new();
    let mut line = String::new();
    let mut line_width = 0.0;
    let mut pending_space = false;
    let mut start = 0;

    for (offset, opportunity) in linebreaks(text) {
        let segment = &text[start..offset];
        start = offset;

        let word = segment.trim();
        if !word.is_empty() {
            let word_width = measure(word, font, font_size);
            let gap = if pending_space && !line.is_empty() { space } else { 0.0 };

            if !line.is_empty() && line_width + gap + word_width > width {
                lines.push(std::mem::take(&mut line));
                line_width = 0.0;
            }

            if line.is_empty() && word_width > width {
                for ch in word.chars() {
                    let w = char_width(ch, font, font_size);
                    if !line.is_empty() && line_width + w > width {
                        lines.push(std::mem::take(&mut line));
                        line_width = 0.0;
                    }
                    line.push(ch);
                    line_width += w;
                }
            } else {
                if !line.is_empty() && gap > 0.0 {
                    line.push(' ');
                    line_width += gap;
                }
                line.push_str(word);
                line_width += word_width;
            }
        }
        pending_space = segment.ends_with(|c: char| c.is_whitespace());

        if opportunity == BreakOpportunity::Mandatory && segment.ends_with(is_line_break) {
            lines.push(std::mem::take(&mut line));
            line_width = 0.0;
            pending_space = false;
        }
    }

    // Text after the last hard break, or a blank line after a trailing one
    lines.push(line);
    lines
}

fn is_line_break(ch: char) -> bool {
    matches!(ch, '\n' | '\r' | '\u{0B}' | '\u{0C}' | '\u{85}' | '\u{2028}' | '\u{2029}')
}
