//! # Image Sources
//!
//! Resolves an image source (file path, `data:` URI, or bare base64) into a
//! [`LoadedImage`]. The canvas backend embeds JPEGs as-is with DCTDecode and
//! PNGs as decoded RGB plus an optional alpha SMask. The markup backend only
//! needs the original encoded bytes and their MIME type for a data URI, so
//! both are kept alongside the pixels.

use std::io::Cursor;
use std::path::Path;

use base64::Engine;

use crate::error::FolioError;

#[derive(Debug, Clone)]
pub struct LoadedImage {
    pub pixels: Pixels,
    pub width_px: u32,
    pub height_px: u32,
    /// The source bytes exactly as read.
    pub encoded: Vec<u8>,
    pub mime: &'static str,
}

#[derive(Debug, Clone)]
pub enum Pixels {
    /// Passed through untouched; `gray` when the frame has one component.
    Jpeg { gray: bool },
    /// `rgb` is width × height × 3, `alpha` width × height when any pixel
    /// is translucent.
    Rgb { rgb: Vec<u8>, alpha: Option<Vec<u8>> },
}

impl LoadedImage {
    /// Width over height; 1.0 for a degenerate image.
    pub fn aspect_ratio(&self) -> f64 {
        if self.height_px == 0 {
            1.0
        } else {
            self.width_px as f64 / self.height_px as f64
        }
    }

    /// `data:` URI carrying the original bytes.
    pub fn data_uri(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.mime,
            base64::engine::general_purpose::STANDARD.encode(&self.encoded)
        )
    }
}

/// Load and decode an image from `src`.
pub fn load_image(src: &str) -> Result<LoadedImage, FolioError> {
    let bytes = read_source(src)?;
    decode(bytes)
}

fn read_source(src: &str) -> Result<Vec<u8>, FolioError> {
    if let Some(rest) = src.strip_prefix("data:") {
        let (_, payload) = rest
            .split_once(',')
            .ok_or_else(|| FolioError::Image("data URI has no payload".to_string()))?;
        return decode_base64(payload);
    }

    // Base64 may contain '/', so only explicit path prefixes count as paths.
    let looks_like_path = src.starts_with('/')
        || src.starts_with("./")
        || src.starts_with("../")
        || Path::new(src).extension().is_some() && Path::new(src).exists();
    if looks_like_path {
        return std::fs::read(src)
            .map_err(|e| FolioError::Image(format!("cannot read '{src}': {e}")));
    }

    decode_base64(src)
}

fn decode_base64(input: &str) -> Result<Vec<u8>, FolioError> {
    let compact: String = input.chars().filter(|c| !c.is_whitespace()).collect();
    base64::engine::general_purpose::STANDARD
        .decode(compact)
        .map_err(|e| FolioError::Image(format!("invalid base64: {e}")))
}

fn decode(bytes: Vec<u8>) -> Result<LoadedImage, FolioError> {
    if bytes.starts_with(&[0xFF, 0xD8]) {
        decode_jpeg(bytes)
    } else if bytes.starts_with(&[0x89, b'P', b'N', b'G']) {
        decode_png(bytes)
    } else {
        Err(FolioError::Image("unsupported image format, expected PNG or JPEG".to_string()))
    }
}

fn decode_jpeg(bytes: Vec<u8>) -> Result<LoadedImage, FolioError> {
    let (width, height) = image::io::Reader::with_format(Cursor::new(&bytes), image::ImageFormat::Jpeg)
        .into_dimensions()
        .map_err(|e| FolioError::Image(format!("bad JPEG header: {e}")))?;

    Ok(LoadedImage {
        pixels: Pixels::Jpeg {
            gray: jpeg_components(&bytes) == Some(1),
        },
        width_px: width,
        height_px: height,
        encoded: bytes,
        mime: "image/jpeg",
    })
}

/// Component count from the first start-of-frame segment.
fn jpeg_components(data: &[u8]) -> Option<u8> {
    let mut i = 2;
    while i + 3 < data.len() && data[i] == 0xFF {
        let marker = data[i + 1];
        if matches!(marker, 0xC0..=0xC3 | 0xC5..=0xC7 | 0xC9..=0xCB | 0xCD..=0xCF) {
            return data.get(i + 9).copied();
        }
        let len = u16::from_be_bytes([data[i + 2], data[i + 3]]) as usize;
        i += 2 + len;
    }
    None
}

fn decode_png(bytes: Vec<u8>) -> Result<LoadedImage, FolioError> {
    let decoded = image::io::Reader::with_format(Cursor::new(&bytes), image::ImageFormat::Png)
        .decode()
        .map_err(|e| FolioError::Image(format!("cannot decode PNG: {e}")))?
        .to_rgba8();

    let (width, height) = decoded.dimensions();
    let count = width as usize * height as usize;
    let mut rgb = Vec::with_capacity(count * 3);
    let mut alpha = Vec::with_capacity(count);
    for px in decoded.pixels() {
        rgb.extend_from_slice(&px.0[..3]);
        alpha.push(px.0[3]);
    }
    let translucent = alpha.iter().any(|&a| a != 255);

    Ok(LoadedImage {
        pixels: Pixels::Rgb {
            rgb,
            alpha: translucent.then_some(alpha),
        },
        width_px: width,
        height_px: height,
        encoded: bytes,
        mime: "image/png",
    })
}
