//! # PDF Serializer
//!
//! Writes the display lists produced by layout into a PDF 1.7 file. The
//! subset needed for business documents is small: filled rectangles,
//! stroked lines, single-line text runs in the standard 14 fonts, and
//! raster images.
//!
//! ## PDF Structure (simplified)
//!
//! ```text
//! %PDF-1.7            <- header
//! 1 0 obj ... endobj  <- catalog
//! 2 0 obj ... endobj  <- page tree
//! ...                 <- fonts, images, content streams, pages, info
//! xref                <- byte offset of every object
//! trailer             <- points to the root and info objects
//! %%EOF
//! ```
//!
//! Layout already works in PDF user space (origin bottom-left), so
//! commands are written without any coordinate flip. Text is encoded as
//! WinAnsi; characters outside it are replaced with `?`.

use std::fmt::Write as FmtWrite; // for write! on String
use std::io::Write as IoWrite; // for write! on Vec<u8>
use std::sync::Arc;

use miniz_oxide::deflate::compress_to_vec_zlib;

use crate::image_loader::{LoadedImage, Pixels};
use crate::layout::{DrawCommand, LayoutPage};
use crate::model::Metadata;
use crate::style::{Color, Font};

pub struct PdfWriter;

/// Tracks allocated PDF objects during writing.
struct PdfBuilder {
    objects: Vec<PdfObject>,
    /// Each face in first-use order, with its object ID; `/F{index}`.
    fonts: Vec<(Font, usize)>,
    /// Each distinct image with its XObject ID; `/Im{index}`.
    images: Vec<(Arc<LoadedImage>, usize)>,
}

struct PdfObject {
    data: Vec<u8>,
}

impl PdfBuilder {
    fn reserve(&mut self) -> usize {
        self.objects.push(PdfObject { data: Vec::new() });
        self.objects.len() - 1
    }

    fn push(&mut self, data: Vec<u8>) -> usize {
        self.objects.push(PdfObject { data });
        self.objects.len() - 1
    }

    fn font_index(&self, font: Font) -> usize {
        self.fonts.iter().position(|(f, _)| *f == font).unwrap_or(0)
    }

    fn image_index(&self, image: &Arc<LoadedImage>) -> Option<usize> {
        self.images.iter().position(|(i, _)| Arc::ptr_eq(i, image))
    }
}

impl Default for PdfWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfWriter {
    pub fn new() -> Self {
        Self
    }

    /// Write laid-out pages to a PDF byte vector.
    pub fn write(&self, pages: &[LayoutPage], metadata: &Metadata) -> Vec<u8> {
        let mut builder = PdfBuilder {
            objects: Vec::new(),
            fonts: Vec::new(),
            images: Vec::new(),
        };

        // 0 = placeholder (PDF objects are 1-indexed), 1 = Catalog, 2 = Pages
        builder.reserve();
        builder.reserve();
        builder.reserve();

        Self::register_fonts(&mut builder, pages);
        Self::register_images(&mut builder, pages);

        let font_resources: String = (0..builder.fonts.len())
            .map(|i| format!("/F{} {} 0 R", i, builder.fonts[i].1))
            .collect::<Vec<_>>()
            .join(" ");
        let xobject_resources: String = (0..builder.images.len())
            .map(|i| format!("/Im{} {} 0 R", i, builder.images[i].1))
            .collect::<Vec<_>>()
            .join(" ");
        let resources = if xobject_resources.is_empty() {
            format!("/Font << {} >>", font_resources)
        } else {
            format!("/Font << {} >> /XObject << {} >>", font_resources, xobject_resources)
        };

        let mut page_obj_ids: Vec<usize> = Vec::with_capacity(pages.len());
        for page in pages {
            let content = Self::build_content_stream(page, &builder);
            let compressed = compress_to_vec_zlib(content.as_bytes(), 6);
            let mut content_data: Vec<u8> = Vec::new();
            let _ = write!(
                content_data,
                "<< /Length {} /Filter /FlateDecode >>\nstream\n",
                compressed.len()
            );
            content_data.extend_from_slice(&compressed);
            content_data.extend_from_slice(b"\nendstream");
            let content_obj_id = builder.push(content_data);

            let page_dict = format!(
                "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {:.2} {:.2}] \
                 /Contents {} 0 R /Resources << {} >> >>",
                page.width, page.height, content_obj_id, resources
            );
            page_obj_ids.push(builder.push(page_dict.into_bytes()));
        }

        builder.objects[1].data = b"<< /Type /Catalog /Pages 2 0 R >>".to_vec();

        let kids: String = page_obj_ids
            .iter()
            .map(|id| format!("{} 0 R", id))
            .collect::<Vec<_>>()
            .join(" ");
        builder.objects[2].data = format!(
            "<< /Type /Pages /Kids [{}] /Count {} >>",
            kids,
            page_obj_ids.len()
        )
        .into_bytes();

        let mut info = String::from("<< ");
        if let Some(ref title) = metadata.title {
            let _ = write!(info, "/Title ({}) ", Self::escape_pdf_string(title));
        }
        if let Some(ref author) = metadata.author {
            let _ = write!(info, "/Author ({}) ", Self::escape_pdf_string(author));
        }
        if let Some(ref subject) = metadata.subject {
            let _ = write!(info, "/Subject ({}) ", Self::escape_pdf_string(subject));
        }
        let _ = write!(info, "/Producer (folio {}) >>", env!("CARGO_PKG_VERSION"));
        let info_obj_id = builder.push(info.into_bytes());

        Self::serialize(&builder, info_obj_id)
    }

    /// PDF operators for one page.
    fn build_content_stream(page: &LayoutPage, builder: &PdfBuilder) -> String {
        let mut stream = String::new();
        for command in &page.commands {
            match command {
                DrawCommand::FillRect {
                    x,
                    y,
                    width,
                    height,
                    color,
                } => {
                    if color.a <= 0.0 {
                        continue;
                    }
                    let _ = write!(
                        stream,
                        "q\n{} rg\n{:.2} {:.2} {:.2} {:.2} re\nf\nQ\n",
                        Self::rgb(color),
                        x,
                        y,
                        width,
                        height
                    );
                }
                DrawCommand::Line {
                    from,
                    to,
                    width,
                    color,
                } => {
                    let _ = write!(
                        stream,
                        "q\n{} RG\n{:.2} w\n{:.2} {:.2} m\n{:.2} {:.2} l\nS\nQ\n",
                        Self::rgb(color),
                        width,
                        from.0,
                        from.1,
                        to.0,
                        to.1
                    );
                }
                DrawCommand::Text {
                    x,
                    y,
                    text,
                    font,
                    size,
                    color,
                } => {
                    let _ = write!(
                        stream,
                        "BT\n/F{} {:.2} Tf\n{} rg\n{:.2} {:.2} Td\n({}) Tj\nET\n",
                        builder.font_index(*font),
                        size,
                        Self::rgb(color),
                        x,
                        y,
                        Self::escape_pdf_string(text)
                    );
                }
                DrawCommand::Image {
                    x,
                    y,
                    width,
                    height,
                    image,
                } => {
                    if let Some(index) = builder.image_index(image) {
                        let _ = write!(
                            stream,
                            "q\n{:.2} 0 0 {:.2} {:.2} {:.2} cm\n/Im{} Do\nQ\n",
                            width, height, x, y, index
                        );
                    }
                }
            }
        }
        stream
    }

    fn rgb(color: &Color) -> String {
        format!("{:.3} {:.3} {:.3}", color.r, color.g, color.b)
    }

    /// One Type1 font object per face used anywhere in the document.
    fn register_fonts(builder: &mut PdfBuilder, pages: &[LayoutPage]) {
        let mut used: Vec<Font> = Vec::new();
        for page in pages {
            for command in &page.commands {
                if let DrawCommand::Text { font, .. } = command {
                    if !used.contains(font) {
                        used.push(*font);
                    }
                }
            }
        }
        // Keep /F0 valid even on pages without text
        if used.is_empty() {
            used.push(Font::HELVETICA);
        }

        for font in used {
            let dict = format!(
                "<< /Type /Font /Subtype /Type1 /BaseFont /{} /Encoding /WinAnsiEncoding >>",
                font.pdf_name()
            );
            let id = builder.push(dict.into_bytes());
            builder.fonts.push((font, id));
        }
    }

    fn register_images(builder: &mut PdfBuilder, pages: &[LayoutPage]) {
        for page in pages {
            for command in &page.commands {
                if let DrawCommand::Image { image, .. } = command {
                    if builder.image_index(image).is_none() {
                        let id = Self::write_image_xobject(builder, image);
                        builder.images.push((Arc::clone(image), id));
                    }
                }
            }
        }
    }

    /// Write a single image as one or two XObject PDF objects.
    /// Returns the main XObject ID.
    fn write_image_xobject(builder: &mut PdfBuilder, image: &LoadedImage) -> usize {
        match &image.pixels {
            Pixels::Jpeg { gray } => {
                let color_space = if *gray { "/DeviceGray" } else { "/DeviceRGB" };
                let mut obj_data: Vec<u8> = Vec::new();
                let _ = write!(
                    obj_data,
                    "<< /Type /XObject /Subtype /Image /Width {} /Height {} /ColorSpace {} \
                     /BitsPerComponent 8 /Filter /DCTDecode /Length {} >>\nstream\n",
                    image.width_px,
                    image.height_px,
                    color_space,
                    image.encoded.len()
                );
                obj_data.extend_from_slice(&image.encoded);
                obj_data.extend_from_slice(b"\nendstream");
                builder.push(obj_data)
            }

            Pixels::Rgb { rgb, alpha } => {
                let smask_ref = alpha
                    .as_ref()
                    .map(|alpha| {
                        let id = Self::flate_image(builder, image, "/DeviceGray", alpha, "");
                        format!(" /SMask {} 0 R", id)
                    })
                    .unwrap_or_default();
                Self::flate_image(builder, image, "/DeviceRGB", rgb, &smask_ref)
            }
        }
    }

    fn flate_image(
        builder: &mut PdfBuilder,
        image: &LoadedImage,
        color_space: &str,
        samples: &[u8],
        extra: &str,
    ) -> usize {
        let compressed = compress_to_vec_zlib(samples, 6);
        let mut obj_data: Vec<u8> = Vec::new();
        let _ = write!(
            obj_data,
            "<< /Type /XObject /Subtype /Image /Width {} /Height {} /ColorSpace {} \
             /BitsPerComponent 8 /Filter /FlateDecode /Length {}{} >>\nstream\n",
            image.width_px,
            image.height_px,
            color_space,
            compressed.len(),
            extra
        );
        obj_data.extend_from_slice(&compressed);
        obj_data.extend_from_slice(b"\nendstream");
        builder.push(obj_data)
    }

    /// Encode a string as a WinAnsi PDF literal body: delimiters escaped,
    /// bytes outside printable ASCII written as octal.
    fn escape_pdf_string(s: &str) -> String {
        let mut out = String::with_capacity(s.len());
        for ch in s.chars() {
            let byte = Self::unicode_to_winansi(ch).unwrap_or(b'?');
            match byte {
                b'\\' | b'(' | b')' => {
                    out.push('\\');
                    out.push(byte as char);
                }
                0x20..=0x7E => out.push(byte as char),
                _ => {
                    let _ = write!(out, "\\{:03o}", byte);
                }
            }
        }
        out
    }

    /// Map a Unicode codepoint to a WinAnsiEncoding byte value.
    ///
    /// WinAnsiEncoding is based on Windows-1252. Most codepoints in
    /// 0x20..=0x7E and 0xA0..=0xFF map directly. The 0x80..=0x9F range
    /// contains special mappings for smart quotes, bullets, dashes, etc.
    fn unicode_to_winansi(ch: char) -> Option<u8> {
        let cp = ch as u32;
        if (0x20..=0x7E).contains(&cp) || (0xA0..=0xFF).contains(&cp) {
            return Some(cp as u8);
        }
        match cp {
            0x20AC => Some(0x80), // Euro sign
            0x201A => Some(0x82),
            0x0192 => Some(0x83),
            0x201E => Some(0x84),
            0x2026 => Some(0x85), // Horizontal ellipsis
            0x2020 => Some(0x86),
            0x2021 => Some(0x87),
            0x02C6 => Some(0x88),
            0x2030 => Some(0x89), // Per mille sign
            0x0160 => Some(0x8A),
            0x2039 => Some(0x8B),
            0x0152 => Some(0x8C),
            0x017D => Some(0x8E),
            0x2018 => Some(0x91), // Curly quotes
            0x2019 => Some(0x92),
            0x201C => Some(0x93),
            0x201D => Some(0x94),
            0x2022 => Some(0x95), // Bullet
            0x2013 => Some(0x96), // En dash
            0x2014 => Some(0x97), // Em dash
            0x02DC => Some(0x98),
            0x2122 => Some(0x99), // Trade mark sign
            0x0161 => Some(0x9A),
            0x203A => Some(0x9B),
            0x0153 => Some(0x9C),
            0x017E => Some(0x9E),
            0x0178 => Some(0x9F),
            _ => None,
        }
    }

    /// Serialize all objects into the final PDF byte stream.
    fn serialize(builder: &PdfBuilder, info_obj_id: usize) -> Vec<u8> {
        let mut output: Vec<u8> = Vec::new();
        let mut offsets: Vec<usize> = vec![0; builder.objects.len()];

        output.extend_from_slice(b"%PDF-1.7\n");
        output.extend_from_slice(b"%\xe2\xe3\xcf\xd3\n");

        for (i, obj) in builder.objects.iter().enumerate().skip(1) {
            offsets[i] = output.len();
            let _ = write!(output, "{} 0 obj\n", i);
            output.extend_from_slice(&obj.data);
            output.extend_from_slice(b"\nendobj\n\n");
        }

        let xref_offset = output.len();
        let _ = write!(output, "xref\n0 {}\n", builder.objects.len());
        let _ = write!(output, "0000000000 65535 f \n");
        for offset in offsets.iter().skip(1) {
            let _ = write!(output, "{:010} 00000 n \n", offset);
        }

        let _ = write!(
            output,
            "trailer\n<< /Size {} /Root 1 0 R /Info {} 0 R >>\nstartxref\n{}\n%%EOF\n",
            builder.objects.len(),
            info_obj_id,
            xref_offset
        );

        output
    }
}
