use std::sync::Arc;

use crate::error::FolioError;
use crate::image_loader::{load_image, LoadedImage};
use crate::layout::{Bounds, LayoutPage};
use crate::markup::pt;
use crate::style::TextAlign;

/// A raster image scaled down to fit `max_width` (and `max_height` if set).
///
/// Natural size is one point per pixel; images are never scaled up.
#[derive(Debug, Clone)]
pub struct Image {
    pub image: Arc<LoadedImage>,
    pub max_width: f64,
    pub max_height: Option<f64>,
    pub align: TextAlign,
}

impl Image {
    /// Load from a file path, `data:` URI, or bare base64.
    pub fn load(src: &str, max_width: f64) -> Result<Self, FolioError> {
        Ok(Self::new(Arc::new(load_image(src)?), max_width))
    }

    pub fn new(image: Arc<LoadedImage>, max_width: f64) -> Self {
        Self {
            image,
            max_width,
            max_height: None,
            align: TextAlign::Leading,
        }
    }

    pub fn max_height(mut self, max_height: f64) -> Self {
        self.max_height = Some(max_height);
        self
    }

    pub fn align(mut self, align: TextAlign) -> Self {
        self.align = align;
        self
    }

    /// Display size in points.
    pub fn size(&self) -> (f64, f64) {
        let ratio = self.image.aspect_ratio();
        let mut width = self.max_width.min(self.image.width_px as f64);
        let mut height = width / ratio;
        if let Some(cap) = self.max_height {
            if height > cap {
                height = cap;
                width = height * ratio;
            }
        }
        (width, height)
    }

    pub(super) fn draw(&self, page: &mut LayoutPage, bounds: Bounds, cursor: f64) -> f64 {
        let (width, height) = self.size();
        let x = self.align.offset(bounds.x, bounds.width, width);
        page.draw_image(x, cursor - height, width, height, Arc::clone(&self.image));
        cursor - height
    }

    pub(super) fn render_markup(&self, _bounds: Bounds, cursor: f64) -> (String, f64) {
        let (width, height) = self.size();
        let html = format!(
            "<div style=\"height:{h};text-align:{align}\"><img src=\"{src}\" style=\"width:{w};height:{h}\"></div>",
            h = pt(height),
            w = pt(width),
            align = self.align.css(),
            src = self.image.data_uri(),
        );
        (html, cursor - height)
    }
}
