use std::sync::Arc;

use egui::Vec2;
use image::RgbaImage;

/// A fully decoded bitmap, straight (non-premultiplied) RGBA8
#[derive(Clone)]
pub struct Bitmap {
    pixels: RgbaImage,
}

// Custom Debug implementation so pixel data isn't dumped into logs
impl std::fmt::Debug for Bitmap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bitmap")
            .field("width", &self.pixels.width())
            .field("height", &self.pixels.height())
            .finish_non_exhaustive()
    }
}

impl Bitmap {
    pub fn new(pixels: RgbaImage) -> Self {
        Self { pixels }
    }

    /// Solid-colour bitmap, mostly useful for tests and placeholders
    pub fn solid(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        Self::new(RgbaImage::from_pixel(width, height, image::Rgba(rgba)))
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// Intrinsic pixel size as a vector
    pub fn intrinsic_size(&self) -> Vec2 {
        Vec2::new(self.pixels.width() as f32, self.pixels.height() as f32)
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.width() == 0 || self.pixels.height() == 0
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }
}

/// Payload of an image item
#[derive(Debug, Clone)]
pub struct ImageContent {
    bitmap: Arc<Bitmap>,
}

impl ImageContent {
    pub fn new(bitmap: Arc<Bitmap>) -> Self {
        Self { bitmap }
    }

    pub fn bitmap(&self) -> &Arc<Bitmap> {
        &self.bitmap
    }
}
