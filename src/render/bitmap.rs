//! Moving pixels between `image` buffers (straight alpha) and tiny-skia
//! pixmaps (premultiplied alpha).

use image::RgbaImage;
use tiny_skia::{ColorU8, FilterQuality, Mask, Pixmap, PixmapPaint, Transform};

use crate::element::Bitmap;

/// Premultiplied copy of a bitmap; `None` when it has no pixels
pub fn to_pixmap(bitmap: &Bitmap) -> Option<Pixmap> {
    let source = bitmap.pixels();
    let mut pixmap = Pixmap::new(source.width(), source.height())?;
    for (dst, src) in pixmap.pixels_mut().iter_mut().zip(source.pixels()) {
        let [r, g, b, a] = src.0;
        *dst = ColorU8::from_rgba(r, g, b, a).premultiply();
    }
    Some(pixmap)
}

/// Straight-alpha copy of a pixmap
pub fn to_rgba_image(pixmap: &Pixmap) -> RgbaImage {
    let mut out = RgbaImage::new(pixmap.width(), pixmap.height());
    for (dst, src) in out.pixels_mut().zip(pixmap.pixels()) {
        let c = src.demultiply();
        dst.0 = [c.red(), c.green(), c.blue(), c.alpha()];
    }
    out
}

/// Draw `source` stretched to exactly cover `frame` under `transform`,
/// clipped by `mask`. Returns `false` if the bitmap is empty.
pub fn draw_stretched(
    target: &mut Pixmap,
    source: &Bitmap,
    frame: egui::Rect,
    transform: Transform,
    mask: Option<&Mask>,
) -> bool {
    let Some(pixmap) = to_pixmap(source) else {
        return false;
    };
    let sx = frame.width() / pixmap.width() as f32;
    let sy = frame.height() / pixmap.height() as f32;
    let placement = transform.pre_translate(frame.min.x, frame.min.y).pre_scale(sx, sy);
    let paint = PixmapPaint {
        quality: FilterQuality::Bilinear,
        ..Default::default()
    };
    target.draw_pixmap(0, 0, pixmap.as_ref(), &paint, placement, mask);
    true
}
