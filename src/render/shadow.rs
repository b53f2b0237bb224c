//! Soft drop shadows.
//!
//! The item's silhouette is rasterised into an alpha layer just big enough
//! for it plus the blur spread, blurred, and composited as translucent black
//! with a fixed downward offset. The offset is applied in canvas space, so it
//! doesn't rotate with the item.

use image::GrayImage;
use tiny_skia::{
    Color, ColorU8, FillRule, Paint, Path, Pixmap, PixmapPaint, Stroke, Transform,
};

/// Shadow colour alpha (`rgba(0, 0, 0, 0.5)`)
pub const SHADOW_ALPHA: f32 = 0.5;
/// Fixed vertical offset of every shadow
pub const SHADOW_OFFSET_Y: i32 = 10;

/// Draw the shadow of `path` (filled, plus a stroke of `stroke_width` when
/// positive) under `transform` onto `target`.
pub fn draw_shadow(
    target: &mut Pixmap,
    path: &Path,
    transform: Transform,
    stroke_width: f32,
    blur: f32,
) {
    if blur.is_nan() || blur <= 0.0 {
        return;
    }
    let Some(device_path) = path.clone().transform(transform) else {
        return;
    };
    let bounds = device_path.bounds();

    let pad = (blur * 1.5 + stroke_width).ceil() + 1.0;
    // Only the part that can land on the canvas is worth rasterising
    let left = (bounds.left() - pad).floor().max(-pad);
    let top = (bounds.top() - pad).floor().max(-pad - SHADOW_OFFSET_Y as f32);
    let right = (bounds.right() + pad).ceil().min(target.width() as f32 + pad);
    let bottom = (bounds.bottom() + pad).ceil().min(target.height() as f32 + pad);
    if right <= left || bottom <= top {
        return;
    }

    let Some(mut layer) = Pixmap::new((right - left) as u32, (bottom - top) as u32) else {
        return;
    };
    let to_layer = transform.post_translate(-left, -top);
    let mut paint = Paint::default();
    paint.set_color(Color::BLACK);
    paint.anti_alias = true;
    layer.fill_path(path, &paint, FillRule::Winding, to_layer, None);
    if stroke_width > 0.0 {
        let stroke = Stroke {
            width: stroke_width,
            ..Default::default()
        };
        layer.stroke_path(path, &paint, &stroke, to_layer, None);
    }

    let alpha = GrayImage::from_fn(layer.width(), layer.height(), |x, y| {
        let a = layer.pixel(x, y).map(|p| p.alpha()).unwrap_or(0);
        image::Luma([a])
    });
    let blurred = image::imageops::blur(&alpha, blur / 2.0);

    for (dst, src) in layer.pixels_mut().iter_mut().zip(blurred.pixels()) {
        let a = (src.0[0] as f32 * SHADOW_ALPHA).round() as u8;
        *dst = ColorU8::from_rgba(0, 0, 0, a).premultiply();
    }
    target.draw_pixmap(
        left as i32,
        top as i32 + SHADOW_OFFSET_Y,
        layer.as_ref(),
        &PixmapPaint::default(),
        Transform::identity(),
        None,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use tiny_skia::PathBuilder;

    #[test]
    fn test_shadow_falls_below_shape() {
        let mut target = Pixmap::new(100, 100).unwrap();
        let rect = tiny_skia::Rect::from_xywh(30.0, 30.0, 40.0, 20.0).unwrap();
        let path = PathBuilder::from_rect(rect);
        draw_shadow(&mut target, &path, Transform::identity(), 0.0, 4.0);

        let below = target.pixel(50, 58).unwrap();
        let above = target.pixel(50, 22).unwrap();
        assert!(below.alpha() > 0);
        assert!(below.alpha() <= 128);
        assert!(above.alpha() < below.alpha());
    }

    #[test]
    fn test_zero_blur_draws_nothing() {
        let mut target = Pixmap::new(20, 20).unwrap();
        let rect = tiny_skia::Rect::from_xywh(0.0, 0.0, 10.0, 10.0).unwrap();
        let path = PathBuilder::from_rect(rect);
        draw_shadow(&mut target, &path, Transform::identity(), 0.0, 0.0);
        assert!(target.pixels().iter().all(|p| p.alpha() == 0));
    }
}
