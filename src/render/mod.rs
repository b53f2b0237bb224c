//! Deterministic software compositor.
//!
//! Produces the same raster for the live view and for export. Items are
//! painted back to front in `(z_index, insertion index)` order; each one is
//! drawn in its own rotated space:
//!
//! ```text
//!   shadow ─► opaque backing fill ─► clip ─► content ─► unclip ─► border
//! ```
//!
//! The border is stroked at twice the nominal width on the outline so that
//! the visible inner half approximates an inset border.

use std::io::Cursor;

use egui::Color32;
use image::{ImageFormat, RgbaImage};
use log::{debug, info};
use tiny_skia::{Color, FillRule, Mask, Paint, Pixmap, Stroke, Transform};

use crate::element::{Item, ItemKind};
use crate::error::ExportError;
use crate::z_order;

pub mod bitmap;
pub mod shadow;
pub mod shape;
pub mod text;

/// Fill behind every item so transparent pixels don't show the canvas
pub const BACKING_COLOR: Color32 = Color32::WHITE;

/// Output raster size and the colour underneath all items
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasSpec {
    pub width: u32,
    pub height: u32,
    pub background: Color32,
}

impl CanvasSpec {
    pub fn new(width: u32, height: u32, background: Color32) -> Self {
        Self {
            width,
            height,
            background,
        }
    }
}

pub(crate) fn skia_color(color: Color32) -> Color {
    let [r, g, b, a] = color.to_srgba_unmultiplied();
    Color::from_rgba8(r, g, b, a)
}

fn solid_paint(color: Color32) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color(skia_color(color));
    paint.anti_alias = true;
    paint
}

/// Every image must have pixels before anything is drawn
fn check_items(items: &[Item]) -> Result<(), ExportError> {
    for item in items {
        if let ItemKind::Image(content) = item.kind() {
            if content.bitmap().is_empty() {
                return Err(ExportError::ItemUnavailable(item.id()));
            }
        }
    }
    Ok(())
}

/// Paint one item onto `pixmap`
fn draw_item(pixmap: &mut Pixmap, item: &Item) -> Result<(), ExportError> {
    let frame = item.frame();
    let style = item.style();
    let center = item.center();
    let transform = Transform::from_rotate_at(item.rotation(), center.x, center.y);

    let path = shape::item_path(frame, style.border_radius)
        .ok_or(ExportError::ItemUnavailable(item.id()))?;
    let stroke_width = if style.has_border() {
        style.border_width * 2.0
    } else {
        0.0
    };

    if style.has_shadow() {
        shadow::draw_shadow(pixmap, &path, transform, stroke_width, style.shadow_blur);
    }

    pixmap.fill_path(&path, &solid_paint(BACKING_COLOR), FillRule::Winding, transform, None);

    let mut clip = Mask::new(pixmap.width(), pixmap.height())
        .ok_or(ExportError::ItemUnavailable(item.id()))?;
    clip.fill_path(&path, FillRule::Winding, true, transform);

    match item.kind() {
        ItemKind::Image(content) => {
            if !bitmap::draw_stretched(pixmap, content.bitmap(), frame, transform, Some(&clip)) {
                return Err(ExportError::ItemUnavailable(item.id()));
            }
        }
        ItemKind::Text(content) => {
            text::draw_text(pixmap, content, frame, transform, Some(&clip));
        }
    }

    if style.has_border() {
        let stroke = Stroke {
            width: stroke_width,
            ..Default::default()
        };
        pixmap.stroke_path(&path, &solid_paint(style.border_color), &stroke, transform, None);
    }
    Ok(())
}

/// Composite `items` onto a canvas-sized raster.
///
/// All-or-nothing: if any item can't be drawn, no image is produced.
pub fn composite(items: &[Item], canvas: &CanvasSpec) -> Result<RgbaImage, ExportError> {
    let invalid = ExportError::InvalidCanvas {
        width: canvas.width,
        height: canvas.height,
    };
    let mut pixmap = Pixmap::new(canvas.width, canvas.height).ok_or(invalid)?;
    check_items(items)?;

    pixmap.fill(skia_color(canvas.background));
    for item in z_order::paint_order(items) {
        draw_item(&mut pixmap, item)?;
    }
    debug!(
        "Composited {} items onto {}x{}",
        items.len(),
        canvas.width,
        canvas.height
    );
    Ok(bitmap::to_rgba_image(&pixmap))
}

/// Composite and encode as PNG
pub fn export_png(items: &[Item], canvas: &CanvasSpec) -> Result<Vec<u8>, ExportError> {
    let image = composite(items, canvas)?;
    let mut bytes = Vec::new();
    image.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    info!(
        "🖼️ Encoded {}x{} PNG ({} bytes)",
        canvas.width,
        canvas.height,
        bytes.len()
    );
    Ok(bytes)
}
