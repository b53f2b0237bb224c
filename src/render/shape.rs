//! Clip/stroke outlines for items.

use tiny_skia::{Path, PathBuilder};

use crate::element::BorderRadius;

/// Control-point distance for approximating a quarter circle with a cubic
pub const BEZIER_K: f32 = 0.552_284_8;

/// Outline of an item's box in canvas coordinates: an inscribed ellipse, a
/// rounded rectangle, or a plain rectangle. `None` for an empty box.
pub fn item_path(frame: egui::Rect, radius: BorderRadius) -> Option<Path> {
    let rect = tiny_skia::Rect::from_xywh(frame.min.x, frame.min.y, frame.width(), frame.height())?;
    match radius {
        BorderRadius::Ellipse => PathBuilder::from_oval(rect),
        BorderRadius::Corner(r) if r > 0.0 => rounded_rect(rect, r),
        BorderRadius::Corner(_) => Some(PathBuilder::from_rect(rect)),
    }
}

/// Rectangle with quarter-circle corners. The radius is clamped to half the
/// shorter side.
fn rounded_rect(rect: tiny_skia::Rect, radius: f32) -> Option<Path> {
    let r = radius.min(rect.width() / 2.0).min(rect.height() / 2.0);
    let k = r * BEZIER_K;
    let (l, t, rt, b) = (rect.left(), rect.top(), rect.right(), rect.bottom());

    let mut pb = PathBuilder::new();
    pb.move_to(l + r, t);
    pb.line_to(rt - r, t);
    pb.cubic_to(rt - r + k, t, rt, t + r - k, rt, t + r);
    pb.line_to(rt, b - r);
    pb.cubic_to(rt, b - r + k, rt - r + k, b, rt - r, b);
    pb.line_to(l + r, b);
    pb.cubic_to(l + r - k, b, l, b - r + k, l, b - r);
    pb.line_to(l, t + r);
    pb.cubic_to(l, t + r - k, l + r - k, t, l + r, t);
    pb.close();
    pb.finish()
}
