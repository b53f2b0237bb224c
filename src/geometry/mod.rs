//! Pure coordinate math shared by the transform engine, the hit tester and
//! the compositor. All angles are in degrees, canvas y points down, so a
//! positive rotation turns clockwise on screen.

use egui::{Pos2, Rect, Vec2};

pub mod hit_testing;

/// Centre of a frame: `(x + w/2, y + h/2)`
pub fn center(frame: Rect) -> Pos2 {
    frame.center()
}

/// Convert a raw pointer position into canvas-local coordinates by removing
/// the canvas element's on-screen origin.
pub fn screen_to_canvas(pointer: Pos2, canvas_origin: Pos2) -> Pos2 {
    Pos2::new(pointer.x - canvas_origin.x, pointer.y - canvas_origin.y)
}

/// Euclidean distance between two points
pub fn distance(p: Pos2, c: Pos2) -> f32 {
    (p - c).length()
}

/// Bearing of `p` as seen from `c`, `atan2(dy, dx)` in degrees
pub fn angle_deg(p: Pos2, c: Pos2) -> f32 {
    (p.y - c.y).atan2(p.x - c.x).to_degrees()
}

/// Rotate `p` about `pivot` by `degrees`
pub fn rotate_point(p: Pos2, pivot: Pos2, degrees: f32) -> Pos2 {
    let (sin, cos) = degrees.to_radians().sin_cos();
    let d = p - pivot;
    pivot + Vec2::new(d.x * cos - d.y * sin, d.x * sin + d.y * cos)
}

/// Map a canvas point into the unrotated frame of an item rotated about its centre
pub fn to_local(p: Pos2, frame: Rect, rotation: f32) -> Pos2 {
    rotate_point(p, center(frame), -rotation)
}

/// Corners of a rotated frame in the order top-left, top-right,
/// bottom-right, bottom-left
pub fn rotated_corners(frame: Rect, rotation: f32) -> [Pos2; 4] {
    let c = center(frame);
    [
        frame.left_top(),
        frame.right_top(),
        frame.right_bottom(),
        frame.left_bottom(),
    ]
    .map(|corner| rotate_point(corner, c, rotation))
}

/// Axis-aligned bounds of a rotated frame
pub fn rotated_bounds(frame: Rect, rotation: f32) -> Rect {
    Rect::from_points(&rotated_corners(frame, rotation))
}
