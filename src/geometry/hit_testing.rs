use egui::{Pos2, Rect, Vec2};

use super::{center, rotate_point, to_local};

// Handle placement, in item-local units before rotation
pub const HANDLE_HIT_RADIUS: f32 = 14.0;
pub const RESIZE_HANDLE_RADIUS: f32 = 12.0;
pub const ROTATE_HANDLE_RADIUS: f32 = 16.0;
/// Distance between the top edge and the rotate handle's centre
pub const ROTATE_HANDLE_OFFSET: f32 = 24.0;

/// The two manipulation handles drawn on the selected item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandleKind {
    Resize,
    Rotate,
}

impl HandleKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            HandleKind::Resize => "resize",
            HandleKind::Rotate => "rotate",
        }
    }
}

/// Whether `pos` lies inside the item's rotated box
pub fn body_contains(frame: Rect, rotation: f32, pos: Pos2) -> bool {
    frame.contains(to_local(pos, frame, rotation))
}

/// Canvas position of the resize handle (bottom-right corner, rotated with the item)
pub fn resize_handle_center(frame: Rect, rotation: f32) -> Pos2 {
    rotate_point(frame.right_bottom(), center(frame), rotation)
}

/// Canvas position of the rotate handle (above the top edge, rotated with the item)
pub fn rotate_handle_center(frame: Rect, rotation: f32) -> Pos2 {
    let local = Pos2::new(frame.center().x, frame.min.y - ROTATE_HANDLE_OFFSET);
    rotate_point(local, center(frame), rotation)
}

/// Which handle, if any, is under `pos`. The rotate handle wins ties since it
/// sits outside the box and can't be confused with a body drag.
pub fn hit_handle(frame: Rect, rotation: f32, pos: Pos2) -> Option<HandleKind> {
    let near = |handle: Pos2| (pos - handle).length() <= HANDLE_HIT_RADIUS;
    if near(rotate_handle_center(frame, rotation)) {
        Some(HandleKind::Rotate)
    } else if near(resize_handle_center(frame, rotation)) {
        Some(HandleKind::Resize)
    } else {
        None
    }
}

/// Square hit area around a handle, for cursor feedback in the shell
pub fn handle_rect(handle: Pos2) -> Rect {
    Rect::from_center_size(handle, Vec2::splat(HANDLE_HIT_RADIUS * 2.0))
}
