//! The transform engine: turns canvas-local pointer events into item
//! updates.
//!
//! The engine owns no state of its own. Callers keep a [`TransformState`],
//! pass it into [`handle_event`] together with the document, and store the
//! state that comes back. That keeps the gesture single-flight and lets the
//! whole thing be driven from tests without a UI.

use egui::{Pos2, Rect};
use log::debug;

use crate::document::Document;
use crate::element::{ItemId, MIN_ITEM_SIZE};
use crate::geometry::hit_testing::{HandleKind, body_contains, hit_handle};
use crate::geometry::{angle_deg, distance};
use crate::input::InputEvent;
use crate::state::{TransformOp, TransformSession, TransformState};

/// Offset added to the pointer bearing so a handle straight above the item
/// reads as zero rotation.
pub const ROTATE_HANDLE_BEARING: f32 = 90.0;

/// What a pointer-down landed on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerTarget {
    pub item_id: ItemId,
    /// `None` means the item's body
    pub handle: Option<HandleKind>,
}

/// Resolve what is under `pos`.
///
/// Handles only exist on the selected item and are checked first since they
/// sit on or outside its edge. Bodies are then tested topmost first.
pub fn pick_target(doc: &Document, pos: Pos2) -> Option<PointerTarget> {
    if let Some(selected) = doc.selected_item() {
        if let Some(handle) = hit_handle(selected.frame(), selected.rotation(), pos) {
            return Some(PointerTarget {
                item_id: selected.id(),
                handle: Some(handle),
            });
        }
    }
    doc.paint_order()
        .into_iter()
        .rev()
        .find(|item| body_contains(item.frame(), item.rotation(), pos))
        .map(|item| PointerTarget {
            item_id: item.id(),
            handle: None,
        })
}

/// Feed one event through the state machine
pub fn handle_event(
    state: TransformState,
    doc: &mut Document,
    event: &InputEvent,
) -> TransformState {
    match *event {
        InputEvent::PointerDown { pos } => {
            // Any open session is closed before a new one may start
            if !state.is_idle() {
                debug!("Closing {} session on new pointer-down", state.name());
            }
            match pick_target(doc, pos) {
                Some(target) => begin(doc, target, pos),
                None => {
                    doc.select(None);
                    TransformState::Idle
                }
            }
        }
        InputEvent::PointerMove { pos } => update(state, doc, pos),
        InputEvent::PointerUp { .. } | InputEvent::PointerLeave => {
            if !state.is_idle() {
                debug!("{} session finished", state.name());
            }
            TransformState::Idle
        }
    }
}

/// Select and raise the target, then open a session on it
pub fn begin(doc: &mut Document, target: PointerTarget, pointer: Pos2) -> TransformState {
    doc.select(Some(target.item_id));
    doc.bring_to_front(target.item_id);

    let Some(item) = doc.find_item(target.item_id) else {
        return TransformState::Idle;
    };
    let op = TransformOp::for_target(target.handle);
    let session = TransformSession::capture(item, pointer);
    let state = TransformState::begin(op, session);
    debug!("Started {} session on item {}", state.name(), target.item_id);
    state
}

/// Apply the current pointer position to the session's item
fn update(state: TransformState, doc: &mut Document, pointer: Pos2) -> TransformState {
    let Some(session) = state.session().copied() else {
        return state;
    };
    if !(pointer.x.is_finite() && pointer.y.is_finite()) {
        return state;
    }
    let Some(item) = doc.find_item_mut(session.item_id) else {
        // Item vanished mid-gesture
        return TransformState::Idle;
    };

    match state {
        TransformState::Idle => {}
        TransformState::Dragging(_) => {
            item.set_position(move_frame(&session, pointer).min);
        }
        TransformState::Resizing(_) => {
            if let Err(err) = item.set_frame(resize_frame(&session, pointer)) {
                debug!("Ignoring resize update: {}", err);
            }
        }
        TransformState::Rotating(_) => {
            item.set_rotation(rotation_for(&session, pointer));
        }
    }
    state
}

/// Initial frame translated by the pointer delta since pointer-down
pub fn move_frame(session: &TransformSession, pointer: Pos2) -> Rect {
    let delta = pointer - session.start_pointer;
    session.initial_frame.translate(delta)
}

/// Uniform scale factor for a resize gesture.
///
/// Ratio of the pointer's current distance from the centre to its distance
/// at pointer-down. A gesture that started on the centre itself has no
/// meaningful ratio and scales by 1. The result never shrinks a side below
/// `MIN_ITEM_SIZE`.
pub fn resize_scale(session: &TransformSession, pointer: Pos2) -> f32 {
    let start = distance(session.start_pointer, session.center);
    if start <= f32::EPSILON {
        return 1.0;
    }
    let scale = distance(pointer, session.center) / start;
    if !scale.is_finite() {
        return 1.0;
    }
    let size = session.initial_frame.size();
    let shortest = size.x.min(size.y).max(f32::EPSILON);
    scale.max(MIN_ITEM_SIZE / shortest)
}

/// Initial frame scaled about its own centre
pub fn resize_frame(session: &TransformSession, pointer: Pos2) -> Rect {
    let scale = resize_scale(session, pointer);
    Rect::from_center_size(session.center, session.initial_frame.size() * scale)
}

/// Absolute rotation matching the pointer's bearing from the centre
pub fn rotation_for(session: &TransformSession, pointer: Pos2) -> f32 {
    if pointer == session.center {
        return session.initial_rotation;
    }
    angle_deg(pointer, session.center) + ROTATE_HANDLE_BEARING
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{Item, TextContent};
    use crate::id_generator::generate_id;
    use egui::{Color32, Vec2};

    fn session_for(frame: Rect, start: Pos2) -> TransformSession {
        let item = Item::text(
            generate_id(),
            frame,
            TextContent::new("x", Color32::BLACK, 10.0, "Arial"),
        );
        TransformSession::capture(&item, start)
    }

    #[test]
    fn test_move_uses_initial_geometry() {
        let frame = Rect::from_min_size(Pos2::new(10.0, 10.0), Vec2::new(50.0, 20.0));
        let session = session_for(frame, Pos2::new(20.0, 20.0));
        let moved = move_frame(&session, Pos2::new(25.0, 50.0));
        assert_eq!(moved.min, Pos2::new(15.0, 40.0));
        assert_eq!(moved.size(), frame.size());
    }

    #[test]
    fn test_resize_from_center_is_noop() {
        let frame = Rect::from_min_size(Pos2::new(0.0, 0.0), Vec2::new(100.0, 50.0));
        let session = session_for(frame, frame.center());
        assert_eq!(resize_scale(&session, Pos2::new(500.0, 500.0)), 1.0);
        assert_eq!(resize_frame(&session, Pos2::new(500.0, 500.0)), frame);
    }

    #[test]
    fn test_resize_floors_at_min_size() {
        let frame = Rect::from_min_size(Pos2::new(0.0, 0.0), Vec2::new(100.0, 10.0));
        let session = session_for(frame, Pos2::new(100.0, 10.0));
        let shrunk = resize_frame(&session, frame.center());
        assert!(shrunk.height() >= MIN_ITEM_SIZE - 1e-4);
        assert!((shrunk.width() / shrunk.height() - 10.0).abs() < 1e-3);
    }

    #[test]
    fn test_rotation_is_bearing_plus_quarter_turn() {
        let frame = Rect::from_min_size(Pos2::new(0.0, 0.0), Vec2::new(100.0, 100.0));
        let session = session_for(frame, Pos2::new(50.0, -20.0));
        // Straight above the centre reads as zero
        assert!(rotation_for(&session, Pos2::new(50.0, -100.0)).abs() < 1e-4);
        // Straight right is a quarter turn clockwise
        assert!((rotation_for(&session, Pos2::new(200.0, 50.0)) - 90.0).abs() < 1e-4);
    }
}
