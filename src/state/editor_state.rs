//! The state machine behind pointer-driven item manipulation.
//!
//! ```text
//!                    ┌─────────────┐
//!              ┌─────►  Dragging   ├─────┐
//!              │     └─────────────┘     │
//! ┌──────────┐ │     ┌─────────────┐     │ ┌──────────┐
//! │   Idle   ├─┼─────►  Resizing   ├─────┼─►   Idle   │
//! └──────────┘ │     └─────────────┘     │ └──────────┘
//!              │     ┌─────────────┐     │
//!              └─────►  Rotating   ├─────┘
//!                    └─────────────┘
//! ```
//!
//! Only pointer-down leaves `Idle` and only pointer-up (or losing the
//! pointer) returns to it. Every active state carries the session captured at
//! pointer-down; updates are always recomputed from that session rather than
//! from the previous frame.

use egui::{Pos2, Rect};

use crate::element::{Item, ItemId};
use crate::geometry::hit_testing::HandleKind;

/// What a gesture does to its item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransformOp {
    Move,
    Resize,
    Rotate,
}

impl TransformOp {
    /// The operation started by grabbing a given part of an item
    pub fn for_target(handle: Option<HandleKind>) -> Self {
        match handle {
            None => TransformOp::Move,
            Some(HandleKind::Resize) => TransformOp::Resize,
            Some(HandleKind::Rotate) => TransformOp::Rotate,
        }
    }
}

/// Geometry captured when a gesture starts
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformSession {
    pub item_id: ItemId,
    /// Canvas-local pointer position at pointer-down
    pub start_pointer: Pos2,
    pub initial_frame: Rect,
    pub initial_rotation: f32,
    /// Centre of `initial_frame`; resize and rotate pivot around it
    pub center: Pos2,
}

impl TransformSession {
    pub fn capture(item: &Item, start_pointer: Pos2) -> Self {
        Self {
            item_id: item.id(),
            start_pointer,
            initial_frame: item.frame(),
            initial_rotation: item.rotation(),
            center: item.center(),
        }
    }
}

/// The possible states of the transform engine.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum TransformState {
    /// No gesture in progress
    #[default]
    Idle,
    /// Moving an item by its body
    Dragging(TransformSession),
    /// Scaling an item about its centre via the resize handle
    Resizing(TransformSession),
    /// Turning an item about its centre via the rotate handle
    Rotating(TransformSession),
}

impl TransformState {
    /// Open a session for the given operation
    pub fn begin(op: TransformOp, session: TransformSession) -> Self {
        match op {
            TransformOp::Move => TransformState::Dragging(session),
            TransformOp::Resize => TransformState::Resizing(session),
            TransformOp::Rotate => TransformState::Rotating(session),
        }
    }

    /// Returns true if no gesture is in progress
    pub fn is_idle(&self) -> bool {
        matches!(self, TransformState::Idle)
    }

    /// The open session, if any
    pub fn session(&self) -> Option<&TransformSession> {
        match self {
            TransformState::Idle => None,
            TransformState::Dragging(session)
            | TransformState::Resizing(session)
            | TransformState::Rotating(session) => Some(session),
        }
    }

    /// The operation being performed, if any
    pub fn operation(&self) -> Option<TransformOp> {
        match self {
            TransformState::Idle => None,
            TransformState::Dragging(_) => Some(TransformOp::Move),
            TransformState::Resizing(_) => Some(TransformOp::Resize),
            TransformState::Rotating(_) => Some(TransformOp::Rotate),
        }
    }

    /// The item being transformed, if any
    pub fn active_item(&self) -> Option<ItemId> {
        self.session().map(|session| session.item_id)
    }

    pub fn name(&self) -> &'static str {
        match self {
            TransformState::Idle => "Idle",
            TransformState::Dragging(_) => "Dragging",
            TransformState::Resizing(_) => "Resizing",
            TransformState::Rotating(_) => "Rotating",
        }
    }
}
