use egui::{Context, PointerButton, Pos2, Rect};

use crate::geometry::screen_to_canvas;

/// Pointer events in canvas-local coordinates, as consumed by the transform engine
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Primary button pressed over the canvas
    PointerDown { pos: Pos2 },
    /// Pointer moved (tracked everywhere, not only over the canvas)
    PointerMove { pos: Pos2 },
    /// Primary button released
    PointerUp { pos: Pos2 },
    /// Pointer tracking was lost entirely
    PointerLeave,
}

impl InputEvent {
    pub fn position(&self) -> Option<Pos2> {
        match self {
            InputEvent::PointerDown { pos }
            | InputEvent::PointerMove { pos }
            | InputEvent::PointerUp { pos } => Some(*pos),
            InputEvent::PointerLeave => None,
        }
    }
}

/// Handles converting raw egui input into canvas-local `InputEvent`s
#[derive(Debug, Default)]
pub struct InputHandler {
    last_pointer_pos: Option<Pos2>,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process this frame's raw input.
    ///
    /// `canvas_rect` is where the canvas sits on screen *this frame*; the
    /// origin is read fresh on every call so scrolling mid-gesture is handled.
    /// Presses only count when they land on the canvas, while moves and
    /// releases are tracked anywhere so a drag can leave the canvas.
    pub fn process_input(&mut self, ctx: &Context, canvas_rect: Rect) -> Vec<InputEvent> {
        let mut events = Vec::new();
        let origin = canvas_rect.min;

        ctx.input(|input| {
            let pointer = &input.pointer;
            match pointer.latest_pos() {
                Some(pos) => {
                    if pointer.button_pressed(PointerButton::Primary) && canvas_rect.contains(pos) {
                        events.push(InputEvent::PointerDown {
                            pos: screen_to_canvas(pos, origin),
                        });
                    } else if Some(pos) != self.last_pointer_pos {
                        events.push(InputEvent::PointerMove {
                            pos: screen_to_canvas(pos, origin),
                        });
                    }
                    if pointer.button_released(PointerButton::Primary) {
                        events.push(InputEvent::PointerUp {
                            pos: screen_to_canvas(pos, origin),
                        });
                    }
                    self.last_pointer_pos = Some(pos);
                }
                None => {
                    if self.last_pointer_pos.take().is_some() {
                        events.push(InputEvent::PointerLeave);
                    }
                }
            }
        });

        events
    }
}
