mod editor_state;

pub use editor_state::{TransformOp, TransformSession, TransformState};
