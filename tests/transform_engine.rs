use std::sync::Arc;

use eframe_collage::element::{Bitmap, Item};
use eframe_collage::id_generator::generate_id;
use eframe_collage::state::{TransformSession, TransformState};
use eframe_collage::transform::{handle_event, resize_frame};
use eframe_collage::{Document, InputEvent, ItemId};
use egui::{Pos2, Rect, Vec2};
use proptest::prelude::*;

// Helper to create a document with one 200x100 photo at (100, 100)
fn create_test_document() -> (Document, ItemId) {
    let mut doc = Document::new();
    let frame = Rect::from_min_size(Pos2::new(100.0, 100.0), Vec2::new(200.0, 100.0));
    let item = Item::image(generate_id(), frame, Arc::new(Bitmap::solid(4, 2, [255, 0, 0, 255])));
    let id = item.id();
    doc.add_item(item);
    (doc, id)
}

fn run(doc: &mut Document, events: &[InputEvent]) -> TransformState {
    events
        .iter()
        .fold(TransformState::Idle, |state, event| handle_event(state, doc, event))
}

fn down(x: f32, y: f32) -> InputEvent {
    InputEvent::PointerDown { pos: Pos2::new(x, y) }
}

fn moved(x: f32, y: f32) -> InputEvent {
    InputEvent::PointerMove { pos: Pos2::new(x, y) }
}

fn up(x: f32, y: f32) -> InputEvent {
    InputEvent::PointerUp { pos: Pos2::new(x, y) }
}

#[test]
fn test_drag_moves_by_pointer_delta() {
    let (mut doc, id) = create_test_document();

    let state = run(&mut doc, &[down(150.0, 150.0), moved(160.0, 160.0), moved(170.0, 180.0)]);
    assert!(matches!(state, TransformState::Dragging(_)));

    let item = doc.find_item(id).unwrap();
    assert_eq!(item.position(), Pos2::new(120.0, 130.0));
    assert_eq!(item.size(), Vec2::new(200.0, 100.0));

    let state = handle_event(state, &mut doc, &up(170.0, 180.0));
    assert!(state.is_idle());
}

#[test]
fn test_drag_is_not_clamped_to_canvas() {
    let (mut doc, id) = create_test_document();
    run(&mut doc, &[down(150.0, 150.0), moved(-500.0, -500.0), up(-500.0, -500.0)]);
    assert_eq!(doc.find_item(id).unwrap().position(), Pos2::new(-550.0, -550.0));
}

#[test]
fn test_resize_scales_about_center() {
    let (mut doc, id) = create_test_document();
    doc.select(Some(id));

    // The resize handle sits on the bottom-right corner
    let state = run(&mut doc, &[down(300.0, 200.0), moved(400.0, 250.0)]);
    assert!(matches!(state, TransformState::Resizing(_)));

    let item = doc.find_item(id).unwrap();
    assert!((item.size() - Vec2::new(400.0, 200.0)).length() < 1e-3);
    assert!((item.center() - Pos2::new(200.0, 150.0)).length() < 1e-3);
}

#[test]
fn test_resize_started_at_center_keeps_size() {
    let (mut doc, id) = create_test_document();
    let item = doc.find_item(id).unwrap();
    let session = TransformSession::capture(item, item.center());

    let frame = resize_frame(&session, Pos2::new(900.0, 900.0));
    assert!(frame.width().is_finite() && frame.height().is_finite());
    assert_eq!(frame, item.frame());
}

#[test]
fn test_rotation_is_absolute() {
    let (mut doc, id) = create_test_document();
    doc.select(Some(id));

    // Rotate handle: 24 units above the top edge centre
    let state = run(&mut doc, &[down(200.0, 76.0), moved(300.0, 150.0)]);
    assert!(matches!(state, TransformState::Rotating(_)));
    assert!((doc.find_item(id).unwrap().rotation() - 90.0).abs() < 1e-3);

    let state = handle_event(state, &mut doc, &moved(200.0, 50.0));
    assert!(matches!(state, TransformState::Rotating(_)));
    assert!(doc.find_item(id).unwrap().rotation().abs() < 1e-3);
}

#[test]
fn test_pointer_down_raises_target() {
    let (mut doc, lower) = create_test_document();
    let frame = Rect::from_min_size(Pos2::new(250.0, 100.0), Vec2::new(100.0, 100.0));
    let upper = Item::image(generate_id(), frame, Arc::new(Bitmap::solid(1, 1, [0, 0, 255, 255])))
        .with_z_index(3);
    let upper_id = upper.id();
    doc.add_item(upper);

    // Only the lower item is under this point
    run(&mut doc, &[down(120.0, 120.0), up(120.0, 120.0)]);
    assert_eq!(doc.selected(), Some(lower));
    assert!(doc.find_item(lower).unwrap().z_index() > doc.find_item(upper_id).unwrap().z_index());
}

#[test]
fn test_pointer_down_on_empty_canvas_clears_selection() {
    let (mut doc, id) = create_test_document();
    doc.select(Some(id));
    let state = run(&mut doc, &[down(700.0, 500.0)]);
    assert!(state.is_idle());
    assert_eq!(doc.selected(), None);
}

#[test]
fn test_moves_after_release_do_nothing() {
    let (mut doc, id) = create_test_document();
    run(&mut doc, &[down(150.0, 150.0), up(150.0, 150.0), moved(400.0, 400.0)]);
    assert_eq!(doc.find_item(id).unwrap().position(), Pos2::new(100.0, 100.0));
}

#[test]
fn test_leave_closes_session() {
    let (mut doc, _) = create_test_document();
    let state = run(&mut doc, &[down(150.0, 150.0), InputEvent::PointerLeave]);
    assert!(state.is_idle());
}

proptest! {
    #[test]
    fn resize_never_moves_center(
        x in -500.0f32..500.0,
        y in -500.0f32..500.0,
        w in 1.0f32..400.0,
        h in 1.0f32..400.0,
        px in -1000.0f32..1000.0,
        py in -1000.0f32..1000.0,
    ) {
        let frame = Rect::from_min_size(Pos2::new(x, y), Vec2::new(w, h));
        let item = Item::image(generate_id(), frame, Arc::new(Bitmap::solid(1, 1, [0, 0, 0, 255])));
        let session = TransformSession::capture(&item, frame.right_bottom());
        let resized = resize_frame(&session, Pos2::new(px, py));

        prop_assert!((resized.center() - frame.center()).length() < 1e-2);
        prop_assert!(resized.width() >= 1.0 - 1e-3);
        prop_assert!(resized.height() >= 1.0 - 1e-3);
        // Uniform scale keeps the aspect ratio
        let aspect = w / h;
        prop_assert!(((resized.width() / resized.height()) - aspect).abs() <= aspect * 1e-3);
    }

    #[test]
    fn rotation_depends_only_on_last_pointer(
        a in -1000.0f32..1000.0,
        b in -1000.0f32..1000.0,
        c in -1000.0f32..1000.0,
        d in -1000.0f32..1000.0,
    ) {
        let (mut doc, id) = create_test_document();
        doc.select(Some(id));
        let state = run(&mut doc, &[down(200.0, 76.0), moved(a, b), moved(c, d)]);
        prop_assert!(matches!(state, TransformState::Rotating(_)));

        let (mut fresh, fresh_id) = create_test_document();
        fresh.select(Some(fresh_id));
        run(&mut fresh, &[down(200.0, 76.0), moved(c, d)]);

        let rotation = doc.find_item(id).unwrap().rotation();
        prop_assert!(rotation.is_finite());
        prop_assert_eq!(rotation, fresh.find_item(fresh_id).unwrap().rotation());
    }
}
