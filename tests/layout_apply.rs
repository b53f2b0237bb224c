use std::sync::Arc;

use eframe_collage::element::{Bitmap, BorderRadius, Item, TextContent};
use eframe_collage::id_generator::generate_id;
use eframe_collage::layout::{ApplySummary, apply_template};
use eframe_collage::template::catalog::find;
use eframe_collage::template::{Template, TemplateCategory, TemplateSlot};
use eframe_collage::{Document, EditorError, ItemId};
use egui::{Color32, Pos2, Rect, Vec2};

const CANVAS: Vec2 = Vec2::new(800.0, 600.0);

fn add_photo(doc: &mut Document, z: i32) -> ItemId {
    let item = Item::image(
        generate_id(),
        Rect::from_min_size(Pos2::new(5.0, 5.0), Vec2::new(120.0, 90.0)),
        Arc::new(Bitmap::solid(4, 3, [10, 20, 30, 255])),
    )
    .with_z_index(z)
    .with_rotation(4.0);
    let id = item.id();
    doc.add_item(item);
    id
}

fn add_caption(doc: &mut Document) -> ItemId {
    let item = Item::text(
        generate_id(),
        Rect::from_min_size(Pos2::new(250.0, 275.0), Vec2::new(300.0, 50.0)),
        TextContent::new("Double Click to Edit", Color32::BLACK, 40.0, "Arial"),
    )
    .with_z_index(2)
    .with_rotation(12.0);
    let id = item.id();
    doc.add_item(item);
    id
}

fn two_slots() -> Template {
    Template::new(
        "test-two",
        "Two",
        TemplateCategory::Mosaic,
        vec![
            TemplateSlot::new(0.1, 0.1, 0.4, 0.4),
            TemplateSlot::new(0.5, 0.5, 0.5, 0.5),
        ],
    )
}

fn assert_frame(item: &Item, x: f32, y: f32, w: f32, h: f32) {
    let expected = Rect::from_min_size(Pos2::new(x, y), Vec2::new(w, h));
    assert!(
        (item.frame().min - expected.min).length() < 1e-3
            && (item.frame().size() - expected.size()).length() < 1e-3,
        "expected {:?}, got {:?}",
        expected,
        item.frame()
    );
}

#[test]
fn test_slot_scales_to_canvas() {
    let mut doc = Document::new();
    let id = add_photo(&mut doc, 1);
    let summary = apply_template(&mut doc, &two_slots(), CANVAS).unwrap();
    assert_eq!(summary, ApplySummary { placed: 1, overflow: 0 });

    let item = doc.find_item(id).unwrap();
    assert_frame(item, 80.0, 60.0, 320.0, 240.0);
    assert_eq!(item.rotation(), 0.0);
    assert_eq!(item.z_index(), 1);
    assert_eq!(item.style().border_width, 0.0);
    assert_eq!(item.style().shadow_blur, 0.0);
}

#[test]
fn test_slots_follow_insertion_order_not_z() {
    let mut doc = Document::new();
    let a = add_photo(&mut doc, 9);
    let b = add_photo(&mut doc, 1);
    let c = add_photo(&mut doc, 5);
    let template = Template::new(
        "test-three",
        "Three",
        TemplateCategory::Mosaic,
        vec![
            TemplateSlot::new(0.0, 0.0, 0.25, 1.0),
            TemplateSlot::new(0.25, 0.0, 0.25, 1.0),
            TemplateSlot::new(0.5, 0.0, 0.5, 1.0),
        ],
    );

    apply_template(&mut doc, &template, CANVAS).unwrap();
    assert_frame(doc.find_item(a).unwrap(), 0.0, 0.0, 200.0, 600.0);
    assert_frame(doc.find_item(b).unwrap(), 200.0, 0.0, 200.0, 600.0);
    assert_frame(doc.find_item(c).unwrap(), 400.0, 0.0, 400.0, 600.0);
    let zs: Vec<_> = [a, b, c].iter().map(|id| doc.find_item(*id).unwrap().z_index()).collect();
    assert_eq!(zs, vec![1, 2, 3]);
}

#[test]
fn test_text_items_are_untouched() {
    let mut doc = Document::new();
    let caption = add_caption(&mut doc);
    let photo = add_photo(&mut doc, 1);
    let before = doc.find_item(caption).unwrap().clone();

    apply_template(&mut doc, &two_slots(), CANVAS).unwrap();

    let after = doc.find_item(caption).unwrap();
    assert_eq!(after.frame(), before.frame());
    assert_eq!(after.rotation(), before.rotation());
    assert_eq!(after.z_index(), before.z_index());
    // The photo still takes the first slot even though it was added second
    assert_frame(doc.find_item(photo).unwrap(), 80.0, 60.0, 320.0, 240.0);
}

#[test]
fn test_overflow_piles_near_centre() {
    let mut doc = Document::new();
    let ids: Vec<_> = (0..4).map(|_| add_photo(&mut doc, 1)).collect();
    let sizes: Vec<_> = ids.iter().map(|id| doc.find_item(*id).unwrap().size()).collect();

    let summary = apply_template(&mut doc, &two_slots(), CANVAS).unwrap();
    assert_eq!(summary, ApplySummary { placed: 2, overflow: 2 });

    let third = doc.find_item(ids[2]).unwrap();
    assert_eq!(third.position(), Pos2::new(370.0, 270.0));
    assert_eq!(third.z_index(), 102);
    assert_eq!(third.size(), sizes[2]);

    let fourth = doc.find_item(ids[3]).unwrap();
    assert_eq!(fourth.position(), Pos2::new(380.0, 280.0));
    assert_eq!(fourth.z_index(), 103);
    // Overflow keeps its rotation and style
    assert_eq!(fourth.rotation(), 4.0);
}

#[test]
fn test_overflow_z_counts_images_only() {
    let mut doc = Document::new();
    add_caption(&mut doc);
    let first = add_photo(&mut doc, 1);
    let second = add_photo(&mut doc, 1);
    let single = Template::new(
        "test-one",
        "One",
        TemplateCategory::Mosaic,
        vec![TemplateSlot::new(0.0, 0.0, 1.0, 1.0)],
    );

    apply_template(&mut doc, &single, CANVAS).unwrap();
    assert_frame(doc.find_item(first).unwrap(), 0.0, 0.0, 800.0, 600.0);
    assert_eq!(doc.find_item(second).unwrap().z_index(), 101);
}

#[test]
fn test_bad_slot_leaves_document_unchanged() {
    let mut doc = Document::new();
    let a = add_photo(&mut doc, 3);
    let b = add_photo(&mut doc, 4);
    let revision = doc.revision();
    let before: Vec<_> = doc.items().iter().map(|item| (item.frame(), item.z_index())).collect();
    let template = Template::new(
        "test-bad",
        "Bad",
        TemplateCategory::Mosaic,
        vec![
            TemplateSlot::new(0.0, 0.0, 0.5, 0.5),
            TemplateSlot::new(0.5, 0.5, f32::NAN, 0.5),
        ],
    );

    let result = apply_template(&mut doc, &template, CANVAS);
    assert!(matches!(result, Err(EditorError::InvalidGeometry(_))));
    assert_eq!(doc.revision(), revision);
    let after: Vec<_> = doc.items().iter().map(|item| (item.frame(), item.z_index())).collect();
    assert_eq!(before, after);
    assert!(doc.find_item(a).is_some() && doc.find_item(b).is_some());
}

#[test]
fn test_zero_slot_z_falls_back_to_position() {
    let mut doc = Document::new();
    let first = add_photo(&mut doc, 7);
    let second = add_photo(&mut doc, 7);
    let template = Template::new(
        "test-zero-z",
        "Zero z",
        TemplateCategory::Mosaic,
        vec![
            TemplateSlot::new(0.0, 0.0, 0.5, 1.0).with_z_index(0),
            TemplateSlot::new(0.5, 0.0, 0.5, 1.0).with_z_index(0),
        ],
    );

    apply_template(&mut doc, &template, CANVAS).unwrap();
    assert_eq!(doc.find_item(first).unwrap().z_index(), 1);
    assert_eq!(doc.find_item(second).unwrap().z_index(), 2);
}

#[test]
fn test_no_photos_is_reported() {
    let mut doc = Document::new();
    add_caption(&mut doc);
    let result = apply_template(&mut doc, &two_slots(), CANVAS);
    assert!(matches!(result, Err(EditorError::EmptyApplyTarget)));
}

#[test]
fn test_artistic_slot_style_is_copied() {
    let mut doc = Document::new();
    let id = add_photo(&mut doc, 1);
    let flower = find("art-flower-5").expect("five petal flower exists");

    apply_template(&mut doc, flower, CANVAS).unwrap();
    let item = doc.find_item(id).unwrap();
    let slot = &flower.slots[0];
    assert_eq!(item.style().border_radius, BorderRadius::Ellipse);
    assert_eq!(Some(item.style().border_width), slot.border_width);
    assert_eq!(Some(item.z_index()), slot.z_index);
}
