use std::sync::Arc;

use eframe_collage::element::{Bitmap, Item, TextContent};
use eframe_collage::id_generator::generate_id;
use eframe_collage::{Document, z_order};
use egui::{Color32, Pos2, Rect, Vec2};
use proptest::prelude::*;

fn photo(z: i32) -> Item {
    Item::image(
        generate_id(),
        Rect::from_min_size(Pos2::ZERO, Vec2::splat(50.0)),
        Arc::new(Bitmap::solid(2, 2, [0, 0, 0, 255])),
    )
    .with_z_index(z)
}

fn caption() -> Item {
    Item::text(
        generate_id(),
        Rect::from_min_size(Pos2::ZERO, Vec2::new(300.0, 50.0)),
        TextContent::new("hello", Color32::BLACK, 40.0, "Arial"),
    )
}

#[test]
fn test_duplicate_ids_are_rejected() {
    let mut doc = Document::new();
    let item = photo(1);
    assert!(doc.add_item(item.clone()));
    assert!(!doc.add_item(item));
    assert_eq!(doc.len(), 1);
}

#[test]
fn test_paint_order_ties_follow_insertion() {
    let mut doc = Document::new();
    let first = photo(5);
    let second = photo(5);
    let below = photo(2);
    let (a, b, c) = (first.id(), second.id(), below.id());
    doc.add_item(first);
    doc.add_item(second);
    doc.add_item(below);

    let order: Vec<_> = doc.paint_order().iter().map(|item| item.id()).collect();
    assert_eq!(order, vec![c, a, b]);
}

#[test]
fn test_delete_selected_is_idempotent() {
    let mut doc = Document::new();
    let item = photo(1);
    let id = item.id();
    doc.add_item(item);
    doc.add_item(caption());
    doc.select(Some(id));

    assert!(doc.delete_selected().is_some());
    assert_eq!(doc.len(), 1);
    assert_eq!(doc.selected(), None);

    let revision = doc.revision();
    assert!(doc.delete_selected().is_none());
    assert_eq!(doc.len(), 1);
    assert_eq!(doc.revision(), revision);
}

#[test]
fn test_bring_to_front_without_selection_is_noop() {
    let mut doc = Document::new();
    doc.add_item(photo(3));
    doc.add_item(photo(1));
    let revision = doc.revision();

    assert!(!doc.bring_selected_to_front());
    assert_eq!(doc.revision(), revision);
    let zs: Vec<_> = doc.items().iter().map(Item::z_index).collect();
    assert_eq!(zs, vec![3, 1]);
}

#[test]
fn test_selecting_unknown_id_clears_selection() {
    let mut doc = Document::new();
    let item = photo(1);
    let id = item.id();
    doc.add_item(item);
    doc.select(Some(id));
    doc.select(Some(generate_id()));
    assert_eq!(doc.selected(), None);
}

#[test]
fn test_snapshot_is_detached() {
    let mut doc = Document::new();
    let item = photo(1);
    let id = item.id();
    doc.add_item(item);
    let snapshot = doc.snapshot();

    doc.find_item_mut(id).unwrap().set_position(Pos2::new(400.0, 400.0));
    assert_eq!(snapshot.items[0].position(), Pos2::ZERO);
    assert!(doc.revision() > snapshot.revision);
}

proptest! {
    #[test]
    fn raised_item_is_strictly_topmost(
        zs in proptest::collection::vec(-50i32..50, 1..12),
        pick in any::<proptest::sample::Index>(),
    ) {
        let mut doc = Document::new();
        let ids: Vec<_> = zs
            .iter()
            .map(|&z| {
                let item = photo(z);
                let id = item.id();
                doc.add_item(item);
                id
            })
            .collect();
        let target = ids[pick.index(ids.len())];
        let others_before: Vec<_> = doc
            .items()
            .iter()
            .filter(|item| item.id() != target)
            .map(Item::z_index)
            .collect();

        doc.bring_to_front(target);

        prop_assert!(z_order::is_topmost(doc.items(), target));
        prop_assert_eq!(doc.paint_order().last().map(|item| item.id()), Some(target));
        // Nobody else moves
        let others_after: Vec<_> = doc
            .items()
            .iter()
            .filter(|item| item.id() != target)
            .map(Item::z_index)
            .collect();
        prop_assert_eq!(others_before, others_after);

        // Raising again changes nothing
        let revision = doc.revision();
        prop_assert!(!doc.bring_to_front(target));
        prop_assert_eq!(doc.revision(), revision);
    }

    #[test]
    fn new_items_land_on_top(zs in proptest::collection::vec(-50i32..50, 0..12)) {
        let mut doc = Document::new();
        for z in zs {
            doc.add_item(photo(z));
        }
        let item = photo(z_order::next_z(doc.items(), 0));
        let id = item.id();
        doc.add_item(item);
        prop_assert!(z_order::is_topmost(doc.items(), id));
    }
}
