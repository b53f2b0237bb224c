//! Stacking order of items.
//!
//! `z_index` values are not required to be contiguous or unique. Paint order
//! is `(z_index, insertion index)` ascending, so ties resolve to whichever
//! item was added to the collection later being painted on top.

use crate::element::{Item, ItemId};

/// Largest z-index in use, or `None` for an empty collection
pub fn max_z(items: &[Item]) -> Option<i32> {
    items.iter().map(Item::z_index).max()
}

/// z-index for the `offset_in_batch`-th item of a batch being added now
pub fn next_z(items: &[Item], offset_in_batch: usize) -> i32 {
    let base = max_z(items).unwrap_or(0);
    base.saturating_add(offset_in_batch as i32).saturating_add(1)
}

/// True when no other item is at or above this item's z-index
pub fn is_topmost(items: &[Item], id: ItemId) -> bool {
    let Some(target) = items.iter().find(|item| item.id() == id) else {
        return false;
    };
    items
        .iter()
        .filter(|item| item.id() != id)
        .all(|item| item.z_index() < target.z_index())
}

/// Raise `id` above everything else. A no-op (returning `false`) if the item
/// is already strictly topmost or doesn't exist.
pub fn raise_to_top(items: &mut [Item], id: ItemId) -> bool {
    if is_topmost(items, id) {
        return false;
    }
    let top = max_z(items).unwrap_or(0).max(0).saturating_add(1);
    match items.iter_mut().find(|item| item.id() == id) {
        Some(item) => {
            item.set_z_index(top);
            true
        }
        None => false,
    }
}

/// Items in paint order: back to front
pub fn paint_order(items: &[Item]) -> Vec<&Item> {
    let mut ordered: Vec<(usize, &Item)> = items.iter().enumerate().collect();
    ordered.sort_by_key(|(index, item)| (item.z_index(), *index));
    ordered.into_iter().map(|(_, item)| item).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::TextContent;
    use crate::id_generator::generate_id;
    use egui::{Color32, Pos2, Rect, Vec2};

    fn item(z: i32) -> Item {
        Item::text(
            generate_id(),
            Rect::from_min_size(Pos2::ZERO, Vec2::splat(10.0)),
            TextContent::new("t", Color32::BLACK, 12.0, "Arial"),
        )
        .with_z_index(z)
    }

    #[test]
    fn test_next_z_counts_from_max() {
        let items = vec![item(3), item(7), item(-2)];
        assert_eq!(next_z(&items, 0), 8);
        assert_eq!(next_z(&items, 2), 10);
        assert_eq!(next_z(&[], 0), 1);
    }

    #[test]
    fn test_raise_uses_zero_floor() {
        let mut items = vec![item(-5), item(-3)];
        let id = items[0].id();
        assert!(raise_to_top(&mut items, id));
        assert_eq!(items[0].z_index(), 1);
    }

    #[test]
    fn test_raise_is_idempotent() {
        let mut items = vec![item(1), item(2)];
        let id = items[0].id();
        assert!(raise_to_top(&mut items, id));
        let z = items[0].z_index();
        assert!(!raise_to_top(&mut items, id));
        assert_eq!(items[0].z_index(), z);
    }

    #[test]
    fn test_tie_is_not_topmost() {
        let mut items = vec![item(5), item(5)];
        let id = items[1].id();
        assert!(!is_topmost(&items, id));
        assert!(raise_to_top(&mut items, id));
        assert_eq!(items[1].z_index(), 6);
    }

    #[test]
    fn test_paint_order_breaks_ties_by_insertion() {
        let items = vec![item(5), item(1), item(5)];
        let order: Vec<ItemId> = paint_order(&items).iter().map(|i| i.id()).collect();
        assert_eq!(order, vec![items[1].id(), items[0].id(), items[2].id()]);
    }
}
