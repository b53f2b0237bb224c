use log::{debug, info};

use crate::element::{Item, ItemId};
use crate::z_order;

/// The item collection plus the current selection.
///
/// Items are kept in insertion order, which is *not* the paint order (see
/// [`z_order::paint_order`]). `revision` increases on every mutation so
/// views can cache whatever they derive from the items.
#[derive(Debug, Clone, Default)]
pub struct Document {
    items: Vec<Item>,
    selected: Option<ItemId>,
    revision: u64,
}

/// Point-in-time copy of the items, safe to hand to another thread.
/// Bitmaps are shared, not copied.
#[derive(Debug, Clone)]
pub struct DocumentSnapshot {
    pub items: Vec<Item>,
    pub revision: u64,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub(crate) fn touch(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }

    /// Append an item. Returns `false` (and changes nothing) if the id is
    /// already present.
    pub fn add_item(&mut self, item: Item) -> bool {
        if self.find_item(item.id()).is_some() {
            log::warn!("Refusing duplicate item id {}", item.id());
            return false;
        }
        debug!("Adding {} item {}", item.kind().type_name(), item.id());
        self.items.push(item);
        self.touch();
        true
    }

    pub fn find_item(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|item| item.id() == id)
    }

    /// Mutable access; counts as a mutation
    pub fn find_item_mut(&mut self, id: ItemId) -> Option<&mut Item> {
        let index = self.items.iter().position(|item| item.id() == id)?;
        self.touch();
        self.items.get_mut(index)
    }

    /// All items, mutably; counts as a mutation
    pub(crate) fn items_mut(&mut self) -> &mut [Item] {
        self.touch();
        &mut self.items
    }

    pub fn remove_item(&mut self, id: ItemId) -> Option<Item> {
        let index = self.items.iter().position(|item| item.id() == id)?;
        if self.selected == Some(id) {
            self.selected = None;
        }
        self.touch();
        Some(self.items.remove(index))
    }

    /// Items back to front
    pub fn paint_order(&self) -> Vec<&Item> {
        z_order::paint_order(&self.items)
    }

    pub fn selected(&self) -> Option<ItemId> {
        self.selected
    }

    pub fn selected_item(&self) -> Option<&Item> {
        self.selected.and_then(|id| self.find_item(id))
    }

    /// Select an existing item, or clear the selection with `None`
    pub fn select(&mut self, id: Option<ItemId>) {
        let id = id.filter(|id| self.find_item(*id).is_some());
        if self.selected != id {
            self.selected = id;
            self.touch();
        }
    }

    /// Raise `id` above everything else; no-op if it's already on top
    pub fn bring_to_front(&mut self, id: ItemId) -> bool {
        let raised = z_order::raise_to_top(&mut self.items, id);
        if raised {
            self.touch();
        }
        raised
    }

    /// Delete the selected item. Nothing selected, or a stale selection, is a no-op.
    pub fn delete_selected(&mut self) -> Option<Item> {
        let id = self.selected.take()?;
        let removed = self.remove_item(id);
        if let Some(item) = &removed {
            info!("🗑️ Deleted {} item {}", item.kind().type_name(), id);
        }
        removed
    }

    /// Bring the selected item to front. No-op without a valid selection.
    pub fn bring_selected_to_front(&mut self) -> bool {
        match self.selected {
            Some(id) => self.bring_to_front(id),
            None => false,
        }
    }

    pub fn snapshot(&self) -> DocumentSnapshot {
        DocumentSnapshot {
            items: self.items.clone(),
            revision: self.revision,
        }
    }
}
