//! Inventory contract used by equipment management

use item_core::ItemRef;
use std::rc::Rc;

/// Storage the equipment manager moves items in and out of
///
/// Items are compared by identity: two instances of the same template are
/// different items.
pub trait Inventory {
    fn capacity(&self) -> usize;

    fn size(&self) -> usize;

    /// Store an item; returns false when the inventory is full
    fn add_item(&mut self, item: ItemRef) -> bool;

    /// Remove an item if present; returns whether it was present
    fn remove_item(&mut self, item: &ItemRef) -> bool;

    fn contains(&self, item: &ItemRef) -> bool;

    fn is_full(&self) -> bool {
        self.size() >= self.capacity()
    }

    fn free_slots(&self) -> usize {
        self.capacity().saturating_sub(self.size())
    }
}

/// Fixed capacity list of items in pickup order
#[derive(Debug, Clone)]
pub struct Backpack {
    items: Vec<ItemRef>,
    capacity: usize,
}

impl Backpack {
    pub fn new(capacity: usize) -> Self {
        Backpack {
            items: Vec::with_capacity(capacity),
            capacity,
        }
    }

    pub fn items(&self) -> &[ItemRef] {
        &self.items
    }

    pub fn iter(&self) -> impl Iterator<Item = &ItemRef> {
        self.items.iter()
    }
}

impl Inventory for Backpack {
    fn capacity(&self) -> usize {
        self.capacity
    }

    fn size(&self) -> usize {
        self.items.len()
    }

    fn add_item(&mut self, item: ItemRef) -> bool {
        if self.is_full() {
            return false;
        }
        self.items.push(item);
        true
    }

    fn remove_item(&mut self, item: &ItemRef) -> bool {
        match self.items.iter().position(|held| Rc::ptr_eq(held, item)) {
            Some(index) => {
                self.items.remove(index);
                true
            }
            None => false,
        }
    }

    fn contains(&self, item: &ItemRef) -> bool {
        self.items.iter().any(|held| Rc::ptr_eq(held, item))
    }
}
