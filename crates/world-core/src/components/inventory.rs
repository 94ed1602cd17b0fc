//! Keyed quantity store for item types.
//!
//! Counts are never negative: `remove_item` refuses to go below zero and
//! leaves the inventory untouched when it would. Callers that need a
//! transaction to be atomic check sufficiency before mutating anything.

use bevy_ecs::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Fixed set of tradeable item types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemType {
    Wood,
    Stone,
    Apple,
    GoldCoin,
}

impl ItemType {
    /// Sale price in gold per unit. Gold itself has no sale price.
    pub fn unit_price(&self) -> Option<u32> {
        match self {
            ItemType::Wood => Some(1),
            ItemType::Stone => Some(2),
            ItemType::Apple => Some(5),
            ItemType::GoldCoin => None,
        }
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ItemType::Wood => "wood",
            ItemType::Stone => "stone",
            ItemType::Apple => "apple",
            ItemType::GoldCoin => "gold coin",
        };
        f.write_str(s)
    }
}

/// Errors raised by inventory mutations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InventoryError {
    #[error("insufficient {item}: have {have}, need {need}")]
    Insufficient {
        item: ItemType,
        have: u32,
        need: u32,
    },
}

/// Per-entity item store. Every entity owns exactly one.
#[derive(Component, Debug, Clone, Default, Serialize, Deserialize)]
pub struct Inventory {
    items: HashMap<ItemType, u32>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Convenience constructor for spawn-time stocking.
    pub fn with_items(items: &[(ItemType, u32)]) -> Self {
        let mut inventory = Self::new();
        for &(item, count) in items {
            inventory.add_item(item, count);
        }
        inventory
    }

    /// Current count for an item type, zero when untracked.
    pub fn count(&self, item: ItemType) -> u32 {
        self.items.get(&item).copied().unwrap_or(0)
    }

    pub fn has_at_least(&self, item: ItemType, count: u32) -> bool {
        self.count(item) >= count
    }

    pub fn add_item(&mut self, item: ItemType, count: u32) {
        if count > 0 {
            *self.items.entry(item).or_insert(0) += count;
        }
    }

    /// Removes `count` of `item`, failing without mutation when the
    /// inventory holds fewer than `count`.
    pub fn remove_item(&mut self, item: ItemType, count: u32) -> Result<(), InventoryError> {
        let have = self.count(item);
        if have < count {
            return Err(InventoryError::Insufficient {
                item,
                have,
                need: count,
            });
        }
        if let Some(entry) = self.items.get_mut(&item) {
            *entry -= count;
        }
        Ok(())
    }

    /// Moves the full contents of `source` into this inventory, leaving
    /// every count in `source` at zero. All-or-nothing by construction.
    pub fn transfer_contents_of(&mut self, source: &mut Inventory) {
        for (item, count) in source.items.drain() {
            if count > 0 {
                *self.items.entry(item).or_insert(0) += count;
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.values().all(|&count| count == 0)
    }

    /// Item types currently held with a positive count.
    pub fn iter(&self) -> impl Iterator<Item = (ItemType, u32)> + '_ {
        self.items
            .iter()
            .filter(|(_, &count)| count > 0)
            .map(|(&item, &count)| (item, count))
    }

    /// Total units held across all item types.
    pub fn total_items(&self) -> u32 {
        self.items.values().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn untracked_items_count_zero() {
        let inventory = Inventory::new();
        assert_eq!(inventory.count(ItemType::Wood), 0);
    }

    #[test]
    fn add_then_remove() {
        let mut inventory = Inventory::new();
        inventory.add_item(ItemType::Stone, 3);
        inventory.remove_item(ItemType::Stone, 2).unwrap();
        assert_eq!(inventory.count(ItemType::Stone), 1);
    }

    #[test]
    fn remove_more_than_held_fails_without_mutation() {
        let mut inventory = Inventory::with_items(&[(ItemType::Apple, 2)]);
        let err = inventory.remove_item(ItemType::Apple, 3).unwrap_err();
        assert_eq!(
            err,
            InventoryError::Insufficient {
                item: ItemType::Apple,
                have: 2,
                need: 3,
            }
        );
        assert_eq!(inventory.count(ItemType::Apple), 2);
    }

    #[test]
    fn remove_from_empty_fails() {
        let mut inventory = Inventory::new();
        assert!(inventory.remove_item(ItemType::Wood, 1).is_err());
        assert_eq!(inventory.count(ItemType::Wood), 0);
    }

    #[test]
    fn transfer_empties_source_completely() {
        let mut source = Inventory::with_items(&[(ItemType::Wood, 4), (ItemType::Stone, 2)]);
        let mut dest = Inventory::with_items(&[(ItemType::Wood, 1)]);

        dest.transfer_contents_of(&mut source);

        assert!(source.is_empty());
        assert_eq!(source.count(ItemType::Wood), 0);
        assert_eq!(source.count(ItemType::Stone), 0);
        assert_eq!(dest.count(ItemType::Wood), 5);
        assert_eq!(dest.count(ItemType::Stone), 2);
    }

    #[test]
    fn transfer_conserves_totals() {
        let mut source = Inventory::with_items(&[(ItemType::Apple, 3), (ItemType::GoldCoin, 7)]);
        let mut dest = Inventory::with_items(&[(ItemType::GoldCoin, 2)]);
        let before = source.total_items() + dest.total_items();

        dest.transfer_contents_of(&mut source);

        assert_eq!(source.total_items() + dest.total_items(), before);
    }

    #[test]
    fn price_table() {
        assert_eq!(ItemType::Wood.unit_price(), Some(1));
        assert_eq!(ItemType::Stone.unit_price(), Some(2));
        assert_eq!(ItemType::Apple.unit_price(), Some(5));
        assert_eq!(ItemType::GoldCoin.unit_price(), None);
    }

    #[test]
    fn iter_skips_zeroed_entries() {
        let mut inventory = Inventory::with_items(&[(ItemType::Wood, 2)]);
        inventory.remove_item(ItemType::Wood, 2).unwrap();
        assert_eq!(inventory.iter().count(), 0);
        assert!(inventory.is_empty());
    }
}
