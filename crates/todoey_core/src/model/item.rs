//! Item domain model.
//!
//! # Responsibility
//! - Define the to-do record owned by one category.
//! - Provide the creation-time ordering shared by all item listings.
//!
//! # Invariants
//! - `category_id` is a non-owning back-reference; it never keeps an item
//!   alive after its category is deleted.
//! - Ordering is `date_created ASC` with missing timestamps first; equal
//!   keys keep their existing relative order.

use super::category::CategoryId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier of an item.
pub type ItemId = Uuid;

/// Single to-do entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    /// Parent category (back-reference).
    pub category_id: CategoryId,
    pub title: String,
    pub done: bool,
    /// Unix epoch milliseconds, set at creation.
    pub date_created: Option<i64>,
}

impl Item {
    /// Creates an item stamped with the current time.
    pub fn new(category_id: CategoryId, title: impl Into<String>) -> Self {
        let mut item = Self::with_id(Uuid::new_v4(), category_id, title);
        item.date_created = Some(now_epoch_ms());
        item
    }

    /// Creates an item with a caller-provided ID and no timestamp.
    ///
    /// Used by import paths and tests that control ordering explicitly.
    pub fn with_id(id: ItemId, category_id: CategoryId, title: impl Into<String>) -> Self {
        Self {
            id,
            category_id,
            title: title.into(),
            done: false,
            date_created: None,
        }
    }

    /// Sets `date_created`, returning the item for chaining.
    pub fn created_at(mut self, epoch_ms: i64) -> Self {
        self.date_created = Some(epoch_ms);
        self
    }

    /// Flips the completion flag.
    pub fn toggle_done(&mut self) {
        self.done = !self.done;
    }
}

/// Current wall-clock time in Unix epoch milliseconds.
pub fn now_epoch_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Stable-sorts items by `date_created`, missing timestamps first.
pub fn sort_by_creation(items: &mut [Item]) {
    // `None < Some(_)` gives the nulls-first rule.
    items.sort_by_key(|item| item.date_created);
}

#[cfg(test)]
mod tests {
    use super::{sort_by_creation, Item};
    use uuid::Uuid;

    #[test]
    fn new_item_is_open_and_timestamped() {
        let item = Item::new(Uuid::new_v4(), "Email boss");
        assert!(!item.done);
        assert!(item.date_created.is_some());
    }

    #[test]
    fn double_toggle_restores_flag() {
        let mut item = Item::new(Uuid::new_v4(), "File report");
        item.toggle_done();
        assert!(item.done);
        item.toggle_done();
        assert!(!item.done);
    }

    #[test]
    fn sort_puts_missing_timestamps_first_and_is_stable() {
        let category = Uuid::new_v4();
        let mut items = vec![
            Item::with_id(Uuid::new_v4(), category, "late").created_at(30),
            Item::with_id(Uuid::new_v4(), category, "tie-a").created_at(10),
            Item::with_id(Uuid::new_v4(), category, "untimed"),
            Item::with_id(Uuid::new_v4(), category, "tie-b").created_at(10),
        ];
        sort_by_creation(&mut items);

        let titles: Vec<&str> = items.iter().map(|item| item.title.as_str()).collect();
        assert_eq!(titles, vec!["untimed", "tie-a", "tie-b", "late"]);
    }
}
