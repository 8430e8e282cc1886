//! Category domain model.
//!
//! # Invariants
//! - `id` is stable and never reused for another category.
//! - `colour` is always present and valid.
//! - A category owns its items; they are removed with it.

use super::colour::Colour;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier of a category.
pub type CategoryId = Uuid;

/// Named, coloured grouping of items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    /// User-facing label. May be empty.
    pub name: String,
    pub colour: Colour,
}

impl Category {
    /// Creates a category with a generated stable ID.
    pub fn new(name: impl Into<String>, colour: Colour) -> Self {
        Self::with_id(Uuid::new_v4(), name, colour)
    }

    /// Creates a category with a caller-provided stable ID.
    pub fn with_id(id: CategoryId, name: impl Into<String>, colour: Colour) -> Self {
        Self {
            id,
            name: name.into(),
            colour,
        }
    }
}
