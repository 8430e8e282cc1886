//! Domain model for categories and their items.
//!
//! # Responsibility
//! - Define the two record shapes persisted by the store.
//! - Keep value rules (colour format, item ordering) next to the data.
//!
//! # Invariants
//! - Every record is identified by a stable UUID.
//! - Deletion is a hard delete; category deletion cascades to its items.

pub mod category;
pub mod colour;
pub mod item;
