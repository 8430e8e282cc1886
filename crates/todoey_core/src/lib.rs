//! Core persistence and query layer for Todoey.
//! This crate is the single source of truth for category/item invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod search;
pub mod service;
pub mod view;

pub use db::{count_records, with_write_tx, DbError, DbResult, RecordKind};
pub use logging::{default_log_level, init_logging, logging_status, LogConfig};
pub use model::category::{Category, CategoryId};
pub use model::colour::{Colour, InvalidColour, DEFAULT_COLOUR, PALETTE};
pub use model::item::{now_epoch_ms, sort_by_creation, Item, ItemId};
pub use repo::category_repo::{CategoryRepository, SqliteCategoryRepository};
pub use repo::item_repo::{filter_loaded, ItemRepository, SqliteItemRepository};
pub use repo::{RepoError, RepoResult};
pub use service::category_service::{CategoryService, CategoryServiceError};
pub use service::item_service::{ItemService, ItemServiceError};
pub use view::{
    CategoryListSource, DisplayRow, ItemListSource, ListRow, ListSource, SwipeList,
};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
