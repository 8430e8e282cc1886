//! List presentation adapters.
//!
//! Composition replaces a shared swipe-delete base controller: each record
//! kind implements [`ListSource`], and [`SwipeList`] renders any of them.

pub mod list;

pub use list::{
    CategoryListSource, DisplayRow, ItemListSource, ListRow, ListSource, SwipeList,
    NO_CATEGORIES_PLACEHOLDER, NO_ITEMS_PLACEHOLDER,
};
