//! Listable, deletable sources and the generic list adapter.
//!
//! # Responsibility
//! - Turn categories/items into display rows with derived colours.
//! - Provide swipe-to-delete by row index over any source.
//!
//! # Invariants
//! - An empty source renders exactly one placeholder row; the placeholder
//!   is never a record and cannot be deleted.
//! - After a successful delete the adapter re-queries its source.

use crate::model::category::Category;
use crate::model::colour::Colour;
use crate::repo::category_repo::CategoryRepository;
use crate::repo::item_repo::ItemRepository;
use crate::repo::RepoResult;
use uuid::Uuid;

pub const NO_CATEGORIES_PLACEHOLDER: &str = "No Categories Added yet";
pub const NO_ITEMS_PLACEHOLDER: &str = "No Items Added";

/// One rendered record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListRow {
    /// Id of the backing record.
    pub id: Uuid,
    pub title: String,
    pub background: Colour,
    /// Readable label colour on `background`.
    pub text_colour: Colour,
    /// Checkmark accessory.
    pub checked: bool,
}

/// What the list shows at one index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayRow<'a> {
    Record(&'a ListRow),
    Placeholder(&'static str),
}

/// A collection that can be listed and whose rows can be deleted.
pub trait ListSource {
    /// Current rows in display order.
    fn rows(&self) -> RepoResult<Vec<ListRow>>;
    /// Deletes the record behind `row`. Returns `false` when already gone.
    fn delete_row(&self, row: &ListRow) -> RepoResult<bool>;
    /// Text shown when there are no rows.
    fn placeholder(&self) -> &'static str;
}

/// All categories, coloured by their own colour.
pub struct CategoryListSource<R: CategoryRepository> {
    repo: R,
}

impl<R: CategoryRepository> CategoryListSource<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }
}

impl<R: CategoryRepository> ListSource for CategoryListSource<R> {
    fn rows(&self) -> RepoResult<Vec<ListRow>> {
        Ok(self
            .repo
            .list_categories()?
            .into_iter()
            .map(|category| ListRow {
                id: category.id,
                text_colour: category.colour.contrast_text(),
                background: category.colour,
                title: category.name,
                checked: false,
            })
            .collect())
    }

    fn delete_row(&self, row: &ListRow) -> RepoResult<bool> {
        self.repo.delete_category(row.id)
    }

    fn placeholder(&self) -> &'static str {
        NO_CATEGORIES_PLACEHOLDER
    }
}

/// Items of one category, optionally filtered by title.
///
/// Rows darken progressively from the category colour.
pub struct ItemListSource<R: ItemRepository> {
    repo: R,
    category: Category,
    query: String,
}

impl<R: ItemRepository> ItemListSource<R> {
    pub fn new(repo: R, category: Category) -> Self {
        Self {
            repo,
            category,
            query: String::new(),
        }
    }

    pub fn category(&self) -> &Category {
        &self.category
    }

    /// Sets the title filter. Empty input clears it.
    pub fn set_query(&mut self, query: &str) {
        self.query = query.to_string();
    }

    /// Flips completion of the item behind `row`.
    pub fn toggle_row(&self, row: &ListRow) -> RepoResult<bool> {
        Ok(self.repo.toggle_done(row.id)?.done)
    }
}

impl<R: ItemRepository> ListSource for ItemListSource<R> {
    fn rows(&self) -> RepoResult<Vec<ListRow>> {
        let items = self.repo.filter_items(self.category.id, &self.query)?;
        let count = items.len();
        Ok(items
            .into_iter()
            .enumerate()
            .map(|(index, item)| {
                let background = self.category.colour.darken(index as f32 / count as f32);
                ListRow {
                    id: item.id,
                    title: item.title,
                    text_colour: background.contrast_text(),
                    background,
                    checked: item.done,
                }
            })
            .collect())
    }

    fn delete_row(&self, row: &ListRow) -> RepoResult<bool> {
        self.repo.delete_item(row.id)
    }

    fn placeholder(&self) -> &'static str {
        NO_ITEMS_PLACEHOLDER
    }
}

/// Generic list adapter with swipe-to-delete.
pub struct SwipeList<S: ListSource> {
    source: S,
    rows: Vec<ListRow>,
}

impl<S: ListSource> SwipeList<S> {
    /// Wraps `source` and loads its first snapshot.
    pub fn new(source: S) -> RepoResult<Self> {
        let rows = source.rows()?;
        Ok(Self { source, rows })
    }

    /// Re-queries the source.
    pub fn reload(&mut self) -> RepoResult<()> {
        self.rows = self.source.rows()?;
        Ok(())
    }

    /// Record rows only; empty when the source is empty.
    pub fn records(&self) -> &[ListRow] {
        &self.rows
    }

    /// Displayed row count, counting the placeholder.
    pub fn row_count(&self) -> usize {
        self.rows.len().max(1)
    }

    /// What to render at `index`, if anything.
    pub fn row(&self, index: usize) -> Option<DisplayRow<'_>> {
        if self.rows.is_empty() {
            return (index == 0).then(|| DisplayRow::Placeholder(self.source.placeholder()));
        }
        self.rows.get(index).map(DisplayRow::Record)
    }

    /// Deletes the record at `index` and reloads.
    ///
    /// Out-of-range indices and the placeholder are no-ops returning `false`.
    pub fn delete_at(&mut self, index: usize) -> RepoResult<bool> {
        let Some(row) = self.rows.get(index) else {
            return Ok(false);
        };
        let removed = self.source.delete_row(row)?;
        self.reload()?;
        Ok(removed)
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Mutable access for source settings; call [`Self::reload`] afterwards.
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }
}
