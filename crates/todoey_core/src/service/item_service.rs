//! Item use-case service.
//!
//! # Responsibility
//! - Reject blank titles before they reach the repository.
//! - Stamp new items with the current time.
//! - Log every mutation outcome with metadata only.
//!
//! # Invariants
//! - Item titles must not be blank; they are stored exactly as typed.
//! - Listing and filtering share one ordering rule.

use crate::db::RecordKind;
use crate::model::category::{Category, CategoryId};
use crate::model::item::{Item, ItemId};
use crate::repo::item_repo::ItemRepository;
use crate::repo::{RepoError, RepoResult};
use log::{error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors from item use-cases.
#[derive(Debug)]
pub enum ItemServiceError {
    /// Title is blank after trim.
    InvalidTitle,
    /// Target category does not exist.
    CategoryNotFound(CategoryId),
    /// Target item does not exist.
    ItemNotFound(ItemId),
    /// Persistence-layer failure.
    Repo(RepoError),
    /// Internal consistency mismatch between write and read-back.
    InconsistentState(&'static str),
}

impl Display for ItemServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidTitle => write!(f, "item title must not be blank"),
            Self::CategoryNotFound(id) => write!(f, "category not found: {id}"),
            Self::ItemNotFound(id) => write!(f, "item not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::InconsistentState(details) => write!(f, "inconsistent item state: {details}"),
        }
    }
}

impl Error for ItemServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for ItemServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(RecordKind::Category, id) => Self::CategoryNotFound(id),
            RepoError::NotFound(RecordKind::Item, id) => Self::ItemNotFound(id),
            other => Self::Repo(other),
        }
    }
}

/// Item service facade over repository implementations.
pub struct ItemService<R: ItemRepository> {
    repo: R,
}

impl<R: ItemRepository> ItemService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Appends a new open item, stamped with the current time.
    pub fn create_item(
        &self,
        category_id: CategoryId,
        title: &str,
    ) -> Result<Item, ItemServiceError> {
        if title.trim().is_empty() {
            return Err(ItemServiceError::InvalidTitle);
        }

        let item = Item::new(category_id, title);
        if let Err(err) = self.repo.create_item(&item) {
            error!("event=item_create module=service status=error error={}", err);
            return Err(err.into());
        }
        info!("event=item_create module=service status=ok");

        self.repo
            .get_item(item.id)?
            .ok_or(ItemServiceError::InconsistentState(
                "created item not found in read-back",
            ))
    }

    /// Lists the items of one category in creation order.
    pub fn list_items(&self, category_id: CategoryId) -> RepoResult<Vec<Item>> {
        self.repo.list_items(category_id)
    }

    /// Filters one category's items by title; empty input resets the filter.
    pub fn filter_items(&self, category_id: CategoryId, query: &str) -> RepoResult<Vec<Item>> {
        self.repo.filter_items(category_id, query)
    }

    /// Flips completion and returns the updated item.
    pub fn toggle_done(&self, id: ItemId) -> Result<Item, ItemServiceError> {
        match self.repo.toggle_done(id) {
            Ok(item) => {
                info!(
                    "event=item_toggle module=service status=ok done={}",
                    item.done
                );
                Ok(item)
            }
            Err(err) => {
                error!("event=item_toggle module=service status=error error={}", err);
                Err(err.into())
            }
        }
    }

    /// Deletes one item. A missing item is a logged no-op.
    pub fn delete_item(&self, id: ItemId) -> RepoResult<bool> {
        match self.repo.delete_item(id) {
            Ok(true) => {
                info!("event=item_delete module=service status=ok");
                Ok(true)
            }
            Ok(false) => {
                warn!("event=item_delete module=service status=noop");
                Ok(false)
            }
            Err(err) => {
                error!("event=item_delete module=service status=error error={}", err);
                Err(err)
            }
        }
    }

    /// Resolves the category that owns one item.
    pub fn parent_category(&self, id: ItemId) -> RepoResult<Option<Category>> {
        self.repo.parent_category(id)
    }
}
