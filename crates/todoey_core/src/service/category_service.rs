//! Category use-case service.
//!
//! # Responsibility
//! - Validate the colour before it reaches the repository.
//! - Generate a palette colour when the caller supplies none.
//! - Log every mutation outcome with metadata only.
//!
//! # Invariants
//! - Category names are stored as given; an empty name is allowed.
//! - Every stored category has a valid colour.

use crate::model::category::{Category, CategoryId};
use crate::model::colour::{Colour, InvalidColour};
use crate::repo::category_repo::CategoryRepository;
use crate::repo::{RepoError, RepoResult};
use log::{error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors from category use-cases.
#[derive(Debug)]
pub enum CategoryServiceError {
    /// Supplied colour is not a six-digit hex value.
    InvalidColour(InvalidColour),
    /// Persistence-layer failure.
    Repo(RepoError),
    /// Internal consistency mismatch between write and read-back.
    InconsistentState(&'static str),
}

impl Display for CategoryServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidColour(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::InconsistentState(details) => {
                write!(f, "inconsistent category state: {details}")
            }
        }
    }
}

impl Error for CategoryServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidColour(err) => Some(err),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for CategoryServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<InvalidColour> for CategoryServiceError {
    fn from(value: InvalidColour) -> Self {
        Self::InvalidColour(value)
    }
}

/// Category service facade over repository implementations.
pub struct CategoryService<R: CategoryRepository> {
    repo: R,
}

impl<R: CategoryRepository> CategoryService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates one category from user input.
    ///
    /// `colour` is optional; a random palette colour is used when absent.
    pub fn create_category(
        &self,
        name: &str,
        colour: Option<&str>,
    ) -> Result<Category, CategoryServiceError> {
        let colour = match colour {
            Some(raw) => Colour::parse(raw)?,
            None => Colour::random(),
        };

        let category = Category::new(name, colour);
        if let Err(err) = self.repo.create_category(&category) {
            error!(
                "event=category_create module=service status=error error={}",
                err
            );
            return Err(err.into());
        }
        info!("event=category_create module=service status=ok");

        self.repo
            .get_category(category.id)?
            .ok_or(CategoryServiceError::InconsistentState(
                "created category not found in read-back",
            ))
    }

    /// Lists every category in insertion order.
    pub fn list_categories(&self) -> RepoResult<Vec<Category>> {
        self.repo.list_categories()
    }

    /// Loads one category.
    pub fn get_category(&self, id: CategoryId) -> RepoResult<Option<Category>> {
        self.repo.get_category(id)
    }

    /// Deletes one category and everything it owns.
    ///
    /// A missing category is a logged no-op that returns `Ok(false)`.
    pub fn delete_category(&self, id: CategoryId) -> RepoResult<bool> {
        match self.repo.delete_category(id) {
            Ok(true) => {
                info!("event=category_delete module=service status=ok");
                Ok(true)
            }
            Ok(false) => {
                warn!("event=category_delete module=service status=noop");
                Ok(false)
            }
            Err(err) => {
                error!(
                    "event=category_delete module=service status=error error={}",
                    err
                );
                Err(err)
            }
        }
    }
}
