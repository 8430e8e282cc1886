//! Category repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide list/get/create/delete over the `categories` table.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Listing order is insertion order (`seq ASC`).
//! - Deleting a category removes its items through `ON DELETE CASCADE`.
//! - Read paths reject invalid persisted colours instead of masking them.

use crate::db::{with_write_tx, RecordKind};
use crate::model::category::{Category, CategoryId};
use crate::model::colour::Colour;
use crate::repo::{ensure_connection_ready, parse_uuid, RepoError, RepoResult};
use log::{debug, warn};
use rusqlite::{params, Connection, OptionalExtension, Row};

pub(crate) const CATEGORY_SELECT_SQL: &str = "SELECT
    uuid,
    name,
    colour
FROM categories";

/// Repository interface for category operations.
pub trait CategoryRepository {
    /// Persists one new category and returns its stable id.
    fn create_category(&self, category: &Category) -> RepoResult<CategoryId>;
    /// Loads one category by id.
    fn get_category(&self, id: CategoryId) -> RepoResult<Option<Category>>;
    /// Lists every category in insertion order. Empty when none exist.
    fn list_categories(&self) -> RepoResult<Vec<Category>>;
    /// Deletes one category and its items. Returns `false` when already gone.
    fn delete_category(&self, id: CategoryId) -> RepoResult<bool>;
}

/// SQLite-backed category repository.
pub struct SqliteCategoryRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteCategoryRepository<'conn> {
    /// Creates a repository from a connection returned by `db::open_db*`.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, &[RecordKind::Category, RecordKind::Item])?;
        Ok(Self { conn })
    }
}

impl CategoryRepository for SqliteCategoryRepository<'_> {
    fn create_category(&self, category: &Category) -> RepoResult<CategoryId> {
        with_write_tx(self.conn, |tx| {
            tx.execute(
                "INSERT INTO categories (uuid, name, colour) VALUES (?1, ?2, ?3);",
                params![
                    category.id.to_string(),
                    category.name.as_str(),
                    category.colour.as_str(),
                ],
            )?;
            Ok::<_, RepoError>(())
        })?;

        debug!("event=category_insert module=repo status=ok");
        Ok(category.id)
    }

    fn get_category(&self, id: CategoryId) -> RepoResult<Option<Category>> {
        load_category(self.conn, id)
    }

    fn list_categories(&self) -> RepoResult<Vec<Category>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{CATEGORY_SELECT_SQL} ORDER BY seq ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut categories = Vec::new();
        while let Some(row) = rows.next()? {
            categories.push(parse_category_row(row)?);
        }
        Ok(categories)
    }

    fn delete_category(&self, id: CategoryId) -> RepoResult<bool> {
        let removed = with_write_tx(self.conn, |tx| {
            let changed = tx.execute("DELETE FROM categories WHERE uuid = ?1;", [id.to_string()])?;
            Ok::<_, RepoError>(changed > 0)
        })?;

        if !removed {
            warn!("event=category_delete module=repo status=noop reason=missing");
        }
        Ok(removed)
    }
}

pub(crate) fn load_category(conn: &Connection, id: CategoryId) -> RepoResult<Option<Category>> {
    conn.query_row(
        &format!("{CATEGORY_SELECT_SQL} WHERE uuid = ?1;"),
        [id.to_string()],
        |row| Ok(parse_category_row(row)),
    )
    .optional()?
    .transpose()
}

pub(crate) fn parse_category_row(row: &Row<'_>) -> RepoResult<Category> {
    let uuid_text: String = row.get("uuid")?;
    let id = parse_uuid(&uuid_text, "categories.uuid")?;

    let colour_text: String = row.get("colour")?;
    let colour = Colour::parse(&colour_text).map_err(|_| {
        RepoError::InvalidData(format!(
            "invalid colour `{colour_text}` in categories.colour"
        ))
    })?;

    Ok(Category {
        id,
        name: row.get("name")?,
        colour,
    })
}
