//! Item repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide list/create/toggle/delete/filter over the `items` table.
//! - Resolve the parent category through the stored back-reference.
//!
//! # Invariants
//! - Listings are ordered `date_created ASC` with missing timestamps first,
//!   ties broken by insertion order (`seq ASC`).
//! - An item can only be created under an existing category.
//! - An empty filter query returns the full ordered listing.

use crate::db::{with_write_tx, RecordKind};
use crate::model::category::{Category, CategoryId};
use crate::model::item::{sort_by_creation, Item, ItemId};
use crate::repo::category_repo::{parse_category_row, CATEGORY_SELECT_SQL};
use crate::repo::{ensure_connection_ready, parse_uuid, RepoError, RepoResult};
use crate::search::{contains_folded, normalize_query, register_text_functions};
use log::{debug, warn};
use rusqlite::{params, Connection, OptionalExtension, Row};

const ITEM_SELECT_SQL: &str = "SELECT
    uuid,
    category_uuid,
    title,
    done,
    date_created
FROM items";

const ITEM_ORDER_SQL: &str = "ORDER BY date_created IS NOT NULL, date_created ASC, seq ASC";

/// Repository interface for item operations scoped to a category.
pub trait ItemRepository {
    /// Attaches one new item to `item.category_id` and returns its id.
    fn create_item(&self, item: &Item) -> RepoResult<ItemId>;
    /// Loads one item by id.
    fn get_item(&self, id: ItemId) -> RepoResult<Option<Item>>;
    /// Lists items of one category in creation order.
    fn list_items(&self, category_id: CategoryId) -> RepoResult<Vec<Item>>;
    /// Lists items whose title contains `query` (case/diacritic-insensitive).
    fn filter_items(&self, category_id: CategoryId, query: &str) -> RepoResult<Vec<Item>>;
    /// Flips `done` and returns the updated item.
    fn toggle_done(&self, id: ItemId) -> RepoResult<Item>;
    /// Deletes one item. Returns `false` when already gone.
    fn delete_item(&self, id: ItemId) -> RepoResult<bool>;
    /// Resolves the category owning one item.
    fn parent_category(&self, id: ItemId) -> RepoResult<Option<Category>>;
}

/// SQLite-backed item repository.
pub struct SqliteItemRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteItemRepository<'conn> {
    /// Creates a repository from a connection returned by `db::open_db*`.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, &[RecordKind::Category, RecordKind::Item])?;
        register_text_functions(conn)?;
        Ok(Self { conn })
    }
}

impl ItemRepository for SqliteItemRepository<'_> {
    fn create_item(&self, item: &Item) -> RepoResult<ItemId> {
        with_write_tx(self.conn, |tx| {
            let parent_exists: i64 = tx.query_row(
                "SELECT EXISTS(SELECT 1 FROM categories WHERE uuid = ?1);",
                [item.category_id.to_string()],
                |row| row.get(0),
            )?;
            if parent_exists != 1 {
                return Err(RepoError::NotFound(RecordKind::Category, item.category_id));
            }

            tx.execute(
                "INSERT INTO items (uuid, category_uuid, title, done, date_created)
                 VALUES (?1, ?2, ?3, ?4, ?5);",
                params![
                    item.id.to_string(),
                    item.category_id.to_string(),
                    item.title.as_str(),
                    bool_to_int(item.done),
                    item.date_created,
                ],
            )?;
            Ok(())
        })?;

        debug!("event=item_insert module=repo status=ok");
        Ok(item.id)
    }

    fn get_item(&self, id: ItemId) -> RepoResult<Option<Item>> {
        load_item(self.conn, id)
    }

    fn list_items(&self, category_id: CategoryId) -> RepoResult<Vec<Item>> {
        let mut stmt = self.conn.prepare(&format!(
            "{ITEM_SELECT_SQL} WHERE category_uuid = ?1 {ITEM_ORDER_SQL};"
        ))?;
        let mut rows = stmt.query([category_id.to_string()])?;
        collect_items(&mut rows)
    }

    fn filter_items(&self, category_id: CategoryId, query: &str) -> RepoResult<Vec<Item>> {
        let Some(folded) = normalize_query(query) else {
            return self.list_items(category_id);
        };

        let mut stmt = self.conn.prepare(&format!(
            "{ITEM_SELECT_SQL}
             WHERE category_uuid = ?1
               AND instr(fold_text(title), ?2) > 0
             {ITEM_ORDER_SQL};"
        ))?;
        let mut rows = stmt.query(params![category_id.to_string(), folded])?;
        collect_items(&mut rows)
    }

    fn toggle_done(&self, id: ItemId) -> RepoResult<Item> {
        with_write_tx(self.conn, |tx| {
            let changed = tx.execute(
                "UPDATE items SET done = 1 - done WHERE uuid = ?1;",
                [id.to_string()],
            )?;
            if changed == 0 {
                return Err(RepoError::NotFound(RecordKind::Item, id));
            }
            load_item(tx, id)?.ok_or(RepoError::NotFound(RecordKind::Item, id))
        })
    }

    fn delete_item(&self, id: ItemId) -> RepoResult<bool> {
        let removed = with_write_tx(self.conn, |tx| {
            let changed = tx.execute("DELETE FROM items WHERE uuid = ?1;", [id.to_string()])?;
            Ok::<_, RepoError>(changed > 0)
        })?;

        if !removed {
            warn!("event=item_delete module=repo status=noop reason=missing");
        }
        Ok(removed)
    }

    fn parent_category(&self, id: ItemId) -> RepoResult<Option<Category>> {
        self.conn
            .query_row(
                &format!(
                    "{CATEGORY_SELECT_SQL}
                     WHERE uuid = (SELECT category_uuid FROM items WHERE uuid = ?1);"
                ),
                [id.to_string()],
                |row| Ok(parse_category_row(row)),
            )
            .optional()?
            .transpose()
    }
}

/// Applies the item title filter to an already-loaded slice.
///
/// Matches the SQL filter: empty query keeps everything, matching is
/// case/diacritic-insensitive, and the result is re-sorted by creation time.
pub fn filter_loaded(items: &[Item], query: &str) -> Vec<Item> {
    let mut filtered: Vec<Item> = match normalize_query(query) {
        None => items.to_vec(),
        Some(folded) => items
            .iter()
            .filter(|item| contains_folded(&item.title, &folded))
            .cloned()
            .collect(),
    };
    sort_by_creation(&mut filtered);
    filtered
}

fn load_item(conn: &Connection, id: ItemId) -> RepoResult<Option<Item>> {
    conn.query_row(
        &format!("{ITEM_SELECT_SQL} WHERE uuid = ?1;"),
        [id.to_string()],
        |row| Ok(parse_item_row(row)),
    )
    .optional()?
    .transpose()
}

fn collect_items(rows: &mut rusqlite::Rows<'_>) -> RepoResult<Vec<Item>> {
    let mut items = Vec::new();
    while let Some(row) = rows.next()? {
        items.push(parse_item_row(row)?);
    }
    Ok(items)
}

fn parse_item_row(row: &Row<'_>) -> RepoResult<Item> {
    let uuid_text: String = row.get("uuid")?;
    let id = parse_uuid(&uuid_text, "items.uuid")?;

    let category_text: String = row.get("category_uuid")?;
    let category_id = parse_uuid(&category_text, "items.category_uuid")?;

    let done = match row.get::<_, i64>("done")? {
        0 => false,
        1 => true,
        other => {
            return Err(RepoError::InvalidData(format!(
                "invalid done value `{other}` in items.done"
            )));
        }
    };

    Ok(Item {
        id,
        category_id,
        title: row.get("title")?,
        done,
        date_created: row.get("date_created")?,
    })
}

fn bool_to_int(value: bool) -> i64 {
    if value {
        1
    } else {
        0
    }
}
