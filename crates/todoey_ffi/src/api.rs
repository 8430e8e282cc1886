//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose category and item use-cases to Dart via FRB.
//! - Flatten core errors into response envelopes with readable messages.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - IDs cross the boundary as hyphenated UUID strings.
//! - Every call opens its own connection to the shared store file.

use log::warn;
use rusqlite::Connection;
use std::path::PathBuf;
use std::sync::OnceLock;
use todoey_core::db::open_db;
use todoey_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    Category, CategoryService, Item, ItemService, SqliteCategoryRepository, SqliteItemRepository,
};
use uuid::Uuid;

const DB_FILE_NAME: &str = "todoey.sqlite3";
const DB_PATH_ENV: &str = "TODOEY_DB_PATH";
static DB_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Reconfiguration attempts with different level or directory return error.
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Category projection for list screens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryEntry {
    pub id: String,
    pub name: String,
    /// Six uppercase hex digits, no `#`.
    pub colour: String,
}

/// Item projection for list screens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemEntry {
    pub id: String,
    pub category_id: String,
    pub title: String,
    pub done: bool,
    /// Unix epoch milliseconds; absent for imported rows.
    pub date_created: Option<i64>,
}

/// Category listing envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryListResponse {
    pub ok: bool,
    pub items: Vec<CategoryEntry>,
    pub message: String,
}

/// Item listing envelope, shared by list and search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemListResponse {
    pub ok: bool,
    pub items: Vec<ItemEntry>,
    pub message: String,
}

/// Generic action response envelope for mutations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionResponse {
    /// Whether operation succeeded.
    pub ok: bool,
    /// Affected record ID, when one exists.
    pub id: Option<String>,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

impl ActionResponse {
    fn success(message: impl Into<String>, id: Option<String>) -> Self {
        Self {
            ok: true,
            id,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            id: None,
            message: message.into(),
        }
    }
}

/// Lists all categories in creation order.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn category_list() -> CategoryListResponse {
    let result = with_connection(|conn| {
        let repo = SqliteCategoryRepository::try_new(conn).map_err(|err| err.to_string())?;
        CategoryService::new(repo)
            .list_categories()
            .map_err(|err| err.to_string())
    });
    match result {
        Ok(categories) => CategoryListResponse {
            ok: true,
            message: count_message(categories.len()),
            items: categories.into_iter().map(to_category_entry).collect(),
        },
        Err(err) => CategoryListResponse {
            ok: false,
            items: Vec::new(),
            message: format!("category_list failed: {err}"),
        },
    }
}

/// Creates a category.
///
/// `colour` accepts `RRGGBB` or `#RRGGBB`; `None` picks a palette colour.
#[flutter_rust_bridge::frb(sync)]
pub fn category_create(name: String, colour: Option<String>) -> ActionResponse {
    let result = with_connection(|conn| {
        let repo = SqliteCategoryRepository::try_new(conn).map_err(|err| err.to_string())?;
        CategoryService::new(repo)
            .create_category(&name, colour.as_deref())
            .map_err(|err| err.to_string())
    });
    match result {
        Ok(category) => {
            ActionResponse::success("Category created.", Some(category.id.to_string()))
        }
        Err(err) => ActionResponse::failure(format!("category_create failed: {err}")),
    }
}

/// Deletes a category together with its items.
///
/// Deleting an unknown category succeeds with a "not found" message.
#[flutter_rust_bridge::frb(sync)]
pub fn category_delete(category_id: String) -> ActionResponse {
    let id = match parse_id(&category_id, "category_id") {
        Ok(id) => id,
        Err(err) => return ActionResponse::failure(format!("category_delete failed: {err}")),
    };
    let result = with_connection(|conn| {
        let repo = SqliteCategoryRepository::try_new(conn).map_err(|err| err.to_string())?;
        CategoryService::new(repo)
            .delete_category(id)
            .map_err(|err| err.to_string())
    });
    deletion_response("category", category_id, result)
}

/// Lists the items of one category in creation order.
#[flutter_rust_bridge::frb(sync)]
pub fn item_list(category_id: String) -> ItemListResponse {
    item_search_inner("item_list", &category_id, "")
}

/// Filters one category's items by title.
///
/// Matching is case and diacritic insensitive; empty `query` lists all.
#[flutter_rust_bridge::frb(sync)]
pub fn item_search(category_id: String, query: String) -> ItemListResponse {
    item_search_inner("item_search", &category_id, &query)
}

/// Appends an item to one category.
#[flutter_rust_bridge::frb(sync)]
pub fn item_create(category_id: String, title: String) -> ActionResponse {
    let id = match parse_id(&category_id, "category_id") {
        Ok(id) => id,
        Err(err) => return ActionResponse::failure(format!("item_create failed: {err}")),
    };
    let result = with_item_service(|service| {
        service
            .create_item(id, &title)
            .map_err(|err| err.to_string())
    });
    match result {
        Ok(item) => ActionResponse::success("Item created.", Some(item.id.to_string())),
        Err(err) => ActionResponse::failure(format!("item_create failed: {err}")),
    }
}

/// Flips completion of one item.
///
/// On success the message is `done` or `open`, reflecting the new state.
#[flutter_rust_bridge::frb(sync)]
pub fn item_toggle_done(item_id: String) -> ActionResponse {
    let id = match parse_id(&item_id, "item_id") {
        Ok(id) => id,
        Err(err) => return ActionResponse::failure(format!("item_toggle_done failed: {err}")),
    };
    let result = with_item_service(|service| service.toggle_done(id).map_err(|err| err.to_string()));
    match result {
        Ok(item) => {
            let state = if item.done { "done" } else { "open" };
            ActionResponse::success(state, Some(item.id.to_string()))
        }
        Err(err) => ActionResponse::failure(format!("item_toggle_done failed: {err}")),
    }
}

/// Deletes one item.
#[flutter_rust_bridge::frb(sync)]
pub fn item_delete(item_id: String) -> ActionResponse {
    let id = match parse_id(&item_id, "item_id") {
        Ok(id) => id,
        Err(err) => return ActionResponse::failure(format!("item_delete failed: {err}")),
    };
    let result = with_item_service(|service| service.delete_item(id).map_err(|err| err.to_string()));
    deletion_response("item", item_id, result)
}

fn item_search_inner(operation: &str, category_id: &str, query: &str) -> ItemListResponse {
    let result = parse_id(category_id, "category_id").and_then(|id| {
        with_item_service(|service| {
            service
                .filter_items(id, query)
                .map_err(|err| err.to_string())
        })
    });
    match result {
        Ok(items) => ItemListResponse {
            ok: true,
            message: count_message(items.len()),
            items: items.into_iter().map(to_item_entry).collect(),
        },
        Err(err) => ItemListResponse {
            ok: false,
            items: Vec::new(),
            message: format!("{operation} failed: {err}"),
        },
    }
}

fn deletion_response(kind: &str, raw_id: String, result: Result<bool, String>) -> ActionResponse {
    match result {
        Ok(true) => ActionResponse::success(format!("Deleted {kind}."), Some(raw_id)),
        Ok(false) => ActionResponse::success(format!("No {kind} with that id."), None),
        Err(err) => ActionResponse::failure(format!("{kind}_delete failed: {err}")),
    }
}

fn count_message(count: usize) -> String {
    if count == 0 {
        "No results.".to_string()
    } else {
        format!("Found {count} result(s).")
    }
}

fn parse_id(raw: &str, field: &str) -> Result<Uuid, String> {
    Uuid::parse_str(raw.trim()).map_err(|err| {
        warn!("event=ffi_parse_id module=ffi status=error field={field}");
        format!("invalid {field} `{raw}`: {err}")
    })
}

fn resolve_db_path() -> PathBuf {
    DB_PATH
        .get_or_init(|| {
            if let Ok(raw) = std::env::var(DB_PATH_ENV) {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(DB_FILE_NAME)
        })
        .clone()
}

fn with_connection<T>(f: impl FnOnce(&Connection) -> Result<T, String>) -> Result<T, String> {
    let db_path = resolve_db_path();
    let conn = open_db(&db_path).map_err(|err| format!("DB open failed: {err}"))?;
    f(&conn)
}

fn with_item_service<T>(
    f: impl FnOnce(&ItemService<SqliteItemRepository<'_>>) -> Result<T, String>,
) -> Result<T, String> {
    with_connection(|conn| {
        let repo = SqliteItemRepository::try_new(conn)
            .map_err(|err| format!("item repo init failed: {err}"))?;
        f(&ItemService::new(repo))
    })
}

fn to_category_entry(category: Category) -> CategoryEntry {
    CategoryEntry {
        id: category.id.to_string(),
        name: category.name,
        colour: category.colour.to_string(),
    }
}

fn to_item_entry(item: Item) -> ItemEntry {
    ItemEntry {
        id: item.id.to_string(),
        category_id: item.category_id.to_string(),
        title: item.title,
        done: item.done,
        date_created: item.date_created,
    }
}

#[cfg(test)]
mod tests {
    use super::{
        category_create, category_delete, category_list, core_version, init_logging,
        item_create, item_delete, item_list, item_search, item_toggle_done, ping,
        resolve_db_path, DB_FILE_NAME, DB_PATH,
    };
    use std::sync::OnceLock;
    use std::time::{SystemTime, UNIX_EPOCH};
    use tempfile::TempDir;

    static TEST_DB_DIR: OnceLock<TempDir> = OnceLock::new();

    /// Pins the process-wide store path to a private temp directory.
    fn use_isolated_db() {
        let dir = TEST_DB_DIR.get_or_init(|| tempfile::tempdir().expect("create temp dir"));
        let path = dir.path().join(DB_FILE_NAME);
        let resolved = DB_PATH.get_or_init(|| path.clone());
        assert_eq!(resolved, &path, "store path resolved before isolation");
    }

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_empty_log_dir() {
        let error = init_logging("info".to_string(), String::new());
        assert!(!error.is_empty());
    }

    #[test]
    fn init_logging_rejects_unsupported_level() {
        let error = init_logging("verbose".to_string(), "tmp/logs".to_string());
        assert!(!error.is_empty());
    }

    #[test]
    fn tests_never_touch_shared_temp_store() {
        use_isolated_db();
        let path = resolve_db_path();
        assert_ne!(path, std::env::temp_dir().join(DB_FILE_NAME));
        assert!(path.starts_with(TEST_DB_DIR.get().expect("dir initialized").path()));
    }

    #[test]
    fn category_create_then_list_contains_it() {
        use_isolated_db();
        let name = unique_token("category");
        let created = category_create(name.clone(), Some("#1e90ff".to_string()));
        assert!(created.ok, "{}", created.message);
        let id = created.id.expect("create should return id");

        let listed = category_list();
        assert!(listed.ok, "{}", listed.message);
        let entry = listed
            .items
            .iter()
            .find(|entry| entry.id == id)
            .expect("created category should be listed");
        assert_eq!(entry.name, name);
        assert_eq!(entry.colour, "1E90FF");

        assert!(category_delete(id.clone()).ok);
        assert!(category_list().items.iter().all(|entry| entry.id != id));
    }

    #[test]
    fn category_create_accepts_empty_name_and_rejects_bad_colour() {
        use_isolated_db();
        let unnamed = category_create(String::new(), None);
        assert!(unnamed.ok, "{}", unnamed.message);
        let id = unnamed.id.expect("create should return id");
        let listed = category_list();
        let entry = listed
            .items
            .iter()
            .find(|entry| entry.id == id)
            .expect("unnamed category should be listed");
        assert_eq!(entry.name, "");
        assert!(category_delete(id).ok);

        let response = category_create("Work".to_string(), Some("blue".to_string()));
        assert!(!response.ok);
        assert!(response.message.contains("blue"));
    }

    #[test]
    fn item_flow_create_toggle_search_delete() {
        use_isolated_db();
        let category = category_create(unique_token("flow"), None);
        let category_id = category.id.expect("create should return id");

        let created = item_create(category_id.clone(), "Buy Milk".to_string());
        assert!(created.ok, "{}", created.message);
        let item_id = created.id.expect("item create should return id");
        assert!(item_create(category_id.clone(), "Bread".to_string()).ok);

        let toggled = item_toggle_done(item_id.clone());
        assert!(toggled.ok, "{}", toggled.message);
        assert_eq!(toggled.message, "done");

        let hits = item_search(category_id.clone(), "MILK".to_string());
        assert!(hits.ok, "{}", hits.message);
        assert_eq!(hits.items.len(), 1);
        assert!(hits.items[0].done);

        assert_eq!(item_list(category_id.clone()).items.len(), 2);
        assert!(item_delete(item_id.clone()).ok);
        assert!(item_delete(item_id).id.is_none());
        assert_eq!(item_list(category_id.clone()).items.len(), 1);

        assert!(category_delete(category_id.clone()).ok);
        assert!(item_list(category_id).items.is_empty());
    }

    #[test]
    fn malformed_ids_fail_without_panicking() {
        use_isolated_db();
        assert!(!item_list("not-a-uuid".to_string()).ok);
        assert!(!item_create("nope".to_string(), "title".to_string()).ok);
        assert!(!item_toggle_done(String::new()).ok);
        assert!(!item_delete("123".to_string()).ok);
        assert!(!category_delete("xyz".to_string()).ok);
    }

    #[test]
    fn item_create_under_unknown_category_fails() {
        use_isolated_db();
        let response = item_create(
            "00000000-0000-4000-8000-00000000dead".to_string(),
            "orphan".to_string(),
        );
        assert!(!response.ok);
    }

    fn unique_token(prefix: &str) -> String {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("time went backwards")
            .as_nanos();
        format!("{prefix}-{nanos}")
    }
}
