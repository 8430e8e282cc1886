//! Record store: SQLite bootstrap, schema and write transactions.
//!
//! # Responsibility
//! - Open and configure the single on-device SQLite database.
//! - Apply the schema in deterministic order.
//! - Provide the single-writer transaction used by every mutation.
//!
//! # Invariants
//! - Schema version is tracked via `PRAGMA user_version`.
//! - Core code must not read/write records before the schema is applied.
//! - A failed write leaves no partial state visible to readers.

use rusqlite::{Connection, Transaction, TransactionBehavior};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;
pub(crate) mod schema;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "database schema version {db_version} is newer than supported {latest_supported}"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::UnsupportedSchemaVersion { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

/// The two record kinds held by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Category,
    Item,
}

impl RecordKind {
    /// Backing table name.
    pub fn table(self) -> &'static str {
        match self {
            Self::Category => "categories",
            Self::Item => "items",
        }
    }

    /// Columns a connection must expose before repositories accept it.
    pub fn required_columns(self) -> &'static [&'static str] {
        match self {
            Self::Category => &["seq", "uuid", "name", "colour"],
            Self::Item => &[
                "seq",
                "uuid",
                "category_uuid",
                "title",
                "done",
                "date_created",
            ],
        }
    }
}

impl Display for RecordKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Category => write!(f, "category"),
            Self::Item => write!(f, "item"),
        }
    }
}

/// Runs `f` inside one IMMEDIATE transaction on `conn`.
///
/// Commits when `f` returns `Ok`; the transaction is rolled back on `Err`
/// (including commit failure), so no partial write is observable.
pub fn with_write_tx<T, E, F>(conn: &Connection, f: F) -> Result<T, E>
where
    F: FnOnce(&Transaction<'_>) -> Result<T, E>,
    E: From<rusqlite::Error>,
{
    let tx = Transaction::new_unchecked(conn, TransactionBehavior::Immediate)?;
    match f(&tx) {
        Ok(value) => {
            tx.commit()?;
            Ok(value)
        }
        Err(err) => {
            log::warn!("event=db_write module=db status=rollback");
            Err(err)
        }
    }
}

/// Counts stored records of one kind.
pub fn count_records(conn: &Connection, kind: RecordKind) -> DbResult<u64> {
    let count: i64 = conn.query_row(
        &format!("SELECT COUNT(*) FROM {};", kind.table()),
        [],
        |row| row.get(0),
    )?;
    Ok(u64::try_from(count).unwrap_or_default())
}
