//! Case- and diacritic-insensitive text matching.
//!
//! # Responsibility
//! - Fold text into a comparison form shared by SQL and in-memory filters.
//! - Register the folding function on SQLite connections.
//!
//! # Invariants
//! - `fold_text` is deterministic, so SQLite may cache its results.
//! - An empty query never filters anything out.
//! - Non-empty queries are matched verbatim after folding; whitespace counts.

use rusqlite::functions::FunctionFlags;
use rusqlite::Connection;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Name of the SQL scalar function registered by [`register_text_functions`].
pub const FOLD_TEXT_SQL_FN: &str = "fold_text";

/// Folds `value` for substring comparison.
///
/// Decomposes to NFD, drops combining marks and lower-cases, so
/// `"Café"` and `"CAFE"` both fold to `"cafe"`.
pub fn fold_text(value: &str) -> String {
    value
        .nfd()
        .filter(|ch| !is_combining_mark(*ch))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Normalizes raw search input.
///
/// Returns `None` for empty input, which callers treat as "no filter".
pub fn normalize_query(query: &str) -> Option<String> {
    if query.is_empty() {
        None
    } else {
        Some(fold_text(query))
    }
}

/// Returns whether `haystack` contains the already-folded `folded_query`.
pub fn contains_folded(haystack: &str, folded_query: &str) -> bool {
    fold_text(haystack).contains(folded_query)
}

/// Registers `fold_text(x)` on the connection.
///
/// Re-registering replaces the previous definition, so this is safe to call
/// on every repository construction.
pub fn register_text_functions(conn: &Connection) -> rusqlite::Result<()> {
    conn.create_scalar_function(
        FOLD_TEXT_SQL_FN,
        1,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |ctx| {
            let value: Option<String> = ctx.get(0)?;
            Ok(value.map(|text| fold_text(&text)))
        },
    )
}

#[cfg(test)]
mod tests {
    use super::{contains_folded, fold_text, normalize_query, register_text_functions};
    use rusqlite::Connection;

    #[test]
    fn fold_text_strips_case_and_diacritics() {
        assert_eq!(fold_text("Café"), "cafe");
        assert_eq!(fold_text("ÉCOLE"), "ecole");
        assert_eq!(fold_text("Buy Milk"), "buy milk");
    }

    #[test]
    fn normalize_query_only_resets_on_empty_input() {
        assert_eq!(normalize_query(""), None);
        assert_eq!(normalize_query("   ").as_deref(), Some("   "));
        assert_eq!(normalize_query(" MILK ").as_deref(), Some(" milk "));
    }

    #[test]
    fn contains_folded_matches_substrings() {
        assert!(contains_folded("Buy Milk", "milk"));
        assert!(contains_folded("Crème brûlée", "creme"));
        assert!(!contains_folded("Buy Milk", "bread"));
    }

    #[test]
    fn sql_function_is_callable_after_registration() {
        let conn = Connection::open_in_memory().unwrap();
        register_text_functions(&conn).unwrap();

        let folded: String = conn
            .query_row("SELECT fold_text('Ñandú');", [], |row| row.get(0))
            .unwrap();
        assert_eq!(folded, "nandu");

        let null_value: Option<String> = conn
            .query_row("SELECT fold_text(NULL);", [], |row| row.get(0))
            .unwrap();
        assert!(null_value.is_none());
    }
}
