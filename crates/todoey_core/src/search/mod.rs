//! Substring search support.
//!
//! # Responsibility
//! - Provide the text folding used by item title filters.
//! - Keep SQL and in-memory matching rules identical.

pub mod fold;

pub use fold::{contains_folded, fold_text, normalize_query, register_text_functions};
