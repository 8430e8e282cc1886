//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Own input validation that the repositories deliberately skip.
//! - Keep FFI/UI layers decoupled from storage details.

pub mod category_service;
pub mod item_service;
