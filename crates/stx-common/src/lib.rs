//! Shared utilities for the string transformer crates.
//!
//! This crate provides the small set of Polars `DataFrame` capabilities the
//! pipeline relies on: enumerating columns by dtype, checking for columns and
//! mapping a fallible function over the cells of a string column.

pub mod polars;

// Re-export commonly used functions at crate root for convenience
pub use crate::polars::{find_missing_column, is_textual, textual_column_names, try_map_strings};
