//! Polars `DataFrame` helpers.
//!
//! This module provides the column-level operations used by the string
//! pipeline: dtype-based column discovery and per-cell string mapping.

use polars::prelude::*;

/// Returns true if columns of this dtype hold text values.
///
/// Only `String` columns qualify. Categorical and object columns are not
/// treated as text since their cells cannot be rebuilt as plain strings
/// without changing the column's type.
pub fn is_textual(dtype: &DataType) -> bool {
    matches!(dtype, DataType::String)
}

/// Returns the names of all text-typed columns, in frame order.
///
/// # Examples
///
/// ```
/// use polars::prelude::*;
/// use stx_common::textual_column_names;
///
/// let df = DataFrame::new(vec![
///     Series::new("x".into(), vec![1i32, 2]).into(),
///     Series::new("label".into(), vec!["a", "b"]).into(),
/// ])
/// .unwrap();
///
/// assert_eq!(textual_column_names(&df), vec!["label".to_string()]);
/// ```
pub fn textual_column_names(df: &DataFrame) -> Vec<String> {
    df.get_columns()
        .iter()
        .filter(|column| is_textual(column.dtype()))
        .map(|column| column.name().to_string())
        .collect()
}

/// Returns the first name in `names` that is not a column of `df`.
pub fn find_missing_column<'a, I>(df: &DataFrame, names: I) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    names
        .into_iter()
        .find(|name| df.column(name).is_err())
}

/// Maps a fallible function over every non-null cell of a string column.
///
/// Nulls are kept as nulls. The first error aborts the mapping and is
/// returned unchanged; no partially built column escapes.
pub fn try_map_strings<E, F>(ca: &StringChunked, mut f: F) -> Result<StringChunked, E>
where
    F: FnMut(&str) -> Result<String, E>,
{
    let mut builder = StringChunkedBuilder::new(ca.name().clone(), ca.len());
    for value in ca {
        match value {
            Some(value) => builder.append_value(f(value)?),
            None => builder.append_null(),
        }
    }
    Ok(builder.finish())
}
