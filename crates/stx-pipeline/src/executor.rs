//! DataFrame execution.
//!
//! Applies a pipeline's per-value operation to every cell of the target
//! columns and returns a new DataFrame with those columns replaced.

use polars::prelude::*;
use stx_common::{find_missing_column, is_textual, textual_column_names, try_map_strings};

use crate::error::{PipelineError, Result};
use crate::pipeline::Pipeline;

impl Pipeline {
    /// Resolve the columns `transform` will rewrite for this table.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::MissingColumn`] if an explicitly selected
    /// column is absent from `df`.
    pub fn target_columns(&self, df: &DataFrame) -> Result<Vec<String>> {
        match self.columns() {
            Some(columns) if !columns.is_empty() => {
                if let Some(missing) = find_missing_column(df, columns.iter().map(String::as_str)) {
                    return Err(PipelineError::MissingColumn(missing.to_string()));
                }
                Ok(columns.to_vec())
            }
            _ => Ok(textual_column_names(df)),
        }
    }

    /// Transform the target columns of `df`.
    ///
    /// Returns a new DataFrame where every target column's cells have been
    /// passed through all steps. Other columns are copied unchanged, nulls
    /// stay null, and `df` itself is never modified. The first failing cell
    /// aborts the whole call. A pipeline without steps returns a copy of
    /// `df` whatever the dtypes of the selected columns.
    ///
    /// # Errors
    ///
    /// - [`PipelineError::MissingColumn`] for an absent explicit column
    /// - [`PipelineError::NotTextColumn`] for an explicit non-string column
    ///   when there is a step to apply
    /// - any error of [`Pipeline::apply`]
    pub fn transform(&self, df: &DataFrame) -> Result<DataFrame> {
        let targets = self.target_columns(df)?;
        if self.is_empty() {
            return Ok(df.clone());
        }
        tracing::debug!(
            columns = targets.len(),
            rows = df.height(),
            steps = self.len(),
            "Transforming DataFrame"
        );

        let mut replaced: Vec<Series> = Vec::with_capacity(targets.len());
        for name in &targets {
            let column = df.column(name)?;
            if !is_textual(column.dtype()) {
                return Err(PipelineError::NotTextColumn {
                    column: name.clone(),
                    dtype: column.dtype().to_string(),
                });
            }

            let mapped = try_map_strings(column.str()?, |value| self.apply(value))?;
            tracing::debug!(column = %name, rows = mapped.len(), "Transformed column");
            replaced.push(mapped.into_series());
        }

        let mut out = df.clone();
        for series in replaced {
            out.with_column(series)?;
        }
        Ok(out)
    }
}
