//! Table cleaning for the content and reaction exports
//!
//! A [`CleaningPlan`] is applied in a fixed order:
//!
//! 1. drop `drop_columns`
//! 2. remove `"` characters from the string columns in `strip_quotes`
//! 3. apply `rename` pairs (`old`, `new`)
//! 4. drop rows with a null in any `require_non_null` column (post-rename names)
//!
//! Every named column must exist when its step runs.

use crate::{Error, Result};
use polars::prelude::*;
use std::path::Path;
use tracing::debug;

/// Column-level cleaning steps for one table
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CleaningPlan {
    pub drop_columns: Vec<String>,
    pub strip_quotes: Vec<String>,
    pub rename: Vec<(String, String)>,
    pub require_non_null: Vec<String>,
}

impl CleaningPlan {
    /// Content table: drop `URL` and `User ID`, unquote `Category`,
    /// rename `Type` to `Content Type`
    pub fn content() -> Self {
        Self {
            drop_columns: vec!["URL".to_string(), "User ID".to_string()],
            strip_quotes: vec!["Category".to_string()],
            rename: vec![("Type".to_string(), "Content Type".to_string())],
            require_non_null: Vec::new(),
        }
    }

    /// Reactions table: drop `User ID`, rename `Type` to `Reaction Type`,
    /// drop rows without a reaction type
    pub fn reactions() -> Self {
        Self {
            drop_columns: vec!["User ID".to_string()],
            strip_quotes: Vec::new(),
            rename: vec![("Type".to_string(), "Reaction Type".to_string())],
            require_non_null: vec!["Reaction Type".to_string()],
        }
    }

    /// Apply the plan, returning the cleaned frame
    pub fn apply(&self, df: &DataFrame) -> Result<DataFrame> {
        let mut df = df.clone();

        for name in &self.drop_columns {
            require_column(&df, name)?;
            df = df.drop(name)?;
        }

        for name in &self.strip_quotes {
            let column = require_column(&df, name)?;
            let strings = column.str().map_err(|_| Error::TypeMismatch {
                expected: "string".to_string(),
                got: format!("{:?}", column.dtype()),
            })?;
            let stripped: StringChunked = strings
                .into_iter()
                .map(|value| value.map(|s| s.replace('"', "")))
                .collect();
            df.with_column(stripped.with_name(name.as_str().into()).into_series())?;
        }

        for (old, new) in &self.rename {
            require_column(&df, old)?;
            df.rename(old, new.as_str().into())?;
        }

        let rows_before = df.height();
        for name in &self.require_non_null {
            let mask = require_column(&df, name)?.is_not_null();
            df = df.filter(&mask)?;
        }

        debug!(
            columns = df.width(),
            rows = df.height(),
            dropped_rows = rows_before - df.height(),
            "table cleaned"
        );
        Ok(df)
    }
}

fn require_column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Column> {
    df.column(name)
        .map_err(|_| Error::InvalidColumn(name.to_string()))
}

/// Clean a content table and a reactions table with their presets
pub fn clean_tables(content: &DataFrame, reactions: &DataFrame) -> Result<(DataFrame, DataFrame)> {
    Ok((
        CleaningPlan::content().apply(content)?,
        CleaningPlan::reactions().apply(reactions)?,
    ))
}

/// Read a CSV file with a header row
pub fn read_csv(path: impl AsRef<Path>) -> Result<DataFrame> {
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .try_into_reader_with_file_path(Some(path.as_ref().to_path_buf()))?
        .finish()?;
    Ok(df)
}
