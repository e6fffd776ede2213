//! Generic collection contract between the core and any presentation layer.
//!
//! Responsibilities:
//! - The [`Record`] trait: named-field access plus a default column order per record type
//! - [`Table`] projections of record collections onto a chosen column list
//!
//! Does NOT handle:
//! - Rendering tables to a terminal, CSV or JSON (the CLI's formatters do that)
//!
//! Invariants:
//! - Every name in `Record::COLUMNS` is also in `Record::FIELDS`
//! - A projected row has exactly one cell per column

use serde::Serialize;

use crate::error::{ClientError, Result};

/// A flat record with named, string-rendered fields.
pub trait Record {
    /// Every field name [`Record::field`] understands.
    const FIELDS: &'static [&'static str];

    /// Default ordered column list for tables of this record.
    const COLUMNS: &'static [&'static str] = Self::FIELDS;

    /// Rendered value of `name`, or `None` for an unknown field.
    fn field(&self, name: &str) -> Option<String>;
}

/// A named collection projected onto columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Table {
    pub name: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Project `records` onto the record type's default columns.
    pub fn from_records<R: Record>(name: &str, records: &[R]) -> Self {
        Self {
            name: name.to_string(),
            columns: R::COLUMNS.iter().map(|c| c.to_string()).collect(),
            rows: records
                .iter()
                .map(|r| {
                    R::COLUMNS
                        .iter()
                        .map(|c| r.field(c).unwrap_or_default())
                        .collect()
                })
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Rows as column-name keyed JSON objects.
    pub fn to_json_rows(&self) -> Vec<serde_json::Map<String, serde_json::Value>> {
        self.rows
            .iter()
            .map(|row| {
                self.columns
                    .iter()
                    .cloned()
                    .zip(row.iter().cloned().map(serde_json::Value::String))
                    .collect()
            })
            .collect()
    }
}

/// Project `records` onto `columns`.
///
/// # Errors
///
/// Returns `ClientError::ValidationError` if a column is not a field of `R`.
pub fn project<R: Record>(name: &str, records: &[R], columns: &[&str]) -> Result<Table> {
    if let Some(unknown) = columns.iter().find(|c| !R::FIELDS.contains(*c)) {
        return Err(ClientError::ValidationError(format!(
            "unknown field '{}' for {} (expected one of: {})",
            unknown,
            name,
            R::FIELDS.join(", ")
        )));
    }

    Ok(Table {
        name: name.to_string(),
        columns: columns.iter().map(|c| c.to_string()).collect(),
        rows: records
            .iter()
            .map(|r| columns.iter().map(|c| r.field(c).unwrap_or_default()).collect())
            .collect(),
    })
}
