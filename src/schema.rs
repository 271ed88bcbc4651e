//! Schema inspection
//!
//! Partitions a loaded table's columns into numeric and categorical by the
//! type tag the loader fixed on each column.

use serde::Serialize;

use crate::data::{ColumnType, Table};

/// Derived, read-only view over a table's shape
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Schema {
    pub row_count: usize,
    pub column_count: usize,
    pub columns: Vec<String>,
    pub numeric_columns: Vec<String>,
    pub categorical_columns: Vec<String>,
}

/// Dataset summary shown on the dashboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatasetInfo {
    pub filename: String,
    pub rows: usize,
    pub columns: usize,
    pub columns_list: Vec<String>,
    pub numeric_columns: Vec<String>,
    pub categorical_columns: Vec<String>,
}

/// Inspect a table. Never fails; empty tables give empty lists.
pub fn inspect(table: &Table) -> Schema {
    let names_of = |ty: ColumnType| -> Vec<String> {
        table
            .columns()
            .iter()
            .filter(|c| c.column_type == ty)
            .map(|c| c.name.clone())
            .collect()
    };

    Schema {
        row_count: table.row_count(),
        column_count: table.column_count(),
        columns: table.column_names().map(str::to_string).collect(),
        numeric_columns: names_of(ColumnType::Numeric),
        categorical_columns: names_of(ColumnType::Categorical),
    }
}

impl Schema {
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    pub fn is_numeric(&self, name: &str) -> bool {
        self.numeric_columns.iter().any(|c| c == name)
    }

    pub fn info(&self, filename: impl Into<String>) -> DatasetInfo {
        DatasetInfo {
            filename: filename.into(),
            rows: self.row_count,
            columns: self.column_count,
            columns_list: self.columns.clone(),
            numeric_columns: self.numeric_columns.clone(),
            categorical_columns: self.categorical_columns.clone(),
        }
    }
}
