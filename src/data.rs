use serde::Serialize;

use crate::error::{DataError, DataResult};

/// A single value in a table column
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Cell {
    Null,
    Int(i64),
    Float(f64),
    Bool(bool),
    Text(String),
}

/// Hashable identity of a cell, used for grouping and counting
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CellKey {
    Null,
    Int(i64),
    Float(u64),
    Bool(bool),
    Text(String),
}

impl Cell {
    pub fn is_null(&self) -> bool {
        matches!(self, Cell::Null)
    }

    pub fn key(&self) -> CellKey {
        match self {
            Cell::Null => CellKey::Null,
            Cell::Int(i) => CellKey::Int(*i),
            // -0.0 and every NaN payload collapse onto one key
            Cell::Float(f) if *f == 0.0 => CellKey::Float(0.0f64.to_bits()),
            Cell::Float(f) if f.is_nan() => CellKey::Float(f64::NAN.to_bits()),
            Cell::Float(f) => CellKey::Float(f.to_bits()),
            Cell::Bool(b) => CellKey::Bool(*b),
            Cell::Text(s) => CellKey::Text(s.clone()),
        }
    }
}

impl From<CellKey> for Cell {
    fn from(key: CellKey) -> Self {
        match key {
            CellKey::Null => Cell::Null,
            CellKey::Int(i) => Cell::Int(i),
            CellKey::Float(bits) => Cell::Float(f64::from_bits(bits)),
            CellKey::Bool(b) => Cell::Bool(b),
            CellKey::Text(s) => Cell::Text(s),
        }
    }
}

/// Inferred semantics of a column, fixed when the table is loaded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    Numeric,
    Categorical,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub column_type: ColumnType,
    pub values: Vec<Cell>,
}

impl Column {
    /// Build a column from raw loaded cells, running the classification pass.
    pub fn classify(name: impl Into<String>, raw: Vec<Cell>) -> Self {
        let (column_type, values) = classify_cells(raw);
        Self {
            name: name.into(),
            column_type,
            values,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn is_numeric(&self) -> bool {
        self.column_type == ColumnType::Numeric
    }
}

/// Immutable, column-oriented in-memory table
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    columns: Vec<Column>,
    row_count: usize,
}

impl Table {
    /// Create a table, checking that every column has the same row count
    pub fn new(columns: Vec<Column>) -> DataResult<Self> {
        let row_count = columns.first().map(|c| c.len()).unwrap_or(0);
        if let Some(bad) = columns.iter().find(|c| c.len() != row_count) {
            return Err(DataError::Load(format!(
                "column '{}' has {} rows, expected {}",
                bad.name,
                bad.len(),
                row_count
            )));
        }
        Ok(Self { columns, row_count })
    }

    pub fn empty() -> Self {
        Self {
            columns: Vec::new(),
            row_count: 0,
        }
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }
}

// =============================================================================
// Classification
// =============================================================================

/// Parse a text value as a number, integers first.
///
/// Non-finite spellings (`inf`, `NAN`, `Infinity`) are not numbers.
pub fn parse_number(s: &str) -> Option<Cell> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(i) = trimmed.parse::<i64>() {
        return Some(Cell::Int(i));
    }
    trimmed
        .parse::<f64>()
        .ok()
        .filter(|f| f.is_finite())
        .map(Cell::Float)
}

fn parse_bool(s: &str) -> Option<bool> {
    let trimmed = s.trim();
    if trimmed.eq_ignore_ascii_case("true") {
        Some(true)
    } else if trimmed.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

fn as_number(cell: &Cell) -> Option<Cell> {
    match cell {
        Cell::Int(_) | Cell::Float(_) => Some(cell.clone()),
        Cell::Text(s) => parse_number(s),
        _ => None,
    }
}

fn as_bool(cell: &Cell) -> Option<bool> {
    match cell {
        Cell::Bool(b) => Some(*b),
        Cell::Text(s) => parse_bool(s),
        _ => None,
    }
}

/// A column is numeric iff it has at least one non-null value and every
/// non-null value is (or parses as) a number.
fn classify_cells(raw: Vec<Cell>) -> (ColumnType, Vec<Cell>) {
    if raw.iter().all(Cell::is_null) {
        return (ColumnType::Categorical, raw);
    }

    let numbers: Option<Vec<Cell>> = raw
        .iter()
        .map(|c| if c.is_null() { Some(Cell::Null) } else { as_number(c) })
        .collect();

    if let Some(mut numbers) = numbers {
        // One float widens the whole column
        if numbers.iter().any(|c| matches!(c, Cell::Float(_))) {
            for cell in numbers.iter_mut() {
                if let Cell::Int(i) = cell {
                    *cell = Cell::Float(*i as f64);
                }
            }
        }
        return (ColumnType::Numeric, numbers);
    }

    let bools: Option<Vec<Cell>> = raw
        .iter()
        .map(|c| if c.is_null() { Some(Cell::Null) } else { as_bool(c).map(Cell::Bool) })
        .collect();

    (ColumnType::Categorical, bools.unwrap_or(raw))
}
