use indexmap::IndexMap;
use serde_json::{Map, Value};

use super::normalize_headers;
use crate::data::{Cell, Column, Table};
use crate::error::{DataError, DataResult};

/// Read JSON bytes into a Table
///
/// Accepted shapes:
/// - array of objects (one object per row)
/// - array of arrays (columns named by position)
/// - object of arrays (one array per column)
/// - object of objects (column -> row key -> value)
pub fn read_json(bytes: &[u8]) -> DataResult<Table> {
    let value: Value = serde_json::from_slice(bytes)?;

    match value {
        Value::Array(items) => from_rows(&items),
        Value::Object(obj) => from_columns(&obj),
        _ => Err(DataError::Load(
            "JSON must be an array of records or an object of columns".to_string(),
        )),
    }
}

fn from_rows(items: &[Value]) -> DataResult<Table> {
    if items.is_empty() {
        return Ok(Table::empty());
    }

    if items.iter().all(Value::is_array) {
        return from_arrays(items);
    }

    // Union of keys, in first-seen order
    let mut keys: IndexMap<&str, ()> = IndexMap::new();
    for item in items {
        let obj = item
            .as_object()
            .ok_or_else(|| DataError::Load("Items in array must be objects".to_string()))?;
        for key in obj.keys() {
            keys.entry(key.as_str()).or_insert(());
        }
    }

    let columns = normalize_headers(keys.keys())
        .into_iter()
        .zip(keys.keys())
        .map(|(name, key)| {
            let values = items
                .iter()
                .map(|item| item.get(*key).map(json_to_cell).unwrap_or(Cell::Null))
                .collect();
            Column::classify(name, values)
        })
        .collect();

    Table::new(columns)
}

fn from_arrays(items: &[Value]) -> DataResult<Table> {
    let width = items
        .iter()
        .filter_map(Value::as_array)
        .map(Vec::len)
        .max()
        .unwrap_or(0);

    let columns = (0..width)
        .map(|i| {
            let values = items
                .iter()
                .map(|row| row.get(i).map(json_to_cell).unwrap_or(Cell::Null))
                .collect();
            Column::classify(i.to_string(), values)
        })
        .collect();

    Table::new(columns)
}

fn from_columns(obj: &Map<String, Value>) -> DataResult<Table> {
    if obj.is_empty() {
        return Ok(Table::empty());
    }

    if obj.values().all(Value::is_array) {
        let names = normalize_headers(obj.keys());
        let columns = names
            .into_iter()
            .zip(obj.values())
            .map(|(name, values)| {
                let values = values
                    .as_array()
                    .map(|arr| arr.iter().map(json_to_cell).collect())
                    .unwrap_or_default();
                Column::classify(name, values)
            })
            .collect();
        return Table::new(columns);
    }

    if obj.values().all(Value::is_object) {
        // Row keys, in first-seen order across all columns
        let mut index: IndexMap<&str, ()> = IndexMap::new();
        for column in obj.values().filter_map(Value::as_object) {
            for key in column.keys() {
                index.entry(key.as_str()).or_insert(());
            }
        }

        let names = normalize_headers(obj.keys());
        let columns = names
            .into_iter()
            .zip(obj.values())
            .map(|(name, column)| {
                let values = index
                    .keys()
                    .map(|row| column.get(*row).map(json_to_cell).unwrap_or(Cell::Null))
                    .collect();
                Column::classify(name, values)
            })
            .collect();
        return Table::new(columns);
    }

    Err(DataError::Load(
        "JSON object values must all be arrays or all be objects".to_string(),
    ))
}

fn json_to_cell(value: &Value) -> Cell {
    match value {
        Value::Null => Cell::Null,
        Value::Bool(b) => Cell::Bool(*b),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Cell::Int(i)
            } else {
                n.as_f64().map(Cell::Float).unwrap_or(Cell::Null)
            }
        }
        Value::String(s) => Cell::Text(s.clone()),
        // Nested structures are kept as their JSON text
        Value::Array(_) | Value::Object(_) => Cell::Text(value.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::ColumnType;

    #[test]
    fn test_records() {
        let json = r#"[
            {"region": "East", "sales": 10, "margin": 0.5},
            {"region": "West", "sales": 20},
            {"region": "East", "sales": 30, "margin": 1}
        ]"#;
        let table = read_json(json.as_bytes()).unwrap();
        assert_eq!(table.row_count(), 3);
        assert_eq!(table.column_names().collect::<Vec<_>>(), vec!["region", "sales", "margin"]);

        let sales = table.column("sales").unwrap();
        assert_eq!(sales.column_type, ColumnType::Numeric);
        assert_eq!(sales.values, vec![Cell::Int(10), Cell::Int(20), Cell::Int(30)]);

        let margin = table.column("margin").unwrap();
        assert_eq!(margin.column_type, ColumnType::Numeric);
        assert_eq!(margin.values, vec![Cell::Float(0.5), Cell::Null, Cell::Float(1.0)]);

        assert_eq!(table.column("region").unwrap().column_type, ColumnType::Categorical);
    }

    #[test]
    fn test_numeric_strings_are_numbers() {
        let table = read_json(br#"[{"a": "1", "b": "x"}, {"a": "2", "b": "3"}]"#).unwrap();
        let a = table.column("a").unwrap();
        assert_eq!(a.column_type, ColumnType::Numeric);
        assert_eq!(a.values, vec![Cell::Int(1), Cell::Int(2)]);

        let b = table.column("b").unwrap();
        assert_eq!(b.column_type, ColumnType::Categorical);
        assert_eq!(b.values, vec![Cell::Text("x".into()), Cell::Text("3".into())]);
    }

    #[test]
    fn test_columns_of_arrays() {
        let table = read_json(br#"{"a": [1, 2, 3], "b": ["x", "y", "z"]}"#).unwrap();
        assert_eq!(table.row_count(), 3);
        assert!(table.column("a").unwrap().is_numeric());
        assert!(!table.column("b").unwrap().is_numeric());
    }

    #[test]
    fn test_columns_of_objects() {
        let json = br#"{"a": {"0": 1, "1": 2}, "b": {"1": "y", "0": "x"}}"#;
        let table = read_json(json).unwrap();
        let b = table.column("b").unwrap();
        assert_eq!(b.values, vec![Cell::Text("x".into()), Cell::Text("y".into())]);
    }

    #[test]
    fn test_array_of_arrays() {
        let table = read_json(b"[[1, \"a\"], [2, \"b\"]]").unwrap();
        assert_eq!(table.column_names().collect::<Vec<_>>(), vec!["0", "1"]);
        assert!(table.column("0").unwrap().is_numeric());
    }

    #[test]
    fn test_mismatched_column_lengths() {
        let err = read_json(br#"{"a": [1, 2], "b": [1]}"#).unwrap_err();
        assert!(matches!(err, DataError::Load(_)));
    }

    #[test]
    fn test_invalid_json() {
        let err = read_json(b"[{\"a\": 1").unwrap_err();
        assert!(matches!(err, DataError::Load(_)));
    }

    #[test]
    fn test_scalar_json() {
        assert!(read_json(b"42").is_err());
        assert!(read_json(b"[1, 2]").is_err());
    }

    #[test]
    fn test_nested_values_become_text() {
        let table = read_json(br#"[{"tags": ["a", "b"]}]"#).unwrap();
        let tags = table.column("tags").unwrap();
        assert_eq!(tags.values, vec![Cell::Text(r#"["a","b"]"#.into())]);
    }
}
