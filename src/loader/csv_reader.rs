use csv::ReaderBuilder;

use super::{is_null_marker, normalize_headers};
use crate::data::{Cell, Column, Table};
use crate::error::{DataError, DataResult};

/// Read comma-separated bytes with a header row into a Table
///
/// Short rows are padded with nulls; rows longer than the header are
/// rejected.
pub fn read_csv(bytes: &[u8]) -> DataResult<Table> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(bytes);

    let headers = normalize_headers(reader.headers()?.iter());
    if headers.is_empty() {
        return Ok(Table::empty());
    }

    let mut raw: Vec<Vec<Cell>> = vec![Vec::new(); headers.len()];
    for record in reader.records() {
        let record = record?;
        if record.len() > headers.len() {
            let line = record.position().map(|p| p.line()).unwrap_or(0);
            return Err(DataError::Load(format!(
                "Expected {} fields in line {}, saw {}",
                headers.len(),
                line,
                record.len()
            )));
        }
        for (i, column) in raw.iter_mut().enumerate() {
            column.push(record.get(i).map(parse_field).unwrap_or(Cell::Null));
        }
    }

    let columns = headers
        .into_iter()
        .zip(raw)
        .map(|(name, values)| Column::classify(name, values))
        .collect();

    Table::new(columns)
}

fn parse_field(field: &str) -> Cell {
    if is_null_marker(field) {
        Cell::Null
    } else {
        Cell::Text(field.to_string())
    }
}
