use std::fmt::Display;
use std::io::{Cursor, Read, Seek};

use calamine::{Data, Range, Reader, Xls, Xlsx};

use super::normalize_headers;
use crate::data::{Cell, Column, Table};
use crate::error::{DataError, DataResult};

/// Largest float that still maps onto an exact integer
const MAX_EXACT_INT: f64 = 9_007_199_254_740_992.0;

/// Read an OOXML workbook (`.xlsx`)
pub fn read_xlsx(bytes: Vec<u8>) -> DataResult<Table> {
    let workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes))?;
    read_first_sheet(workbook)
}

/// Read a legacy BIFF workbook (`.xls`)
pub fn read_xls(bytes: Vec<u8>) -> DataResult<Table> {
    let workbook: Xls<_> = Xls::new(Cursor::new(bytes))?;
    read_first_sheet(workbook)
}

fn read_first_sheet<RS, R>(mut workbook: R) -> DataResult<Table>
where
    RS: Read + Seek,
    R: Reader<RS>,
    R::Error: Display,
{
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| DataError::Load("workbook has no worksheets".to_string()))?
        .map_err(|e| DataError::Load(e.to_string()))?;

    range_to_table(&range)
}

/// Convert a sheet range to a Table, using the first row as the header
fn range_to_table(range: &Range<Data>) -> DataResult<Table> {
    let mut rows = range.rows();
    let Some(header_row) = rows.next() else {
        return Ok(Table::empty());
    };

    let headers = normalize_headers(header_row.iter().map(|c| c.to_string()));
    let mut raw: Vec<Vec<Cell>> = vec![Vec::new(); headers.len()];
    for row in rows {
        for (i, column) in raw.iter_mut().enumerate() {
            column.push(row.get(i).map(excel_to_cell).unwrap_or(Cell::Null));
        }
    }

    let columns = headers
        .into_iter()
        .zip(raw)
        .map(|(name, values)| Column::classify(name, values))
        .collect();

    Table::new(columns)
}

fn excel_to_cell(data: &Data) -> Cell {
    match data {
        Data::Empty | Data::Error(_) => Cell::Null,
        Data::Int(i) => Cell::Int(*i),
        Data::Float(f) => float_cell(*f),
        Data::Bool(b) => Cell::Bool(*b),
        Data::String(s) if s.trim().is_empty() => Cell::Null,
        Data::String(s) => Cell::Text(s.clone()),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(naive) => Cell::Text(naive.format("%Y-%m-%dT%H:%M:%S").to_string()),
            None => Cell::Text(dt.as_f64().to_string()),
        },
        Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::Text(s.clone()),
    }
}

/// Spreadsheets store every number as a float; whole values read back as integers
fn float_cell(f: f64) -> Cell {
    if f.is_finite() && f.fract() == 0.0 && f.abs() <= MAX_EXACT_INT {
        Cell::Int(f as i64)
    } else {
        Cell::Float(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::ColumnType;

    fn sheet() -> Range<Data> {
        let mut range = Range::new((0, 0), (3, 2));
        range.set_value((0, 0), Data::String("Region".into()));
        range.set_value((0, 1), Data::String("Sales".into()));
        range.set_value((0, 2), Data::Empty);
        range.set_value((1, 0), Data::String("East".into()));
        range.set_value((1, 1), Data::Float(10.0));
        range.set_value((2, 0), Data::String("West".into()));
        range.set_value((2, 1), Data::Float(12.5));
        range.set_value((3, 0), Data::String("East".into()));
        range.set_value((3, 1), Data::Int(7));
        range
    }

    #[test]
    fn test_range_to_table() {
        let table = range_to_table(&sheet()).unwrap();
        assert_eq!(table.row_count(), 3);
        assert_eq!(table.column_names().collect::<Vec<_>>(), vec!["Region", "Sales", "Unnamed: 2"]);

        let sales = table.column("Sales").unwrap();
        assert_eq!(sales.column_type, ColumnType::Numeric);
        assert_eq!(sales.values, vec![Cell::Float(10.0), Cell::Float(12.5), Cell::Float(7.0)]);

        let blank = table.column("Unnamed: 2").unwrap();
        assert_eq!(blank.column_type, ColumnType::Categorical);
        assert!(blank.values.iter().all(Cell::is_null));
    }

    #[test]
    fn test_whole_floats_become_ints() {
        assert_eq!(float_cell(3.0), Cell::Int(3));
        assert_eq!(float_cell(3.5), Cell::Float(3.5));
        assert_eq!(float_cell(f64::INFINITY), Cell::Float(f64::INFINITY));
    }

    #[test]
    fn test_garbage_bytes_are_load_errors() {
        let err = read_xlsx(b"definitely not a zip archive".to_vec()).unwrap_err();
        assert!(matches!(err, DataError::Load(_)));

        let err = read_xls(b"definitely not a compound file".to_vec()).unwrap_err();
        assert!(matches!(err, DataError::Load(_)));
    }
}
