use indexmap::IndexMap;

use crate::data::{Cell, CellKey, Column, Table};
use crate::error::{DataError, DataResult};
use crate::ir::{ResolvedRequest, Series};
use crate::request::ChartKind;

/// Main entry point: turn a resolved request and the table into series
pub fn apply_transformations(req: &ResolvedRequest, table: &Table) -> DataResult<Vec<Series>> {
    let x = find_column(table, &req.x_col)?;
    let color = req
        .color_col
        .as_deref()
        .map(|name| find_column(table, name))
        .transpose()?;

    match (req.kind, req.y_col.as_deref()) {
        (ChartKind::Bar, None) | (ChartKind::Pie, _) => Ok(vec![compute_count_stat(x)]),
        (ChartKind::Histogram, _) => Ok(group_series(&x.values, None, color)),
        (ChartKind::Bar | ChartKind::Line | ChartKind::Scatter, Some(y)) => {
            let y = find_column(table, y)?;
            Ok(group_series(&x.values, Some(&y.values), color))
        }
        (ChartKind::Line | ChartKind::Scatter, None) => {
            let index = row_index(table.row_count());
            Ok(group_series(&x.values, Some(&index), color))
        }
    }
}

/// Look a column up in the table. Validation already checked the schema,
/// so a miss here means the table and schema disagree.
fn find_column<'a>(table: &'a Table, name: &str) -> DataResult<&'a Column> {
    let column = table
        .column(name)
        .ok_or_else(|| DataError::InternalBuild(format!("column '{}' could not be read", name)))?;

    if column.len() != table.row_count() {
        return Err(DataError::InternalBuild(format!(
            "column '{}' has {} rows, table has {}",
            name,
            column.len(),
            table.row_count()
        )));
    }
    Ok(column)
}

fn row_index(rows: usize) -> Vec<Cell> {
    (0..rows).map(|i| Cell::Int(i as i64)).collect()
}

/// Split rows into series by color value, keeping row order within each
/// series and first-seen order across series.
fn group_series(x: &[Cell], y: Option<&[Cell]>, color: Option<&Column>) -> Vec<Series> {
    let Some(color) = color else {
        return vec![Series {
            name: None,
            x: x.to_vec(),
            y: y.map(<[Cell]>::to_vec),
        }];
    };

    let mut groups: IndexMap<CellKey, (Vec<Cell>, Vec<Cell>)> = IndexMap::new();
    for (i, key) in color.values.iter().map(Cell::key).enumerate() {
        let entry = groups.entry(key).or_default();
        entry.0.push(x[i].clone());
        if let Some(y) = y {
            entry.1.push(y[i].clone());
        }
    }

    groups
        .into_iter()
        .map(|(key, (xs, ys))| Series {
            name: Some(Cell::from(key)),
            x: xs,
            y: y.map(|_| ys),
        })
        .collect()
}

/// Frequency table over a column, in first-occurrence order. Nulls are not
/// counted.
fn compute_count_stat(column: &Column) -> Series {
    let mut counts: IndexMap<CellKey, i64> = IndexMap::new();
    for cell in column.values.iter().filter(|c| !c.is_null()) {
        *counts.entry(cell.key()).or_default() += 1;
    }

    let (x, y): (Vec<Cell>, Vec<Cell>) = counts
        .into_iter()
        .map(|(key, count)| (Cell::from(key), Cell::Int(count)))
        .unzip();

    Series {
        name: None,
        x,
        y: Some(y),
    }
}
