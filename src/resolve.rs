use crate::error::{DataError, DataResult};
use crate::ir::ResolvedRequest;
use crate::request::{ChartKind, ChartRequest};
use crate::schema::Schema;

/// Validate a chart request against the schema.
///
/// Checks run in a fixed order and the first failure wins: kind, x column,
/// y column (only for kinds that plot it), color column.
pub fn resolve_request(schema: &Schema, request: &ChartRequest) -> DataResult<ResolvedRequest> {
    let kind: ChartKind = request.kind.parse()?;

    let x_col = request.x_column.as_str();
    if x_col.is_empty() || !schema.has_column(x_col) {
        return Err(DataError::invalid("unknown x column"));
    }

    let y_col = request.y_column.as_deref().filter(|_| kind.uses_y());
    if let Some(y) = y_col {
        if !schema.has_column(y) {
            return Err(DataError::invalid("unknown y column"));
        }
    }

    let color_col = request.color_column.as_deref();
    if let Some(color) = color_col {
        if !schema.has_column(color) {
            return Err(DataError::invalid("unknown color column"));
        }
    }

    // Pie and the bar count fallback aggregate over x alone
    let color_col = match kind {
        ChartKind::Pie => None,
        ChartKind::Bar if y_col.is_none() => None,
        _ => color_col,
    };

    Ok(ResolvedRequest {
        kind,
        x_col: x_col.to_string(),
        y_col: y_col.map(str::to_string),
        color_col: color_col.map(str::to_string),
    })
}
