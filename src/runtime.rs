// Chart builder: validate, transform, and assemble a ChartSpec

use serde::Serialize;
use tracing::{debug, warn};

use crate::data::Table;
use crate::error::{DataError, DataResult};
use crate::ir::{ChartSpec, ResolvedRequest};
use crate::request::{ChartKind, ChartRequest};
use crate::resolve::resolve_request;
use crate::schema::{self, Schema};
use crate::theme::Layout;
use crate::transform::apply_transformations;

/// Axis name used when line and scatter charts have no y column
const INDEX_LABEL: &str = "index";
const COUNT_LABEL: &str = "count";

/// Build a chart spec for one request.
///
/// Fails with `InvalidChartRequest` when the request does not fit the schema
/// and `InternalBuild` when the table cannot serve a validated column. The
/// table is only read.
pub fn build_chart(table: &Table, schema: &Schema, request: &ChartRequest) -> DataResult<ChartSpec> {
    let resolved = resolve_request(schema, request)?;
    debug!(kind = %resolved.kind, x = %resolved.x_col, y = ?resolved.y_col, color = ?resolved.color_col, "building chart");

    let series = apply_transformations(&resolved, table)?;
    let (title, y_label) = title_and_y_label(&resolved);

    Ok(ChartSpec {
        kind: resolved.kind,
        title,
        x_label: resolved.x_col,
        y_label,
        color_label: resolved.color_col,
        series,
        layout: Layout::default(),
    })
}

fn title_and_y_label(req: &ResolvedRequest) -> (String, Option<String>) {
    let x = req.x_col.as_str();
    let y = req.y_col.as_deref().unwrap_or(INDEX_LABEL);

    match (req.kind, req.y_col.is_some()) {
        (ChartKind::Bar, true) => (format!("{} by {}", y, x), Some(y.to_string())),
        (ChartKind::Bar, false) => (format!("Count of {}", x), Some(COUNT_LABEL.to_string())),
        (ChartKind::Line, _) => (format!("{} over {}", y, x), Some(y.to_string())),
        (ChartKind::Scatter, _) => (format!("{} vs {}", x, y), Some(y.to_string())),
        (ChartKind::Pie, _) => (format!("Distribution of {}", x), None),
        (ChartKind::Histogram, _) => (format!("Distribution of {}", x), Some(COUNT_LABEL.to_string())),
    }
}

// =============================================================================
// Response envelope
// =============================================================================

/// What the chart endpoint hands back: a chart or an error message
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ChartResponse {
    Chart { chart: ChartSpec },
    Error {
        error: String,
        #[serde(skip)]
        status: u16,
    },
}

impl ChartResponse {
    pub fn is_error(&self) -> bool {
        matches!(self, ChartResponse::Error { .. })
    }

    /// HTTP-style status for this response
    pub fn status(&self) -> u16 {
        match self {
            ChartResponse::Chart { .. } => 200,
            ChartResponse::Error { status, .. } => *status,
        }
    }
}

impl From<DataResult<ChartSpec>> for ChartResponse {
    fn from(result: DataResult<ChartSpec>) -> Self {
        match result {
            Ok(chart) => ChartResponse::Chart { chart },
            Err(e) => {
                let status = match &e {
                    DataError::InvalidChartRequest(_) => 400,
                    _ => 500,
                };
                ChartResponse::Error {
                    error: e.to_string(),
                    status,
                }
            }
        }
    }
}

/// Inspect the table and build one chart, folding any failure into the
/// response envelope.
pub fn generate_chart(table: &Table, request: &ChartRequest) -> ChartResponse {
    let schema = schema::inspect(table);
    let result = build_chart(table, &schema, request);
    if let Err(e) = &result {
        warn!(kind = %request.kind, error = %e, label = e.label(), "chart request rejected");
    }
    result.into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Cell;
    use crate::loader::csv_reader::read_csv;
    use crate::schema::inspect;

    fn make_table() -> Table {
        read_csv(b"Region,Category,Sales,Profit\nEast,A,10,1\nWest,B,20,2\nEast,B,30,3\n").unwrap()
    }

    fn build(request: &ChartRequest) -> DataResult<ChartSpec> {
        let table = make_table();
        build_chart(&table, &inspect(&table), request)
    }

    #[test]
    fn test_titles() {
        let cases = [
            (ChartRequest::new("bar", "Region").with_y("Sales"), "Sales by Region"),
            (ChartRequest::new("bar", "Region"), "Count of Region"),
            (ChartRequest::new("line", "Region").with_y("Sales"), "Sales over Region"),
            (ChartRequest::new("scatter", "Sales").with_y("Profit"), "Sales vs Profit"),
            (ChartRequest::new("pie", "Region"), "Distribution of Region"),
            (ChartRequest::new("histogram", "Sales"), "Distribution of Sales"),
        ];
        for (request, title) in cases {
            assert_eq!(build(&request).unwrap().title, title);
        }
    }

    #[test]
    fn test_layout_is_constant() {
        for kind in ChartKind::ALL {
            let spec = build(&ChartRequest::new(kind.as_str(), "Region")).unwrap();
            assert_eq!(spec.kind, kind);
            assert_eq!(spec.layout, Layout::default());
        }
    }

    #[test]
    fn test_bar_with_y_and_color() {
        let spec = build(&ChartRequest::new("bar", "Region").with_y("Sales").with_color("Category")).unwrap();
        assert_eq!(spec.color_label, Some("Category".to_string()));
        assert_eq!(spec.y_label, Some("Sales".to_string()));
        assert_eq!(spec.series.len(), 2);
        assert_eq!(spec.point_count(), 3);
    }

    #[test]
    fn test_pie_ignores_extra_columns() {
        let spec = build(&ChartRequest::new("pie", "Region").with_y("Sales").with_color("Category")).unwrap();
        assert_eq!(spec.series.len(), 1);
        assert_eq!(spec.color_label, None);
        assert_eq!(spec.y_label, None);
        assert_eq!(spec.series[0].x, vec![Cell::Text("East".into()), Cell::Text("West".into())]);
        assert_eq!(spec.series[0].y, Some(vec![Cell::Int(2), Cell::Int(1)]));
    }

    #[test]
    fn test_line_without_y() {
        let spec = build(&ChartRequest::new("line", "Sales")).unwrap();
        assert_eq!(spec.title, "index over Sales");
        assert_eq!(spec.y_label, Some("index".to_string()));
    }

    #[test]
    fn test_deterministic() {
        let request = ChartRequest::new("scatter", "Sales").with_y("Profit").with_color("Category");
        let first = build(&request).unwrap().to_json().unwrap();
        let second = build(&request).unwrap().to_json().unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_failed_request_leaves_table_usable() {
        let table = make_table();
        let schema = inspect(&table);
        let before = table.clone();

        let err = build_chart(&table, &schema, &ChartRequest::new("line", "Nope")).unwrap_err();
        assert_eq!(err, DataError::InvalidChartRequest("unknown x column".to_string()));
        assert_eq!(table, before);

        assert!(build_chart(&table, &schema, &ChartRequest::new("bar", "Region")).is_ok());
    }

    #[test]
    fn test_stale_schema_is_internal_error() {
        let table = make_table();
        let mut schema = inspect(&table);
        schema.columns.push("Ghost".to_string());

        let err = build_chart(&table, &schema, &ChartRequest::new("bar", "Ghost")).unwrap_err();
        assert!(matches!(err, DataError::InternalBuild(_)));
    }

    #[test]
    fn test_response_envelope() {
        let table = make_table();

        let ok = generate_chart(&table, &ChartRequest::new("pie", "Region"));
        assert!(!ok.is_error());
        assert_eq!(ok.status(), 200);
        let json = serde_json::to_value(&ok).unwrap();
        assert_eq!(json["chart"]["title"], "Distribution of Region");
        assert_eq!(json["chart"]["kind"], "pie");

        let bad = generate_chart(&table, &ChartRequest::new("radar", "Region"));
        assert!(bad.is_error());
        assert_eq!(bad.status(), 400);
        let json = serde_json::to_value(&bad).unwrap();
        assert_eq!(json, serde_json::json!({"error": "unsupported kind"}));
    }
}
