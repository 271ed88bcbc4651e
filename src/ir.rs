use serde::Serialize;

use crate::data::Cell;
use crate::request::ChartKind;
use crate::theme::Layout;

// =============================================================================
// Phase 1: Resolution
// =============================================================================

/// A chart request validated against the table's columns
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRequest {
    pub kind: ChartKind,
    pub x_col: String,
    /// Only set when the kind plots a y axis
    pub y_col: Option<String>,
    /// Only set when the kind splits series by color
    pub color_col: Option<String>,
}

// =============================================================================
// Phase 2: Transformation
// =============================================================================

/// One group of values sharing a color (or the single group when uncolored)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    /// Value of the color column for this group
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<Cell>,
    pub x: Vec<Cell>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<Vec<Cell>>,
}

impl Series {
    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }
}

// =============================================================================
// Phase 3: Output
// =============================================================================

/// Fully resolved, renderer-agnostic chart description
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub title: String,
    pub x_label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y_label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_label: Option<String>,
    pub series: Vec<Series>,
    pub layout: Layout,
}

impl ChartSpec {
    /// Total number of plotted points across all series
    pub fn point_count(&self) -> usize {
        self.series.iter().map(Series::len).sum()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
