// Chart requests as they arrive from the caller

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::DataError;

/// The closed set of chart kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Bar,
    Line,
    Scatter,
    Pie,
    Histogram,
}

impl ChartKind {
    pub const ALL: [ChartKind; 5] = [
        ChartKind::Bar,
        ChartKind::Line,
        ChartKind::Scatter,
        ChartKind::Pie,
        ChartKind::Histogram,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ChartKind::Bar => "bar",
            ChartKind::Line => "line",
            ChartKind::Scatter => "scatter",
            ChartKind::Pie => "pie",
            ChartKind::Histogram => "histogram",
        }
    }

    /// Whether a supplied y column is plotted (and so must exist)
    pub fn uses_y(&self) -> bool {
        matches!(self, ChartKind::Bar | ChartKind::Line | ChartKind::Scatter)
    }
}

impl FromStr for ChartKind {
    type Err = DataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ChartKind::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| DataError::invalid("unsupported kind"))
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A declarative chart request
///
/// `kind` stays a raw string until validation so that an unknown kind is
/// reported like any other invalid request. Blank optional columns mean
/// "not supplied".
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct ChartRequest {
    #[serde(rename = "chart_type", default)]
    pub kind: String,
    #[serde(default)]
    pub x_column: String,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub y_column: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub color_column: Option<String>,
}

impl ChartRequest {
    pub fn new(kind: impl Into<String>, x_column: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            x_column: x_column.into(),
            y_column: None,
            color_column: None,
        }
    }

    pub fn with_y(mut self, y_column: impl Into<String>) -> Self {
        self.y_column = non_blank(y_column.into());
        self
    }

    pub fn with_color(mut self, color_column: impl Into<String>) -> Self {
        self.color_column = non_blank(color_column.into());
        self
    }
}

fn non_blank(s: String) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s)
    }
}

fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    Ok(value.and_then(non_blank))
}
