// Library exports for tabchart

pub mod data;
pub mod error;
pub mod loader;
pub mod request;
pub mod schema;
pub mod theme;

// Chart pipeline
pub mod ir;
pub mod resolve;
pub mod transform;
pub mod runtime;

pub use data::{Cell, Column, ColumnType, Table};
pub use error::{DataError, DataResult};
pub use ir::{ChartSpec, Series};
pub use loader::{is_supported_file, load, load_format, load_path, FileFormat};
pub use request::{ChartKind, ChartRequest};
pub use runtime::{build_chart, generate_chart, ChartResponse};
pub use schema::{inspect, DatasetInfo, Schema};
