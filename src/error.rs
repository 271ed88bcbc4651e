//! Error types for loading tables and building charts
//!
//! Every failure in the pipeline reduces to one `DataError` variant: a
//! taxonomy label plus a short human-readable detail string.

use thiserror::Error;

/// Errors that can occur while loading data or building a chart
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DataError {
    /// The declared format tag is not one we can read
    #[error("Unsupported file type: {0}")]
    UnsupportedFormat(String),

    /// The source could not be read or parsed
    #[error("Error loading file: {0}")]
    Load(String),

    /// The chart request does not fit the table
    #[error("{0}")]
    InvalidChartRequest(String),

    /// An invariant broke while building a chart
    #[error("Internal error: {0}")]
    InternalBuild(String),
}

/// Result type alias for data operations
pub type DataResult<T> = Result<T, DataError>;

impl DataError {
    /// Short taxonomy label for this error
    pub fn label(&self) -> &'static str {
        match self {
            DataError::UnsupportedFormat(_) => "UnsupportedFormat",
            DataError::Load(_) => "LoadError",
            DataError::InvalidChartRequest(_) => "InvalidChartRequest",
            DataError::InternalBuild(_) => "InternalBuildError",
        }
    }

    pub(crate) fn invalid(reason: &str) -> Self {
        DataError::InvalidChartRequest(reason.to_string())
    }
}

impl From<std::io::Error> for DataError {
    fn from(e: std::io::Error) -> Self {
        DataError::Load(e.to_string())
    }
}

impl From<csv::Error> for DataError {
    fn from(e: csv::Error) -> Self {
        DataError::Load(e.to_string())
    }
}

impl From<serde_json::Error> for DataError {
    fn from(e: serde_json::Error) -> Self {
        DataError::Load(e.to_string())
    }
}

impl From<calamine::XlsxError> for DataError {
    fn from(e: calamine::XlsxError) -> Self {
        DataError::Load(e.to_string())
    }
}

impl From<calamine::XlsError> for DataError {
    fn from(e: calamine::XlsError) -> Self {
        DataError::Load(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = DataError::UnsupportedFormat("txt".to_string());
        assert_eq!(err.to_string(), "Unsupported file type: txt");
        assert_eq!(err.label(), "UnsupportedFormat");

        let err = DataError::invalid("unknown x column");
        assert_eq!(err.to_string(), "unknown x column");
        assert_eq!(err.label(), "InvalidChartRequest");
    }

    #[test]
    fn test_io_error_becomes_load() {
        let io = std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "truncated");
        let err: DataError = io.into();
        assert_eq!(err, DataError::Load("truncated".to_string()));
        assert_eq!(err.label(), "LoadError");
    }
}
