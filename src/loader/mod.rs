//! Table loading
//!
//! Turns a byte source plus a declared format tag into a typed [`Table`].
//! Dispatch is driven by the tag alone; content is never sniffed. Every
//! parser failure surfaces as [`DataError::Load`] carrying the cause.

pub mod csv_reader;
pub mod excel_reader;
pub mod json_reader;

use std::collections::HashSet;
use std::fmt;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use tracing::debug;

use crate::data::Table;
use crate::error::{DataError, DataResult};

/// Formats the loader understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Csv,
    Xlsx,
    Xls,
    Json,
}

impl FileFormat {
    pub const ALL: [FileFormat; 4] = [FileFormat::Csv, FileFormat::Xlsx, FileFormat::Xls, FileFormat::Json];

    pub fn as_str(&self) -> &'static str {
        match self {
            FileFormat::Csv => "csv",
            FileFormat::Xlsx => "xlsx",
            FileFormat::Xls => "xls",
            FileFormat::Json => "json",
        }
    }

    /// Derive the format from the last extension of a file name
    pub fn from_path(path: impl AsRef<Path>) -> DataResult<Self> {
        let ext = path
            .as_ref()
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| DataError::UnsupportedFormat(path.as_ref().display().to_string()))?;
        ext.parse()
    }
}

impl FromStr for FileFormat {
    type Err = DataError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        FileFormat::ALL
            .into_iter()
            .find(|f| f.as_str().eq_ignore_ascii_case(tag))
            .ok_or_else(|| DataError::UnsupportedFormat(tag.to_string()))
    }
}

impl fmt::Display for FileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Check whether a file name carries one of the supported extensions
pub fn is_supported_file(path: impl AsRef<Path>) -> bool {
    FileFormat::from_path(path).is_ok()
}

/// Load a table from a source, dispatching on a format tag
pub fn load<R: Read>(source: R, format: &str) -> DataResult<Table> {
    let format: FileFormat = format.parse()?;
    load_format(source, format)
}

/// Load a table from a source in a known format
///
/// The source is read to the end exactly once and fully materialized.
pub fn load_format<R: Read>(mut source: R, format: FileFormat) -> DataResult<Table> {
    let mut bytes = Vec::new();
    source.read_to_end(&mut bytes)?;
    debug!(%format, bytes = bytes.len(), "loading table");

    let table = match format {
        FileFormat::Csv => csv_reader::read_csv(&bytes)?,
        FileFormat::Json => json_reader::read_json(&bytes)?,
        FileFormat::Xlsx => excel_reader::read_xlsx(bytes)?,
        FileFormat::Xls => excel_reader::read_xls(bytes)?,
    };

    debug!(rows = table.row_count(), columns = table.column_count(), "table loaded");
    Ok(table)
}

/// Load a table from a file, taking the format from its extension
pub fn load_path(path: impl AsRef<Path>) -> DataResult<Table> {
    let path = path.as_ref();
    let format = FileFormat::from_path(path)?;
    let file = std::fs::File::open(path)?;
    load_format(std::io::BufReader::new(file), format)
}

// =============================================================================
// Shared helpers
// =============================================================================

/// Spellings of a missing value in delimited text
const NULL_MARKERS: &[&str] = &[
    "", "NA", "N/A", "n/a", "NaN", "nan", "-NaN", "-nan", "null", "NULL", "None", "#N/A", "<NA>",
];

pub(crate) fn is_null_marker(s: &str) -> bool {
    NULL_MARKERS.contains(&s.trim())
}

/// Make header names usable as unique column keys.
///
/// Blank names become `Unnamed: <index>` and repeats get a `.N` suffix.
pub(crate) fn normalize_headers<I, S>(raw: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen: HashSet<String> = HashSet::new();
    let mut headers = Vec::new();

    for (i, name) in raw.into_iter().enumerate() {
        let name = name.as_ref().trim();
        let base = if name.is_empty() {
            format!("Unnamed: {}", i)
        } else {
            name.to_string()
        };

        let mut candidate = base.clone();
        let mut n = 1;
        while seen.contains(&candidate) {
            candidate = format!("{}.{}", base, n);
            n += 1;
        }
        seen.insert(candidate.clone());
        headers.push(candidate);
    }

    headers
}
