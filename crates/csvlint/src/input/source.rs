//! The table under validation and where it came from.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Provenance of a linted file, attached to the report so a result can be
/// tied back to the exact bytes that were checked.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceMetadata {
    /// File name without directories.
    pub file: String,
    pub path: PathBuf,
    /// `sha256:` digest of the raw bytes.
    pub hash: String,
    pub size_bytes: u64,
    /// Label for the delimiter in use: `csv`, `tsv`, `psv`, ...
    pub format: String,
    pub delimiter: char,
    /// Data rows, not counting the header.
    pub row_count: usize,
    /// Width of the header row.
    pub column_count: usize,
    /// Data rows whose width differs from the header's.
    pub ragged_rows: usize,
    pub read_at: DateTime<Utc>,
}

impl SourceMetadata {
    /// Describe a file from its digest and the table parsed out of it.
    pub fn describe(path: PathBuf, hash: String, size_bytes: u64, table: &DataTable) -> Self {
        let file = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        Self {
            file,
            path,
            hash,
            size_bytes,
            format: format_label(table.delimiter).to_string(),
            delimiter: char::from(table.delimiter),
            row_count: table.row_count(),
            column_count: table.column_count(),
            ragged_rows: table.ragged_rows(),
            read_at: Utc::now(),
        }
    }
}

/// Short format name for a delimiter byte.
pub fn format_label(delimiter: u8) -> &'static str {
    match delimiter {
        b'\t' => "tsv",
        b',' => "csv",
        b';' => "csv-semicolon",
        b'|' => "psv",
        _ => "delimited",
    }
}

/// A header row plus data rows, exactly as read.
///
/// Rows are never padded or truncated to the header's width: the table
/// validator reports short and long rows itself.
#[derive(Debug, Clone)]
pub struct DataTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub delimiter: u8,
}

impl DataTable {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>, delimiter: u8) -> Self {
        Self {
            headers,
            rows,
            delimiter,
        }
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Cell at a zero-based data row and column, if the row reaches it.
    pub fn get(&self, row: usize, col: usize) -> Option<&str> {
        self.rows.get(row).and_then(|r| r.get(col).map(|s| s.as_str()))
    }

    /// Number of data rows whose width differs from the header's.
    pub fn ragged_rows(&self) -> usize {
        self.rows
            .iter()
            .filter(|r| r.len() != self.headers.len())
            .count()
    }

    pub fn is_ragged(&self) -> bool {
        self.ragged_rows() > 0
    }
}
