//! Error types for frame parsing and conversion.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for crate operations
pub type Result<T> = std::result::Result<T, Error>;

/// A frame row or grid that does not fit the 25×25 legend-valued matrix.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// Flattened row has the wrong number of values
    #[error("expected {expected} values per frame, got {actual}")]
    ValueCount { expected: usize, actual: usize },

    /// A row of a 2D grid has the wrong width
    #[error("row {row} has {actual} values, expected {expected}")]
    RowWidth {
        row: usize,
        expected: usize,
        actual: usize,
    },

    /// 2D grid has the wrong number of rows
    #[error("expected {expected} rows, got {actual}")]
    RowCount { expected: usize, actual: usize },

    /// Cell text is not an integer
    #[error("value {value:?} at column {column} is not an integer")]
    NotAnInteger { column: usize, value: String },

    /// Integer that is neither the "off" nor the "on" legend value
    #[error("value {value} at column {column} is not a legend value (0 or 2040)")]
    OutsideLegend { column: usize, value: i64 },

    /// Any of the above, located at a 1-based line of the input
    #[error("line {line}: {inner}")]
    AtLine { line: usize, inner: Box<FormatError> },
}

impl FormatError {
    /// Attach a 1-based input line number.
    #[must_use]
    pub fn at_line(self, line: usize) -> Self {
        Self::AtLine {
            line,
            inner: Box::new(self),
        }
    }

    /// Line number, if the error was located in an input file.
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::AtLine { line, .. } => Some(*line),
            _ => None,
        }
    }

    /// The underlying error with any line information stripped.
    pub fn root(&self) -> &FormatError {
        match self {
            Self::AtLine { inner, .. } => inner.root(),
            other => other,
        }
    }
}

/// A timeline document whose timing or metadata is inconsistent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocumentError {
    /// Running sum of durations does not fit in u64
    #[error("duration overflow at entry {index}")]
    DurationOverflow { index: usize },

    /// Entry indices must count up from 0
    #[error("entry at position {position} has index {found}")]
    Index { position: usize, found: usize },

    /// Entry start is not the sum of earlier durations
    #[error("entry {index} starts at {found}ms, expected {expected}ms")]
    StartMs { index: usize, expected: u64, found: u64 },

    /// Document total disagrees with the entries
    #[error("totalDurationMs is {found}, entries sum to {expected}")]
    TotalDuration { expected: u64, found: u64 },

    /// Matrix is not 25×25
    #[error("matrix is {width}x{height}, expected 25x25")]
    MatrixSize { width: usize, height: usize },

    /// Legend is not {off: 0, on: 2040}
    #[error("legend is off={off} on={on}, expected off=0 on=2040")]
    Legend { off: u16, on: u16 },
}

/// Errors raised by file-level operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed frame data
    #[error("format error: {0}")]
    Format(#[from] FormatError),

    /// Timeline timing or metadata out of line with its entries
    #[error("invalid timeline: {0}")]
    Document(#[from] DocumentError),

    /// Filesystem failure, with the path involved
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON encoding or decoding failure
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Settings file could not be parsed
    #[error("config error: {0}")]
    Config(#[from] toml::de::Error),

    /// JSON document carries a format tag this crate does not read
    #[error("unknown document format {found:?}, expected {expected:?}")]
    UnknownFormat {
        found: String,
        expected: &'static str,
    },
}

impl Error {
    /// Wrap an I/O error with the path it happened on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
