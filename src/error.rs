use std::path::PathBuf;

use thiserror::Error;

/// A row or column that does not satisfy the launch-table contract.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DataFormatError {
    #[error("missing required column '{column}'")]
    MissingColumn { column: &'static str },

    #[error("row {row}, column '{column}': '{value}' {reason}")]
    InvalidValue {
        row: usize,
        column: &'static str,
        value: String,
        reason: &'static str,
    },

    #[error("row {row}: {reason}")]
    Malformed { row: usize, reason: String },
}

/// Fatal errors raised while loading the dataset at startup.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unsupported file extension: .{0}")]
    UnsupportedFormat(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("invalid launch data: {0}")]
    DataFormat(#[from] DataFormatError),

    #[error("dataset contains no launch records")]
    EmptyDataset,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SelectionError {
    #[error("unknown launch site '{site}'")]
    InvalidSelection { site: String },
}
