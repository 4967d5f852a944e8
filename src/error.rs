//! Error types for the grouped statistics calculator.

use polars::prelude::PolarsError;
use thiserror::Error;

/// Result type alias for calculator operations.
pub type Result<T> = std::result::Result<T, NumericsError>;

#[derive(Error, Debug)]
pub enum NumericsError {
    // Schema
    #[error("missing required column `{column}`")]
    MissingColumn { column: String },

    // Aggregation
    #[error("column `{column}` has unsupported type {dtype}")]
    UnsupportedType { column: String, dtype: String },

    #[error("non-numeric value {value:?} in column `{column}` at row {row}")]
    NonNumeric {
        column: String,
        row: usize,
        value: String,
    },

    // Epoch derivation
    #[error("cannot parse date {value:?} of sequence {sequence_id} with format {format:?}")]
    DateParse {
        sequence_id: String,
        value: String,
        format: String,
    },

    // Configuration
    #[error("configuration error: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("table error: {0}")]
    Polars(#[from] PolarsError),
}

impl NumericsError {
    /// Name of the pipeline step that failed.
    pub fn stage(&self) -> &'static str {
        match self {
            NumericsError::MissingColumn { .. } => "schema",
            NumericsError::UnsupportedType { .. } | NumericsError::NonNumeric { .. } => {
                "aggregation"
            }
            NumericsError::DateParse { .. } => "epoch",
            NumericsError::Config(_) | NumericsError::Json(_) => "config",
            NumericsError::Polars(_) => "table",
        }
    }
}
