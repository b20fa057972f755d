//! Error types for the hierarchy-forecast library.

use thiserror::Error;

/// Result type alias for dataset and reconciliation operations.
pub type Result<T> = std::result::Result<T, ForecastError>;

/// Errors that can occur while building datasets or reconciling forecasts.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ForecastError {
    /// Input data is empty.
    #[error("empty input data")]
    EmptyData,

    /// Invalid parameter value.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Dimension mismatch between data structures.
    #[error("dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    /// A requested column is absent from the frame.
    #[error("column not found: {name}")]
    MissingColumn { name: String },

    /// A column name appears twice in the same frame.
    #[error("duplicate column: {name}")]
    DuplicateColumn { name: String },

    /// A column holds text where numbers are required.
    #[error("column {name} is not numeric")]
    NonNumericColumn { name: String },

    /// A predictor feature group was requested but no variables feed it.
    #[error("feature group {group} is enabled but has no variables")]
    EmptyFeatureGroup { group: &'static str },

    /// The hierarchy has no level with this identifier.
    #[error("unknown hierarchy level: {level}")]
    UnknownLevel { level: String },

    /// The root level was passed to an operation that needs grouping keys.
    #[error("{operation} requires a level with grouping keys, got top-most level {level}")]
    RootLevel {
        level: String,
        operation: &'static str,
    },

    /// A top-down product cannot be represented as an integer forecast.
    #[error("top-down forecast for period {period} at level {level} is not finite")]
    NonFiniteForecast { level: String, period: String },

    /// A date value could not be parsed.
    #[error("could not parse date {value:?}: {reason}")]
    DateParse { value: String, reason: String },

    /// Error raised by the dataframe engine.
    #[error("data error: {0}")]
    Data(String),
}

impl From<polars::error::PolarsError> for ForecastError {
    fn from(err: polars::error::PolarsError) -> Self {
        ForecastError::Data(err.to_string())
    }
}
