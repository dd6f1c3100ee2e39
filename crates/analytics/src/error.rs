use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalyticsError {
    #[error("Invalid input type at index {index}: expected a number, found {found}")]
    InvalidInputType { index: usize, found: &'static str },

    #[error("Non-finite value {value} at index {index} of the {series} series")]
    NonFiniteInput {
        series: &'static str,
        index: usize,
        value: f64,
    },

    #[error("Price {value} at index {index} of the {series} series is zero or negative")]
    NonPositivePrice {
        series: &'static str,
        index: usize,
        value: f64,
    },

    #[error("Series length mismatch: expected {expected} values, found {found}")]
    LengthMismatch { expected: usize, found: usize },

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Malformed series: {0}")]
    Json(#[from] serde_json::Error),
}
