//! Humidity-specific error types.

use thiserror::Error;

/// Why an indoor/outdoor comparison could not be made.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvaluationError {
    #[error("{field} is not a valid number: {value:?}")]
    InvalidNumber { field: &'static str, value: String },

    #[error("{field} {value} is outside {min}..={max}")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
}

impl EvaluationError {
    /// Fixed headline shown in place of a recommendation.
    pub fn user_message(&self) -> &'static str {
        "Invalid indoor or outdoor data."
    }

    /// Follow-up line shown in place of the explanation.
    pub fn detail(&self) -> &'static str {
        "Please ensure all input values are correct."
    }

    /// Name of the input that failed.
    pub fn field(&self) -> &'static str {
        match self {
            Self::InvalidNumber { field, .. } | Self::OutOfRange { field, .. } => field,
        }
    }
}

/// Indoor-conditions key/value store errors.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
