use thiserror::Error;

use crate::models::Source;

#[derive(Error, Debug)]
pub enum InstamoodError {
    #[error("Malformed {origin} record: {reason}")]
    MalformedRecord { origin: Source, reason: String },

    #[error("Sentiment classifier unavailable: {0}")]
    ClassifierUnavailable(String),

    #[error("Classifier error: {0}")]
    Classifier(String),

    #[error("Invalid ordering: {0}")]
    InvalidOrdering(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl InstamoodError {
    pub fn malformed(origin: Source, reason: impl Into<String>) -> Self {
        InstamoodError::MalformedRecord {
            origin,
            reason: reason.into(),
        }
    }

    /// Whether the error only affects the record that produced it.
    pub fn is_record_level(&self) -> bool {
        matches!(
            self,
            InstamoodError::MalformedRecord { .. } | InstamoodError::Classifier(_)
        )
    }
}

impl From<validator::ValidationErrors> for InstamoodError {
    fn from(errors: validator::ValidationErrors) -> Self {
        InstamoodError::Validation(errors.to_string())
    }
}

pub type Result<T> = std::result::Result<T, InstamoodError>;
