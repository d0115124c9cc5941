use thiserror::Error;

#[derive(Debug, Error)]
pub enum SalesDashError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    #[error("Export error: {0}")]
    Export(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for SalesDashError {
    fn from(e: serde_json::Error) -> Self {
        SalesDashError::SerializationError(e.to_string())
    }
}

impl From<csv::Error> for SalesDashError {
    fn from(e: csv::Error) -> Self {
        SalesDashError::Export(e.to_string())
    }
}

impl SalesDashError {
    pub(crate) fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        SalesDashError::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }
}
