use thiserror::Error;

#[derive(Debug, Error)]
pub enum BreakEvenError {
    #[error("Invalid input: {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("I/O error: {0}")]
    Io(String),
}

impl BreakEvenError {
    pub(crate) fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        BreakEvenError::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for BreakEvenError {
    fn from(e: serde_json::Error) -> Self {
        BreakEvenError::SerializationError(e.to_string())
    }
}

impl From<std::io::Error> for BreakEvenError {
    fn from(e: std::io::Error) -> Self {
        BreakEvenError::Io(e.to_string())
    }
}
