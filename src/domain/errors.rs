use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Illegal {field} transition: {from} -> {to}")]
    IllegalTransition {
        field: &'static str,
        from: String,
        to: String,
    },
    #[error("Integrity violation: {0}")]
    Integrity(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<validator::ValidationErrors> for DomainError {
    fn from(e: validator::ValidationErrors) -> Self {
        DomainError::InvalidInput(e.to_string())
    }
}
