/// Failures surfaced by domain services.
///
/// Completion-service failures never appear here; the predictor recovers
/// from them locally.
#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    /// Client-correctable input problem
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    NotFound(String),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl DomainError {
    pub fn validation(message: impl Into<String>) -> Self {
        DomainError::Validation(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        DomainError::NotFound(message.into())
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
