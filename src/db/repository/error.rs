//! Error types for repository operations.

/// Result type for repository operations
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Error type for repository operations
#[derive(Debug, Clone, thiserror::Error)]
pub enum RepositoryError {
    /// Requested entity was not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Data validation failed before or after a storage operation.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Internal/unexpected errors.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl RepositoryError {
    /// Create a not found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Whether this error means the requested entity does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_detection() {
        assert!(RepositoryError::not_found("road r1").is_not_found());
        assert!(!RepositoryError::validation("bad payload").is_not_found());
        assert!(!RepositoryError::internal("boom").is_not_found());
    }

    #[test]
    fn test_display_includes_message() {
        let err = RepositoryError::validation("sample references unknown road");
        assert!(err.to_string().contains("sample references unknown road"));
    }
}
