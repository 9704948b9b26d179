//! Error types for port operations.

/// Repository operation errors with context for debugging.
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    /// Storage operation failed - includes operation name for tracing.
    #[error("Storage error in {operation}: {message}")]
    Storage {
        operation: &'static str,
        message: String,
    },

    /// Serialization/deserialization failed.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl RepoError {
    /// Create a Storage error with operation context.
    pub fn storage(operation: &'static str, message: impl ToString) -> Self {
        Self::Storage {
            operation,
            message: message.to_string(),
        }
    }

    /// Create a Serialization error.
    pub fn serialization(message: impl ToString) -> Self {
        Self::Serialization(message.to_string())
    }
}

/// Party feed errors.
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    /// The request for the feed did not complete.
    #[error("Feed request failed: {0}")]
    Request(String),

    /// The feed answered with something that is not a server group list.
    #[error("Invalid feed payload: {0}")]
    InvalidPayload(String),

    /// The feed reported itself unavailable; carries the reason it gave.
    #[error("Party feed unavailable: {0}")]
    Unavailable(String),
}

impl FeedError {
    pub fn request(message: impl ToString) -> Self {
        Self::Request(message.to_string())
    }

    pub fn invalid_payload(message: impl ToString) -> Self {
        Self::InvalidPayload(message.to_string())
    }

    /// Message suitable for showing as a failed network state.
    pub fn reason(&self) -> String {
        match self {
            FeedError::Unavailable(reason) => reason.clone(),
            other => other.to_string(),
        }
    }
}
