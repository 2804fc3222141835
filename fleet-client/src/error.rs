//! Client error types

use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration cannot establish a session
    #[error("Configuration error: {0}")]
    Config(String),

    /// Credentials rejected or session expired
    #[error("Invalid session: {0}")]
    InvalidSession(String),

    /// Submitted version token does not match the stored record
    #[error("Version conflict: {0}")]
    VersionConflict(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Error reported by the remote API
    #[error("{name}: {message}")]
    Api { name: String, message: String },

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ClientError {
    /// Map a remote error by its exception name
    pub fn from_remote(name: impl Into<String>, message: impl Into<String>) -> Self {
        let name = name.into();
        let message = message.into();
        if name.contains("InvalidUser") || name.contains("SessionExpired") {
            Self::InvalidSession(message)
        } else if name.contains("Concurrency") || name.contains("Version") {
            Self::VersionConflict(message)
        } else if name.contains("NotFound") {
            Self::NotFound(message)
        } else {
            Self::Api { name, message }
        }
    }

    pub fn is_version_conflict(&self) -> bool {
        matches!(self, Self::VersionConflict(_))
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_remote_classifies_by_name() {
        assert!(matches!(
            ClientError::from_remote("InvalidUserException", "bad password"),
            ClientError::InvalidSession(_)
        ));
        assert!(ClientError::from_remote("DbConcurrencyException", "stale").is_version_conflict());
        assert!(matches!(
            ClientError::from_remote("EntityNotFoundException", "zone b9"),
            ClientError::NotFound(_)
        ));
        let err = ClientError::from_remote("DbUnavailableException", "maintenance");
        assert_eq!(err.to_string(), "DbUnavailableException: maintenance");
    }
}
