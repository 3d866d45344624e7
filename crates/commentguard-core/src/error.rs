//! Error types for the CommentGuard client.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the entire CommentGuard client.
///
/// The HTTP gateway classifies every failed call into one of the first
/// three variants; the remaining variants cover local concerns (storage,
/// configuration, input guards).
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum CommentGuardError {
    /// The server rejected the bearer token (HTTP 401). The session has
    /// already been cleared by the time this is returned.
    #[error("Authentication expired")]
    AuthExpired,

    /// The requested endpoint or record does not exist (HTTP 404).
    ///
    /// For optional endpoints this is a legitimate "not implemented on the
    /// server" signal, so callers may fall back to local behavior instead
    /// of surfacing an error.
    #[error("Resource not found: {resource}")]
    ResourceMissing { resource: String },

    /// Any other failed request. `status_code` is `None` when no response
    /// was received at all (network unavailable).
    #[error("Request failed{}: {message}", .status_code.map(|s| format!(" ({s})")).unwrap_or_default())]
    RequestFailed {
        status_code: Option<u16>,
        message: String,
    },

    /// Local durable storage error (session file, template fallback store)
    #[error("Storage error: {0}")]
    Storage(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization { format: String, message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Input rejected before any network call was issued
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CommentGuardError {
    /// Creates a ResourceMissing error.
    pub fn resource_missing(resource: impl Into<String>) -> Self {
        Self::ResourceMissing {
            resource: resource.into(),
        }
    }

    /// Creates a RequestFailed error with a status code.
    pub fn request_failed(status_code: u16, message: impl Into<String>) -> Self {
        Self::RequestFailed {
            status_code: Some(status_code),
            message: message.into(),
        }
    }

    /// Creates a RequestFailed error for a request that got no response.
    pub fn network(message: impl Into<String>) -> Self {
        Self::RequestFailed {
            status_code: None,
            message: message.into(),
        }
    }

    /// Creates a Storage error.
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage(message.into())
    }

    /// Creates a Config error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an InvalidInput error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Creates an Internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Check if this is an AuthExpired error.
    pub fn is_auth_expired(&self) -> bool {
        matches!(self, Self::AuthExpired)
    }

    /// Check if this is a ResourceMissing error.
    ///
    /// Service modules with a local fallback (the template service) branch
    /// on this to decide between the server path and the fallback store.
    pub fn is_resource_missing(&self) -> bool {
        matches!(self, Self::ResourceMissing { .. })
    }

    /// Check if this is a RequestFailed error without a status code,
    /// i.e. the request never produced a response.
    pub fn is_network(&self) -> bool {
        matches!(
            self,
            Self::RequestFailed {
                status_code: None,
                ..
            }
        )
    }
}

impl From<std::io::Error> for CommentGuardError {
    fn from(err: std::io::Error) -> Self {
        Self::Storage(format!("{} (kind: {:?})", err, err.kind()))
    }
}

impl From<serde_json::Error> for CommentGuardError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, CommentGuardError>`.
pub type Result<T> = std::result::Result<T, CommentGuardError>;
