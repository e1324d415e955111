//! Vault client error types.

/// Errors from DS Vault collection calls.
#[derive(Debug, thiserror::Error)]
pub enum RemoteError {
    /// HTTP transport error.
    #[error("HTTP error calling {endpoint}: {source}")]
    Http {
        endpoint: String,
        source: reqwest::Error,
    },

    /// The vault returned a non-2xx status.
    #[error("Vault request {endpoint} failed with status {status}: {body}")]
    Api {
        endpoint: String,
        status: u16,
        body: String,
    },

    /// Response body did not have the expected JSON shape.
    #[error("Failed to parse response from {endpoint}: {source}")]
    Deserialization {
        endpoint: String,
        source: serde_json::Error,
    },

    #[error("Invalid object name: {0:?}")]
    InvalidName(String),

    #[error("Client configuration error: {0}")]
    Config(String),
}

impl RemoteError {
    /// HTTP status of the response, if the vault answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            RemoteError::Api { status, .. } => Some(*status),
            RemoteError::Http { source, .. } => source.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Result type for vault operations
pub type RemoteResult<T> = Result<T, RemoteError>;
