//! Error types for resource resolution and adapter operations.

use dsvault_client::RemoteError;
use thiserror::Error;

/// A descriptor that cannot be turned into a vault connection.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("Resource descriptor has no format")]
    MissingFormat,

    #[error("Unsupported resource format: {0}")]
    UnsupportedFormat(String),

    #[error("Resource descriptor is missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid value for resource field: {0}")]
    InvalidField(&'static str),

    #[error("Invalid resource URL: {0}")]
    InvalidUrl(String),

    #[error("Unknown resource type: {0}")]
    UnknownResourceType(String),
}

/// Errors surfaced by a resource client.
#[derive(Debug, Error)]
pub enum ResourceError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    Remote(#[from] RemoteError),
}

/// Errors from the resolver registry.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("No registered resolver accepts resource {0}")]
    NoResolver(String),

    #[error(transparent)]
    Resource(#[from] ResourceError),
}

/// Result type for resource operations
pub type ResourceResult<T> = Result<T, ResourceError>;
