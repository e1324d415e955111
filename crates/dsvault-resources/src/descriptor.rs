//! Resource descriptors handed over by the host framework.
//!
//! A descriptor is the host's uniform description of an external data source:
//! a URL, a format tag, an identity and a secret. For vault collections the URL
//! has the shape `{endpoint}/collection/{collection}` and the identity carries
//! the collection name.

use dsvault_client::is_addressable_name;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ConfigurationError;

/// Format tag claimed by the vault resolver. Matched case-insensitively.
pub const DSVAULT_FORMAT: &str = "dsvault.collection";

/// Path segment separating the vault endpoint from the collection name.
pub const COLLECTION_SEGMENT: &str = "/collection/";

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceDescriptor {
    pub url: String,
    #[serde(default)]
    pub format: Option<String>,
    #[serde(default)]
    pub identity: Option<String>,
    #[serde(default)]
    pub secret: Option<String>,
}

impl fmt::Debug for ResourceDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceDescriptor")
            .field("url", &self.url)
            .field("format", &self.format)
            .field("identity", &self.identity)
            .field("secret", &self.secret.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl ResourceDescriptor {
    pub fn new(
        url: impl Into<String>,
        format: impl Into<String>,
        identity: impl Into<String>,
        secret: impl Into<String>,
    ) -> Self {
        Self {
            url: url.into(),
            format: Some(format.into()),
            identity: Some(identity.into()),
            secret: Some(secret.into()),
        }
    }

    /// True when the format tag equals [`DSVAULT_FORMAT`], ignoring case.
    pub fn has_vault_format(&self) -> bool {
        self.format
            .as_deref()
            .is_some_and(|f| f.eq_ignore_ascii_case(DSVAULT_FORMAT))
    }

    /// Check the format tag, distinguishing a missing tag from a foreign one.
    pub fn require_vault_format(&self) -> Result<(), ConfigurationError> {
        match self.format.as_deref() {
            None => Err(ConfigurationError::MissingFormat),
            Some(f) if f.eq_ignore_ascii_case(DSVAULT_FORMAT) => Ok(()),
            Some(f) => Err(ConfigurationError::UnsupportedFormat(f.to_string())),
        }
    }
}

/// Connection parameters parsed out of a vault descriptor.
#[derive(Clone, PartialEq, Eq)]
pub struct CollectionLocation {
    pub endpoint: String,
    pub collection: String,
    pub api_key: String,
}

impl fmt::Debug for CollectionLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CollectionLocation")
            .field("endpoint", &self.endpoint)
            .field("collection", &self.collection)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

impl TryFrom<&ResourceDescriptor> for CollectionLocation {
    type Error = ConfigurationError;

    fn try_from(descriptor: &ResourceDescriptor) -> Result<Self, Self::Error> {
        let (endpoint, url_collection) = descriptor
            .url
            .split_once(COLLECTION_SEGMENT)
            .ok_or_else(|| ConfigurationError::InvalidUrl(descriptor.url.clone()))?;

        let endpoint = endpoint.trim_end_matches('/');
        if endpoint.is_empty() {
            return Err(ConfigurationError::InvalidUrl(descriptor.url.clone()));
        }

        let collection = descriptor
            .identity
            .as_deref()
            .filter(|s| !s.is_empty())
            .ok_or(ConfigurationError::MissingField("identity"))?;
        if !is_addressable_name(collection) {
            return Err(ConfigurationError::InvalidField("identity"));
        }
        let api_key = descriptor
            .secret
            .as_deref()
            .filter(|s| !s.is_empty())
            .ok_or(ConfigurationError::MissingField("secret"))?;

        // The identity is authoritative; the URL suffix is informational only.
        if url_collection.trim_end_matches('/') != collection {
            tracing::warn!(
                url = %descriptor.url,
                identity = %collection,
                "Resource identity differs from the collection named in the URL"
            );
        }

        Ok(Self {
            endpoint: endpoint.to_string(),
            collection: collection.to_string(),
            api_key: api_key.to_string(),
        })
    }
}
