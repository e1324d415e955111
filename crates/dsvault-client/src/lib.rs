//! HTTP client for a single DS Vault collection.
//!
//! Every request goes to `{endpoint}/api/v1/collections/{collection}/...` and
//! carries the collection's access key in the `X-Collection-Key` header.
//! Domain methods (object listing, hashes, download) live in [`api`].

pub mod api;
pub mod error;

use bytes::Bytes;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::fmt;

pub use api::ObjectHashRecord;
pub use error::{RemoteError, RemoteResult};

/// Header carrying the collection access key.
pub const COLLECTION_KEY_HEADER: &str = "X-Collection-Key";

/// API prefix shared by all collection routes.
pub const API_PREFIX: &str = "/api/v1/collections";

/// Client bound to one collection of one vault.
///
/// Fully determined by `(endpoint, collection_name, api_key)`; two clients built
/// from equal triples are interchangeable and compare equal.
#[derive(Clone)]
pub struct VaultCollectionClient {
    client: Client,
    endpoint: String,
    collection_name: String,
    api_key: String,
}

impl fmt::Debug for VaultCollectionClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VaultCollectionClient")
            .field("endpoint", &self.endpoint)
            .field("collection_name", &self.collection_name)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

impl PartialEq for VaultCollectionClient {
    fn eq(&self, other: &Self) -> bool {
        self.endpoint == other.endpoint
            && self.collection_name == other.collection_name
            && self.api_key == other.api_key
    }
}

impl Eq for VaultCollectionClient {}

impl VaultCollectionClient {
    pub fn new(
        endpoint: impl Into<String>,
        collection_name: impl Into<String>,
        api_key: impl Into<String>,
    ) -> RemoteResult<Self> {
        let endpoint = endpoint.into().trim_end_matches('/').to_string();
        let collection_name = collection_name.into();

        if endpoint.is_empty() {
            return Err(RemoteError::Config("endpoint must not be empty".to_string()));
        }
        if encode_path(&collection_name).is_none() {
            return Err(RemoteError::Config(format!(
                "invalid collection name: {:?}",
                collection_name
            )));
        }

        let client = Client::builder()
            .user_agent(concat!("dsvault-client/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| RemoteError::Http {
                endpoint: "client_init".into(),
                source: e,
            })?;

        Ok(Self {
            client,
            endpoint,
            collection_name,
            api_key: api_key.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn collection_name(&self) -> &str {
        &self.collection_name
    }

    /// `{endpoint}/api/v1/collections/{collection}` with the collection name escaped.
    pub fn base_url(&self) -> String {
        // Validated in `new`.
        let collection = encode_path(&self.collection_name).unwrap_or_default();
        format!("{}{}/{}", self.endpoint, API_PREFIX, collection)
    }

    pub fn build_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url(), path)
    }

    async fn send(&self, path: &str) -> RemoteResult<reqwest::Response> {
        let url = self.build_url(path);
        tracing::debug!(
            endpoint = %self.endpoint,
            collection = %self.collection_name,
            path = %path,
            "Sending vault request"
        );

        let response = self
            .client
            .get(&url)
            .header(COLLECTION_KEY_HEADER, self.api_key.as_str())
            .send()
            .await
            .map_err(|e| RemoteError::Http {
                endpoint: path.to_string(),
                source: e,
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(RemoteError::Api {
                endpoint: path.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        Ok(response)
    }

    /// GET request returning the raw body.
    pub async fn get_bytes(&self, path: &str) -> RemoteResult<Bytes> {
        let response = self.send(path).await?;
        response.bytes().await.map_err(|e| RemoteError::Http {
            endpoint: path.to_string(),
            source: e,
        })
    }

    /// GET request. Deserializes JSON response.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> RemoteResult<T> {
        let body = self.get_bytes(path).await?;
        serde_json::from_slice(&body).map_err(|e| RemoteError::Deserialization {
            endpoint: path.to_string(),
            source: e,
        })
    }
}

/// Whether `name` can address a single collection or object.
///
/// Same rules as the path escaping applied to every request.
pub fn is_addressable_name(name: &str) -> bool {
    encode_path(name).is_some()
}

/// Percent-encode each `/`-separated segment of a name.
///
/// Returns `None` for names that would not address a single object: empty
/// names, empty segments, and `.`/`..` segments (the URL parser would fold
/// those into a different route).
pub(crate) fn encode_path(name: &str) -> Option<String> {
    let mut segments = Vec::new();
    for segment in name.split('/') {
        if segment.is_empty() || segment == "." || segment == ".." {
            return None;
        }
        segments.push(urlencoding::encode(segment).into_owned());
    }
    Some(segments.join("/"))
}
