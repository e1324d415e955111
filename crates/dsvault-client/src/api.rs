//! Collection operations for the vault client.
//!
//! Wire types mirror the vault's JSON bodies; callers only see
//! [`ObjectHashRecord`] and plain strings/bytes.

use crate::{encode_path, RemoteError, RemoteResult, VaultCollectionClient};
use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// Name and SHA-256 hash of one stored object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectHashRecord {
    pub name: String,
    pub hash_sha256: String,
}

/// GET /objects
#[derive(Debug, Deserialize)]
struct ObjectListResponse {
    objects: Vec<String>,
}

/// GET /hashes
#[derive(Debug, Deserialize)]
struct HashListResponse {
    items: Vec<ObjectHashRecord>,
}

/// GET /hashes/{name}
#[derive(Debug, Deserialize)]
struct HashResponse {
    hash_sha256: String,
}

fn object_path(name: &str) -> RemoteResult<String> {
    encode_path(name).ok_or_else(|| RemoteError::InvalidName(name.to_string()))
}

impl VaultCollectionClient {
    /// List the names of all objects in the collection.
    pub async fn list_objects(&self) -> RemoteResult<Vec<String>> {
        let body: ObjectListResponse = self.get_json("/objects").await?;
        Ok(body.objects)
    }

    /// List name/hash pairs for every object in the collection.
    pub async fn list_hashes(&self) -> RemoteResult<Vec<ObjectHashRecord>> {
        let body: HashListResponse = self.get_json("/hashes").await?;
        Ok(body.items)
    }

    /// SHA-256 hash of a single object.
    pub async fn get_hash(&self, name: &str) -> RemoteResult<String> {
        let path = format!("/hashes/{}", object_path(name)?);
        let body: HashResponse = self.get_json(&path).await?;
        Ok(body.hash_sha256)
    }

    /// Download an object. The whole body is held in memory.
    pub async fn download(&self, name: &str) -> RemoteResult<Bytes> {
        let path = format!("/objects/{}", object_path(name)?);
        let data = self.get_bytes(&path).await?;
        tracing::debug!(
            collection = %self.collection_name(),
            object = %name,
            size = data.len(),
            "Downloaded object"
        );
        Ok(data)
    }
}
