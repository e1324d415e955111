// DS Vault resource client

use async_trait::async_trait;
use bytes::Bytes;
use dsvault_client::{ObjectHashRecord, VaultCollectionClient};
use tokio::sync::OnceCell;

use crate::descriptor::{CollectionLocation, ResourceDescriptor};
use crate::error::{ConfigurationError, ResourceError, ResourceResult};
use crate::resolver::ResourceClient;

/// Resource client for one vault collection descriptor.
///
/// The format is checked on construction. The underlying
/// [`VaultCollectionClient`] is built on first use and kept for the lifetime of
/// the adapter.
#[derive(Debug)]
pub struct DsVaultResourceClient {
    descriptor: ResourceDescriptor,
    connection: OnceCell<VaultCollectionClient>,
}

impl DsVaultResourceClient {
    pub fn new(descriptor: ResourceDescriptor) -> Result<Self, ConfigurationError> {
        descriptor.require_vault_format()?;

        Ok(Self {
            descriptor,
            connection: OnceCell::new(),
        })
    }

    /// Cached vault client, created on the first call.
    ///
    /// Concurrent first calls construct exactly one client. A failed
    /// construction is not cached.
    pub async fn connection(&self) -> ResourceResult<&VaultCollectionClient> {
        self.connection
            .get_or_try_init(|| async {
                let location = CollectionLocation::try_from(&self.descriptor)?;
                tracing::debug!(
                    endpoint = %location.endpoint,
                    collection = %location.collection,
                    "Creating vault collection client"
                );
                let client = VaultCollectionClient::new(
                    location.endpoint,
                    location.collection,
                    location.api_key,
                )?;
                Ok::<_, ResourceError>(client)
            })
            .await
    }
}

#[async_trait]
impl ResourceClient for DsVaultResourceClient {
    fn descriptor(&self) -> &ResourceDescriptor {
        &self.descriptor
    }

    async fn list_objects(&self) -> ResourceResult<Vec<String>> {
        Ok(self.connection().await?.list_objects().await?)
    }

    async fn list_hashes(&self) -> ResourceResult<Vec<ObjectHashRecord>> {
        Ok(self.connection().await?.list_hashes().await?)
    }

    async fn get_hash(&self, name: &str) -> ResourceResult<String> {
        Ok(self.connection().await?.get_hash(name).await?)
    }

    async fn download(&self, name: &str) -> ResourceResult<Bytes> {
        Ok(self.connection().await?.download(name).await?)
    }

    async fn close(&self) {
        // Nothing to release: the vault client keeps no session.
        tracing::debug!(url = %self.descriptor.url, "Closing vault resource client");
    }
}
