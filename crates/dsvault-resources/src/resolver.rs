//! Resolver and resource client abstractions
//!
//! A resolver tells the host whether it can handle a descriptor and, if so,
//! builds a client for it. The host only ever talks to the traits here.

use async_trait::async_trait;
use bytes::Bytes;
use dsvault_client::ObjectHashRecord;
use std::fmt::Debug;
use std::sync::Arc;

use crate::adapter::DsVaultResourceClient;
use crate::descriptor::ResourceDescriptor;
use crate::error::{ResourceError, ResourceResult};
use crate::validator::{BasicDescriptorValidator, DescriptorValidator};

/// Registry name of the vault collection resolver.
pub const DSVAULT_RESOLVER_NAME: &str = "dsvault-collection-resolver";

/// Client for a resolved resource.
#[async_trait]
pub trait ResourceClient: Send + Sync + Debug {
    /// Descriptor this client was built from
    fn descriptor(&self) -> &ResourceDescriptor;

    async fn list_objects(&self) -> ResourceResult<Vec<String>>;

    async fn list_hashes(&self) -> ResourceResult<Vec<ObjectHashRecord>>;

    async fn get_hash(&self, name: &str) -> ResourceResult<String>;

    async fn download(&self, name: &str) -> ResourceResult<Bytes>;

    /// Release whatever the client holds.
    async fn close(&self);
}

/// Predicate and factory for one kind of resource.
pub trait ResourceResolver: Send + Sync + Debug {
    /// Get the resolver name/identifier
    fn name(&self) -> &str;

    /// Whether this resolver handles the descriptor
    fn is_for(&self, descriptor: &ResourceDescriptor) -> bool;

    /// Build a client for the descriptor.
    ///
    /// `Ok(None)` means the descriptor belongs to some other resolver.
    /// Construction errors for descriptors this resolver does claim are returned.
    fn new_client(
        &self,
        descriptor: &ResourceDescriptor,
    ) -> Result<Option<Arc<dyn ResourceClient>>, ResourceError>;
}

/// Resolver for `dsvault.collection` descriptors.
#[derive(Debug, Clone)]
pub struct DsVaultResolver {
    validator: Arc<dyn DescriptorValidator>,
}

impl DsVaultResolver {
    pub fn new(validator: Arc<dyn DescriptorValidator>) -> Self {
        Self { validator }
    }

    /// Typed variant of [`ResourceResolver::new_client`].
    pub fn new_vault_client(
        &self,
        descriptor: &ResourceDescriptor,
    ) -> Result<Option<DsVaultResourceClient>, ResourceError> {
        if !self.is_for(descriptor) {
            return Ok(None);
        }
        Ok(Some(DsVaultResourceClient::new(descriptor.clone())?))
    }
}

impl Default for DsVaultResolver {
    fn default() -> Self {
        Self::new(Arc::new(BasicDescriptorValidator))
    }
}

impl ResourceResolver for DsVaultResolver {
    fn name(&self) -> &str {
        DSVAULT_RESOLVER_NAME
    }

    fn is_for(&self, descriptor: &ResourceDescriptor) -> bool {
        self.validator.is_suitable(descriptor) && descriptor.has_vault_format()
    }

    fn new_client(
        &self,
        descriptor: &ResourceDescriptor,
    ) -> Result<Option<Arc<dyn ResourceClient>>, ResourceError> {
        Ok(self
            .new_vault_client(descriptor)?
            .map(|client| Arc::new(client) as Arc<dyn ResourceClient>))
    }
}
