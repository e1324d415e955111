//! DS Vault resources
//!
//! Exposes vault collections as a resource type for a pluggable resource
//! framework: descriptors, the resolver that claims them, the adapter that
//! serves the collection operations, and a registry that holds resolvers.
//!
//! Registration is explicit:
//!
//! ```no_run
//! # async fn run() -> Result<(), dsvault_resources::RegistryError> {
//! use dsvault_resources::{lifecycle, ResolverRegistry, ResourceClient, ResourceDescriptor};
//!
//! let registry = ResolverRegistry::new();
//! lifecycle::on_load(&registry).await;
//!
//! let descriptor = ResourceDescriptor::new(
//!     "http://localhost:8000/collection/c1",
//!     "dsvault.collection",
//!     "c1",
//!     "api-key",
//! );
//! let client = registry.new_client(&descriptor).await?;
//! let objects = client.list_objects().await?;
//! # let _ = objects;
//! lifecycle::on_unload(&registry).await;
//! # Ok(())
//! # }
//! ```

pub mod adapter;
pub mod descriptor;
pub mod error;
pub mod form;
pub mod lifecycle;
pub mod registry;
pub mod resolver;
pub mod validator;

pub use adapter::DsVaultResourceClient;
pub use descriptor::{CollectionLocation, ResourceDescriptor, DSVAULT_FORMAT};
pub use error::{ConfigurationError, RegistryError, ResourceError, ResourceResult};
pub use registry::ResolverRegistry;
pub use resolver::{DsVaultResolver, ResourceClient, ResourceResolver, DSVAULT_RESOLVER_NAME};
pub use validator::{BasicDescriptorValidator, DescriptorValidator};
