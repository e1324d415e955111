//! Resolver registry for looking up resource handlers

use std::sync::Arc;
use tokio::sync::RwLock;

use crate::descriptor::ResourceDescriptor;
use crate::error::RegistryError;
use crate::resolver::{ResourceClient, ResourceResolver};

/// Registry of resource resolvers, consulted in registration order.
///
/// Owned by the application and passed to whoever needs it; cloning shares the
/// same underlying set. Reads run concurrently, registration is serialized.
#[derive(Clone, Default)]
pub struct ResolverRegistry {
    resolvers: Arc<RwLock<Vec<Arc<dyn ResourceResolver>>>>,
}

impl ResolverRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a resolver. A resolver with the same name is replaced in place.
    pub async fn register(&self, resolver: Arc<dyn ResourceResolver>) {
        let name = resolver.name().to_string();
        let mut resolvers = self.resolvers.write().await;

        match resolvers.iter().position(|r| r.name() == name) {
            Some(index) => {
                tracing::warn!(resolver = %name, "Replacing registered resource resolver");
                resolvers[index] = resolver;
            }
            None => {
                tracing::info!(resolver = %name, "Registered resource resolver");
                resolvers.push(resolver);
            }
        }
    }

    /// Remove a resolver by name. Returns whether it was registered.
    pub async fn unregister(&self, name: &str) -> bool {
        let mut resolvers = self.resolvers.write().await;
        let before = resolvers.len();
        resolvers.retain(|r| r.name() != name);

        let removed = resolvers.len() != before;
        if removed {
            tracing::info!(resolver = %name, "Unregistered resource resolver");
        }
        removed
    }

    /// Get a resolver by name
    pub async fn get(&self, name: &str) -> Option<Arc<dyn ResourceResolver>> {
        let resolvers = self.resolvers.read().await;
        resolvers.iter().find(|r| r.name() == name).cloned()
    }

    /// Check if a resolver is registered
    pub async fn contains(&self, name: &str) -> bool {
        self.get(name).await.is_some()
    }

    /// Names of all registered resolvers, sorted
    pub async fn list(&self) -> Vec<String> {
        let resolvers = self.resolvers.read().await;
        let mut names: Vec<String> = resolvers.iter().map(|r| r.name().to_string()).collect();
        names.sort();
        names
    }

    /// First registered resolver that claims the descriptor
    pub async fn find_resolver(
        &self,
        descriptor: &ResourceDescriptor,
    ) -> Option<Arc<dyn ResourceResolver>> {
        let resolvers = self.resolvers.read().await;
        resolvers.iter().find(|r| r.is_for(descriptor)).cloned()
    }

    /// Build a client through the first resolver that claims the descriptor.
    pub async fn new_client(
        &self,
        descriptor: &ResourceDescriptor,
    ) -> Result<Arc<dyn ResourceClient>, RegistryError> {
        let resolver = self
            .find_resolver(descriptor)
            .await
            .ok_or_else(|| RegistryError::NoResolver(descriptor.url.clone()))?;

        tracing::debug!(
            resolver = %resolver.name(),
            url = %descriptor.url,
            "Resolved resource descriptor"
        );

        resolver
            .new_client(descriptor)?
            .ok_or_else(|| RegistryError::NoResolver(descriptor.url.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::DSVAULT_FORMAT;
    use crate::error::ResourceError;
    use crate::resolver::DsVaultResolver;

    // Mock resolver for testing
    #[derive(Debug)]
    struct MockResolver {
        name: String,
        format: String,
    }

    impl MockResolver {
        fn new(name: impl Into<String>, format: impl Into<String>) -> Self {
            Self {
                name: name.into(),
                format: format.into(),
            }
        }
    }

    impl ResourceResolver for MockResolver {
        fn name(&self) -> &str {
            &self.name
        }

        fn is_for(&self, descriptor: &ResourceDescriptor) -> bool {
            descriptor.format.as_deref() == Some(self.format.as_str())
        }

        fn new_client(
            &self,
            _descriptor: &ResourceDescriptor,
        ) -> Result<Option<Arc<dyn ResourceClient>>, ResourceError> {
            Ok(None)
        }
    }

    fn vault_descriptor() -> ResourceDescriptor {
        ResourceDescriptor::new("http://h:8000/collection/c1", DSVAULT_FORMAT, "c1", "k")
    }

    #[tokio::test]
    async fn test_new_registry_is_empty() {
        let registry = ResolverRegistry::new();
        assert!(registry.list().await.is_empty());
        assert!(!registry.contains("mock").await);
    }

    #[tokio::test]
    async fn test_register_and_get() {
        let registry = ResolverRegistry::new();
        registry
            .register(Arc::new(MockResolver::new("mock", "mock.fmt")))
            .await;

        assert!(registry.contains("mock").await);
        assert_eq!(registry.get("mock").await.unwrap().name(), "mock");
        assert!(registry.get("other").await.is_none());
    }

    #[tokio::test]
    async fn test_register_same_name_replaces() {
        let registry = ResolverRegistry::new();
        registry
            .register(Arc::new(MockResolver::new("mock", "a")))
            .await;
        registry
            .register(Arc::new(MockResolver::new("mock", "b")))
            .await;

        assert_eq!(registry.list().await, vec!["mock".to_string()]);
        let mut d = vault_descriptor();
        d.format = Some("b".to_string());
        assert!(registry.find_resolver(&d).await.is_some());
        d.format = Some("a".to_string());
        assert!(registry.find_resolver(&d).await.is_none());
    }

    #[tokio::test]
    async fn test_unregister() {
        let registry = ResolverRegistry::new();
        registry
            .register(Arc::new(MockResolver::new("mock", "a")))
            .await;

        assert!(registry.unregister("mock").await);
        assert!(!registry.unregister("mock").await);
        assert!(registry.list().await.is_empty());
    }

    #[tokio::test]
    async fn test_list_is_sorted() {
        let registry = ResolverRegistry::new();
        for name in ["zeta", "alpha", "mid"] {
            registry.register(Arc::new(MockResolver::new(name, name))).await;
        }
        assert_eq!(registry.list().await, vec!["alpha", "mid", "zeta"]);
    }

    #[tokio::test]
    async fn test_find_resolver_by_format() {
        let registry = ResolverRegistry::new();
        registry
            .register(Arc::new(MockResolver::new("mock", "mock.fmt")))
            .await;
        registry.register(Arc::new(DsVaultResolver::default())).await;

        let found = registry.find_resolver(&vault_descriptor()).await.unwrap();
        assert_eq!(found.name(), DsVaultResolver::default().name());

        let mut other = vault_descriptor();
        other.format = Some("unknown".to_string());
        assert!(registry.find_resolver(&other).await.is_none());
    }

    #[tokio::test]
    async fn test_new_client_through_registry() {
        let registry = ResolverRegistry::new();
        registry.register(Arc::new(DsVaultResolver::default())).await;

        let client = registry.new_client(&vault_descriptor()).await.unwrap();
        assert_eq!(client.descriptor().url, "http://h:8000/collection/c1");

        let mut other = vault_descriptor();
        other.format = None;
        assert!(matches!(
            registry.new_client(&other).await,
            Err(RegistryError::NoResolver(_))
        ));
    }

    #[tokio::test]
    async fn test_clone_registry_shares_state() {
        let registry = ResolverRegistry::new();
        let cloned = registry.clone();
        registry.register(Arc::new(DsVaultResolver::default())).await;
        assert_eq!(cloned.list().await.len(), 1);
    }
}
