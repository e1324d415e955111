//! Startup and shutdown hooks for the vault resolver.
//!
//! Applications call [`on_load`] once the registry exists and [`on_unload`]
//! when shutting down. Nothing is registered implicitly.

use std::sync::Arc;

use crate::registry::ResolverRegistry;
use crate::resolver::{DsVaultResolver, DSVAULT_RESOLVER_NAME};

/// Register the vault collection resolver.
pub async fn on_load(registry: &ResolverRegistry) {
    tracing::info!("Registering DS Vault resource resolver");
    registry.register(Arc::new(DsVaultResolver::default())).await;
}

/// Unregister the vault collection resolver. Returns whether it was registered.
pub async fn on_unload(registry: &ResolverRegistry) -> bool {
    registry.unregister(DSVAULT_RESOLVER_NAME).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_load_then_unload() {
        let registry = ResolverRegistry::new();

        on_load(&registry).await;
        assert!(registry.contains(DSVAULT_RESOLVER_NAME).await);

        assert!(on_unload(&registry).await);
        assert!(!registry.contains(DSVAULT_RESOLVER_NAME).await);
        assert!(!on_unload(&registry).await);
    }

    #[tokio::test]
    async fn test_load_twice_keeps_one_resolver() {
        let registry = ResolverRegistry::new();
        on_load(&registry).await;
        on_load(&registry).await;
        assert_eq!(registry.list().await, vec![DSVAULT_RESOLVER_NAME.to_string()]);
    }
}
