//! Generic descriptor suitability checks supplied by the host.
//!
//! Resolvers hold a validator instead of inheriting host behaviour, so a host
//! can swap in its own rules without touching the vault resolver.

use std::fmt::Debug;

use reqwest::Url;

use crate::descriptor::ResourceDescriptor;

/// Host-level check that a descriptor is well-formed enough to be resolved at all.
pub trait DescriptorValidator: Send + Sync + Debug {
    fn is_suitable(&self, descriptor: &ResourceDescriptor) -> bool;
}

/// Accepts descriptors whose URL is an absolute `http`/`https` URL with a host.
#[derive(Debug, Clone, Copy, Default)]
pub struct BasicDescriptorValidator;

impl DescriptorValidator for BasicDescriptorValidator {
    fn is_suitable(&self, descriptor: &ResourceDescriptor) -> bool {
        match Url::parse(&descriptor.url) {
            Ok(url) => matches!(url.scheme(), "http" | "https") && url.has_host(),
            Err(_) => false,
        }
    }
}
