//! Providers sharing the `#<tag>` token namespace.

use drex_syntax::{NodeArena, NodeIndex};
use rustc_hash::FxHashMap;
use tracing::{debug, trace};

use crate::context::TypeContext;
use crate::entity_storage::EntityStorageTypeProvider;
use crate::provider::TypeProvider;
use crate::resolved::ResolvedType;
use crate::token::{SPLIT_SENTINEL, TOKEN_PREFIX, token_tag};

#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("provider tag {0:?} is already registered")]
    DuplicateTag(char),
    #[error("provider tag {0:?} is reserved")]
    ReservedTag(char),
}

/// Registered type providers, dispatched by tag.
#[derive(Default)]
pub struct ProviderRegistry {
    providers: Vec<Box<dyn TypeProvider>>,
    by_tag: FxHashMap<char, usize>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry with the built-in providers.
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        let entity_storage = EntityStorageTypeProvider::new();
        registry.by_tag.insert(entity_storage.key(), registry.providers.len());
        registry.providers.push(Box::new(entity_storage));
        registry
    }

    pub fn register(&mut self, provider: Box<dyn TypeProvider>) -> Result<(), RegistryError> {
        let tag = provider.key();
        if tag == TOKEN_PREFIX || tag == SPLIT_SENTINEL {
            return Err(RegistryError::ReservedTag(tag));
        }
        if self.by_tag.contains_key(&tag) {
            return Err(RegistryError::DuplicateTag(tag));
        }
        debug!(tag = %tag.escape_unicode(), "registered type provider");
        self.by_tag.insert(tag, self.providers.len());
        self.providers.push(provider);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    pub fn provider(&self, tag: char) -> Option<&dyn TypeProvider> {
        let index = *self.by_tag.get(&tag)?;
        self.providers.get(index).map(Box::as_ref)
    }

    /// First token produced for `node`, asking providers in registration order.
    pub fn get_type(
        &self,
        ctx: &TypeContext<'_>,
        arena: &NodeArena,
        node: NodeIndex,
    ) -> Option<String> {
        self.providers
            .iter()
            .find_map(|provider| provider.get_type(ctx, arena, node))
    }

    /// Resolve a token with the provider owning its tag.
    pub fn complete(&self, ctx: &TypeContext<'_>, token: &str) -> Option<ResolvedType> {
        let tag = token_tag(token)?;
        let Some(provider) = self.provider(tag) else {
            trace!(tag = %tag.escape_unicode(), "no provider for token tag");
            return None;
        };
        provider.complete(ctx, token)
    }
}
