//! `$manager->getStorage('node')` -> the node storage interfaces.

use drex_syntax::{NodeArena, NodeIndex};

use crate::context::TypeContext;
use crate::encoder::DeferredTypeEncoder;
use crate::provider::TypeProvider;
use crate::resolved::ResolvedType;
use crate::resolver::DeferredTypeResolver;
use crate::token::ENTITY_STORAGE_TAG;

/// Types the entity storage factory call by its literal entity type id.
pub struct EntityStorageTypeProvider {
    encoder: DeferredTypeEncoder,
    resolver: DeferredTypeResolver,
}

impl EntityStorageTypeProvider {
    pub fn new() -> Self {
        Self {
            encoder: DeferredTypeEncoder::new(ENTITY_STORAGE_TAG),
            resolver: DeferredTypeResolver::new(ENTITY_STORAGE_TAG),
        }
    }
}

impl Default for EntityStorageTypeProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeProvider for EntityStorageTypeProvider {
    fn key(&self) -> char {
        ENTITY_STORAGE_TAG
    }

    fn get_type(
        &self,
        ctx: &TypeContext<'_>,
        arena: &NodeArena,
        node: NodeIndex,
    ) -> Option<String> {
        self.encoder
            .encode(ctx, arena, node)
            .map(|token| token.into_string())
    }

    fn complete(&self, ctx: &TypeContext<'_>, token: &str) -> Option<ResolvedType> {
        self.resolver.resolve(ctx, token)
    }
}
