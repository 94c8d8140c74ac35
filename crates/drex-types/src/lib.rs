//! Deferred type resolution for drex.
//!
//! Type inference for `getStorage('node')` happens in two phases:
//!
//! 1. **Encode** (`DeferredTypeEncoder`): at the call site, capture the
//!    call's signatures and the literal argument in a compact token and
//!    install it as the expression's provisional type. Cheap; no lookups.
//! 2. **Resolve** (`DeferredTypeResolver`): when a consumer needs the
//!    concrete type, decode the token and cross-reference the entity
//!    metadata index and the symbol table.
//!
//! Tokens look like `#<tag><payload><sentinel><identifier>`; the payload is
//! produced by `SignatureCodec`. Providers implement `TypeProvider` and are
//! dispatched by tag through `ProviderRegistry`.

pub mod codec;
pub use codec::{CodecError, SignatureCodec};

pub mod token;
pub use token::{
    DeferredTypeToken, ENTITY_STORAGE_TAG, SPLIT_SENTINEL, TOKEN_PREFIX, TokenError, TokenParts,
    token_tag,
};

pub mod resolved;
pub use resolved::ResolvedType;

pub mod context;
pub use context::TypeContext;

pub mod provider;
pub use provider::TypeProvider;

pub mod encoder;
pub use encoder::DeferredTypeEncoder;

pub mod resolver;
pub use resolver::DeferredTypeResolver;

pub mod entity_storage;
pub use entity_storage::EntityStorageTypeProvider;

pub mod registry;
pub use registry::{ProviderRegistry, RegistryError};

#[cfg(test)]
#[path = "../tests/codec_tests.rs"]
mod codec_tests;

#[cfg(test)]
#[path = "../tests/token_tests.rs"]
mod token_tests;

#[cfg(test)]
#[path = "../tests/encoder_tests.rs"]
mod encoder_tests;

#[cfg(test)]
#[path = "../tests/resolver_tests.rs"]
mod resolver_tests;

#[cfg(test)]
#[path = "../tests/registry_tests.rs"]
mod registry_tests;
