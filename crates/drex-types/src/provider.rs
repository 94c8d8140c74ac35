//! The type provider contract.

use drex_syntax::{NodeArena, NodeIndex};

use crate::context::TypeContext;
use crate::resolved::ResolvedType;

/// A source of deferred types sharing the `#<tag>` token namespace.
///
/// `get_type` runs on every candidate expression while the user types and
/// must stay cheap. `complete` runs only when a consumer needs the concrete
/// type. Both are pure with respect to the provider: no state is kept between
/// calls, and concurrent calls are independent.
pub trait TypeProvider: Send + Sync {
    /// The provider's tag, unique among registered providers.
    fn key(&self) -> char;

    /// Encode a deferred type for `node`, or `None` when the node is not
    /// handled by this provider.
    fn get_type(&self, ctx: &TypeContext<'_>, arena: &NodeArena, node: NodeIndex)
    -> Option<String>;

    /// Resolve a token previously returned by `get_type`.
    fn complete(&self, ctx: &TypeContext<'_>, token: &str) -> Option<ResolvedType>;
}
