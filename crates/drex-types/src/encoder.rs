//! Call-site encoder.
//!
//! Recognizes `$manager->getStorage('node')` and captures the call's
//! signatures plus the literal argument in a deferred type token. This path
//! runs for every matching call while the user types, so it never touches the
//! entity metadata index or the symbol table.

use drex_syntax::patterns::{self, Pattern};
use drex_syntax::{NodeArena, NodeIndex};
use tracing::trace;

use crate::context::TypeContext;
use crate::token::{DeferredTypeToken, SPLIT_SENTINEL};

pub struct DeferredTypeEncoder {
    tag: char,
}

impl DeferredTypeEncoder {
    pub fn new(tag: char) -> Self {
        Self { tag }
    }

    #[inline]
    pub fn tag(&self) -> char {
        self.tag
    }

    /// Encode a token for `node`, or `None` when any precondition fails.
    pub fn encode(
        &self,
        ctx: &TypeContext<'_>,
        arena: &NodeArena,
        node: NodeIndex,
    ) -> Option<DeferredTypeToken> {
        if !ctx.is_available() {
            trace!(project = %ctx.project.name, "provider unavailable, skipping encode");
            return None;
        }
        if !patterns::method_with_first_string_parameter().accepts(arena, node) {
            return None;
        }

        let call = arena.get_method_reference(node)?;
        if call.name != ctx.project.settings.factory_method {
            return None;
        }

        let first = *arena.arguments(node).first()?;
        let identifier = arena.get_string_literal(first)?.contents.as_str();
        if identifier.is_empty() {
            return None;
        }
        if identifier.contains(SPLIT_SENTINEL) {
            trace!(identifier, "identifier contains the split sentinel");
            return None;
        }

        match DeferredTypeToken::new(self.tag, call.signatures.as_slice(), identifier) {
            Ok(token) => {
                trace!(identifier, signatures = call.signatures.len(), "encoded deferred type");
                Some(token)
            }
            Err(err) => {
                trace!(identifier, error = %err, "failed to encode deferred type");
                None
            }
        }
    }

    /// Encode and install the token as the provisional type of `node`.
    pub fn encode_into(
        &self,
        ctx: &TypeContext<'_>,
        arena: &mut NodeArena,
        node: NodeIndex,
    ) -> Option<DeferredTypeToken> {
        let token = self.encode(ctx, arena, node)?;
        arena.set_provisional_type(node, token.as_str().to_string());
        Some(token)
    }
}
