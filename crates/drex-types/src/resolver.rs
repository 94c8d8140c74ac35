//! Token resolver.
//!
//! Turns a deferred type token back into concrete types by cross-referencing
//! the entity metadata index and the symbol table. Every step short-circuits
//! to `None`; a miss is an expected outcome (unknown entity type, framework
//! not in the project, index rebuilt mid-call), never an error.

use drex_common::{fqn_eq, normalize_fqn};
use drex_common::limits::MAX_SIGNATURES_PER_CALL;
use drex_index::{ClassDecl, Declaration, MethodDecl, TypeHierarchy};
use tracing::{debug, trace};

use crate::context::TypeContext;
use crate::resolved::ResolvedType;
use crate::token::TokenParts;

/// Keep only method declarations.
///
/// A signature may address functions, classes, fields or constants too; only
/// methods have a declaring class and take part in resolution.
pub fn only_methods(declarations: Vec<Declaration>) -> impl Iterator<Item = MethodDecl> {
    declarations.into_iter().filter_map(Declaration::into_method)
}

pub struct DeferredTypeResolver {
    tag: char,
}

impl DeferredTypeResolver {
    pub fn new(tag: char) -> Self {
        Self { tag }
    }

    #[inline]
    pub fn tag(&self) -> char {
        self.tag
    }

    pub fn resolve(&self, ctx: &TypeContext<'_>, token: &str) -> Option<ResolvedType> {
        let Some(parts) = TokenParts::parse(self.tag, token) else {
            trace!(token, "malformed deferred type token");
            return None;
        };
        let identifier = parts.identifier;

        let Some(metadata) = ctx.indexes.entities.lookup(identifier, ctx.project) else {
            trace!(identifier, "unknown entity type");
            return None;
        };

        let signatures = match parts.signatures() {
            Ok(signatures) => signatures,
            Err(err) => {
                debug!(identifier, error = %err, "corrupt signature payload");
                return None;
            }
        };
        if signatures.len() > MAX_SIGNATURES_PER_CALL {
            debug!(identifier, count = signatures.len(), "too many signatures");
            return None;
        }

        let symbols = ctx.indexes.symbols;
        let methods: Vec<MethodDecl> = signatures
            .iter()
            .flat_map(|signature| only_methods(symbols.get_by_signature(signature)))
            .collect();
        if methods.is_empty() {
            trace!(identifier, ?signatures, "no method declarations for signatures");
            return None;
        }

        let factory_fqn = ctx.project.settings.factory_interface.as_str();
        let Some(factory) = symbols.get_interfaces_by_fqn(factory_fqn).into_iter().next() else {
            trace!(fqn = factory_fqn, "factory interface not in project");
            return None;
        };

        let storage_fqn = metadata.storage_handler_fqn.as_str();
        let Some(storage) = symbols.get_classes_by_fqn(storage_fqn).into_iter().next() else {
            trace!(identifier, fqn = storage_fqn, "storage handler class not found");
            return None;
        };

        let hierarchy = TypeHierarchy::new(symbols);
        let mut resolved = ResolvedType::new();
        let mut counted = false;
        for method in &methods {
            let Some(declaring) = method.containing_class.as_deref() else {
                continue;
            };
            if !counts_for_factory(&hierarchy, declaring, &factory) {
                trace!(method = %method.name, fqn = declaring, "method not declared by the factory");
                continue;
            }
            counted = true;
            resolved.extend(
                storage
                    .implements
                    .iter()
                    .map(|interface| normalize_fqn(interface).into_owned())
                    .filter(|interface| !interface.is_empty()),
            );
        }

        if !counted || resolved.is_empty() {
            trace!(identifier, counted, "no storage interfaces resolved");
            return None;
        }
        debug!(identifier, resolved = %resolved, "resolved deferred type");
        Some(resolved)
    }
}

/// Whether a method declared in `declaring` is the factory method: it is
/// declared on the factory interface itself, on a subtype of it, or on one of
/// the factory's super-interfaces.
fn counts_for_factory(hierarchy: &TypeHierarchy<'_>, declaring: &str, factory: &ClassDecl) -> bool {
    fqn_eq(declaring, &factory.fqn)
        || hierarchy.is_subtype_of(declaring, &factory.fqn)
        || hierarchy.is_super_interface_of(declaring, &factory.fqn)
}
