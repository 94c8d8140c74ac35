//! Supertype queries over the symbol table.
//!
//! Walks `extends` and `implements` edges breadth-first. Walks are
//! cycle-safe (broken projects do contain `A extends B`, `B extends A`) and
//! bounded by `MAX_HIERARCHY_DEPTH`.

use drex_common::limits::MAX_HIERARCHY_DEPTH;
use drex_common::normalize_fqn;
use rustc_hash::FxHashSet;
use std::collections::VecDeque;
use tracing::trace;

use crate::declarations::MethodDecl;
use crate::traits::SymbolTable;

/// Hierarchy queries against a symbol table snapshot.
pub struct TypeHierarchy<'a> {
    symbols: &'a dyn SymbolTable,
}

impl<'a> TypeHierarchy<'a> {
    pub fn new(symbols: &'a dyn SymbolTable) -> Self {
        Self { symbols }
    }

    /// Visit `fqn` and its transitive supertypes in breadth-first order.
    ///
    /// `visit` receives each normalized FQN once; returning `false` stops the
    /// walk. Names without a declaration are still visited (the name is
    /// known from the child's clause) but contribute no further edges.
    fn walk(&self, fqn: &str, mut visit: impl FnMut(&str) -> bool) {
        let start = normalize_fqn(fqn).into_owned();
        if start.is_empty() {
            return;
        }

        let mut seen: FxHashSet<String> = FxHashSet::default();
        let mut queue: VecDeque<(String, u32)> = VecDeque::new();
        seen.insert(start.clone());
        queue.push_back((start, 0));

        while let Some((current, depth)) = queue.pop_front() {
            if !visit(&current) {
                return;
            }
            if depth >= MAX_HIERARCHY_DEPTH {
                trace!(fqn = %current, depth, "hierarchy walk depth limit reached");
                continue;
            }
            for decl in self.symbols.get_types_by_fqn(&current) {
                for parent in decl.direct_supertypes() {
                    let parent = normalize_fqn(parent).into_owned();
                    if !parent.is_empty() && seen.insert(parent.clone()) {
                        queue.push_back((parent, depth + 1));
                    }
                }
            }
        }
    }

    /// All transitive supertypes of `fqn`, normalized, excluding `fqn` itself.
    pub fn supertypes(&self, fqn: &str) -> FxHashSet<String> {
        let start = normalize_fqn(fqn).into_owned();
        let mut out = FxHashSet::default();
        self.walk(&start, |name| {
            if name != start {
                out.insert(name.to_string());
            }
            true
        });
        out
    }

    /// Whether `fqn` is `ancestor` or transitively extends/implements it.
    pub fn is_subtype_of(&self, fqn: &str, ancestor: &str) -> bool {
        let target = normalize_fqn(ancestor);
        if target.is_empty() {
            return false;
        }
        let mut found = false;
        self.walk(fqn, |name| {
            found = name == &*target;
            !found
        });
        found
    }

    /// Whether `fqn` is a (transitive) super-interface of `interface`.
    pub fn is_super_interface_of(&self, fqn: &str, interface: &str) -> bool {
        !drex_common::fqn_eq(fqn, interface) && self.is_subtype_of(interface, fqn)
    }

    /// Find a method on `class_fqn` or the nearest supertype declaring it.
    pub fn find_method(&self, class_fqn: &str, name: &str) -> Option<MethodDecl> {
        self.find_method_from(class_fqn, name, true)
    }

    /// Like `find_method`, but skipping `class_fqn`'s own declaration.
    pub fn find_inherited_method(&self, class_fqn: &str, name: &str) -> Option<MethodDecl> {
        self.find_method_from(class_fqn, name, false)
    }

    fn find_method_from(&self, class_fqn: &str, name: &str, include_self: bool) -> Option<MethodDecl> {
        let own = normalize_fqn(class_fqn).into_owned();
        let mut found = None;
        self.walk(&own, |current| {
            if !include_self && current == own {
                return true;
            }
            found = self
                .symbols
                .get_types_by_fqn(current)
                .into_iter()
                .find_map(|decl| {
                    let mut method = decl.find_own_method(name)?.clone();
                    method.containing_class.get_or_insert(decl.fqn);
                    Some(method)
                });
            found.is_none()
        });
        found
    }
}
