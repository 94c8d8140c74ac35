//! Composable predicates over syntax nodes.
//!
//! A `Pattern` answers "does this node have this shape?". Small patterns
//! (node kind, call name, argument at position) combine with `and`, `or`,
//! `not` and `with_parent` into the call-site shapes providers react to:
//!
//! ```
//! use drex_syntax::patterns::{self, Pattern};
//! let getter = patterns::method_with_first_string_parameter().and(patterns::named("getStorage"));
//! # let _ = getter;
//! ```

use crate::arena::NodeArena;
use crate::node::{NodeIndex, NodeKind};

/// A predicate over a node in an arena.
pub trait Pattern {
    fn accepts(&self, arena: &NodeArena, node: NodeIndex) -> bool;

    fn and<P: Pattern>(self, other: P) -> And<Self, P>
    where
        Self: Sized,
    {
        And(self, other)
    }

    fn or<P: Pattern>(self, other: P) -> Or<Self, P>
    where
        Self: Sized,
    {
        Or(self, other)
    }

    fn not(self) -> Not<Self>
    where
        Self: Sized,
    {
        Not(self)
    }

    /// Additionally require the direct parent to match `parent`.
    fn with_parent<P: Pattern>(self, parent: P) -> WithParent<Self, P>
    where
        Self: Sized,
    {
        WithParent(self, parent)
    }
}

impl<F> Pattern for F
where
    F: Fn(&NodeArena, NodeIndex) -> bool,
{
    fn accepts(&self, arena: &NodeArena, node: NodeIndex) -> bool {
        self(arena, node)
    }
}

pub struct And<A, B>(A, B);

impl<A: Pattern, B: Pattern> Pattern for And<A, B> {
    fn accepts(&self, arena: &NodeArena, node: NodeIndex) -> bool {
        self.0.accepts(arena, node) && self.1.accepts(arena, node)
    }
}

pub struct Or<A, B>(A, B);

impl<A: Pattern, B: Pattern> Pattern for Or<A, B> {
    fn accepts(&self, arena: &NodeArena, node: NodeIndex) -> bool {
        self.0.accepts(arena, node) || self.1.accepts(arena, node)
    }
}

pub struct Not<A>(A);

impl<A: Pattern> Pattern for Not<A> {
    fn accepts(&self, arena: &NodeArena, node: NodeIndex) -> bool {
        !self.0.accepts(arena, node)
    }
}

pub struct WithParent<A, P>(A, P);

impl<A: Pattern, P: Pattern> Pattern for WithParent<A, P> {
    fn accepts(&self, arena: &NodeArena, node: NodeIndex) -> bool {
        if !self.0.accepts(arena, node) {
            return false;
        }
        let parent = arena.parent(node);
        parent.is_some() && self.1.accepts(arena, parent)
    }
}

// =============================================================================
// Primitive patterns
// =============================================================================

pub fn kind(kind: NodeKind) -> impl Pattern {
    move |arena: &NodeArena, node: NodeIndex| arena.kind(node) == Some(kind)
}

pub fn method_reference() -> impl Pattern {
    kind(NodeKind::MethodReference)
}

pub fn string_literal() -> impl Pattern {
    kind(NodeKind::StringLiteral)
}

/// A string literal with exactly these contents.
pub fn string_literal_with(contents: &str) -> impl Pattern + '_ {
    move |arena: &NodeArena, node: NodeIndex| {
        arena
            .get_string_literal(node)
            .is_some_and(|lit| lit.contents == contents)
    }
}

/// A method or function call with this name. PHP method names are
/// case-insensitive.
pub fn named(name: &str) -> impl Pattern + '_ {
    move |arena: &NodeArena, node: NodeIndex| {
        arena
            .call_name(node)
            .is_some_and(|call| call.eq_ignore_ascii_case(name))
    }
}

pub fn argument_count_at_least(min: usize) -> impl Pattern {
    move |arena: &NodeArena, node: NodeIndex| arena.arguments(node).len() >= min
}

/// The call's argument at `position` matches `pattern`.
pub fn argument<P: Pattern>(position: usize, pattern: P) -> impl Pattern {
    move |arena: &NodeArena, node: NodeIndex| {
        arena
            .arguments(node)
            .get(position)
            .is_some_and(|&arg| pattern.accepts(arena, arg))
    }
}

/// An array hash element whose key matches `pattern`.
pub fn hash_key<P: Pattern>(pattern: P) -> impl Pattern {
    move |arena: &NodeArena, node: NodeIndex| {
        arena
            .get_hash_element(node)
            .is_some_and(|element| pattern.accepts(arena, element.key))
    }
}

// =============================================================================
// Call-site shapes
// =============================================================================

/// `$x->method('literal', ...)`: a method call whose first argument is a
/// single string literal.
pub fn method_with_first_string_parameter() -> impl Pattern {
    method_reference()
        .and(argument_count_at_least(1))
        .and(argument(0, string_literal()))
}

/// `'#theme' => ...`: an array element keyed by the theme render key.
pub fn theme_hash_element() -> impl Pattern {
    kind(NodeKind::ArrayHashElement)
        .and(hash_key(string_literal_with(drex_common::well_known::THEME_RENDER_KEY)))
}
