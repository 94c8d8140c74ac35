//! Syntax tree model for drex.
//!
//! The host editor owns the real parser. This crate models the slice of the
//! syntax tree the analysis looks at as a tagged variant (`NodeData`) stored
//! in a flat `NodeArena`, and provides composable `Pattern`s to recognize
//! call-site shapes.

pub mod node;
pub use node::{
    ClassData, FunctionReferenceData, HashElementData, ListData, MethodData, MethodReferenceData,
    Node, NodeData, NodeIndex, NodeKind, StringLiteralData,
};

pub mod arena;
pub use arena::{InsertPosition, NodeArena};

pub mod patterns;
pub use patterns::Pattern;

#[cfg(test)]
#[path = "../tests/arena_tests.rs"]
mod arena_tests;

#[cfg(test)]
#[path = "../tests/patterns_tests.rs"]
mod patterns_tests;
