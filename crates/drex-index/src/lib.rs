//! Read-side collaborators of the deferred type analysis.
//!
//! The analysis only *consumes* indexes. This crate defines what it reads:
//! - `EntityMetadataIndex`: entity type id -> storage handler metadata
//! - `SymbolTable`: declarations by signature and by FQN
//! - `KeyIndex`: key enumeration for string-keyed indexes (themes)
//! - `ServiceIndex`: whether a class is registered as a container service
//! - `IndexStatus`: whether the indexes are being rebuilt
//!
//! In-memory implementations and a JSON snapshot loader are provided for the
//! CLI and tests.

pub mod declarations;
pub use declarations::{ClassDecl, ClassKind, Declaration, FunctionDecl, MemberDecl, MethodDecl};

pub mod signature;

pub mod traits;
pub use traits::{
    EntityMetadata, EntityMetadataIndex, IndexKey, IndexStatus, KeyIndex, ProjectIndexes,
    ServiceIndex, SymbolTable,
};

pub mod hierarchy;
pub use hierarchy::TypeHierarchy;

pub mod memory;
pub use memory::{
    MemoryEntityIndex, MemoryIndexStatus, MemoryKeyIndex, MemoryProject, MemoryServiceIndex,
    MemorySymbolTable,
};

pub mod snapshot;
pub use snapshot::{ProjectSnapshot, SignatureEntry, SnapshotError};

#[cfg(test)]
#[path = "../tests/memory_tests.rs"]
mod memory_tests;

#[cfg(test)]
#[path = "../tests/hierarchy_tests.rs"]
mod hierarchy_tests;

#[cfg(test)]
#[path = "../tests/snapshot_tests.rs"]
mod snapshot_tests;
