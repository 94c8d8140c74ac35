//! Collaborator interfaces.
//!
//! Implementations own their data and its thread safety; every method takes
//! `&self` and may be called concurrently. Results are snapshots: two calls
//! may observe different index contents if a rebuild happens in between.

use drex_common::Project;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::declarations::{ClassDecl, Declaration};

/// Metadata recorded for an entity type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityMetadata {
    /// FQN of the storage handler class (`handlers.storage` in the entity
    /// type annotation).
    pub storage_handler_fqn: String,
}

impl EntityMetadata {
    pub fn new(storage_handler_fqn: impl Into<String>) -> Self {
        Self {
            storage_handler_fqn: storage_handler_fqn.into(),
        }
    }
}

/// Entity type id -> metadata.
pub trait EntityMetadataIndex: Send + Sync {
    fn lookup(&self, entity_type_id: &str, project: &Project) -> Option<EntityMetadata>;
}

/// Declarations by signature and by fully-qualified name.
pub trait SymbolTable: Send + Sync {
    /// Every declaration addressed by `signature`, of any kind.
    fn get_by_signature(&self, signature: &str) -> Vec<Declaration>;

    /// Interfaces named `fqn`. More than one when a project has duplicates.
    fn get_interfaces_by_fqn(&self, fqn: &str) -> Vec<ClassDecl>;

    /// Classes (not interfaces) named `fqn`.
    fn get_classes_by_fqn(&self, fqn: &str) -> Vec<ClassDecl>;

    /// Classes and interfaces named `fqn`.
    fn get_types_by_fqn(&self, fqn: &str) -> Vec<ClassDecl> {
        let mut types = self.get_classes_by_fqn(fqn);
        types.extend(self.get_interfaces_by_fqn(fqn));
        types
    }
}

/// Identifies one string-keyed index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IndexKey(pub &'static str);

impl IndexKey {
    /// Theme hook names from `hook_theme()` implementations.
    pub const THEME: IndexKey = IndexKey("drex.theme");
}

/// Key enumeration for string-keyed indexes.
pub trait KeyIndex: Send + Sync {
    fn all_keys(&self, index: IndexKey, project: &Project) -> FxHashSet<String>;
}

/// Container service definitions.
pub trait ServiceIndex: Send + Sync {
    /// Whether some service definition uses `class_fqn` as its class.
    fn has_service_definition(&self, class_fqn: &str, project: &Project) -> bool;
}

/// Availability of the indexes.
pub trait IndexStatus: Send + Sync {
    /// True while indexes are being rebuilt and lookups are unreliable.
    fn is_rebuilding(&self, project: &Project) -> bool;
}

/// Read-only handles to a project's indexes, passed per call.
#[derive(Clone, Copy)]
pub struct ProjectIndexes<'a> {
    pub entities: &'a dyn EntityMetadataIndex,
    pub symbols: &'a dyn SymbolTable,
    pub keys: &'a dyn KeyIndex,
    pub services: &'a dyn ServiceIndex,
    pub status: &'a dyn IndexStatus,
}
