//! In-memory index implementations.
//!
//! Used by the CLI (loaded from a snapshot) and by tests. The entity index is
//! concurrent so it can be updated while resolutions run, which is how a
//! background rebuild looks from the analysis' side.

use dashmap::DashMap;
use drex_common::{Project, normalize_fqn};
use rustc_hash::{FxHashMap, FxHashSet};
use std::sync::atomic::{AtomicBool, Ordering};

use crate::declarations::{ClassDecl, ClassKind, Declaration, FunctionDecl};
use crate::signature::{class_signature, function_signature, method_signature};
use crate::traits::{
    EntityMetadata, EntityMetadataIndex, IndexKey, IndexStatus, KeyIndex, ProjectIndexes,
    ServiceIndex, SymbolTable,
};

// =============================================================================
// Entity metadata
// =============================================================================

#[derive(Debug, Default)]
pub struct MemoryEntityIndex {
    entries: DashMap<String, EntityMetadata>,
}

impl MemoryEntityIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, entity_type_id: impl Into<String>, metadata: EntityMetadata) {
        self.entries.insert(entity_type_id.into(), metadata);
    }

    pub fn remove(&self, entity_type_id: &str) -> Option<EntityMetadata> {
        self.entries.remove(entity_type_id).map(|(_, metadata)| metadata)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl EntityMetadataIndex for MemoryEntityIndex {
    fn lookup(&self, entity_type_id: &str, _project: &Project) -> Option<EntityMetadata> {
        self.entries
            .get(entity_type_id)
            .map(|entry| entry.value().clone())
    }
}

// =============================================================================
// Symbol table
// =============================================================================

#[derive(Debug, Default)]
pub struct MemorySymbolTable {
    /// Normalized FQN -> declarations of that name.
    types: FxHashMap<String, Vec<ClassDecl>>,
    by_signature: FxHashMap<String, Vec<Declaration>>,
}

impl MemorySymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a class/interface/trait and each of its methods.
    ///
    /// The type's FQN and its `extends`/`implements` names are normalized.
    /// Methods get their `containing_class` set and become addressable by
    /// `#M#C\Fqn.name`; the type itself by `#C\Fqn`.
    pub fn add_type(&mut self, mut decl: ClassDecl) {
        let fqn = normalize_fqn(&decl.fqn).into_owned();
        decl.fqn.clone_from(&fqn);
        normalize_names(&mut decl.extends);
        normalize_names(&mut decl.implements);

        for method in &mut decl.methods {
            method.containing_class = Some(fqn.clone());
            self.by_signature
                .entry(method_signature(&fqn, &method.name))
                .or_default()
                .push(Declaration::Method(method.clone()));
        }
        self.by_signature
            .entry(class_signature(&fqn))
            .or_default()
            .push(Declaration::Class(decl.clone()));
        self.types.entry(fqn).or_default().push(decl);
    }

    pub fn add_function(&mut self, mut decl: FunctionDecl) {
        decl.fqn = normalize_fqn(&decl.fqn).into_owned();
        self.by_signature
            .entry(function_signature(&decl.fqn))
            .or_default()
            .push(Declaration::Function(decl));
    }

    /// Register a declaration under an explicit signature.
    pub fn add_declaration(&mut self, signature: impl Into<String>, decl: Declaration) {
        self.by_signature
            .entry(signature.into())
            .or_default()
            .push(decl);
    }

    fn types_of_kind(&self, fqn: &str, keep: impl Fn(ClassKind) -> bool) -> Vec<ClassDecl> {
        self.types
            .get(normalize_fqn(fqn).as_ref())
            .map(|decls| {
                decls
                    .iter()
                    .filter(|decl| keep(decl.kind))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }
}

impl SymbolTable for MemorySymbolTable {
    fn get_by_signature(&self, signature: &str) -> Vec<Declaration> {
        self.by_signature.get(signature).cloned().unwrap_or_default()
    }

    fn get_interfaces_by_fqn(&self, fqn: &str) -> Vec<ClassDecl> {
        self.types_of_kind(fqn, |kind| kind == ClassKind::Interface)
    }

    fn get_classes_by_fqn(&self, fqn: &str) -> Vec<ClassDecl> {
        self.types_of_kind(fqn, |kind| kind == ClassKind::Class)
    }

    fn get_types_by_fqn(&self, fqn: &str) -> Vec<ClassDecl> {
        self.types_of_kind(fqn, |_| true)
    }
}

/// Normalize in place and drop names repeated under another spelling.
fn normalize_names(names: &mut Vec<String>) {
    let mut seen = FxHashSet::default();
    names.retain_mut(|name| {
        *name = normalize_fqn(name).into_owned();
        !name.is_empty() && seen.insert(name.clone())
    });
}

// =============================================================================
// Key, service and status indexes
// =============================================================================

#[derive(Debug, Default)]
pub struct MemoryKeyIndex {
    keys: FxHashMap<IndexKey, FxHashSet<String>>,
}

impl MemoryKeyIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, index: IndexKey, key: impl Into<String>) {
        self.keys.entry(index).or_default().insert(key.into());
    }
}

impl KeyIndex for MemoryKeyIndex {
    fn all_keys(&self, index: IndexKey, _project: &Project) -> FxHashSet<String> {
        self.keys.get(&index).cloned().unwrap_or_default()
    }
}

#[derive(Debug, Default)]
pub struct MemoryServiceIndex {
    classes: FxHashSet<String>,
}

impl MemoryServiceIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_service_class(&mut self, class_fqn: &str) {
        self.classes.insert(normalize_fqn(class_fqn).into_owned());
    }
}

impl ServiceIndex for MemoryServiceIndex {
    fn has_service_definition(&self, class_fqn: &str, _project: &Project) -> bool {
        self.classes.contains(normalize_fqn(class_fqn).as_ref())
    }
}

#[derive(Debug, Default)]
pub struct MemoryIndexStatus {
    rebuilding: AtomicBool,
}

impl MemoryIndexStatus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_rebuilding(&self, rebuilding: bool) {
        self.rebuilding.store(rebuilding, Ordering::Release);
    }
}

impl IndexStatus for MemoryIndexStatus {
    fn is_rebuilding(&self, _project: &Project) -> bool {
        self.rebuilding.load(Ordering::Acquire)
    }
}

// =============================================================================
// Bundle
// =============================================================================

/// All in-memory indexes of one project.
#[derive(Debug, Default)]
pub struct MemoryProject {
    pub entities: MemoryEntityIndex,
    pub symbols: MemorySymbolTable,
    pub keys: MemoryKeyIndex,
    pub services: MemoryServiceIndex,
    pub status: MemoryIndexStatus,
}

impl MemoryProject {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn indexes(&self) -> ProjectIndexes<'_> {
        ProjectIndexes {
            entities: &self.entities,
            symbols: &self.symbols,
            keys: &self.keys,
            services: &self.services,
            status: &self.status,
        }
    }
}
