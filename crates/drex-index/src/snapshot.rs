//! JSON snapshots of a project's indexes.
//!
//! A snapshot is what an external indexer hands over: entity types with their
//! storage handlers, type declarations, theme hooks and service classes.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::declarations::{ClassDecl, Declaration, FunctionDecl};
use crate::memory::MemoryProject;
use crate::traits::{EntityMetadata, IndexKey};

#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("failed to read snapshot {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid snapshot JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// A declaration registered under an explicit signature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignatureEntry {
    pub signature: String,
    pub declaration: Declaration,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSnapshot {
    /// Entity type id -> metadata.
    #[serde(default)]
    pub entity_types: BTreeMap<String, EntityMetadata>,
    #[serde(default)]
    pub types: Vec<ClassDecl>,
    #[serde(default)]
    pub functions: Vec<FunctionDecl>,
    #[serde(default)]
    pub signatures: Vec<SignatureEntry>,
    /// Theme hook names.
    #[serde(default)]
    pub themes: Vec<String>,
    /// Classes registered as container services.
    #[serde(default)]
    pub services: Vec<String>,
    /// Whether the indexer was mid-rebuild when the snapshot was taken.
    #[serde(default)]
    pub rebuilding: bool,
}

impl ProjectSnapshot {
    pub fn from_json(source: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(source)?)
    }

    pub fn load(path: &Path) -> Result<Self, SnapshotError> {
        let source = std::fs::read_to_string(path).map_err(|source| SnapshotError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&source)
    }

    /// Populate in-memory indexes from this snapshot.
    pub fn into_project(self) -> MemoryProject {
        let mut project = MemoryProject::new();

        for (id, metadata) in self.entity_types {
            project.entities.insert(id, metadata);
        }
        for decl in self.types {
            project.symbols.add_type(decl);
        }
        for decl in self.functions {
            project.symbols.add_function(decl);
        }
        for entry in self.signatures {
            project.symbols.add_declaration(entry.signature, entry.declaration);
        }
        for theme in self.themes {
            project.keys.insert(IndexKey::THEME, theme);
        }
        for service in &self.services {
            project.services.add_service_class(service);
        }
        project.status.set_rebuilding(self.rebuilding);

        debug!(
            entity_types = project.entities.len(),
            rebuilding = self.rebuilding,
            "loaded project snapshot"
        );
        project
    }
}
