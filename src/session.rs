//! A project, its indexes and the registered providers.

use anyhow::{Context, Result};
use drex_common::Project;
use drex_ide::{CompletionItem, ThemeCompletionProvider};
use drex_index::{MemoryProject, ProjectSnapshot};
use drex_syntax::{NodeArena, NodeIndex};
use drex_types::{ProviderRegistry, ResolvedType, TypeContext};
use std::path::Path;
use tracing::debug;

use crate::config::{DrexConfig, load_config};

pub struct Session {
    project: Project,
    indexes: MemoryProject,
    registry: ProviderRegistry,
}

impl Session {
    /// A session with the built-in providers.
    pub fn new(project: Project, indexes: MemoryProject) -> Self {
        Self {
            project,
            indexes,
            registry: ProviderRegistry::with_builtin(),
        }
    }

    /// Load indexes from a snapshot and settings from an optional config.
    pub fn open(snapshot: &Path, config: Option<&Path>) -> Result<Self> {
        let indexes = ProjectSnapshot::load(snapshot)?.into_project();

        let config_dir = config.and_then(Path::parent).or_else(|| snapshot.parent());
        let default_name = config_dir
            .and_then(Path::file_name)
            .and_then(|name| name.to_str())
            .unwrap_or("default");
        let config = match config {
            Some(path) => load_config(path)
                .with_context(|| format!("failed to load config {}", path.display()))?,
            None => DrexConfig::default(),
        };
        let project = config.into_project(default_name, config_dir.map(Path::to_path_buf));

        debug!(project = %project.name, enabled = project.is_enabled(), "opened session");
        Ok(Self::new(project, indexes))
    }

    pub fn project(&self) -> &Project {
        &self.project
    }

    pub fn indexes(&self) -> &MemoryProject {
        &self.indexes
    }

    pub fn registry(&self) -> &ProviderRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut ProviderRegistry {
        &mut self.registry
    }

    pub fn context(&self) -> TypeContext<'_> {
        TypeContext::new(&self.project, self.indexes.indexes())
    }

    /// Type `node` with the first provider that handles it.
    pub fn get_type(&self, arena: &NodeArena, node: NodeIndex) -> Option<String> {
        self.registry.get_type(&self.context(), arena, node)
    }

    /// Type `$receiver-><method>('<identifier>')` whose declarations the host
    /// resolved to `signatures`.
    pub fn encode_call<I, S>(
        &self,
        method: &str,
        identifier: &str,
        signatures: I,
    ) -> Option<String>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut arena = NodeArena::new();
        let receiver = arena.add_variable("receiver");
        let argument = arena.add_string_literal(identifier);
        let call = arena.add_method_reference(receiver, method, vec![argument], signatures);
        self.get_type(&arena, call)
    }

    pub fn resolve(&self, token: &str) -> Option<ResolvedType> {
        self.registry.complete(&self.context(), token)
    }

    /// Completions offered for the value of a `'#theme'` render array key.
    pub fn theme_completions(&self) -> Vec<CompletionItem> {
        let mut arena = NodeArena::new();
        let key = arena.add_string_literal(drex_common::well_known::THEME_RENDER_KEY);
        let value = arena.add_string_literal("");
        let element = arena.add_array_hash_element(key, value);
        arena.add_array_creation(vec![element]);
        ThemeCompletionProvider::new().completions(&self.context(), &arena, value)
    }
}
