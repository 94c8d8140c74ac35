//! `drex.json` configuration.
//!
//! The file is JSON5 (comments and trailing commas are fine). A config may
//! `extend` another; values in the extending file win.
//!
//! ```json5
//! {
//!   extends: "../base/drex.json",
//!   name: "my-site",
//!   settings: { enabled: "yes", factoryMethod: "getStorage" },
//! }
//! ```

use anyhow::{Context, Result, anyhow, bail};
use drex_common::{Project, ProjectSettings, deserialize_bool_or_string};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Deserializer};
use std::path::{Path, PathBuf};

/// Project settings as written in a config file. Unset values fall through
/// to the extended config, then to the defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsOverrides {
    #[serde(default, deserialize_with = "deserialize_optional_bool")]
    pub enabled: Option<bool>,
    #[serde(default)]
    pub factory_method: Option<String>,
    #[serde(default)]
    pub factory_interface: Option<String>,
}

fn deserialize_optional_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    deserialize_bool_or_string(deserializer).map(Some)
}

impl SettingsOverrides {
    fn merge(base: Self, child: Self) -> Self {
        Self {
            enabled: child.enabled.or(base.enabled),
            factory_method: child.factory_method.or(base.factory_method),
            factory_interface: child.factory_interface.or(base.factory_interface),
        }
    }

    pub fn resolve(&self) -> ProjectSettings {
        let defaults = ProjectSettings::default();
        ProjectSettings {
            enabled: self.enabled.unwrap_or(defaults.enabled),
            factory_method: self
                .factory_method
                .clone()
                .unwrap_or(defaults.factory_method),
            factory_interface: self
                .factory_interface
                .clone()
                .unwrap_or(defaults.factory_interface),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrexConfig {
    /// Path of a base config, relative to this file.
    #[serde(default)]
    pub extends: Option<String>,
    /// Project name; defaults to the config directory's name.
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub settings: SettingsOverrides,
}

impl DrexConfig {
    /// Build the project described by this config.
    pub fn into_project(self, default_name: &str, root: Option<PathBuf>) -> Project {
        let settings = self.settings.resolve();
        let name = self.name.unwrap_or_else(|| default_name.to_string());
        let mut project = Project::new(name).with_settings(settings);
        project.root = root;
        project
    }
}

pub fn parse_config(source: &str) -> Result<DrexConfig> {
    json5::from_str(source).context("failed to parse drex config")
}

/// Load a config file, following `extends`.
pub fn load_config(path: &Path) -> Result<DrexConfig> {
    let mut visited = FxHashSet::default();
    load_config_inner(path, &mut visited)
}

fn load_config_inner(path: &Path, visited: &mut FxHashSet<PathBuf>) -> Result<DrexConfig> {
    let canonical = std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
    if !visited.insert(canonical.clone()) {
        bail!("drex config extends cycle detected at {}", canonical.display());
    }

    let source = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read drex config: {}", path.display()))?;
    let mut config = parse_config(&source)
        .with_context(|| format!("failed to parse drex config: {}", path.display()))?;

    if let Some(extends) = config.extends.take() {
        let base_path = resolve_extends_path(path, &extends)?;
        let base = load_config_inner(&base_path, visited)?;
        config = DrexConfig {
            extends: None,
            name: config.name.or(base.name),
            settings: SettingsOverrides::merge(base.settings, config.settings),
        };
    }

    visited.remove(&canonical);
    Ok(config)
}

fn resolve_extends_path(current: &Path, extends: &str) -> Result<PathBuf> {
    let base_dir = current
        .parent()
        .ok_or_else(|| anyhow!("drex config has no parent directory"))?;
    let mut candidate = PathBuf::from(extends);
    if candidate.extension().is_none() {
        candidate.set_extension("json");
    }
    Ok(if candidate.is_absolute() {
        candidate
    } else {
        base_dir.join(candidate)
    })
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod config_tests;
