//! Project descriptor and per-project settings.

use serde::{Deserialize, Deserializer, Serialize};
use std::path::PathBuf;

use crate::well_known::{ENTITY_TYPE_MANAGER_INTERFACE, GET_STORAGE_METHOD};

/// Accepts both `true` and `"true"` (and the usual string spellings).
///
/// Hand-edited settings files regularly quote booleans.
pub fn deserialize_bool_or_string<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum BoolOrString {
        Bool(bool),
        Number(i64),
        String(String),
    }

    match BoolOrString::deserialize(deserializer)? {
        BoolOrString::Bool(b) => Ok(b),
        BoolOrString::Number(n) => Ok(n != 0),
        BoolOrString::String(s) => match s.trim().to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" => Ok(false),
            _ => Err(Error::custom(format!(
                "invalid boolean value: '{}'. Expected true, false, 'true', or 'false'",
                s
            ))),
        },
    }
}

fn default_enabled() -> bool {
    true
}

fn default_factory_method() -> String {
    GET_STORAGE_METHOD.to_string()
}

fn default_factory_interface() -> String {
    ENTITY_TYPE_MANAGER_INTERFACE.to_string()
}

/// Settings controlling the analysis for one project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSettings {
    /// Master switch. When off, no provider produces types or completions.
    #[serde(
        default = "default_enabled",
        deserialize_with = "deserialize_bool_or_string"
    )]
    pub enabled: bool,
    /// Name of the literal-keyed factory method (`getStorage`).
    #[serde(default = "default_factory_method")]
    pub factory_method: String,
    /// FQN of the interface declaring the factory method.
    #[serde(default = "default_factory_interface")]
    pub factory_interface: String,
}

impl Default for ProjectSettings {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            factory_method: default_factory_method(),
            factory_interface: default_factory_interface(),
        }
    }
}

impl ProjectSettings {
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }
}

/// The project an analysis request belongs to.
#[derive(Debug, Clone, Default)]
pub struct Project {
    pub name: String,
    pub root: Option<PathBuf>,
    pub settings: ProjectSettings,
}

impl Project {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            root: None,
            settings: ProjectSettings::default(),
        }
    }

    pub fn with_settings(mut self, settings: ProjectSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = Some(root.into());
        self
    }

    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.settings.enabled
    }
}
