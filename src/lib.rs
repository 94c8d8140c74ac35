//! drex: deferred type resolution for framework factory calls.
//!
//! `$entity_type_manager->getStorage('node')` returns a generic storage
//! handler; which one depends on the literal `'node'` and on entity metadata
//! recorded elsewhere in the project. drex types such calls in two phases:
//! a cheap encoder installs a compact token as the call's provisional type,
//! and a resolver turns the token into concrete interfaces on demand.
//!
//! The workspace crates:
//! - `drex_common`: FQNs, limits, project settings
//! - `drex_syntax`: the syntax tree slice and call-site patterns
//! - `drex_index`: collaborator traits, in-memory indexes, snapshots
//! - `drex_types`: codec, tokens, encoder, resolver, providers
//! - `drex_ide`: theme completion and the injection intention
//!
//! This crate adds configuration, tracing setup and a `Session` tying a
//! project, its indexes and the provider registry together.

pub use drex_common as common;
pub use drex_ide as ide;
pub use drex_index as index;
pub use drex_syntax as syntax;
pub use drex_types as types;

pub use drex_common::{Project, ProjectSettings};
pub use drex_index::{MemoryProject, ProjectSnapshot};
pub use drex_types::{ProviderRegistry, ResolvedType, TypeContext};

pub mod config;
pub use config::{DrexConfig, load_config, parse_config};

pub mod session;
pub use session::Session;

pub mod tracing_config;
