//! Common types and utilities for the drex crates.
//!
//! This crate provides foundational types used across all drex crates:
//! - Fully-qualified name normalization (`Fqn`, `normalize_fqn`)
//! - Well-known framework names (`well_known`)
//! - Centralized limits and thresholds
//! - Member visibility and parameters
//! - Project descriptor and per-project settings

// Fully-qualified names
pub mod fqn;
pub use fqn::{Fqn, fqn_eq, normalize_fqn};

// Centralized limits and thresholds
pub mod limits;

// Class member building blocks
pub mod member;
pub use member::{Parameter, Visibility};

// Project descriptor and settings
pub mod project;
pub use project::{Project, ProjectSettings, deserialize_bool_or_string};

pub mod well_known;

#[cfg(test)]
#[path = "../tests/fqn_tests.rs"]
mod fqn_tests;

#[cfg(test)]
#[path = "../tests/project_tests.rs"]
mod project_tests;
