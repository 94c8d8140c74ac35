//! Editor features built on the drex indexes.
//!
//! - `completions`: completion item types and the theme hook provider
//! - `injection`: the "Drupal injection" intention

pub mod completions;
pub use completions::{CompletionItem, CompletionItemKind, ThemeCompletionProvider};

pub mod injection;
pub use injection::{DependencyInjectionIntention, InjectionReport};

#[cfg(test)]
#[path = "../tests/completions_tests.rs"]
mod completions_tests;

#[cfg(test)]
#[path = "../tests/injection_tests.rs"]
mod injection_tests;
