//! Result of resolving a deferred type.

use indexmap::IndexSet;
use rustc_hash::FxBuildHasher;
use serde::{Serialize, Serializer};
use std::fmt;

/// A de-duplicated set of fully-qualified type names.
///
/// Equality ignores order. Iteration follows first insertion, so display is
/// stable for a given index snapshot.
#[derive(Clone, Debug, Default)]
pub struct ResolvedType {
    names: IndexSet<String, FxBuildHasher>,
}

impl ResolvedType {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a name; returns false if it was already present.
    pub fn insert(&mut self, fqn: impl Into<String>) -> bool {
        self.names.insert(fqn.into())
    }

    pub fn contains(&self, fqn: &str) -> bool {
        self.names.contains(fqn)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Names sorted alphabetically.
    pub fn sorted(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.iter().collect();
        names.sort_unstable();
        names
    }
}

impl PartialEq for ResolvedType {
    fn eq(&self, other: &Self) -> bool {
        self.names.len() == other.names.len() && self.names.iter().all(|n| other.names.contains(n))
    }
}

impl Eq for ResolvedType {}

impl<S: Into<String>> FromIterator<S> for ResolvedType {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut resolved = Self::new();
        resolved.extend(iter);
        resolved
    }
}

impl<S: Into<String>> Extend<S> for ResolvedType {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        self.names.extend(iter.into_iter().map(Into::into));
    }
}

impl<'a> IntoIterator for &'a ResolvedType {
    type Item = &'a String;
    type IntoIter = indexmap::set::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.names.iter()
    }
}

/// Renders as a union: `\A|\B`.
impl fmt::Display for ResolvedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, name) in self.names.iter().enumerate() {
            if i > 0 {
                f.write_str("|")?;
            }
            f.write_str(name)?;
        }
        Ok(())
    }
}

impl Serialize for ResolvedType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.names.iter())
    }
}
