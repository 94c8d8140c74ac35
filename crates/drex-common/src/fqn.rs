//! Fully-qualified class and interface names.
//!
//! Names coming from different sources disagree on the leading namespace
//! separator: the symbol table reports `\Drupal\node\NodeStorage`, entity
//! annotations usually say `Drupal\node\NodeStorage`. Everything that compares
//! or keys on an FQN goes through [`normalize_fqn`] first.

use std::borrow::Cow;
use std::fmt;

/// Namespace separator.
pub const NAMESPACE_SEPARATOR: char = '\\';

/// Normalize a fully-qualified name to exactly one leading separator.
///
/// Surrounding whitespace is trimmed. The empty string stays empty.
pub fn normalize_fqn(name: &str) -> Cow<'_, str> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Cow::Borrowed("");
    }

    let bare = trimmed.trim_start_matches(NAMESPACE_SEPARATOR);
    if bare.len() + 1 == trimmed.len() {
        // Already exactly one leading separator.
        Cow::Borrowed(trimmed)
    } else {
        let mut owned = String::with_capacity(bare.len() + 1);
        owned.push(NAMESPACE_SEPARATOR);
        owned.push_str(bare);
        Cow::Owned(owned)
    }
}

/// Compare two names after normalization.
pub fn fqn_eq(a: &str, b: &str) -> bool {
    normalize_fqn(a) == normalize_fqn(b)
}

/// An owned, normalized fully-qualified name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Fqn(String);

impl Fqn {
    pub fn new(name: &str) -> Self {
        Self(normalize_fqn(name).into_owned())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The last namespace segment (`NodeStorage` for `\Drupal\node\NodeStorage`).
    pub fn short_name(&self) -> &str {
        self.0
            .rsplit(NAMESPACE_SEPARATOR)
            .next()
            .unwrap_or(self.0.as_str())
    }

    /// The namespace part without a trailing separator, `None` for global names.
    pub fn namespace(&self) -> Option<&str> {
        let idx = self.0.rfind(NAMESPACE_SEPARATOR)?;
        if idx == 0 { None } else { Some(&self.0[..idx]) }
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Fqn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Fqn {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl AsRef<str> for Fqn {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
