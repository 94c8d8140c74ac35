//! Deferred type tokens.
//!
//! A token stands in for a type that is not resolved yet:
//!
//! ```text
//! #<provider-tag><compressed-signature-set><split-sentinel><identifier>
//! ```
//!
//! The provider tag routes the token back to the provider that created it.
//! The signature set is opaque (see `codec`); the identifier is the literal
//! argument captured at the call site. A token whose remainder does not split
//! into exactly two parts on the sentinel is malformed.

use drex_common::limits::MAX_SIGNATURES_PER_CALL;
use memchr::memmem;
use std::fmt;

use crate::codec::{CodecError, SignatureCodec};

/// First character of every deferred type token.
pub const TOKEN_PREFIX: char = '#';

/// Provider tag of the entity storage provider.
pub const ENTITY_STORAGE_TAG: char = '\u{3334}';

/// Separates the signature payload from the identifier.
pub const SPLIT_SENTINEL: char = '\u{3333}';

const SPLIT_SENTINEL_UTF8: &[u8] = "\u{3333}".as_bytes();

#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("identifier is empty")]
    EmptyIdentifier,
    #[error("identifier contains the split sentinel")]
    IdentifierContainsSentinel,
    #[error("provider tag {0:?} is reserved")]
    ReservedTag(char),
    #[error("{count} signatures exceed the limit of {limit}")]
    TooManySignatures { count: usize, limit: usize },
    #[error(transparent)]
    Codec(#[from] CodecError),
}

/// An encoded deferred type.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct DeferredTypeToken(String);

impl DeferredTypeToken {
    /// Build a token for `tag` from a signature sequence and an identifier.
    pub fn new<S: AsRef<str>>(
        tag: char,
        signatures: &[S],
        identifier: &str,
    ) -> Result<Self, TokenError> {
        if tag == SPLIT_SENTINEL || tag == TOKEN_PREFIX {
            return Err(TokenError::ReservedTag(tag));
        }
        if identifier.is_empty() {
            return Err(TokenError::EmptyIdentifier);
        }
        if identifier.contains(SPLIT_SENTINEL) {
            return Err(TokenError::IdentifierContainsSentinel);
        }
        if signatures.len() > MAX_SIGNATURES_PER_CALL {
            return Err(TokenError::TooManySignatures {
                count: signatures.len(),
                limit: MAX_SIGNATURES_PER_CALL,
            });
        }

        let payload = SignatureCodec::encode_signatures(signatures)?;
        let mut token = String::with_capacity(
            TOKEN_PREFIX.len_utf8()
                + tag.len_utf8()
                + payload.len()
                + SPLIT_SENTINEL.len_utf8()
                + identifier.len(),
        );
        token.push(TOKEN_PREFIX);
        token.push(tag);
        token.push_str(&payload);
        token.push(SPLIT_SENTINEL);
        token.push_str(identifier);
        Ok(Self(token))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for DeferredTypeToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for DeferredTypeToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Provider tag of a token: the character after `#`.
pub fn token_tag(token: &str) -> Option<char> {
    let mut chars = token.strip_prefix(TOKEN_PREFIX)?.chars();
    chars.next()
}

/// The two halves of a well-formed token.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TokenParts<'a> {
    /// Compressed signature set, still encoded.
    pub payload: &'a str,
    pub identifier: &'a str,
}

impl<'a> TokenParts<'a> {
    /// Split a token produced for `tag`.
    ///
    /// Returns `None` when the token carries another tag, does not contain
    /// exactly one split sentinel, or has an empty identifier.
    pub fn parse(tag: char, token: &'a str) -> Option<Self> {
        let rest = token.strip_prefix(TOKEN_PREFIX)?.strip_prefix(tag)?;

        let mut sentinels = memmem::find_iter(rest.as_bytes(), SPLIT_SENTINEL_UTF8);
        let split = sentinels.next()?;
        if sentinels.next().is_some() {
            return None;
        }

        let payload = &rest[..split];
        let identifier = &rest[split + SPLIT_SENTINEL_UTF8.len()..];
        if identifier.is_empty() {
            return None;
        }
        Some(Self {
            payload,
            identifier,
        })
    }

    /// Decompress the signature set.
    pub fn signatures(&self) -> Result<Vec<String>, CodecError> {
        SignatureCodec::decode_signatures(self.payload)
    }
}
