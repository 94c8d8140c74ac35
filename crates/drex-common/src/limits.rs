//! Centralized limits and thresholds.
//!
//! Deferred type tokens travel through the host's type cache and come back to
//! the resolver untrusted, so every decoding and walking step is bounded.

/// Maximum size of a decompressed signature set.
///
/// A real call site carries a handful of signatures of a few hundred bytes
/// each. Anything beyond this is a corrupt or hostile token and is rejected
/// before it is fully inflated.
pub const MAX_DECOMPRESSED_BYTES: usize = 64 * 1024;

/// Maximum number of signatures captured for a single call site.
///
/// Interface/implementation overloads rarely produce more than a few.
pub const MAX_SIGNATURES_PER_CALL: usize = 64;

/// Maximum depth when walking `extends`/`implements` chains.
///
/// Hierarchy walks are also cycle-checked; this bounds pathological but
/// acyclic chains in broken projects.
pub const MAX_HIERARCHY_DEPTH: u32 = 64;

/// Brotli window size (log2) used by the signature codec.
pub const CODEC_LGWIN: u32 = 22;

/// Brotli quality used by the signature codec.
///
/// The encoder runs on every matching call site while typing, so this stays
/// well below the maximum of 11.
pub const CODEC_QUALITY: u32 = 5;

/// Internal buffer size for brotli readers and writers.
pub const CODEC_BUFFER_SIZE: usize = 4096;
