//! Signature strings addressing declarations in the symbol table.
//!
//! The format follows the host's conventions: `#M#C\Fqn.method` for methods,
//! `#F\fqn` for functions, `#C\Fqn` for types. The analysis treats
//! signatures as opaque keys; these helpers exist for index builders.

use drex_common::normalize_fqn;

pub const METHOD_PREFIX: &str = "#M#C";
pub const FUNCTION_PREFIX: &str = "#F";
pub const CLASS_PREFIX: &str = "#C";

pub fn method_signature(class_fqn: &str, method: &str) -> String {
    format!("{}{}.{}", METHOD_PREFIX, normalize_fqn(class_fqn), method)
}

pub fn function_signature(fqn: &str) -> String {
    format!("{}{}", FUNCTION_PREFIX, normalize_fqn(fqn))
}

pub fn class_signature(fqn: &str) -> String {
    format!("{}{}", CLASS_PREFIX, normalize_fqn(fqn))
}
