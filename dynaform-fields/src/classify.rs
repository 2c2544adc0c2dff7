//! Submitted key classification.
//!
//! A key is a static schema field, a canonical dynamic field, a set occurrence
//! `<canonical>_<digits>`, or unrecognized. Canonical names may themselves
//! contain underscores and digits, so only the final `_`-delimited segment is
//! ever treated as a set number, and the remaining prefix must match a
//! registered name exactly.

use tracing::trace;

use crate::registry::DynamicFields;
use crate::types::SetContext;

/// What a submitted key denotes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyClass<'k> {
    /// One of the target schema's own fields; left to the framework.
    Static,
    /// Exact canonical name.
    Canonical { name: &'k str },
    /// `<name>_<set_number>`.
    SetOccurrence { name: &'k str, set_number: &'k str },
    /// Neither; dropped without error.
    Unrecognized,
}

impl<'k> KeyClass<'k> {
    /// Canonical name and set context for dynamic classes.
    pub fn dynamic(&self) -> Option<(&'k str, SetContext)> {
        match *self {
            KeyClass::Canonical { name } => Some((name, SetContext::Canonical)),
            KeyClass::SetOccurrence { name, set_number } => {
                Some((name, SetContext::Set(set_number.to_string())))
            }
            KeyClass::Static | KeyClass::Unrecognized => None,
        }
    }
}

/// Split `key` into `(prefix, digits)` when its final `_` segment is a
/// non-empty run of ASCII digits.
pub fn split_set_suffix(key: &str) -> Option<(&str, &str)> {
    let (prefix, suffix) = key.rsplit_once('_')?;
    if suffix.is_empty() || !suffix.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some((prefix, suffix))
}

/// Classify `key` against the schema's static fields and the registered names.
pub fn classify_key<'k>(
    key: &'k str,
    is_static: impl Fn(&str) -> bool,
    is_registered: impl Fn(&str) -> bool,
) -> KeyClass<'k> {
    let class = if is_static(key) {
        KeyClass::Static
    } else if is_registered(key) {
        KeyClass::Canonical { name: key }
    } else {
        match split_set_suffix(key) {
            Some((name, set_number)) if is_registered(name) => {
                KeyClass::SetOccurrence { name, set_number }
            }
            _ => KeyClass::Unrecognized,
        }
    };
    trace!(key, ?class, "classified submitted key");
    class
}

impl<T, V> DynamicFields<T, V> {
    /// Classify a submitted key against this registry.
    pub fn classify<'k>(&self, key: &'k str, is_static: impl Fn(&str) -> bool) -> KeyClass<'k> {
        classify_key(key, is_static, |name| self.contains(name))
    }
}
