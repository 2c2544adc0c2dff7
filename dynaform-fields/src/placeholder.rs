//! Set-scoped placeholder substitution for validator arguments.
//!
//! A placeholder is an identifier wrapped in [`PLACEHOLDER_MARKER`]s:
//! `%telephone%`. For a set occurrence `n` every placeholder in a string
//! argument becomes `telephone_n`. Canonical occurrences leave arguments
//! exactly as declared. Non-string arguments are never touched.
//!
//! Resolution always returns a fresh [`Arguments`]; the declared bag is
//! never modified, so occurrences of the same template cannot observe one
//! another.

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use crate::types::{Arguments, SetContext};

/// Character delimiting a placeholder identifier.
pub const PLACEHOLDER_MARKER: char = '%';

static PLACEHOLDER: Lazy<Regex> = Lazy::new(|| {
    let marker = regex::escape(&PLACEHOLDER_MARKER.to_string());
    Regex::new(&format!("{marker}([A-Za-z0-9_]+){marker}"))
        .expect("placeholder pattern is a valid regex")
});

/// Rewrite every placeholder in `text` for set number `set_number`.
pub fn substitute<'a>(text: &'a str, set_number: &str) -> Cow<'a, str> {
    PLACEHOLDER.replace_all(text, |caps: &regex::Captures| {
        format!("{}_{}", &caps[1], set_number)
    })
}

/// Identifiers referenced by placeholders in `text`, in order of appearance.
pub fn placeholders(text: &str) -> Vec<&str> {
    PLACEHOLDER
        .captures_iter(text)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
        .collect()
}

/// Identifiers referenced by placeholders in the string arguments of
/// `arguments`, positional arguments first.
pub fn argument_placeholders(arguments: &Arguments) -> Vec<&str> {
    arguments
        .args
        .iter()
        .chain(arguments.kwargs.values())
        .filter_map(Value::as_str)
        .flat_map(placeholders)
        .collect()
}

/// Resolve a single value. Only strings are rewritten.
pub fn resolve_value(value: &Value, context: &SetContext) -> Value {
    match (value, context.set_number()) {
        (Value::String(s), Some(n)) => Value::String(substitute(s, n).into_owned()),
        _ => value.clone(),
    }
}

/// Resolve every positional and keyword argument into an independent copy.
pub fn resolve_arguments(arguments: &Arguments, context: &SetContext) -> Arguments {
    Arguments {
        args: arguments
            .args
            .iter()
            .map(|v| resolve_value(v, context))
            .collect(),
        kwargs: arguments
            .kwargs
            .iter()
            .map(|(k, v)| (k.clone(), resolve_value(v, context)))
            .collect(),
    }
}
