//! Log formatting helpers.

use serde::Serialize;
use std::fmt::Debug;

/// Wrapper that renders a value as YAML, on a new line, in tracing output.
///
/// ```
/// use dynaform_fields::{resolve_arguments, Arguments, Pretty, SetContext};
///
/// let declared = Arguments::new().kwarg("message", "Please fill in %email%.");
/// let resolved = resolve_arguments(&declared, &SetContext::Set("2".into()));
/// tracing::trace!(
///     key = "email_2",
///     "resolved validator arguments: {}",
///     Pretty(&resolved)
/// );
///
/// let rendered = Pretty(&resolved).to_string();
/// assert!(rendered.starts_with('\n'));
/// assert!(rendered.contains("message: Please fill in email_2."));
/// ```
///
/// Falls back to `{:#?}` when the value cannot be serialized.
pub struct Pretty<T>(pub T);

impl<T: Serialize + Debug> std::fmt::Display for Pretty<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match serde_yaml_ng::to_string(&self.0) {
            Ok(yaml) => write!(f, "\n{}", yaml),
            Err(_) => write!(f, "\n{:#?}", self.0),
        }
    }
}

impl<T: Serialize + Debug> std::fmt::Debug for Pretty<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(self, f)
    }
}
