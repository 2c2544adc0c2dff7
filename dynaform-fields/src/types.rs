//! Core template types for the dynamic fields registry.
//!
//! Field templates describe a canonical field once; every set occurrence
//! submitted at runtime is built from the same template. Argument values are
//! opaque `serde_json::Value`s that the registry never interprets, except for
//! placeholder scanning of string values.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// An ordered bag of positional and keyword arguments.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Arguments {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<Value>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub kwargs: IndexMap<String, Value>,
}

impl Arguments {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a positional argument.
    pub fn arg(mut self, value: impl Into<Value>) -> Self {
        self.args.push(value.into());
        self
    }

    /// Set a keyword argument, replacing any previous value for `key`.
    pub fn kwarg(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.kwargs.insert(key.into(), value.into());
        self
    }

    /// Look up a parameter the way a positional-or-keyword signature binds it:
    /// position `index` first, then keyword `name`.
    pub fn param(&self, index: usize, name: &str) -> Option<&Value> {
        self.args.get(index).or_else(|| self.kwargs.get(name))
    }

    /// Keyword-only lookup.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.kwargs.get(name)
    }

    pub fn is_empty(&self) -> bool {
        self.args.is_empty() && self.kwargs.is_empty()
    }
}

/// A validator factory plus the arguments it was declared with.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatorBinding<V> {
    pub factory: V,
    pub arguments: Arguments,
}

/// The reusable definition of a canonical field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldTemplate<T, V> {
    name: String,
    label: String,
    field_type: T,
    construction: Arguments,
    validators: Vec<ValidatorBinding<V>>,
}

impl<T, V> FieldTemplate<T, V> {
    pub(crate) fn new(name: String, label: String, field_type: T, construction: Arguments) -> Self {
        Self {
            name,
            label,
            field_type,
            construction,
            validators: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn field_type(&self) -> &T {
        &self.field_type
    }

    pub fn construction(&self) -> &Arguments {
        &self.construction
    }

    /// Validator bindings in declaration order.
    pub fn validators(&self) -> &[ValidatorBinding<V>] {
        &self.validators
    }

    pub(crate) fn push_validator(&mut self, binding: ValidatorBinding<V>) {
        self.validators.push(binding);
    }
}

/// Which occurrence of a field a submitted key denotes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SetContext {
    /// The unsuffixed canonical key.
    Canonical,
    /// A set occurrence; holds the digit suffix verbatim (`"07"` stays `"07"`).
    Set(String),
}

impl SetContext {
    pub fn set_number(&self) -> Option<&str> {
        match self {
            SetContext::Canonical => None,
            SetContext::Set(n) => Some(n),
        }
    }

    /// Qualify a canonical identifier for this occurrence.
    pub fn qualify(&self, ident: &str) -> String {
        match self {
            SetContext::Canonical => ident.to_string(),
            SetContext::Set(n) => format!("{ident}_{n}"),
        }
    }
}

/// One field definition handed to the collaborator's schema extension.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor<T, O> {
    pub name: String,
    pub label: String,
    pub field_type: T,
    pub construction: Arguments,
    pub validators: Vec<O>,
}

/// How the extended schema is instantiated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BindingMode {
    /// Submitted data is passed to the instantiation call.
    #[default]
    Raw,
    /// The schema already carries its request data; instantiate without it.
    PreBound,
}
