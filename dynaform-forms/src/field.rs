//! Field kinds, static field specs and bound fields.

use dynaform_fields::{Arguments, FieldDescriptor, FormData};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::form::FormInstance;
use crate::validators::{Check, Rule};

/// The input kind of a field; determines how submitted text becomes data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Text,
    TextArea,
    Integer,
    Hidden,
}

impl FieldKind {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "text" => Some(FieldKind::Text),
            "text_area" => Some(FieldKind::TextArea),
            "integer" => Some(FieldKind::Integer),
            "hidden" => Some(FieldKind::Hidden),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::TextArea => "text_area",
            FieldKind::Integer => "integer",
            FieldKind::Hidden => "hidden",
        }
    }

    /// Convert submitted text to field data.
    pub fn coerce(&self, raw: &str) -> Result<Value, String> {
        match self {
            FieldKind::Integer => raw
                .trim()
                .parse::<i64>()
                .map(Value::from)
                .map_err(|_| "Not a valid integer value.".to_string()),
            FieldKind::Text | FieldKind::TextArea | FieldKind::Hidden => {
                Ok(Value::String(raw.to_string()))
            }
        }
    }

    /// Data of a field with no submitted value and no default.
    fn empty(&self) -> Value {
        match self {
            FieldKind::Integer => Value::Null,
            _ => Value::String(String::new()),
        }
    }
}

/// A field declared on a [`Form`](crate::Form).
///
/// Construction keywords understood: `default` (initial data when nothing is
/// submitted) and `description`.
#[derive(Debug, Clone)]
pub struct FieldSpec {
    pub name: String,
    pub label: String,
    pub kind: FieldKind,
    pub construction: Arguments,
    pub validators: Vec<Rule>,
}

impl FieldSpec {
    pub fn new(name: impl Into<String>, label: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            kind,
            construction: Arguments::new(),
            validators: Vec::new(),
        }
    }

    pub fn validator(mut self, rule: Rule) -> Self {
        self.validators.push(rule);
        self
    }

    pub fn construction(mut self, construction: Arguments) -> Self {
        self.construction = construction;
        self
    }

    pub(crate) fn bind(&self, data: Option<&FormData>) -> BoundField {
        let raw = data.and_then(|d| d.get(&self.name)).map(str::to_string);

        let (value, process_errors) = match &raw {
            Some(raw) => match self.kind.coerce(raw) {
                Ok(value) => (value, Vec::new()),
                Err(e) => (Value::Null, vec![e]),
            },
            None => match self.construction.get("default") {
                Some(default) if !default.is_null() => (default.clone(), Vec::new()),
                _ => (self.kind.empty(), Vec::new()),
            },
        };

        BoundField {
            name: self.name.clone(),
            label: self.label.clone(),
            kind: self.kind,
            description: self
                .construction
                .get("description")
                .and_then(Value::as_str)
                .map(str::to_string),
            raw,
            data: value,
            process_errors,
            errors: Vec::new(),
            validators: self.validators.clone(),
        }
    }
}

impl From<FieldDescriptor<FieldKind, Rule>> for FieldSpec {
    fn from(descriptor: FieldDescriptor<FieldKind, Rule>) -> Self {
        Self {
            name: descriptor.name,
            label: descriptor.label,
            kind: descriptor.field_type,
            construction: descriptor.construction,
            validators: descriptor.validators,
        }
    }
}

/// A field of an instantiated form, holding its submitted data and errors.
#[derive(Debug, Clone)]
pub struct BoundField {
    name: String,
    label: String,
    kind: FieldKind,
    description: Option<String>,
    raw: Option<String>,
    data: Value,
    process_errors: Vec<String>,
    errors: Vec<String>,
    validators: Vec<Rule>,
}

impl BoundField {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// The submitted text, if any was submitted.
    pub fn raw(&self) -> Option<&str> {
        self.raw.as_deref()
    }

    pub fn data(&self) -> &Value {
        &self.data
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn validators(&self) -> &[Rule] {
        &self.validators
    }

    /// Run the validator chain. A stop clears earlier errors and ends the chain.
    pub(crate) fn run_validators(&self, form: &FormInstance) -> Vec<String> {
        let mut errors = self.process_errors.clone();
        for rule in &self.validators {
            match rule.check(form, self) {
                Check::Pass => {}
                Check::Fail(message) => errors.push(message),
                Check::Stop(message) => {
                    errors.clear();
                    errors.extend(message);
                    break;
                }
            }
        }
        errors
    }

    pub(crate) fn set_errors(&mut self, errors: Vec<String>) {
        self.errors = errors;
    }
}
