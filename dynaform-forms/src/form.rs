//! Form schemas and instances.

use dynaform_fields::{ExtendedSchema, FieldDescriptor, FormData, FormSchema, SchemaError};
use indexmap::IndexMap;
use serde_json::Value;
use tracing::{debug, trace};

use crate::field::{BoundField, FieldKind, FieldSpec};
use crate::validators::Rule;

/// A form schema: ordered static fields plus, for pre-bound use, the request
/// it is associated with.
#[derive(Debug, Clone, Default)]
pub struct Form {
    fields: Vec<FieldSpec>,
    request: Option<FormData>,
}

impl Form {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a static field.
    pub fn field(mut self, spec: FieldSpec) -> Self {
        self.fields.push(spec);
        self
    }

    /// Associate the request this schema is instantiated from when no data is
    /// passed explicitly.
    pub fn bound_to(mut self, request: FormData) -> Self {
        self.request = Some(request);
        self
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn request(&self) -> Option<&FormData> {
        self.request.as_ref()
    }
}

impl FormSchema for Form {
    type FieldType = FieldKind;
    type Validator = Rule;
    type Extended = Form;

    fn has_field(&self, name: &str) -> bool {
        self.fields.iter().any(|f| f.name == name)
    }

    fn field_names(&self) -> Vec<String> {
        self.fields.iter().map(|f| f.name.clone()).collect()
    }

    fn extend(&self, fields: Vec<FieldDescriptor<FieldKind, Rule>>) -> Result<Form, SchemaError> {
        let mut extended = self.clone();
        for descriptor in fields {
            if extended.has_field(&descriptor.name) {
                return Err(SchemaError::new(format!(
                    "field '{}' already exists on the form",
                    descriptor.name
                )));
            }
            extended.fields.push(descriptor.into());
        }
        Ok(extended)
    }
}

impl ExtendedSchema for Form {
    type Instance = FormInstance;

    fn instantiate(&self, data: Option<&FormData>) -> FormInstance {
        let data = data.or(self.request.as_ref());
        let fields = self
            .fields
            .iter()
            .map(|spec| (spec.name.clone(), spec.bind(data)))
            .collect();
        FormInstance { fields }
    }
}

/// An instantiated form.
#[derive(Debug, Clone)]
pub struct FormInstance {
    fields: IndexMap<String, BoundField>,
}

impl FormInstance {
    pub fn field(&self, name: &str) -> Option<&BoundField> {
        self.fields.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Field names in schema order.
    pub fn field_names(&self) -> Vec<&str> {
        self.fields.keys().map(String::as_str).collect()
    }

    pub fn data(&self, name: &str) -> Option<&Value> {
        self.field(name).map(BoundField::data)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Run every field's validators. Returns whether no field has errors.
    pub fn validate(&mut self) -> bool {
        let form: &FormInstance = self;
        let results: Vec<Vec<String>> = form
            .fields
            .values()
            .map(|field| field.run_validators(form))
            .collect();

        let mut invalid = 0usize;
        for (field, errors) in self.fields.values_mut().zip(results) {
            if !errors.is_empty() {
                trace!(field = field.name(), ?errors, "field failed validation");
                invalid += 1;
            }
            field.set_errors(errors);
        }

        debug!(fields = self.fields.len(), invalid, "validated form");
        invalid == 0
    }

    /// Errors of the last `validate`, keyed by field name. Fields without
    /// errors are omitted.
    pub fn errors(&self) -> IndexMap<&str, &[String]> {
        self.fields
            .values()
            .filter(|f| !f.errors().is_empty())
            .map(|f| (f.name(), f.errors()))
            .collect()
    }
}
