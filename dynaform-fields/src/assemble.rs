//! Form assembly: scan submitted keys, resolve dynamic fields, extend the
//! target schema and instantiate it.
//!
//! Every `process` call is independent. Nothing resolved during one call is
//! kept for the next, and the registry is only read.

use tracing::debug;

use crate::binder::bind_validators;
use crate::classify::KeyClass;
use crate::data::FormData;
use crate::error::Result;
use crate::registry::DynamicFields;
use crate::schema::{ExtendedSchema, FormSchema, ValidatorFactory};
use crate::types::{BindingMode, FieldDescriptor, FieldTemplate, SetContext};

/// A submitted key matched to its template, with validators bound for it.
#[derive(Debug)]
pub struct ResolvedField<'r, T, V: ValidatorFactory> {
    pub key: String,
    pub template: &'r FieldTemplate<T, V>,
    pub context: SetContext,
    pub validators: Vec<V::Validator>,
}

impl<T: Clone, V: ValidatorFactory> ResolvedField<'_, T, V> {
    /// Field definition for the schema extension. Template construction
    /// arguments are cloned per descriptor.
    pub fn into_descriptor(self) -> FieldDescriptor<T, V::Validator> {
        FieldDescriptor {
            name: self.key,
            label: self.template.label().to_string(),
            field_type: self.template.field_type().clone(),
            construction: self.template.construction().clone(),
            validators: self.validators,
        }
    }
}

impl<T, V: ValidatorFactory> DynamicFields<T, V> {
    /// Resolve every dynamic key in `data`, in first-seen order, one field
    /// per distinct key. Static and unrecognized keys produce nothing.
    pub fn resolve<'r>(
        &'r self,
        is_static: impl Fn(&str) -> bool,
        data: &FormData,
    ) -> Result<Vec<ResolvedField<'r, T, V>>> {
        let mut resolved = Vec::new();
        let mut skipped = 0usize;
        let mut dropped = 0usize;

        for key in data.keys() {
            let class = self.classify(key, &is_static);
            let Some((name, context)) = class.dynamic() else {
                match class {
                    KeyClass::Static => skipped += 1,
                    _ => dropped += 1,
                }
                continue;
            };
            let Some(template) = self.get(name) else {
                dropped += 1;
                continue;
            };

            let validators = bind_validators(template, key, &context)?;
            resolved.push(ResolvedField {
                key: key.to_string(),
                template,
                context,
                validators,
            });
        }

        debug!(
            dynamic = resolved.len(),
            static_keys = skipped,
            dropped,
            "resolved submitted keys"
        );
        Ok(resolved)
    }

    /// Extend `schema` with one field per dynamic key in `data` and return an
    /// instance of the extended schema.
    ///
    /// In [`BindingMode::Raw`] the instance is built from `data`; in
    /// [`BindingMode::PreBound`] the schema is expected to carry its own
    /// request and is instantiated without it.
    pub fn process<S>(
        &self,
        schema: &S,
        data: &FormData,
    ) -> Result<<S::Extended as ExtendedSchema>::Instance>
    where
        T: Clone,
        S: FormSchema<FieldType = T, Validator = V::Validator>,
    {
        let resolved = self.resolve(|key| schema.has_field(key), data)?;
        let extended = assemble(schema, resolved)?;
        Ok(instantiate(&extended, self.binding(), data))
    }
}

/// Extend `schema` with the resolved fields. Static fields are untouched.
pub fn assemble<T, V, S>(schema: &S, resolved: Vec<ResolvedField<'_, T, V>>) -> Result<S::Extended>
where
    T: Clone,
    V: ValidatorFactory,
    S: FormSchema<FieldType = T, Validator = V::Validator>,
{
    let descriptors: Vec<_> = resolved
        .into_iter()
        .map(ResolvedField::into_descriptor)
        .collect();
    debug!(
        static_fields = schema.field_names().len(),
        dynamic_fields = descriptors.len(),
        "extending form schema"
    );
    Ok(schema.extend(descriptors)?)
}

/// Instantiate according to the registry's binding mode.
pub fn instantiate<E: ExtendedSchema>(
    extended: &E,
    binding: BindingMode,
    data: &FormData,
) -> E::Instance {
    match binding {
        BindingMode::Raw => extended.instantiate(Some(data)),
        BindingMode::PreBound => extended.instantiate(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{FieldsError, SchemaError};
    use crate::types::Arguments;
    use serde_json::{json, Value};

    /// Records its message argument.
    #[derive(Debug, Clone, PartialEq)]
    struct Message;

    impl ValidatorFactory for Message {
        type Validator = Value;

        fn name(&self) -> &str {
            "message"
        }

        fn construct(&self, arguments: Arguments) -> std::result::Result<Value, String> {
            Ok(arguments.get("message").cloned().unwrap_or(Value::Null))
        }
    }

    /// Minimal schema: a list of names, optionally refusing extension.
    #[derive(Debug, Clone, Default)]
    struct Schema {
        statics: Vec<String>,
        dynamic: Vec<FieldDescriptor<&'static str, Value>>,
        refuse: bool,
    }

    #[derive(Debug)]
    struct Instance {
        names: Vec<String>,
        dynamic: Vec<FieldDescriptor<&'static str, Value>>,
        data: Option<FormData>,
    }

    impl FormSchema for Schema {
        type FieldType = &'static str;
        type Validator = Value;
        type Extended = Schema;

        fn has_field(&self, name: &str) -> bool {
            self.statics.iter().any(|s| s == name)
        }

        fn field_names(&self) -> Vec<String> {
            self.statics.clone()
        }

        fn extend(
            &self,
            fields: Vec<FieldDescriptor<&'static str, Value>>,
        ) -> std::result::Result<Schema, SchemaError> {
            if self.refuse {
                return Err(SchemaError::new("schema is sealed"));
            }
            let mut extended = self.clone();
            extended.dynamic.extend(fields);
            Ok(extended)
        }
    }

    impl ExtendedSchema for Schema {
        type Instance = Instance;

        fn instantiate(&self, data: Option<&FormData>) -> Instance {
            let names = self
                .statics
                .iter()
                .cloned()
                .chain(self.dynamic.iter().map(|d| d.name.clone()))
                .collect();
            Instance {
                names,
                dynamic: self.dynamic.clone(),
                data: data.cloned(),
            }
        }
    }

    fn schema() -> Schema {
        Schema {
            statics: vec!["first_name".into(), "last_name".into()],
            ..Schema::default()
        }
    }

    fn registry(binding: BindingMode) -> DynamicFields<&'static str, Message> {
        let mut fields = DynamicFields::with_binding(binding);
        fields
            .add_field(
                "email",
                "Email",
                "text",
                Arguments::new().kwarg("default", ""),
            )
            .unwrap();
        fields
            .add_field("telephone", "Telephone", "text", Arguments::new())
            .unwrap();
        fields
            .add_validator(
                "email",
                Message,
                Arguments::new().kwarg("message", "Please fill in %telephone% or %pager%."),
            )
            .unwrap();
        fields
    }

    #[test]
    fn unregistered_names_add_nothing() {
        let data = FormData::new()
            .with("first_name", "John")
            .with("last_name", "Doe")
            .with("pager_1", "")
            .with("unknown", "x");
        let instance = registry(BindingMode::Raw)
            .process(&schema(), &data)
            .unwrap();
        assert_eq!(instance.names, ["first_name", "last_name"]);
    }

    #[test]
    fn canonical_and_set_keys_become_fields() {
        let data = FormData::new()
            .with("first_name", "John")
            .with("email", "")
            .with("email_1", "")
            .with("telephone_1", "")
            .with("email_2", "");
        let instance = registry(BindingMode::Raw)
            .process(&schema(), &data)
            .unwrap();

        assert_eq!(
            instance.names,
            [
                "first_name",
                "last_name",
                "email",
                "email_1",
                "telephone_1",
                "email_2",
            ]
        );
        let validators: Vec<_> = instance.dynamic.iter().map(|d| &d.validators).collect();
        assert_eq!(
            validators[0],
            &[json!("Please fill in %telephone% or %pager%.")]
        );
        assert_eq!(
            validators[1],
            &[json!("Please fill in telephone_1 or pager_1.")]
        );
        assert!(validators[2].is_empty());
        assert_eq!(
            validators[3],
            &[json!("Please fill in telephone_2 or pager_2.")]
        );
    }

    #[test]
    fn descriptors_carry_template_definition() {
        let data = FormData::new().with("email_3", "a@b.c");
        let instance = registry(BindingMode::Raw)
            .process(&schema(), &data)
            .unwrap();
        let email = &instance.dynamic[0];
        assert_eq!(email.name, "email_3");
        assert_eq!(email.label, "Email");
        assert_eq!(email.field_type, "text");
        assert_eq!(email.construction.get("default"), Some(&json!("")));
    }

    #[test]
    fn duplicate_keys_yield_one_field() {
        let data = FormData::new().with("email_1", "a").with("email_1", "b");
        let instance = registry(BindingMode::Raw)
            .process(&schema(), &data)
            .unwrap();
        assert_eq!(instance.names, ["first_name", "last_name", "email_1"]);
    }

    #[test]
    fn binding_mode_selects_instantiation() {
        let data = FormData::new().with("email", "x");

        let raw = registry(BindingMode::Raw)
            .process(&schema(), &data)
            .unwrap();
        assert_eq!(raw.data, Some(data.clone()));

        let pre = registry(BindingMode::PreBound)
            .process(&schema(), &data)
            .unwrap();
        assert_eq!(pre.data, None);
        assert_eq!(pre.names, ["first_name", "last_name", "email"]);
    }

    #[test]
    fn refused_extension_is_invalid_schema() {
        let sealed = Schema {
            refuse: true,
            ..schema()
        };
        let err = registry(BindingMode::Raw)
            .process(&sealed, &FormData::new().with("email", ""))
            .unwrap_err();
        assert!(matches!(err, FieldsError::InvalidSchema(_)));
    }

    #[test]
    fn registry_is_reusable_and_unchanged() {
        let fields = registry(BindingMode::Raw);
        let before = fields.get("email").unwrap().clone();

        let second = FormData::new().with("email_2", "");
        let first = FormData::new().with("email_1", "");
        let a = fields.process(&schema(), &second).unwrap();
        let b = fields.process(&schema(), &first).unwrap();

        assert_eq!(
            a.dynamic[0].validators,
            [json!("Please fill in telephone_2 or pager_2.")]
        );
        assert_eq!(
            b.dynamic[0].validators,
            [json!("Please fill in telephone_1 or pager_1.")]
        );
        assert_eq!(fields.get("email").unwrap(), &before);
    }

    #[test]
    fn resolve_reports_contexts() {
        let fields = registry(BindingMode::Raw);
        let data = FormData::new().with("email", "").with("telephone_9", "");
        let resolved = fields.resolve(|_| false, &data).unwrap();
        let contexts: Vec<_> = resolved
            .iter()
            .map(|r| (r.key.as_str(), r.template.name(), r.context.clone()))
            .collect();
        assert_eq!(
            contexts,
            [
                ("email", "email", SetContext::Canonical),
                ("telephone_9", "telephone", SetContext::Set("9".into())),
            ]
        );
    }
}
