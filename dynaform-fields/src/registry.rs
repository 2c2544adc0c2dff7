//! The field template registry.
//!
//! Holds canonical field templates and their validator bindings. Templates are
//! only ever appended: a name, once declared, keeps its template for the
//! lifetime of the registry and its validator list only grows.

use indexmap::IndexMap;
use tracing::debug;

use crate::error::{FieldsError, Result};
use crate::types::{Arguments, BindingMode, FieldTemplate, ValidatorBinding};

/// Registry of dynamic field templates.
///
/// `T` is the framework's field type, `V` its validator factory.
///
/// ```rust,ignore
/// let mut fields = DynamicFields::new();
/// fields.add_field("email", "Email", FieldKind::Text, Arguments::new())?;
/// fields.add_validator(
///     "email",
///     ValidatorKind::InputRequired,
///     Arguments::new().kwarg("message", "Please fill in %email%."),
/// )?;
/// let mut form = fields.process(&schema, &post)?;
/// ```
#[derive(Debug, Clone)]
pub struct DynamicFields<T, V> {
    templates: IndexMap<String, FieldTemplate<T, V>>,
    binding: BindingMode,
}

impl<T, V> DynamicFields<T, V> {
    /// Empty registry in [`BindingMode::Raw`].
    pub fn new() -> Self {
        Self::with_binding(BindingMode::Raw)
    }

    /// Empty registry with an explicit binding mode.
    pub fn with_binding(binding: BindingMode) -> Self {
        Self {
            templates: IndexMap::new(),
            binding,
        }
    }

    pub fn binding(&self) -> BindingMode {
        self.binding
    }

    // --- Configuration ---

    /// Declare a canonical field. Fails if `name` is already declared; the
    /// registry is unchanged on failure.
    pub fn add_field(
        &mut self,
        name: impl Into<String>,
        label: impl Into<String>,
        field_type: T,
        construction: Arguments,
    ) -> Result<()> {
        let name = name.into();
        if self.templates.contains_key(&name) {
            return Err(FieldsError::DuplicateField { name });
        }

        let label = label.into();
        debug!(name = %name, label = %label, "added dynamic field");
        self.templates.insert(
            name.clone(),
            FieldTemplate::new(name, label, field_type, construction),
        );
        Ok(())
    }

    /// Append a validator binding to a declared field. Bindings run in the
    /// order they were added.
    pub fn add_validator(&mut self, name: &str, factory: V, arguments: Arguments) -> Result<()> {
        let template = self
            .templates
            .get_mut(name)
            .ok_or_else(|| FieldsError::UnknownField {
                name: name.to_string(),
            })?;

        template.push_validator(ValidatorBinding { factory, arguments });
        debug!(
            name = %name,
            validators = template.validators().len(),
            "added validator to dynamic field"
        );
        Ok(())
    }

    // --- Lookup ---

    /// Exact-name lookup.
    pub fn get(&self, name: &str) -> Option<&FieldTemplate<T, V>> {
        self.templates.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.templates.contains_key(name)
    }

    /// Templates in declaration order.
    pub fn templates(&self) -> impl Iterator<Item = &FieldTemplate<T, V>> {
        self.templates.values()
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

impl<T, V> Default for DynamicFields<T, V> {
    fn default() -> Self {
        Self::new()
    }
}
