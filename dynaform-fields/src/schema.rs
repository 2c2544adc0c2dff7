//! Capabilities the form framework must provide.
//!
//! The registry never renders, parses requests or runs validators itself. It
//! talks to the framework through these traits only.

use crate::data::FormData;
use crate::error::SchemaError;
use crate::types::{Arguments, FieldDescriptor};

/// Something that builds a concrete validator from resolved arguments.
pub trait ValidatorFactory {
    type Validator;

    /// Name used in logs and error messages.
    fn name(&self) -> &str;

    /// Build a validator. The error string is reported as
    /// [`FieldsError::ValidatorConstruction`](crate::FieldsError::ValidatorConstruction).
    fn construct(&self, arguments: Arguments) -> std::result::Result<Self::Validator, String>;
}

/// A statically declared form schema that can be extended with more fields.
pub trait FormSchema {
    type FieldType: Clone;
    type Validator;
    type Extended: ExtendedSchema;

    /// Whether `name` is one of the schema's own static fields.
    fn has_field(&self, name: &str) -> bool;

    /// Static field names in declaration order.
    fn field_names(&self) -> Vec<String>;

    /// Produce a new schema with `fields` appended. Must leave `self` untouched.
    fn extend(
        &self,
        fields: Vec<FieldDescriptor<Self::FieldType, Self::Validator>>,
    ) -> std::result::Result<Self::Extended, SchemaError>;
}

/// An extended schema ready to be instantiated.
pub trait ExtendedSchema {
    type Instance;

    /// Instantiate. `data` is `None` in pre-bound mode, where the schema
    /// already carries its request.
    fn instantiate(&self, data: Option<&FormData>) -> Self::Instance;
}

/// Resolves names used in configuration files to framework values.
pub trait Catalog {
    type FieldType;
    type Factory;

    fn field_type(&self, name: &str) -> Option<Self::FieldType>;

    fn validator(&self, name: &str) -> Option<Self::Factory>;
}
