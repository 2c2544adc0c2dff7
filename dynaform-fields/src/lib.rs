//! Repeated field sets for declarative forms
//!
//! `dynaform-fields` extends a statically declared form schema with fields
//! inferred from submitted data. A field declared once as `email` may arrive
//! as `email`, `email_1`, `email_2`, ... and each occurrence gets its own
//! field with its own validators.
//!
//! # Architecture
//!
//! - **Registry**: [`DynamicFields`] holds canonical field templates and their
//!   validator bindings; it is append-only
//! - **Classification**: submitted keys are static, canonical, set
//!   occurrences `<name>_<digits>`, or silently dropped
//! - **Placeholders**: `%name%` in a validator argument becomes `name_<n>`
//!   for set occurrence `n`, on a fresh copy of the arguments
//! - **Framework-agnostic**: forms, fields and validators come from a
//!   collaborator implementing [`FormSchema`], [`ExtendedSchema`] and
//!   [`ValidatorFactory`]

pub mod assemble;
pub mod binder;
pub mod classify;
pub mod config;
pub mod data;
pub mod error;
pub mod logging;
pub mod placeholder;
pub mod registry;
pub mod schema;
pub mod types;

pub use assemble::{assemble, instantiate, ResolvedField};
pub use binder::bind_validators;
pub use classify::{classify_key, split_set_suffix, KeyClass};
pub use config::{ConfigFormat, ConfigLoader, FieldConfig, FieldsConfig, ValidatorConfig};
pub use data::FormData;
pub use error::{FieldsError, Result, SchemaError};
pub use logging::Pretty;
pub use placeholder::{
    argument_placeholders, placeholders, resolve_arguments, substitute, PLACEHOLDER_MARKER,
};
pub use registry::DynamicFields;
pub use schema::{Catalog, ExtendedSchema, FormSchema, ValidatorFactory};
pub use types::{
    Arguments, BindingMode, FieldDescriptor, FieldTemplate, SetContext, ValidatorBinding,
};
