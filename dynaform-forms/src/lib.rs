//! Form framework for dynaform
//!
//! Provides the pieces `dynaform-fields` needs from a form framework: a
//! [`Form`] schema that can be extended, [`FormInstance`]s with `validate()`
//! and per-field errors, [`FieldKind`]s and the built-in [`ValidatorKind`]
//! factories.
//!
//! ```rust,ignore
//! let schema = Form::new()
//!     .field(FieldSpec::new("first_name", "First name", FieldKind::Text)
//!         .validator(Rule::input_required()));
//!
//! let mut fields = DynamicFields::new();
//! fields.add_field("email", "Email", FieldKind::Text, Arguments::new())?;
//! fields.add_validator("email", ValidatorKind::InputRequired,
//!     Arguments::new().kwarg("message", "Please fill in %email%."))?;
//!
//! let mut form = fields.process(&schema, &post)?;
//! form.validate();
//! ```

pub mod catalog;
pub mod field;
pub mod form;
pub mod validators;

pub use catalog::BuiltinCatalog;
pub use field::{BoundField, FieldKind, FieldSpec};
pub use form::{Form, FormInstance};
pub use validators::{interpolate, Bound, Check, Rule, ValidatorKind};
