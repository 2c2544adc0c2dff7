//! Name lookup for configuration files.

use dynaform_fields::Catalog;

use crate::field::FieldKind;
use crate::validators::ValidatorKind;

/// Resolves `type:` and `kind:` names in configuration to the built-in field
/// kinds and validators.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinCatalog;

impl Catalog for BuiltinCatalog {
    type FieldType = FieldKind;
    type Factory = ValidatorKind;

    fn field_type(&self, name: &str) -> Option<FieldKind> {
        FieldKind::from_name(name)
    }

    fn validator(&self, name: &str) -> Option<ValidatorKind> {
        ValidatorKind::from_name(name)
    }
}
