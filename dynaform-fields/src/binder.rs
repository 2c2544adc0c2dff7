//! Validator binding for one resolved occurrence.

use tracing::trace;

use crate::error::{FieldsError, Result};
use crate::logging::Pretty;
use crate::placeholder::{argument_placeholders, resolve_arguments};
use crate::schema::ValidatorFactory;
use crate::types::{FieldTemplate, SetContext};

/// Build the concrete validators of `template` for the occurrence `key`,
/// in declaration order, with placeholders resolved for `context`.
pub fn bind_validators<T, V: ValidatorFactory>(
    template: &FieldTemplate<T, V>,
    key: &str,
    context: &SetContext,
) -> Result<Vec<V::Validator>> {
    template
        .validators()
        .iter()
        .map(|binding| {
            let arguments = resolve_arguments(&binding.arguments, context);
            trace!(
                key,
                validator = binding.factory.name(),
                references = ?argument_placeholders(&binding.arguments),
                "resolved validator arguments: {}",
                Pretty(&arguments)
            );
            binding
                .factory
                .construct(arguments)
                .map_err(|message| FieldsError::ValidatorConstruction {
                    field: key.to_string(),
                    validator: binding.factory.name().to_string(),
                    message,
                })
        })
        .collect()
}
