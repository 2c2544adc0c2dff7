//! Error types for the dynamic fields registry

use std::path::PathBuf;
use thiserror::Error;

/// Result type for dynamic field operations
pub type Result<T> = std::result::Result<T, FieldsError>;

/// Errors that can occur while configuring or processing dynamic fields
#[derive(Debug, Error)]
pub enum FieldsError {
    /// A field template with this canonical name already exists
    #[error("duplicate field name: {name}")]
    DuplicateField { name: String },

    /// A validator was attached to a field that was never declared
    #[error("field not found: {name} (declare it with add_field first)")]
    UnknownField { name: String },

    /// The target schema refused to be extended
    #[error("invalid form schema: {0}")]
    InvalidSchema(#[from] SchemaError),

    /// The collaborator's validator factory rejected the resolved arguments
    #[error("failed to construct validator '{validator}' for field '{field}': {message}")]
    ValidatorConstruction {
        field: String,
        validator: String,
        message: String,
    },

    /// Configuration names a field type the catalog does not provide
    #[error("unknown field type '{type_name}' for field '{field}'")]
    UnknownFieldType { field: String, type_name: String },

    /// Configuration names a validator the catalog does not provide
    #[error("unknown validator '{validator}' for field '{field}'")]
    UnknownValidator { field: String, validator: String },

    /// Configuration file does not exist
    #[error("configuration file not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Configuration file extension is not toml, yaml, yml or json
    #[error("unsupported configuration file format: {path}")]
    UnsupportedFormat { path: PathBuf },

    /// Configuration could not be parsed or extracted
    #[error("failed to parse configuration: {source}")]
    Config { source: Box<figment::Error> },
}

impl From<figment::Error> for FieldsError {
    fn from(error: figment::Error) -> Self {
        FieldsError::Config {
            source: Box::new(error),
        }
    }
}

/// Raised by a collaborator schema that cannot take the requested extension.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct SchemaError {
    pub message: String,
}

impl SchemaError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
