//! Declarative registry configuration loaded with Figment.
//!
//! Sources are layered in the order they are added (later files win for
//! scalar keys, `fields` lists are concatenated), then the environment:
//!
//! 1. Defaults (`binding: raw`, no fields)
//! 2. Configuration files, TOML/YAML/JSON by extension
//! 3. `DYNAFORM_BINDING`
//!
//! ```yaml
//! binding: pre-bound
//! fields:
//!   - name: email
//!     label: Email
//!     type: text
//!     validators:
//!       - kind: input_required
//!         kwargs:
//!           message: "Please fill in %email%."
//! ```

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Json, Serialized, Toml, Yaml},
    Figment,
};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, trace};

use crate::error::{FieldsError, Result};
use crate::registry::DynamicFields;
use crate::schema::Catalog;
use crate::types::{Arguments, BindingMode};

/// Prefix for environment overrides.
pub const ENV_PREFIX: &str = "DYNAFORM_";

/// Top-level configuration document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldsConfig {
    #[serde(default)]
    pub binding: BindingMode,
    #[serde(default)]
    pub fields: Vec<FieldConfig>,
}

/// One declared field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldConfig {
    pub name: String,
    /// Defaults to `name`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(rename = "type")]
    pub type_: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<Value>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub kwargs: IndexMap<String, Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub validators: Vec<ValidatorConfig>,
}

/// One validator attached to a field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidatorConfig {
    pub kind: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<Value>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub kwargs: IndexMap<String, Value>,
}

impl FieldConfig {
    pub fn label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.name)
    }

    pub fn construction(&self) -> Arguments {
        Arguments {
            args: self.args.clone(),
            kwargs: self.kwargs.clone(),
        }
    }
}

impl ValidatorConfig {
    pub fn arguments(&self) -> Arguments {
        Arguments {
            args: self.args.clone(),
            kwargs: self.kwargs.clone(),
        }
    }
}

impl FieldsConfig {
    /// Replay the declarations into a fresh registry, resolving type and
    /// validator names through `catalog`.
    pub fn build<C: Catalog>(
        &self,
        catalog: &C,
    ) -> Result<DynamicFields<C::FieldType, C::Factory>> {
        let mut registry = DynamicFields::with_binding(self.binding);

        for field in &self.fields {
            let field_type =
                catalog
                    .field_type(&field.type_)
                    .ok_or_else(|| FieldsError::UnknownFieldType {
                        field: field.name.clone(),
                        type_name: field.type_.clone(),
                    })?;
            registry
                .add_field(&field.name, field.label(), field_type, field.construction())?;

            for validator in &field.validators {
                let factory =
                    catalog
                        .validator(&validator.kind)
                        .ok_or_else(|| FieldsError::UnknownValidator {
                            field: field.name.clone(),
                            validator: validator.kind.clone(),
                        })?;
                registry
                    .add_validator(&field.name, factory, validator.arguments())?;
            }
        }

        debug!(
            fields = registry.len(),
            binding = ?registry.binding(),
            "built dynamic fields from configuration"
        );
        Ok(registry)
    }
}

/// Supported configuration file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Toml,
    Yaml,
    Json,
}

impl ConfigFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()?.to_ascii_lowercase().as_str() {
            "toml" => Some(ConfigFormat::Toml),
            "yaml" | "yml" => Some(ConfigFormat::Yaml),
            "json" => Some(ConfigFormat::Json),
            _ => None,
        }
    }
}

/// Loads [`FieldsConfig`] from files and the environment.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    files: Vec<PathBuf>,
    env_prefix: String,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self {
            files: Vec::new(),
            env_prefix: ENV_PREFIX.to_string(),
        }
    }

    /// Add a configuration file. Files are layered in the order added.
    pub fn file(mut self, path: impl Into<PathBuf>) -> Self {
        self.files.push(path.into());
        self
    }

    /// Override the environment variable prefix.
    pub fn env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Load and extract the configuration.
    pub fn load(&self) -> Result<FieldsConfig> {
        let config: FieldsConfig = self.build_figment()?.extract()?;
        debug!(
            files = self.files.len(),
            fields = config.fields.len(),
            "loaded dynamic field configuration"
        );
        Ok(config)
    }

    fn build_figment(&self) -> Result<Figment> {
        let mut figment = Figment::new().merge(Serialized::defaults(FieldsConfig::default()));

        for path in &self.files {
            if !path.exists() {
                return Err(FieldsError::ConfigNotFound { path: path.clone() });
            }
            let format = ConfigFormat::from_path(path)
                .ok_or_else(|| FieldsError::UnsupportedFormat { path: path.clone() })?;
            trace!("loading config file: {} ({:?})", path.display(), format);

            figment = match format {
                ConfigFormat::Toml => figment.admerge(Toml::file(path)),
                ConfigFormat::Yaml => figment.admerge(Yaml::file(path)),
                ConfigFormat::Json => figment.admerge(Json::file(path)),
            };
        }

        Ok(figment.merge(Env::prefixed(&self.env_prefix).only(&["binding"])))
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
