//! Record definitions loaded from YAML or JSON.

use crate::core::descriptor::FieldDescriptor;
use crate::core::type_tag::TypeTag;
use crate::field::controller::Field;
use crate::widgets::validators::{self, Validator};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid YAML record: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid JSON record: {0}")]
    Json(#[from] serde_json::Error),
    #[error("field `{0}` is defined more than once")]
    DuplicateField(String),
    #[error("record `{0}` has no fields")]
    NoFields(String),
}

/// One column of a record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub name: String,
    #[serde(flatten)]
    pub descriptor: FieldDescriptor,
}

impl FieldSpec {
    /// Checks implied by the column's flags and type.
    pub fn implied_validator(&self) -> Option<Validator> {
        let mut checks = Vec::new();
        if self.descriptor.config.required {
            checks.push(validators::required("This field is required"));
        }
        match self.descriptor.type_tag {
            TypeTag::Email => checks.push(validators::email("Enter a valid email address")),
            TypeTag::Url => checks.push(validators::url("Enter a valid URL")),
            TypeTag::Number => checks.push(validators::numeric("Enter a number")),
            _ => {}
        }
        match checks.len() {
            0 => None,
            1 => checks.pop(),
            _ => Some(validators::all(checks)),
        }
    }

    /// Unmounted field for this column, keyed by its name.
    pub fn to_field(&self) -> Field {
        let field = Field::new(self.name.as_str(), self.descriptor.clone());
        match self.implied_validator() {
            Some(validator) => field.with_validator(validator),
            None => field,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordSpec {
    pub table: String,
    #[serde(default)]
    pub fields: Vec<FieldSpec>,
}

impl RecordSpec {
    pub fn from_yaml_str(text: &str) -> Result<Self, ConfigError> {
        let spec: Self = serde_yaml::from_str(text)?;
        spec.checked()
    }

    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let spec: Self = serde_json::from_str(text)?;
        spec.checked()
    }

    /// Loads a record file; `.json` files are read as JSON, anything else
    /// as YAML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            Self::from_json_str(&text)
        } else {
            Self::from_yaml_str(&text)
        }
    }

    pub fn to_yaml_string(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|field| field.name == name)
    }

    fn checked(self) -> Result<Self, ConfigError> {
        if self.fields.is_empty() {
            return Err(ConfigError::NoFields(self.table));
        }
        let mut seen = HashSet::new();
        for field in &self.fields {
            if !seen.insert(field.name.as_str()) {
                return Err(ConfigError::DuplicateField(field.name.clone()));
            }
        }
        Ok(self)
    }
}
