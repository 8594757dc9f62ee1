//! Configuration schema (schemadiff.toml)
//!
//! ```toml
//! dialect = "postgres"
//!
//! [compare]
//! types = ["table", "column", "primaryKey"]
//! include_catalog = false
//! diff_column_order = false
//!
//! [compare.suppressed_fields]
//! column = ["remarks"]
//!
//! [[compare.schema_comparisons]]
//! reference = "dev"
//! comparison = "prod"
//! ```

use crate::control::{CompareControl, SchemaComparison};
use crate::database::{CatalogAndSchema, DialectProfile};
use crate::field::{Field, ObjectKind};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Target dialect: a preset name or a custom profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DialectConfig {
    /// One of the built-in presets, e.g. `postgres`
    Preset(String),

    /// A `[dialect.custom]` table
    Custom { custom: DialectProfile },
}

impl Default for DialectConfig {
    fn default() -> Self {
        Self::Preset("generic".to_string())
    }
}

impl DialectConfig {
    pub fn profile(&self) -> Result<DialectProfile, ConfigError> {
        match self {
            Self::Preset(name) => DialectProfile::preset(name)
                .ok_or_else(|| ConfigError::UnknownDialect(name.clone())),
            Self::Custom { custom } => Ok(custom.clone()),
        }
    }
}

/// A schema alias as written in config, each side `schema` or `catalog.schema`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaComparisonConfig {
    pub reference: String,
    pub comparison: String,
}

/// The `[compare]` table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompareConfig {
    /// Kinds to compare; empty means all
    #[serde(default)]
    pub types: Vec<String>,

    /// Kind name -> field names to skip
    #[serde(default)]
    pub suppressed_fields: BTreeMap<String, Vec<String>>,

    #[serde(default)]
    pub schema_comparisons: Vec<SchemaComparisonConfig>,

    #[serde(default)]
    pub include_catalog: bool,

    #[serde(default)]
    pub diff_column_order: bool,
}

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Target dialect
    #[serde(default)]
    pub dialect: DialectConfig,

    /// Comparison settings
    #[serde(default)]
    pub compare: CompareConfig,
}

fn parse_kind(name: &str) -> Result<ObjectKind, ConfigError> {
    name.parse()
        .map_err(|_| ConfigError::UnknownObjectKind(name.to_string()))
}

impl Config {
    /// Load config from TOML file
    pub fn from_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::IoError(e.to_string()))?;

        Self::from_toml(&contents)
    }

    /// Load config from TOML string
    pub fn from_toml(toml: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml)
            .map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Save config to TOML file
    pub fn save_to_file(&self, path: &std::path::Path) -> Result<(), ConfigError> {
        let toml = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::SerializeError(e.to_string()))?;

        std::fs::write(path, toml)
            .map_err(|e| ConfigError::IoError(e.to_string()))?;

        Ok(())
    }

    /// The configured dialect
    pub fn database(&self) -> Result<DialectProfile, ConfigError> {
        self.dialect.profile()
    }

    /// Build the comparison control for a run
    pub fn compare_control(&self) -> Result<CompareControl, ConfigError> {
        let mut control = CompareControl::new()
            .with_include_catalog(self.compare.include_catalog)
            .with_diff_column_order(self.compare.diff_column_order);

        if !self.compare.types.is_empty() {
            let kinds = self
                .compare
                .types
                .iter()
                .map(|name| parse_kind(name))
                .collect::<Result<Vec<_>, _>>()?;
            control = control.with_types(kinds);
        }

        for (kind, fields) in &self.compare.suppressed_fields {
            let kind = parse_kind(kind)?;
            for field in fields {
                control = control.with_suppressed_field(kind, Field::from(field.as_str()));
            }
        }

        for alias in &self.compare.schema_comparisons {
            control = control.with_schema_comparison(SchemaComparison::new(
                CatalogAndSchema::parse(&alias.reference),
                CatalogAndSchema::parse(&alias.comparison),
            ));
        }

        Ok(control)
    }
}

/// Config error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Serialize error: {0}")]
    SerializeError(String),

    #[error("Unknown dialect '{0}'")]
    UnknownDialect(String),

    #[error("Unknown object kind '{0}'")]
    UnknownObjectKind(String),
}
