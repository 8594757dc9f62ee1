//! Dialect oracle
//!
//! The engine never talks to a database. Everything it needs to know about
//! the target dialect (catalog/schema support, defaults, name casing) comes
//! through the [`Database`] trait. [`DialectProfile`] is the data-driven
//! implementation used by presets and by `[dialect.custom]` config tables.

use crate::field::ObjectKind;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Dialect identity, used for the few dialect-specific comparison rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    Postgres,
    MySql,
    MariaDb,
    Oracle,
    MsSql,
    H2,
    Generic,
}

impl Default for Dialect {
    fn default() -> Self {
        Self::Generic
    }
}

impl Dialect {
    pub fn is_postgres_family(&self) -> bool {
        matches!(self, Self::Postgres)
    }
}

/// How the dialect folds unquoted catalog and schema names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NameCase {
    Original,
    Upper,
    Lower,
}

impl Default for NameCase {
    fn default() -> Self {
        Self::Upper
    }
}

impl NameCase {
    pub fn apply(&self, name: &str) -> String {
        match self {
            Self::Original => name.to_string(),
            Self::Upper => name.to_uppercase(),
            Self::Lower => name.to_lowercase(),
        }
    }
}

/// Questions the engine asks about the target database
///
/// Implementations must answer deterministically and without I/O.
pub trait Database: Send + Sync {
    /// Short identifier such as `postgres`
    fn short_name(&self) -> &str;

    fn dialect(&self) -> Dialect;

    fn supports_catalogs(&self) -> bool;

    fn supports_schemas(&self) -> bool;

    fn default_catalog_name(&self) -> Option<&str>;

    fn default_schema_name(&self) -> Option<&str>;

    /// Whether object names compare case-sensitively
    fn is_case_sensitive(&self) -> bool;

    fn schema_and_catalog_case(&self) -> NameCase;

    /// Normalize an object name the way the dialect stores unquoted names
    fn correct_object_name(&self, name: &str, _kind: ObjectKind) -> String {
        if self.is_case_sensitive() {
            name.to_string()
        } else {
            self.schema_and_catalog_case().apply(name)
        }
    }

    /// Compare two names under the dialect's case rule
    fn names_equal(&self, a: &str, b: &str) -> bool {
        if self.is_case_sensitive() {
            a == b
        } else {
            a.to_lowercase() == b.to_lowercase()
        }
    }
}

/// Names of the built-in dialect presets
pub const DIALECT_PRESETS: [&str; 7] = [
    "postgres", "mysql", "mariadb", "oracle", "mssql", "h2", "generic",
];

/// Data-driven [`Database`] implementation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialectProfile {
    pub short_name: String,

    #[serde(default)]
    pub dialect: Dialect,

    #[serde(default = "default_true")]
    pub supports_catalogs: bool,

    #[serde(default = "default_true")]
    pub supports_schemas: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_catalog: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_schema: Option<String>,

    #[serde(default)]
    pub case_sensitive: bool,

    #[serde(default)]
    pub name_case: NameCase,
}

fn default_true() -> bool {
    true
}

impl DialectProfile {
    pub fn postgres() -> Self {
        Self {
            short_name: "postgres".to_string(),
            dialect: Dialect::Postgres,
            supports_catalogs: true,
            supports_schemas: true,
            default_catalog: None,
            default_schema: Some("public".to_string()),
            case_sensitive: false,
            name_case: NameCase::Lower,
        }
    }

    pub fn mysql() -> Self {
        Self {
            short_name: "mysql".to_string(),
            dialect: Dialect::MySql,
            supports_catalogs: true,
            supports_schemas: false,
            default_catalog: None,
            default_schema: None,
            case_sensitive: false,
            name_case: NameCase::Original,
        }
    }

    pub fn mariadb() -> Self {
        Self {
            short_name: "mariadb".to_string(),
            dialect: Dialect::MariaDb,
            ..Self::mysql()
        }
    }

    pub fn oracle() -> Self {
        Self {
            short_name: "oracle".to_string(),
            dialect: Dialect::Oracle,
            supports_catalogs: true,
            supports_schemas: false,
            default_catalog: None,
            default_schema: None,
            case_sensitive: false,
            name_case: NameCase::Upper,
        }
    }

    pub fn mssql() -> Self {
        Self {
            short_name: "mssql".to_string(),
            dialect: Dialect::MsSql,
            supports_catalogs: true,
            supports_schemas: true,
            default_catalog: None,
            default_schema: Some("dbo".to_string()),
            case_sensitive: false,
            name_case: NameCase::Original,
        }
    }

    pub fn h2() -> Self {
        Self {
            short_name: "h2".to_string(),
            dialect: Dialect::H2,
            supports_catalogs: true,
            supports_schemas: true,
            default_catalog: None,
            default_schema: Some("PUBLIC".to_string()),
            case_sensitive: false,
            name_case: NameCase::Upper,
        }
    }

    pub fn generic() -> Self {
        Self {
            short_name: "generic".to_string(),
            dialect: Dialect::Generic,
            supports_catalogs: true,
            supports_schemas: true,
            default_catalog: None,
            default_schema: None,
            case_sensitive: false,
            name_case: NameCase::Upper,
        }
    }

    /// Look up a preset by name (case-insensitive)
    pub fn preset(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "postgres" | "postgresql" => Some(Self::postgres()),
            "mysql" => Some(Self::mysql()),
            "mariadb" => Some(Self::mariadb()),
            "oracle" => Some(Self::oracle()),
            "mssql" | "sqlserver" => Some(Self::mssql()),
            "h2" => Some(Self::h2()),
            "generic" => Some(Self::generic()),
            _ => None,
        }
    }

    pub fn with_case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }

    pub fn with_default_catalog(mut self, catalog: impl Into<String>) -> Self {
        self.default_catalog = Some(catalog.into());
        self
    }

    pub fn with_default_schema(mut self, schema: impl Into<String>) -> Self {
        self.default_schema = Some(schema.into());
        self
    }
}

impl Default for DialectProfile {
    fn default() -> Self {
        Self::generic()
    }
}

impl Database for DialectProfile {
    fn short_name(&self) -> &str {
        &self.short_name
    }

    fn dialect(&self) -> Dialect {
        self.dialect
    }

    fn supports_catalogs(&self) -> bool {
        self.supports_catalogs
    }

    fn supports_schemas(&self) -> bool {
        self.supports_schemas
    }

    fn default_catalog_name(&self) -> Option<&str> {
        self.default_catalog.as_deref()
    }

    fn default_schema_name(&self) -> Option<&str> {
        self.default_schema.as_deref()
    }

    fn is_case_sensitive(&self) -> bool {
        self.case_sensitive
    }

    fn schema_and_catalog_case(&self) -> NameCase {
        self.name_case
    }
}

fn trim_to_none(name: Option<&str>) -> Option<String> {
    name.map(str::trim).filter(|n| !n.is_empty()).map(str::to_string)
}

fn same_ignoring_case(name: &Option<String>, other: Option<&str>) -> bool {
    match (name, other) {
        (Some(a), Some(b)) => a.to_lowercase() == b.to_lowercase(),
        _ => false,
    }
}

/// A catalog/schema pair, possibly partially specified
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct CatalogAndSchema {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_name: Option<String>,
}

impl CatalogAndSchema {
    pub fn new(catalog_name: Option<&str>, schema_name: Option<&str>) -> Self {
        Self {
            catalog_name: catalog_name.map(str::to_string),
            schema_name: schema_name.map(str::to_string),
        }
    }

    /// Parse `catalog.schema` or a bare `schema`
    pub fn parse(qualified: &str) -> Self {
        match qualified.split_once('.') {
            Some((catalog, schema)) => Self::new(Some(catalog), Some(schema)),
            None => Self::new(None, Some(qualified)),
        }
    }

    /// Normalize according to the dialect
    ///
    /// Default names are elided, unsupported levels are dropped and the
    /// dialect's name case is applied.
    pub fn standardize(&self, database: &dyn Database) -> Self {
        let mut catalog = trim_to_none(self.catalog_name.as_deref());
        let mut schema = trim_to_none(self.schema_name.as_deref());

        if !database.supports_catalogs() {
            return Self::default();
        }

        if !database.supports_schemas() {
            catalog = catalog.or(schema.take());
        }

        if same_ignoring_case(&catalog, database.default_catalog_name()) {
            catalog = None;
        }

        if database.supports_schemas() {
            if same_ignoring_case(&schema, database.default_schema_name()) {
                schema = None;
            }
        } else {
            schema = catalog.clone();
        }

        let case = database.schema_and_catalog_case();
        Self {
            catalog_name: catalog.map(|c| case.apply(&c)),
            schema_name: schema.map(|s| case.apply(&s)),
        }
    }
}

impl fmt::Display for CatalogAndSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.catalog_name, &self.schema_name) {
            (Some(catalog), Some(schema)) => write!(f, "{}.{}", catalog, schema),
            (Some(catalog), None) => write!(f, "{}", catalog),
            (None, Some(schema)) => write!(f, "{}", schema),
            (None, None) => write!(f, "(default)"),
        }
    }
}
