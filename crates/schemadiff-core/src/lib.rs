//! schemadiff core
//!
//! Schema object model, dialect oracle, comparison control, snapshots and
//! configuration. No comparison logic lives here.
//! Never rename field names - they are part of the public API.

pub mod field;
pub mod value;
pub mod structure;
pub mod database;
pub mod control;
pub mod snapshot;
pub mod config;

pub use field::{Field, ObjectKind, ParseKindError};
pub use value::{AttrValue, AutoIncrementInfo, DataType, Numeric};
pub use structure::{
    Catalog, Column, DatabaseObject, ExtraAttributes, ForeignKey, Index, PrimaryKey, Schema, Table,
    UniqueConstraint,
};
pub use database::{CatalogAndSchema, Database, Dialect, DialectProfile, NameCase, DIALECT_PRESETS};
pub use control::{CompareControl, SchemaComparison};
pub use snapshot::{
    InMemorySource, JsonFileSource, Snapshot, SnapshotDocument, SnapshotError, SnapshotSource,
};
pub use config::{CompareConfig, Config, ConfigError, DialectConfig, SchemaComparisonConfig};
