//! Snapshots and snapshot sources
//!
//! A [`Snapshot`] is one side of a comparison: every schema object captured
//! from a database (or a declarative model), with links already resolved.
//!
//! Snapshots are usually loaded from a [`SnapshotDocument`], a flat JSON
//! format where objects refer to each other by name:
//!
//! ```json
//! {
//!   "product_name": "PostgreSQL",
//!   "schemas": [{ "name": "public", "default": true }],
//!   "tables": [{ "name": "users", "schema": "public" }],
//!   "columns": [{ "table": "users", "schema": "public", "name": "id", "type": "int8" }],
//!   "primary_keys": [{ "name": "users_pkey", "table": "users", "schema": "public", "columns": ["id"] }]
//! }
//! ```

use crate::field::ObjectKind;
use crate::structure::{
    Catalog, Column, DatabaseObject, ExtraAttributes, ForeignKey, Index, PrimaryKey, Schema, Table,
    UniqueConstraint,
};
use crate::value::{AttrValue, AutoIncrementInfo, DataType};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Errors that can occur when loading a snapshot
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Unresolved reference in {context}: {kind} '{name}' not found")]
    UnresolvedReference {
        context: String,
        kind: ObjectKind,
        name: String,
    },
}

/// All objects of one side of a comparison
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    /// Database product name, e.g. `PostgreSQL`
    pub product_name: Option<String>,

    /// Database product version
    pub product_version: Option<String>,

    objects: BTreeMap<ObjectKind, Vec<DatabaseObject>>,
}

impl Snapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_product(mut self, name: impl Into<String>, version: impl Into<String>) -> Self {
        self.product_name = Some(name.into());
        self.product_version = Some(version.into());
        self
    }

    /// Add an object; insertion order is kept per kind
    pub fn add(&mut self, object: impl Into<DatabaseObject>) {
        let object = object.into();
        self.objects.entry(object.kind()).or_default().push(object);
    }

    pub fn with(mut self, object: impl Into<DatabaseObject>) -> Self {
        self.add(object);
        self
    }

    pub fn objects(&self, kind: ObjectKind) -> &[DatabaseObject] {
        self.objects.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Kinds with at least one object
    pub fn kinds(&self) -> Vec<ObjectKind> {
        ObjectKind::ALL
            .into_iter()
            .filter(|kind| !self.objects(*kind).is_empty())
            .collect()
    }

    /// Total number of objects
    pub fn len(&self) -> usize {
        self.objects.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Something that can produce a snapshot
pub trait SnapshotSource: Send + Sync {
    /// Human-readable name used in logs and reports
    fn name(&self) -> &str;

    fn load(&self) -> Result<Snapshot, SnapshotError>;
}

/// Loads a [`SnapshotDocument`] from a JSON file
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
    name: String,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path.display().to_string();
        Self { path, name }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SnapshotSource for JsonFileSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn load(&self) -> Result<Snapshot, SnapshotError> {
        SnapshotDocument::from_file(&self.path)?.resolve()
    }
}

/// Wraps an already-built snapshot
#[derive(Debug, Clone)]
pub struct InMemorySource {
    name: String,
    snapshot: Snapshot,
}

impl InMemorySource {
    pub fn new(name: impl Into<String>, snapshot: Snapshot) -> Self {
        Self {
            name: name.into(),
            snapshot,
        }
    }
}

impl SnapshotSource for InMemorySource {
    fn name(&self) -> &str {
        &self.name
    }

    fn load(&self) -> Result<Snapshot, SnapshotError> {
        Ok(self.snapshot.clone())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogDoc {
    pub name: String,

    #[serde(default)]
    pub default: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SchemaDoc {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog: Option<String>,

    #[serde(default)]
    pub default: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableDoc {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tablespace: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_tablespace: Option<bool>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ColumnDoc {
    pub table: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    pub name: String,

    /// Rendered type, e.g. `varchar(255)`
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub data_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nullable: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<serde_json::Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub computed: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub descending: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_increment: Option<AutoIncrementInfo>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, serde_json::Value>,
}

/// An index or constraint column: a table column name, or an expression
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColumnRefDoc {
    Name(String),
    Expression {
        name: String,
        #[serde(default)]
        computed: bool,
        #[serde(default)]
        descending: bool,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndexDoc {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    #[serde(default)]
    pub columns: Vec<ColumnRefDoc>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unique: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clustered: Option<bool>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PrimaryKeyDoc {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    #[serde(default)]
    pub columns: Vec<ColumnRefDoc>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backing_index: Option<String>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ForeignKeyDoc {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Referencing table
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    #[serde(default)]
    pub columns: Vec<ColumnRefDoc>,

    /// Referenced table
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub referenced_table: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub referenced_schema: Option<String>,

    #[serde(default)]
    pub referenced_columns: Vec<ColumnRefDoc>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_rule: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delete_rule: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deferrable: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initially_deferred: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validate: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backing_index: Option<String>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UniqueConstraintDoc {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    #[serde(default)]
    pub columns: Vec<ColumnRefDoc>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deferrable: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initially_deferred: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disabled: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clustered: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backing_index: Option<String>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, serde_json::Value>,
}

/// Serialized snapshot with name-based links
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SnapshotDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_version: Option<String>,

    #[serde(default)]
    pub catalogs: Vec<CatalogDoc>,

    #[serde(default)]
    pub schemas: Vec<SchemaDoc>,

    #[serde(default)]
    pub tables: Vec<TableDoc>,

    #[serde(default)]
    pub columns: Vec<ColumnDoc>,

    #[serde(default)]
    pub indexes: Vec<IndexDoc>,

    #[serde(default)]
    pub primary_keys: Vec<PrimaryKeyDoc>,

    #[serde(default)]
    pub foreign_keys: Vec<ForeignKeyDoc>,

    #[serde(default)]
    pub unique_constraints: Vec<UniqueConstraintDoc>,
}

fn extras(raw: &BTreeMap<String, serde_json::Value>) -> ExtraAttributes {
    raw.iter()
        .filter(|(_, v)| !v.is_null())
        .map(|(k, v)| (k.clone(), AttrValue::from(v.clone())))
        .collect()
}

type TableKey = (Option<String>, String);

/// Lookup tables built while resolving a document
#[derive(Default)]
struct Resolver {
    catalogs: HashMap<String, Arc<Catalog>>,
    schemas: HashMap<String, Arc<Schema>>,
    tables: HashMap<TableKey, Arc<Table>>,
    columns: HashMap<(TableKey, String), Arc<Column>>,
    indexes: HashMap<(TableKey, String), Arc<Index>>,
}

impl Resolver {
    fn schema(
        &self,
        name: &Option<String>,
        context: &str,
    ) -> Result<Option<Arc<Schema>>, SnapshotError> {
        match name {
            None => Ok(None),
            Some(name) => self.schemas.get(name).cloned().map(Some).ok_or_else(|| {
                SnapshotError::UnresolvedReference {
                    context: context.to_string(),
                    kind: ObjectKind::Schema,
                    name: name.clone(),
                }
            }),
        }
    }

    fn table(
        &self,
        schema: &Option<String>,
        name: &Option<String>,
        context: &str,
    ) -> Result<Option<Arc<Table>>, SnapshotError> {
        let Some(name) = name else {
            return Ok(None);
        };
        let key = (schema.clone(), name.clone());
        self.tables
            .get(&key)
            .cloned()
            .map(Some)
            .ok_or_else(|| SnapshotError::UnresolvedReference {
                context: context.to_string(),
                kind: ObjectKind::Table,
                name: qualified(schema, name),
            })
    }

    /// Resolve index/constraint columns against the owning table
    ///
    /// Without a resolved table, columns are kept as bare names. Expression
    /// entries become virtual columns of the table.
    fn columns(
        &self,
        schema: &Option<String>,
        table: &Option<Arc<Table>>,
        refs: &[ColumnRefDoc],
        context: &str,
    ) -> Result<Vec<Arc<Column>>, SnapshotError> {
        refs.iter()
            .map(|column_ref| match (column_ref, table) {
                (ColumnRefDoc::Name(name), Some(table)) => {
                    let key = (table_key(schema, table), name.clone());
                    self.columns
                        .get(&key)
                        .cloned()
                        .ok_or_else(|| SnapshotError::UnresolvedReference {
                            context: context.to_string(),
                            kind: ObjectKind::Column,
                            name: format!("{}.{}", key.0.1, name),
                        })
                }
                (ColumnRefDoc::Name(name), None) => Ok(Arc::new(Column::new(name.clone()))),
                (ColumnRefDoc::Expression { name, computed, descending }, table) => {
                    let mut column = Column::new(name.clone())
                        .with_computed(*computed)
                        .with_descending(*descending);
                    column.relation = table.clone();
                    Ok(Arc::new(column))
                }
            })
            .collect()
    }

    fn backing_index(
        &self,
        schema: &Option<String>,
        table: &Option<Arc<Table>>,
        name: &Option<String>,
        context: &str,
    ) -> Result<Option<Arc<Index>>, SnapshotError> {
        let (Some(table), Some(name)) = (table, name) else {
            return Ok(None);
        };
        let key = (table_key(schema, table), name.clone());
        self.indexes
            .get(&key)
            .cloned()
            .map(Some)
            .ok_or_else(|| SnapshotError::UnresolvedReference {
                context: context.to_string(),
                kind: ObjectKind::Index,
                name: name.clone(),
            })
    }
}

fn table_key(schema: &Option<String>, table: &Table) -> TableKey {
    (schema.clone(), table.name.clone().unwrap_or_default())
}

fn qualified(schema: &Option<String>, name: &str) -> String {
    match schema {
        Some(schema) => format!("{}.{}", schema, name),
        None => name.to_string(),
    }
}

fn describe(kind: &str, name: &Option<String>) -> String {
    match name {
        Some(name) => format!("{} '{}'", kind, name),
        None => format!("unnamed {}", kind),
    }
}

impl SnapshotDocument {
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        serde_json::from_str(json).map_err(|e| SnapshotError::ParseError(e.to_string()))
    }

    pub fn from_file(path: &Path) -> Result<Self, SnapshotError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| SnapshotError::IoError(e.to_string()))?;
        Self::from_json(&contents)
    }

    pub fn to_json(&self) -> Result<String, SnapshotError> {
        serde_json::to_string_pretty(self).map_err(|e| SnapshotError::ParseError(e.to_string()))
    }

    /// Build the linked object graph
    pub fn resolve(&self) -> Result<Snapshot, SnapshotError> {
        let mut snapshot = Snapshot {
            product_name: self.product_name.clone(),
            product_version: self.product_version.clone(),
            objects: BTreeMap::new(),
        };
        let mut resolver = Resolver::default();

        for doc in &self.catalogs {
            let catalog = Arc::new(Catalog::new(doc.name.clone()).with_default(doc.default));
            resolver.catalogs.insert(doc.name.clone(), catalog.clone());
            snapshot.add(catalog);
        }

        for doc in &self.schemas {
            let mut schema = Schema::new(doc.name.clone()).with_default(doc.default);
            if let Some(catalog_name) = &doc.catalog {
                let catalog = resolver.catalogs.get(catalog_name).cloned().ok_or_else(|| {
                    SnapshotError::UnresolvedReference {
                        context: describe("schema", &Some(doc.name.clone())),
                        kind: ObjectKind::Catalog,
                        name: catalog_name.clone(),
                    }
                })?;
                schema = schema.with_catalog(catalog);
            }
            let schema = Arc::new(schema);
            resolver.schemas.insert(doc.name.clone(), schema.clone());
            snapshot.add(schema);
        }

        for doc in &self.tables {
            let context = describe("table", &Some(doc.name.clone()));
            let table = Table {
                name: Some(doc.name.clone()),
                schema: resolver.schema(&doc.schema, &context)?,
                remarks: doc.remarks.clone(),
                tablespace: doc.tablespace.clone(),
                default_tablespace: doc.default_tablespace,
                attributes: extras(&doc.attributes),
            };
            let table = Arc::new(table);
            resolver.tables.insert((doc.schema.clone(), doc.name.clone()), table.clone());
            snapshot.add(table);
        }

        for doc in &self.columns {
            let context = format!("column '{}.{}'", doc.table, doc.name);
            let table = resolver.table(&doc.schema, &Some(doc.table.clone()), &context)?;
            let column = Column {
                name: Some(doc.name.clone()),
                relation: table,
                data_type: doc.data_type.as_deref().map(DataType::parse),
                nullable: doc.nullable,
                default_value: doc
                    .default_value
                    .clone()
                    .filter(|v| !v.is_null())
                    .map(AttrValue::from),
                remarks: doc.remarks.clone(),
                order: doc.order,
                computed: doc.computed,
                descending: doc.descending,
                auto_increment: doc.auto_increment.clone(),
                attributes: extras(&doc.attributes),
            };
            let column = Arc::new(column);
            resolver.columns.insert(
                ((doc.schema.clone(), doc.table.clone()), doc.name.clone()),
                column.clone(),
            );
            snapshot.add(column);
        }

        for doc in &self.indexes {
            let context = describe("index", &doc.name);
            let table = resolver.table(&doc.schema, &doc.table, &context)?;
            let index = Index {
                name: doc.name.clone(),
                columns: resolver.columns(&doc.schema, &table, &doc.columns, &context)?,
                schema: resolver.schema(&doc.schema, &context)?,
                table: table.clone(),
                unique: doc.unique,
                clustered: doc.clustered,
                attributes: extras(&doc.attributes),
            };
            let index = Arc::new(index);
            if let (Some(table), Some(name)) = (&table, &doc.name) {
                resolver
                    .indexes
                    .insert((table_key(&doc.schema, table), name.clone()), index.clone());
            }
            snapshot.add(index);
        }

        for doc in &self.primary_keys {
            let context = describe("primary key", &doc.name);
            let table = resolver.table(&doc.schema, &doc.table, &context)?;
            let primary_key = PrimaryKey {
                name: doc.name.clone(),
                columns: resolver.columns(&doc.schema, &table, &doc.columns, &context)?,
                backing_index: resolver.backing_index(
                    &doc.schema,
                    &table,
                    &doc.backing_index,
                    &context,
                )?,
                table,
                attributes: extras(&doc.attributes),
            };
            snapshot.add(Arc::new(primary_key));
        }

        for doc in &self.foreign_keys {
            let context = describe("foreign key", &doc.name);
            let table = resolver.table(&doc.schema, &doc.table, &context)?;
            let referenced =
                resolver.table(&doc.referenced_schema, &doc.referenced_table, &context)?;
            let foreign_key = ForeignKey {
                name: doc.name.clone(),
                foreign_key_columns: resolver.columns(&doc.schema, &table, &doc.columns, &context)?,
                primary_key_columns: resolver.columns(
                    &doc.referenced_schema,
                    &referenced,
                    &doc.referenced_columns,
                    &context,
                )?,
                backing_index: resolver.backing_index(
                    &doc.schema,
                    &table,
                    &doc.backing_index,
                    &context,
                )?,
                foreign_key_table: table,
                primary_key_table: referenced,
                update_rule: doc.update_rule.clone(),
                delete_rule: doc.delete_rule.clone(),
                deferrable: doc.deferrable,
                initially_deferred: doc.initially_deferred,
                validate: doc.validate,
                attributes: extras(&doc.attributes),
            };
            snapshot.add(Arc::new(foreign_key));
        }

        for doc in &self.unique_constraints {
            let context = describe("unique constraint", &doc.name);
            let table = resolver.table(&doc.schema, &doc.table, &context)?;
            let constraint = UniqueConstraint {
                name: doc.name.clone(),
                columns: resolver.columns(&doc.schema, &table, &doc.columns, &context)?,
                backing_index: resolver.backing_index(
                    &doc.schema,
                    &table,
                    &doc.backing_index,
                    &context,
                )?,
                schema: resolver.schema(&doc.schema, &context)?,
                table,
                deferrable: doc.deferrable,
                initially_deferred: doc.initially_deferred,
                disabled: doc.disabled,
                clustered: doc.clustered,
                attributes: extras(&doc.attributes),
            };
            snapshot.add(Arc::new(constraint));
        }

        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::Field;
    use pretty_assertions::assert_eq;

    const DOCUMENT: &str = r#"{
        "product_name": "PostgreSQL",
        "product_version": "16.2",
        "schemas": [{ "name": "public", "default": true }],
        "tables": [
            { "name": "users", "schema": "public" },
            { "name": "orders", "schema": "public", "attributes": { "fillfactor": 90 } }
        ],
        "columns": [
            { "table": "users", "schema": "public", "name": "id", "type": "bigserial", "nullable": false,
              "auto_increment": { "start_with": 1, "increment_by": 1 } },
            { "table": "users", "schema": "public", "name": "email", "type": "varchar(255)" },
            { "table": "orders", "schema": "public", "name": "user_id", "type": "int8" }
        ],
        "indexes": [
            { "name": "users_email_idx", "table": "users", "schema": "public",
              "columns": ["email", { "name": "lower(email)", "computed": true }] }
        ],
        "primary_keys": [
            { "name": "users_pkey", "table": "users", "schema": "public", "columns": ["id"] }
        ],
        "foreign_keys": [
            { "name": "orders_user_fk", "table": "orders", "schema": "public", "columns": ["user_id"],
              "referenced_table": "users", "referenced_schema": "public", "referenced_columns": ["id"],
              "delete_rule": "cascade" }
        ]
    }"#;

    #[test]
    fn resolve_links_objects() {
        let snapshot = SnapshotDocument::from_json(DOCUMENT).unwrap().resolve().unwrap();

        assert_eq!(snapshot.product_name.as_deref(), Some("PostgreSQL"));
        assert_eq!(snapshot.objects(ObjectKind::Table).len(), 2);
        assert_eq!(snapshot.objects(ObjectKind::Column).len(), 3);
        assert_eq!(snapshot.objects(ObjectKind::UniqueConstraint).len(), 0);
        assert_eq!(
            snapshot.kinds(),
            vec![
                ObjectKind::Schema,
                ObjectKind::Table,
                ObjectKind::Column,
                ObjectKind::PrimaryKey,
                ObjectKind::Index,
                ObjectKind::ForeignKey,
            ]
        );

        let id = snapshot.objects(ObjectKind::Column)[0].as_column().unwrap().clone();
        assert!(id.is_auto_increment());
        assert_eq!(id.data_type, Some(DataType::new("bigserial")));

        let index = snapshot.objects(ObjectKind::Index)[0].as_index().unwrap().clone();
        assert_eq!(index.columns.len(), 2);
        assert!(index.columns[1].is_computed());
        assert!(Arc::ptr_eq(
            index.columns[0].relation.as_ref().unwrap(),
            id.relation.as_ref().unwrap()
        ));

        let fk = snapshot.objects(ObjectKind::ForeignKey)[0].as_foreign_key().unwrap().clone();
        assert_eq!(fk.primary_key_table.as_ref().and_then(|t| t.name.as_deref()), Some("users"));
        assert_eq!(fk.delete_rule.as_deref(), Some("cascade"));

        let orders = &snapshot.objects(ObjectKind::Table)[1];
        assert_eq!(
            orders.attribute(&Field::Custom("fillfactor".to_string())),
            Some(AttrValue::from(90i64))
        );
    }

    #[test]
    fn unknown_table_is_reported() {
        let document = SnapshotDocument {
            columns: vec![ColumnDoc {
                table: "missing".to_string(),
                name: "id".to_string(),
                ..ColumnDoc::default()
            }],
            ..SnapshotDocument::default()
        };

        match document.resolve() {
            Err(SnapshotError::UnresolvedReference { kind, name, .. }) => {
                assert_eq!(kind, ObjectKind::Table);
                assert_eq!(name, "missing");
            }
            other => panic!("expected unresolved reference, got {:?}", other),
        }
    }

    #[test]
    fn columns_without_table_stay_bare() {
        let document = SnapshotDocument {
            indexes: vec![IndexDoc {
                name: Some("idx".to_string()),
                columns: vec![ColumnRefDoc::Name("a".to_string())],
                ..IndexDoc::default()
            }],
            ..SnapshotDocument::default()
        };

        let snapshot = document.resolve().unwrap();
        let index = snapshot.objects(ObjectKind::Index)[0].as_index().unwrap().clone();
        assert!(index.table.is_none());
        assert_eq!(index.columns[0].name.as_deref(), Some("a"));
    }

    #[test]
    fn json_file_source_loads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snapshot.json");
        std::fs::write(&path, DOCUMENT).unwrap();

        let source = JsonFileSource::new(&path);
        let snapshot = source.load().unwrap();
        assert_eq!(snapshot.len(), 9);
        assert!(source.name().ends_with("snapshot.json"));
    }
}
