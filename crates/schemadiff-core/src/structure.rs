//! Schema object model
//!
//! Objects are immutable once a snapshot has been built. Links between
//! objects (column -> table, index -> columns, ...) are shared `Arc`s, so a
//! snapshot forms a DAG that can be handed to any number of comparisons.

use crate::field::{Field, ObjectKind};
use crate::value::{AttrValue, AutoIncrementInfo, DataType, Numeric};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Free-form dialect-specific attributes, compared generically
pub type ExtraAttributes = BTreeMap<String, AttrValue>;

fn text(value: &Option<String>) -> Option<AttrValue> {
    value.clone().map(AttrValue::Text)
}

fn link<T>(value: Option<&Arc<T>>, wrap: fn(Arc<T>) -> DatabaseObject) -> Option<AttrValue> {
    value.cloned().map(|v| AttrValue::Object(wrap(v)))
}

fn flag(value: Option<bool>) -> Option<AttrValue> {
    value.map(AttrValue::Bool)
}

fn extra(attributes: &ExtraAttributes, field: &Field) -> Option<AttrValue> {
    match field {
        Field::Custom(name) => attributes.get(name).cloned(),
        _ => None,
    }
}

fn with_extras(declared: &[Field], attributes: &ExtraAttributes) -> Vec<Field> {
    declared
        .iter()
        .cloned()
        .chain(attributes.keys().map(|k| Field::Custom(k.clone())))
        .collect()
}

fn column_list(columns: &[Arc<Column>]) -> AttrValue {
    AttrValue::objects(columns.iter().cloned().map(DatabaseObject::Column))
}

/// A database catalog
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Catalog {
    pub name: Option<String>,

    /// Whether this is the connection's default catalog
    pub is_default: bool,

    pub attributes: ExtraAttributes,
}

impl Catalog {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn with_default(mut self, is_default: bool) -> Self {
        self.is_default = is_default;
        self
    }

    const FIELDS: &'static [Field] = &[Field::Name, Field::Default];

    fn attribute(&self, field: &Field) -> Option<AttrValue> {
        match field {
            Field::Name => text(&self.name),
            Field::Default => Some(AttrValue::Bool(self.is_default)),
            other => extra(&self.attributes, other),
        }
    }
}

/// A database schema
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Schema {
    pub name: Option<String>,
    pub catalog: Option<Arc<Catalog>>,

    /// Whether this is the connection's default schema
    pub is_default: bool,

    pub attributes: ExtraAttributes,
}

impl Schema {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn with_catalog(mut self, catalog: Arc<Catalog>) -> Self {
        self.catalog = Some(catalog);
        self
    }

    pub fn with_default(mut self, is_default: bool) -> Self {
        self.is_default = is_default;
        self
    }

    /// Name of the owning catalog, if known
    pub fn catalog_name(&self) -> Option<&str> {
        self.catalog.as_ref().and_then(|c| c.name.as_deref())
    }

    const FIELDS: &'static [Field] = &[Field::Name, Field::Catalog, Field::Default];

    fn attribute(&self, field: &Field) -> Option<AttrValue> {
        match field {
            Field::Name => text(&self.name),
            Field::Catalog => link(self.catalog.as_ref(), DatabaseObject::Catalog),
            Field::Default => Some(AttrValue::Bool(self.is_default)),
            other => extra(&self.attributes, other),
        }
    }
}

/// A table
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    pub name: Option<String>,
    pub schema: Option<Arc<Schema>>,
    pub remarks: Option<String>,
    pub tablespace: Option<String>,

    /// Set when the table lives in its dialect's default tablespace
    pub default_tablespace: Option<bool>,

    pub attributes: ExtraAttributes,
}

impl Table {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn with_schema(mut self, schema: Arc<Schema>) -> Self {
        self.schema = Some(schema);
        self
    }

    pub fn with_remarks(mut self, remarks: impl Into<String>) -> Self {
        self.remarks = Some(remarks.into());
        self
    }

    pub fn with_tablespace(mut self, tablespace: impl Into<String>, is_default: bool) -> Self {
        self.tablespace = Some(tablespace.into());
        self.default_tablespace = Some(is_default);
        self
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn is_default_tablespace(&self) -> bool {
        self.default_tablespace.unwrap_or(false)
    }

    const FIELDS: &'static [Field] = &[
        Field::Name,
        Field::Schema,
        Field::Remarks,
        Field::Tablespace,
        Field::DefaultTablespace,
    ];

    fn attribute(&self, field: &Field) -> Option<AttrValue> {
        match field {
            Field::Name => text(&self.name),
            Field::Schema => link(self.schema.as_ref(), DatabaseObject::Schema),
            Field::Remarks => text(&self.remarks),
            Field::Tablespace => text(&self.tablespace),
            Field::DefaultTablespace => flag(self.default_tablespace),
            other => extra(&self.attributes, other),
        }
    }
}

/// A table column, or a virtual expression column of an index
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Column {
    pub name: Option<String>,
    pub relation: Option<Arc<Table>>,
    pub data_type: Option<DataType>,
    pub nullable: Option<bool>,
    pub default_value: Option<AttrValue>,
    pub remarks: Option<String>,

    /// Ordinal position within the table
    pub order: Option<i64>,

    /// Expression column (function-based index entry)
    pub computed: Option<bool>,

    /// Descending index entry
    pub descending: Option<bool>,

    pub auto_increment: Option<AutoIncrementInfo>,
    pub attributes: ExtraAttributes,
}

impl Column {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn with_relation(mut self, table: Arc<Table>) -> Self {
        self.relation = Some(table);
        self
    }

    pub fn with_type(mut self, data_type: DataType) -> Self {
        self.data_type = Some(data_type);
        self
    }

    pub fn with_nullable(mut self, nullable: bool) -> Self {
        self.nullable = Some(nullable);
        self
    }

    pub fn with_default_value(mut self, value: impl Into<AttrValue>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    pub fn with_remarks(mut self, remarks: impl Into<String>) -> Self {
        self.remarks = Some(remarks.into());
        self
    }

    pub fn with_order(mut self, order: i64) -> Self {
        self.order = Some(order);
        self
    }

    pub fn with_computed(mut self, computed: bool) -> Self {
        self.computed = Some(computed);
        self
    }

    pub fn with_descending(mut self, descending: bool) -> Self {
        self.descending = Some(descending);
        self
    }

    pub fn with_auto_increment(mut self, info: AutoIncrementInfo) -> Self {
        self.auto_increment = Some(info);
        self
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn is_auto_increment(&self) -> bool {
        self.auto_increment.is_some()
    }

    pub fn is_computed(&self) -> bool {
        self.computed.unwrap_or(false)
    }

    pub fn is_descending(&self) -> bool {
        self.descending.unwrap_or(false)
    }

    /// The column name without its table prefix
    pub fn unqualified_name(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }

    const FIELDS: &'static [Field] = &[
        Field::Name,
        Field::Relation,
        Field::Type,
        Field::Nullable,
        Field::DefaultValue,
        Field::Remarks,
        Field::Order,
        Field::Computed,
        Field::Descending,
        Field::AutoIncrementInformation,
    ];

    fn attribute(&self, field: &Field) -> Option<AttrValue> {
        match field {
            Field::Name => text(&self.name),
            Field::Relation => link(self.relation.as_ref(), DatabaseObject::Table),
            Field::Type => self.data_type.clone().map(AttrValue::DataType),
            Field::Nullable => flag(self.nullable),
            Field::DefaultValue => self.default_value.clone(),
            Field::Remarks => text(&self.remarks),
            Field::Order => self.order.map(|o| AttrValue::Number(Numeric::Int(o))),
            Field::Computed => flag(self.computed),
            Field::Descending => flag(self.descending),
            Field::AutoIncrementInformation => {
                self.auto_increment.clone().map(AttrValue::AutoIncrement)
            }
            other => extra(&self.attributes, other),
        }
    }
}

/// An index
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Index {
    pub name: Option<String>,
    pub table: Option<Arc<Table>>,

    /// Explicit schema; falls back to the table's schema
    pub schema: Option<Arc<Schema>>,

    pub columns: Vec<Arc<Column>>,
    pub unique: Option<bool>,
    pub clustered: Option<bool>,
    pub attributes: ExtraAttributes,
}

impl Index {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn unnamed() -> Self {
        Self::default()
    }

    pub fn with_table(mut self, table: Arc<Table>) -> Self {
        self.table = Some(table);
        self
    }

    pub fn with_schema(mut self, schema: Arc<Schema>) -> Self {
        self.schema = Some(schema);
        self
    }

    pub fn with_columns(mut self, columns: Vec<Arc<Column>>) -> Self {
        self.columns = columns;
        self
    }

    pub fn with_unique(mut self, unique: bool) -> Self {
        self.unique = Some(unique);
        self
    }

    pub fn schema(&self) -> Option<&Arc<Schema>> {
        self.schema
            .as_ref()
            .or_else(|| self.table.as_ref().and_then(|t| t.schema.as_ref()))
    }

    const FIELDS: &'static [Field] = &[
        Field::Name,
        Field::Table,
        Field::Schema,
        Field::Columns,
        Field::Unique,
        Field::Clustered,
    ];

    fn attribute(&self, field: &Field) -> Option<AttrValue> {
        match field {
            Field::Name => text(&self.name),
            Field::Table => link(self.table.as_ref(), DatabaseObject::Table),
            Field::Schema => link(self.schema(), DatabaseObject::Schema),
            Field::Columns => Some(column_list(&self.columns)),
            Field::Unique => flag(self.unique),
            Field::Clustered => flag(self.clustered),
            other => extra(&self.attributes, other),
        }
    }
}

/// A primary key constraint
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PrimaryKey {
    pub name: Option<String>,
    pub table: Option<Arc<Table>>,
    pub columns: Vec<Arc<Column>>,
    pub backing_index: Option<Arc<Index>>,
    pub attributes: ExtraAttributes,
}

impl PrimaryKey {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn unnamed() -> Self {
        Self::default()
    }

    pub fn with_table(mut self, table: Arc<Table>) -> Self {
        self.table = Some(table);
        self
    }

    pub fn with_columns(mut self, columns: Vec<Arc<Column>>) -> Self {
        self.columns = columns;
        self
    }

    pub fn with_backing_index(mut self, index: Arc<Index>) -> Self {
        self.backing_index = Some(index);
        self
    }

    const FIELDS: &'static [Field] = &[
        Field::Name,
        Field::Table,
        Field::Columns,
        Field::BackingIndex,
    ];

    fn attribute(&self, field: &Field) -> Option<AttrValue> {
        match field {
            Field::Name => text(&self.name),
            Field::Table => link(self.table.as_ref(), DatabaseObject::Table),
            Field::Columns => Some(column_list(&self.columns)),
            Field::BackingIndex => link(self.backing_index.as_ref(), DatabaseObject::Index),
            other => extra(&self.attributes, other),
        }
    }
}

/// A foreign key constraint
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ForeignKey {
    pub name: Option<String>,
    pub foreign_key_table: Option<Arc<Table>>,
    pub foreign_key_columns: Vec<Arc<Column>>,
    pub primary_key_table: Option<Arc<Table>>,
    pub primary_key_columns: Vec<Arc<Column>>,
    pub update_rule: Option<String>,
    pub delete_rule: Option<String>,
    pub deferrable: Option<bool>,
    pub initially_deferred: Option<bool>,
    pub validate: Option<bool>,
    pub backing_index: Option<Arc<Index>>,
    pub attributes: ExtraAttributes,
}

impl ForeignKey {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn unnamed() -> Self {
        Self::default()
    }

    /// Set the referencing side
    pub fn with_foreign_key(mut self, table: Arc<Table>, columns: Vec<Arc<Column>>) -> Self {
        self.foreign_key_table = Some(table);
        self.foreign_key_columns = columns;
        self
    }

    /// Set the referenced side
    pub fn with_primary_key(mut self, table: Arc<Table>, columns: Vec<Arc<Column>>) -> Self {
        self.primary_key_table = Some(table);
        self.primary_key_columns = columns;
        self
    }

    pub fn with_delete_rule(mut self, rule: impl Into<String>) -> Self {
        self.delete_rule = Some(rule.into());
        self
    }

    pub fn with_update_rule(mut self, rule: impl Into<String>) -> Self {
        self.update_rule = Some(rule.into());
        self
    }

    const FIELDS: &'static [Field] = &[
        Field::Name,
        Field::ForeignKeyTable,
        Field::ForeignKeyColumns,
        Field::PrimaryKeyTable,
        Field::PrimaryKeyColumns,
        Field::UpdateRule,
        Field::DeleteRule,
        Field::Deferrable,
        Field::InitiallyDeferred,
        Field::Validate,
        Field::BackingIndex,
    ];

    fn attribute(&self, field: &Field) -> Option<AttrValue> {
        match field {
            Field::Name => text(&self.name),
            Field::ForeignKeyTable => link(self.foreign_key_table.as_ref(), DatabaseObject::Table),
            Field::ForeignKeyColumns => Some(column_list(&self.foreign_key_columns)),
            Field::PrimaryKeyTable => link(self.primary_key_table.as_ref(), DatabaseObject::Table),
            Field::PrimaryKeyColumns => Some(column_list(&self.primary_key_columns)),
            Field::UpdateRule => text(&self.update_rule),
            Field::DeleteRule => text(&self.delete_rule),
            Field::Deferrable => flag(self.deferrable),
            Field::InitiallyDeferred => flag(self.initially_deferred),
            Field::Validate => flag(self.validate),
            Field::BackingIndex => link(self.backing_index.as_ref(), DatabaseObject::Index),
            other => extra(&self.attributes, other),
        }
    }
}

/// A unique constraint
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UniqueConstraint {
    pub name: Option<String>,
    pub table: Option<Arc<Table>>,

    /// Explicit schema; falls back to the table's schema
    pub schema: Option<Arc<Schema>>,

    pub columns: Vec<Arc<Column>>,
    pub deferrable: Option<bool>,
    pub initially_deferred: Option<bool>,
    pub disabled: Option<bool>,
    pub clustered: Option<bool>,
    pub backing_index: Option<Arc<Index>>,
    pub attributes: ExtraAttributes,
}

impl UniqueConstraint {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn unnamed() -> Self {
        Self::default()
    }

    pub fn with_table(mut self, table: Arc<Table>) -> Self {
        self.table = Some(table);
        self
    }

    pub fn with_schema(mut self, schema: Arc<Schema>) -> Self {
        self.schema = Some(schema);
        self
    }

    pub fn with_columns(mut self, columns: Vec<Arc<Column>>) -> Self {
        self.columns = columns;
        self
    }

    pub fn with_backing_index(mut self, index: Arc<Index>) -> Self {
        self.backing_index = Some(index);
        self
    }

    pub fn schema(&self) -> Option<&Arc<Schema>> {
        self.schema
            .as_ref()
            .or_else(|| self.table.as_ref().and_then(|t| t.schema.as_ref()))
    }

    const FIELDS: &'static [Field] = &[
        Field::Name,
        Field::Table,
        Field::Schema,
        Field::Columns,
        Field::Deferrable,
        Field::InitiallyDeferred,
        Field::Disabled,
        Field::Clustered,
        Field::BackingIndex,
    ];

    fn attribute(&self, field: &Field) -> Option<AttrValue> {
        match field {
            Field::Name => text(&self.name),
            Field::Table => link(self.table.as_ref(), DatabaseObject::Table),
            Field::Schema => link(self.schema(), DatabaseObject::Schema),
            Field::Columns => Some(column_list(&self.columns)),
            Field::Deferrable => flag(self.deferrable),
            Field::InitiallyDeferred => flag(self.initially_deferred),
            Field::Disabled => flag(self.disabled),
            Field::Clustered => flag(self.clustered),
            Field::BackingIndex => link(self.backing_index.as_ref(), DatabaseObject::Index),
            other => extra(&self.attributes, other),
        }
    }
}

/// Any schema object under comparison
#[derive(Debug, Clone, PartialEq)]
pub enum DatabaseObject {
    Catalog(Arc<Catalog>),
    Schema(Arc<Schema>),
    Table(Arc<Table>),
    Column(Arc<Column>),
    Index(Arc<Index>),
    PrimaryKey(Arc<PrimaryKey>),
    ForeignKey(Arc<ForeignKey>),
    UniqueConstraint(Arc<UniqueConstraint>),
}

impl DatabaseObject {
    pub fn kind(&self) -> ObjectKind {
        match self {
            Self::Catalog(_) => ObjectKind::Catalog,
            Self::Schema(_) => ObjectKind::Schema,
            Self::Table(_) => ObjectKind::Table,
            Self::Column(_) => ObjectKind::Column,
            Self::Index(_) => ObjectKind::Index,
            Self::PrimaryKey(_) => ObjectKind::PrimaryKey,
            Self::ForeignKey(_) => ObjectKind::ForeignKey,
            Self::UniqueConstraint(_) => ObjectKind::UniqueConstraint,
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Catalog(o) => o.name.as_deref(),
            Self::Schema(o) => o.name.as_deref(),
            Self::Table(o) => o.name.as_deref(),
            Self::Column(o) => o.name.as_deref(),
            Self::Index(o) => o.name.as_deref(),
            Self::PrimaryKey(o) => o.name.as_deref(),
            Self::ForeignKey(o) => o.name.as_deref(),
            Self::UniqueConstraint(o) => o.name.as_deref(),
        }
    }

    /// Read one attribute; `None` when unset
    pub fn attribute(&self, field: &Field) -> Option<AttrValue> {
        match self {
            Self::Catalog(o) => o.attribute(field),
            Self::Schema(o) => o.attribute(field),
            Self::Table(o) => o.attribute(field),
            Self::Column(o) => o.attribute(field),
            Self::Index(o) => o.attribute(field),
            Self::PrimaryKey(o) => o.attribute(field),
            Self::ForeignKey(o) => o.attribute(field),
            Self::UniqueConstraint(o) => o.attribute(field),
        }
    }

    /// Every attribute this object can report, declared fields first
    pub fn attribute_fields(&self) -> Vec<Field> {
        match self {
            Self::Catalog(o) => with_extras(Catalog::FIELDS, &o.attributes),
            Self::Schema(o) => with_extras(Schema::FIELDS, &o.attributes),
            Self::Table(o) => with_extras(Table::FIELDS, &o.attributes),
            Self::Column(o) => with_extras(Column::FIELDS, &o.attributes),
            Self::Index(o) => with_extras(Index::FIELDS, &o.attributes),
            Self::PrimaryKey(o) => with_extras(PrimaryKey::FIELDS, &o.attributes),
            Self::ForeignKey(o) => with_extras(ForeignKey::FIELDS, &o.attributes),
            Self::UniqueConstraint(o) => with_extras(UniqueConstraint::FIELDS, &o.attributes),
        }
    }

    /// Whether both handles point at the very same allocation
    pub fn same_instance(&self, other: &DatabaseObject) -> bool {
        match (self, other) {
            (Self::Catalog(a), Self::Catalog(b)) => Arc::ptr_eq(a, b),
            (Self::Schema(a), Self::Schema(b)) => Arc::ptr_eq(a, b),
            (Self::Table(a), Self::Table(b)) => Arc::ptr_eq(a, b),
            (Self::Column(a), Self::Column(b)) => Arc::ptr_eq(a, b),
            (Self::Index(a), Self::Index(b)) => Arc::ptr_eq(a, b),
            (Self::PrimaryKey(a), Self::PrimaryKey(b)) => Arc::ptr_eq(a, b),
            (Self::ForeignKey(a), Self::ForeignKey(b)) => Arc::ptr_eq(a, b),
            (Self::UniqueConstraint(a), Self::UniqueConstraint(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }

    pub fn as_catalog(&self) -> Option<&Arc<Catalog>> {
        match self {
            Self::Catalog(o) => Some(o),
            _ => None,
        }
    }

    pub fn as_schema(&self) -> Option<&Arc<Schema>> {
        match self {
            Self::Schema(o) => Some(o),
            _ => None,
        }
    }

    pub fn as_table(&self) -> Option<&Arc<Table>> {
        match self {
            Self::Table(o) => Some(o),
            _ => None,
        }
    }

    pub fn as_column(&self) -> Option<&Arc<Column>> {
        match self {
            Self::Column(o) => Some(o),
            _ => None,
        }
    }

    pub fn as_index(&self) -> Option<&Arc<Index>> {
        match self {
            Self::Index(o) => Some(o),
            _ => None,
        }
    }

    pub fn as_primary_key(&self) -> Option<&Arc<PrimaryKey>> {
        match self {
            Self::PrimaryKey(o) => Some(o),
            _ => None,
        }
    }

    pub fn as_foreign_key(&self) -> Option<&Arc<ForeignKey>> {
        match self {
            Self::ForeignKey(o) => Some(o),
            _ => None,
        }
    }

    pub fn as_unique_constraint(&self) -> Option<&Arc<UniqueConstraint>> {
        match self {
            Self::UniqueConstraint(o) => Some(o),
            _ => None,
        }
    }
}

impl fmt::Display for DatabaseObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Column(c) => match c.relation.as_ref().and_then(|t| t.name.as_deref()) {
                Some(table) => write!(f, "{}.{}", table, c.unqualified_name()),
                None => write!(f, "{}", c.unqualified_name()),
            },
            Self::Table(t) => {
                let schema = t.schema.as_ref().and_then(|s| s.name.as_deref());
                match (schema, t.name.as_deref()) {
                    (Some(schema), Some(name)) => write!(f, "{}.{}", schema, name),
                    (_, Some(name)) => write!(f, "{}", name),
                    (_, None) => write!(f, "(unnamed table)"),
                }
            }
            other => match other.name() {
                Some(name) => write!(f, "{}", name),
                None => write!(f, "(unnamed {})", other.kind()),
            },
        }
    }
}

impl From<Arc<Catalog>> for DatabaseObject {
    fn from(o: Arc<Catalog>) -> Self {
        Self::Catalog(o)
    }
}

impl From<Arc<Schema>> for DatabaseObject {
    fn from(o: Arc<Schema>) -> Self {
        Self::Schema(o)
    }
}

impl From<Arc<Table>> for DatabaseObject {
    fn from(o: Arc<Table>) -> Self {
        Self::Table(o)
    }
}

impl From<Arc<Column>> for DatabaseObject {
    fn from(o: Arc<Column>) -> Self {
        Self::Column(o)
    }
}

impl From<Arc<Index>> for DatabaseObject {
    fn from(o: Arc<Index>) -> Self {
        Self::Index(o)
    }
}

impl From<Arc<PrimaryKey>> for DatabaseObject {
    fn from(o: Arc<PrimaryKey>) -> Self {
        Self::PrimaryKey(o)
    }
}

impl From<Arc<ForeignKey>> for DatabaseObject {
    fn from(o: Arc<ForeignKey>) -> Self {
        Self::ForeignKey(o)
    }
}

impl From<Arc<UniqueConstraint>> for DatabaseObject {
    fn from(o: Arc<UniqueConstraint>) -> Self {
        Self::UniqueConstraint(o)
    }
}
