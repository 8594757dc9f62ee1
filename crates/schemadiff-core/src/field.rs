//! Object kinds and attribute field keys
//!
//! Field names are part of the public surface: change-script generators
//! address differences by these strings. Never rename an existing one.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// The closed set of schema object kinds the engine compares
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ObjectKind {
    Catalog,
    Schema,
    Table,
    Column,
    Index,
    PrimaryKey,
    ForeignKey,
    UniqueConstraint,
}

impl ObjectKind {
    /// Every kind, containers before their contents
    pub const ALL: [ObjectKind; 8] = [
        ObjectKind::Catalog,
        ObjectKind::Schema,
        ObjectKind::Table,
        ObjectKind::Column,
        ObjectKind::PrimaryKey,
        ObjectKind::Index,
        ObjectKind::UniqueConstraint,
        ObjectKind::ForeignKey,
    ];

    /// Stable string identifier
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Catalog => "catalog",
            Self::Schema => "schema",
            Self::Table => "table",
            Self::Column => "column",
            Self::Index => "index",
            Self::PrimaryKey => "primaryKey",
            Self::ForeignKey => "foreignKey",
            Self::UniqueConstraint => "uniqueConstraint",
        }
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error returned when a string names no known object kind
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown object kind '{0}'")]
pub struct ParseKindError(pub String);

impl FromStr for ObjectKind {
    type Err = ParseKindError;

    /// Accepts `primaryKey`, `primary_key`, `PrimaryKey`, `primary-key`, ...
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let folded: String = s
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .collect::<String>()
            .to_lowercase();

        match folded.as_str() {
            "catalog" => Ok(Self::Catalog),
            "schema" => Ok(Self::Schema),
            "table" => Ok(Self::Table),
            "column" => Ok(Self::Column),
            "index" => Ok(Self::Index),
            "primarykey" => Ok(Self::PrimaryKey),
            "foreignkey" => Ok(Self::ForeignKey),
            "uniqueconstraint" => Ok(Self::UniqueConstraint),
            _ => Err(ParseKindError(s.to_string())),
        }
    }
}

/// Key of a compared attribute
///
/// Known attributes get their own variant; dialect-specific extras travel
/// as `Custom`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Field {
    /// Pseudo-field used when one side of a pair is absent
    This,
    Name,
    Default,
    Catalog,
    Schema,
    Table,
    Relation,
    Remarks,
    Tablespace,
    DefaultTablespace,
    Type,
    Nullable,
    DefaultValue,
    Order,
    Computed,
    Descending,
    AutoIncrementInformation,
    /// Synthetic field reported when only one side auto-increments
    AutoIncrement,
    Columns,
    Unique,
    Clustered,
    BackingIndex,
    ForeignKeyTable,
    ForeignKeyColumns,
    PrimaryKeyTable,
    PrimaryKeyColumns,
    UpdateRule,
    DeleteRule,
    Deferrable,
    InitiallyDeferred,
    Validate,
    Disabled,
    Custom(String),
}

impl Field {
    /// The external field name
    pub fn as_str(&self) -> &str {
        match self {
            Self::This => "this",
            Self::Name => "name",
            Self::Default => "default",
            Self::Catalog => "catalog",
            Self::Schema => "schema",
            Self::Table => "table",
            Self::Relation => "relation",
            Self::Remarks => "remarks",
            Self::Tablespace => "tablespace",
            Self::DefaultTablespace => "default_tablespace",
            Self::Type => "type",
            Self::Nullable => "nullable",
            Self::DefaultValue => "defaultValue",
            Self::Order => "order",
            Self::Computed => "computed",
            Self::Descending => "descending",
            Self::AutoIncrementInformation => "autoIncrementInformation",
            Self::AutoIncrement => "autoIncrement",
            Self::Columns => "columns",
            Self::Unique => "unique",
            Self::Clustered => "clustered",
            Self::BackingIndex => "backingIndex",
            Self::ForeignKeyTable => "foreignKeyTable",
            Self::ForeignKeyColumns => "foreignKeyColumns",
            Self::PrimaryKeyTable => "primaryKeyTable",
            Self::PrimaryKeyColumns => "primaryKeyColumns",
            Self::UpdateRule => "updateRule",
            Self::DeleteRule => "deleteRule",
            Self::Deferrable => "deferrable",
            Self::InitiallyDeferred => "initiallyDeferred",
            Self::Validate => "validate",
            Self::Disabled => "disabled",
            Self::Custom(name) => name,
        }
    }
}

const KNOWN_FIELDS: [Field; 32] = [
    Field::This,
    Field::Name,
    Field::Default,
    Field::Catalog,
    Field::Schema,
    Field::Table,
    Field::Relation,
    Field::Remarks,
    Field::Tablespace,
    Field::DefaultTablespace,
    Field::Type,
    Field::Nullable,
    Field::DefaultValue,
    Field::Order,
    Field::Computed,
    Field::Descending,
    Field::AutoIncrementInformation,
    Field::AutoIncrement,
    Field::Columns,
    Field::Unique,
    Field::Clustered,
    Field::BackingIndex,
    Field::ForeignKeyTable,
    Field::ForeignKeyColumns,
    Field::PrimaryKeyTable,
    Field::PrimaryKeyColumns,
    Field::UpdateRule,
    Field::DeleteRule,
    Field::Deferrable,
    Field::InitiallyDeferred,
    Field::Validate,
    Field::Disabled,
];

impl From<&str> for Field {
    fn from(name: &str) -> Self {
        KNOWN_FIELDS
            .iter()
            .find(|field| field.as_str() == name)
            .cloned()
            .unwrap_or_else(|| Field::Custom(name.to_string()))
    }
}

impl From<String> for Field {
    fn from(name: String) -> Self {
        Field::from(name.as_str())
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Display order is lexicographic by external name. A custom field that
// shadows a known name sorts after it but stays distinct.
impl Ord for Field {
    fn cmp(&self, other: &Self) -> Ordering {
        let custom = |field: &Field| matches!(field, Field::Custom(_));
        self.as_str()
            .cmp(other.as_str())
            .then_with(|| custom(self).cmp(&custom(other)))
    }
}

impl PartialOrd for Field {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Serialize for Field {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Field {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(Field::from(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_parsing_accepts_spellings() {
        assert_eq!("primaryKey".parse::<ObjectKind>(), Ok(ObjectKind::PrimaryKey));
        assert_eq!("primary_key".parse::<ObjectKind>(), Ok(ObjectKind::PrimaryKey));
        assert_eq!("UniqueConstraint".parse::<ObjectKind>(), Ok(ObjectKind::UniqueConstraint));
        assert!("view".parse::<ObjectKind>().is_err());
    }

    #[test]
    fn field_names_are_stable() {
        assert_eq!(Field::DefaultTablespace.as_str(), "default_tablespace");
        assert_eq!(Field::AutoIncrementInformation.as_str(), "autoIncrementInformation");
        assert_eq!(Field::from("order"), Field::Order);
        assert_eq!(Field::from("fillFactor"), Field::Custom("fillFactor".to_string()));
    }

    #[test]
    fn fields_order_by_name() {
        let mut fields = vec![Field::Type, Field::AutoIncrement, Field::Name];
        fields.sort();
        assert_eq!(fields, vec![Field::AutoIncrement, Field::Name, Field::Type]);
    }

    #[test]
    fn custom_field_shadowing_known_name_is_distinct() {
        let custom = Field::Custom("remarks".to_string());
        assert_ne!(custom, Field::Remarks);
        assert_eq!(Field::Remarks.cmp(&custom), Ordering::Less);

        let fields: std::collections::BTreeSet<Field> =
            [Field::Remarks, custom.clone()].into_iter().collect();
        assert_eq!(fields.len(), 2);
    }

    #[test]
    fn every_known_field_round_trips() {
        for field in KNOWN_FIELDS.iter() {
            assert_eq!(&Field::from(field.as_str()), field);
        }
    }
}
