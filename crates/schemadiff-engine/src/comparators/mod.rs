//! Built-in comparators, one per object kind plus the generic fallback

mod catalog;
mod column;
mod default;
mod foreign_key;
mod index;
mod postgres_column;
mod primary_key;
mod schema;
mod table;
mod unique_constraint;

pub use catalog::CatalogComparator;
pub use column::ColumnComparator;
pub use default::DefaultComparator;
pub use foreign_key::ForeignKeyComparator;
pub use index::IndexComparator;
pub use postgres_column::PostgresColumnComparator;
pub use primary_key::PrimaryKeyComparator;
pub use schema::SchemaComparator;
pub use table::TableComparator;
pub use unique_constraint::UniqueConstraintComparator;

use crate::comparator::DatabaseObjectComparator;
use crate::error::CompareError;
use schemadiff_core::{AttrValue, Database, DatabaseObject, NameCase, SchemaComparison};
use std::sync::Arc;

/// Every built-in comparator, in registration order
pub fn builtin() -> Vec<Arc<dyn DatabaseObjectComparator>> {
    vec![
        Arc::new(DefaultComparator),
        Arc::new(CatalogComparator),
        Arc::new(SchemaComparator),
        Arc::new(TableComparator),
        Arc::new(ColumnComparator),
        Arc::new(PostgresColumnComparator),
        Arc::new(IndexComparator),
        Arc::new(PrimaryKeyComparator),
        Arc::new(ForeignKeyComparator),
        Arc::new(UniqueConstraintComparator),
    ]
}

/// Narrow an object to the struct a comparator handles
pub(crate) fn downcast<'o, T>(
    comparator: &'static str,
    object: &'o DatabaseObject,
    cast: fn(&DatabaseObject) -> Option<&Arc<T>>,
) -> Result<&'o Arc<T>, CompareError> {
    cast(object).ok_or_else(|| CompareError::unsupported(comparator, object.kind()))
}

/// Names equal under the dialect's case rule, after name correction
///
/// Two unnamed objects match; a named and an unnamed one do not.
pub(crate) fn name_matches(
    reference: &DatabaseObject,
    comparison: &DatabaseObject,
    database: &dyn Database,
) -> bool {
    let reference_name = reference
        .name()
        .map(|name| database.correct_object_name(name, reference.kind()));
    let comparison_name = comparison
        .name()
        .map(|name| database.correct_object_name(name, comparison.kind()));

    match (reference_name, comparison_name) {
        (None, None) => true,
        (Some(a), Some(b)) => database.names_equal(&a, &b),
        _ => false,
    }
}

/// Schema or catalog names equal, blank counting as absent
pub(crate) fn equals_schemas(database: &dyn Database, a: Option<&str>, b: Option<&str>) -> bool {
    let a = a.map(str::trim).unwrap_or("");
    let b = b.map(str::trim).unwrap_or("");
    if database.schema_and_catalog_case() == NameCase::Original {
        a == b
    } else {
        a.to_lowercase() == b.to_lowercase()
    }
}

/// The `(comparison, reference)` names of an alias at the level the dialect
/// identifies containers by
pub(crate) fn alias_names(
    database: &dyn Database,
    alias: &SchemaComparison) -> (Option<String>, Option<String>,
) {
    let pick = |side: &schemadiff_core::CatalogAndSchema| {
        if database.supports_schemas() {
            side.schema_name.clone()
        } else if database.supports_catalogs() {
            side.catalog_name.clone().or_else(|| side.schema_name.clone())
        } else {
            None
        }
    };
    (pick(&alias.comparison), pick(&alias.reference))
}

pub(crate) fn same_ignoring_case(a: Option<&str>, b: Option<&str>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => a.to_lowercase() == b.to_lowercase(),
        _ => false,
    }
}

fn listed_column_name(value: &AttrValue) -> Result<&str, CompareError> {
    match value {
        AttrValue::Object(object) => Ok(object.name().map(str::trim).unwrap_or("")),
        other => Err(CompareError::type_mismatch("object", other.type_name())),
    }
}

/// Column lists equal by trimmed, case-insensitive name, in order
pub(crate) fn column_names_equal(
    reference: &AttrValue,
    comparison: &AttrValue,
) -> Result<bool, CompareError> {
    let (Some(reference), Some(comparison)) = (reference.as_list(), comparison.as_list()) else {
        let found = if reference.as_list().is_some() {
            comparison.type_name()
        } else {
            reference.type_name()
        };
        return Err(CompareError::type_mismatch("list", found));
    };

    if reference.len() != comparison.len() {
        return Ok(false);
    }

    for (a, b) in reference.iter().zip(comparison) {
        if listed_column_name(a)?.to_lowercase() != listed_column_name(b)?.to_lowercase() {
            return Ok(false);
        }
    }
    Ok(true)
}


#[cfg(test)]
mod tests {
    use super::*;
    use schemadiff_core::{DialectProfile, Table};

    #[test]
    fn name_matching_uses_case_rule() {
        let a = DatabaseObject::Table(Arc::new(Table::new("Users")));
        let b = DatabaseObject::Table(Arc::new(Table::new("users")));
        assert!(name_matches(&a, &b, &DialectProfile::postgres()));
        assert!(!name_matches(&a, &b, &DialectProfile::generic().with_case_sensitive(true)));
    }

    #[test]
    fn schema_equality_respects_original_case() {
        let mssql = DialectProfile::mssql();
        assert!(equals_schemas(&mssql, Some(" dbo "), Some("dbo")));
        assert!(!equals_schemas(&mssql, Some("DBO"), Some("dbo")));
        assert!(equals_schemas(&DialectProfile::postgres(), Some("DBO"), Some("dbo")));
        assert!(equals_schemas(&mssql, None, Some("  ")));
    }
}
