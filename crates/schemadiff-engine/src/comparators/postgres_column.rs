use super::downcast;
use crate::chain::ComparatorChain;
use crate::comparator::{DatabaseObjectComparator, Priority};
use crate::differences::ObjectDifferences;
use crate::error::CompareError;
use schemadiff_core::{Database, DatabaseObject, Field, ObjectKind};
use std::collections::HashSet;

/// Serial pseudo-types and the integer types they expand to
const SERIAL_SYNONYMS: [(&str, &str); 3] = [
    ("bigserial", "int8"),
    ("serial", "int4"),
    ("smallserial", "int2"),
];

fn serial_equivalent(a: &str, b: &str) -> bool {
    let (a, b) = (a.to_lowercase(), b.to_lowercase());
    a == b
        || SERIAL_SYNONYMS
            .iter()
            .any(|(serial, int)| (a == *serial && b == *int) || (a == *int && b == *serial))
}

/// Postgres reports a `serial` column as `int4` once created; auto-increment
/// columns on both sides whose types are serial synonyms are not a type change
#[derive(Debug, Clone, Copy, Default)]
pub struct PostgresColumnComparator;

impl DatabaseObjectComparator for PostgresColumnComparator {
    fn name(&self) -> &'static str {
        "postgresColumn"
    }

    fn priority(&self, kind: ObjectKind, database: &dyn Database) -> Priority {
        match kind {
            ObjectKind::Column if database.dialect().is_postgres_family() => Priority::Database,
            _ => Priority::NotApplicable,
        }
    }

    fn hash(
        &self,
        object: &DatabaseObject,
        chain: &ComparatorChain<'_>,
    ) -> Result<Option<Vec<String>>, CompareError> {
        chain.hash(object)
    }

    fn is_same_object(
        &self,
        reference: &DatabaseObject,
        comparison: &DatabaseObject,
        chain: &ComparatorChain<'_>,
    ) -> Result<bool, CompareError> {
        chain.is_same_object(Some(reference), Some(comparison))
    }

    fn find_differences(
        &self,
        reference: &DatabaseObject,
        comparison: &DatabaseObject,
        chain: &ComparatorChain<'_>,
        exclude: &HashSet<Field>,
    ) -> Result<ObjectDifferences, CompareError> {
        let this = downcast(self.name(), reference, DatabaseObject::as_column)?;
        let that = downcast(self.name(), comparison, DatabaseObject::as_column)?;

        let mut differences = chain.find_differences(Some(reference), Some(comparison), exclude)?;

        if this.is_auto_increment() && that.is_auto_increment() {
            if let (Some(a), Some(b)) = (&this.data_type, &that.data_type) {
                if serial_equivalent(&a.type_name, &b.type_name) {
                    differences.remove_difference(&Field::Type);
                }
            }
        }

        Ok(differences)
    }
}
