use super::{column_names_equal, downcast};
use crate::chain::ComparatorChain;
use crate::comparator::{excluding, DatabaseObjectComparator, Priority};
use crate::differences::ObjectDifferences;
use crate::error::CompareError;
use schemadiff_core::{Database, DatabaseObject, Field, ObjectKind, Table};
use std::collections::HashSet;
use std::sync::Arc;

fn named_table(table: &Option<Arc<Table>>) -> Option<&Arc<Table>> {
    table.as_ref().filter(|t| t.name.is_some())
}

/// Primary keys are identified by their table; names are a fallback
#[derive(Debug, Clone, Copy, Default)]
pub struct PrimaryKeyComparator;

impl DatabaseObjectComparator for PrimaryKeyComparator {
    fn name(&self) -> &'static str {
        "primaryKey"
    }

    fn priority(&self, kind: ObjectKind, _database: &dyn Database) -> Priority {
        match kind {
            ObjectKind::PrimaryKey => Priority::Type,
            _ => Priority::NotApplicable,
        }
    }

    fn hash(
        &self,
        object: &DatabaseObject,
        chain: &ComparatorChain<'_>,
    ) -> Result<Option<Vec<String>>, CompareError> {
        let key = downcast(self.name(), object, DatabaseObject::as_primary_key)?;

        match (&key.name, named_table(&key.table)) {
            (None, _) => {
                let table = key.table.clone().map(DatabaseObject::Table);
                chain.context().hash(table.as_ref())
            }
            (Some(name), None) => Ok(Some(vec![name.to_lowercase()])),
            (Some(name), Some(table)) => Ok(Some(vec![
                name.to_lowercase(),
                table.name.as_deref().unwrap_or_default().to_lowercase(),
            ])),
        }
    }

    fn is_same_object(
        &self,
        reference: &DatabaseObject,
        comparison: &DatabaseObject,
        chain: &ComparatorChain<'_>,
    ) -> Result<bool, CompareError> {
        let this = downcast(self.name(), reference, DatabaseObject::as_primary_key)?;
        let that = downcast(self.name(), comparison, DatabaseObject::as_primary_key)?;

        if let (Some(a), Some(b)) = (named_table(&this.table), named_table(&that.table)) {
            let (a, b) = (DatabaseObject::Table(a.clone()), DatabaseObject::Table(b.clone()));
            return chain.context().is_same_object(Some(&a), Some(&b));
        }

        // Blank names identify nothing
        let trimmed = |name: Option<&str>| {
            name.map(str::trim)
                .filter(|n| !n.is_empty())
                .map(str::to_lowercase)
        };
        Ok(match (trimmed(this.name.as_deref()), trimmed(that.name.as_deref())) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        })
    }

    fn find_differences(
        &self,
        reference: &DatabaseObject,
        comparison: &DatabaseObject,
        chain: &ComparatorChain<'_>,
        exclude: &HashSet<Field>,
    ) -> Result<ObjectDifferences, CompareError> {
        downcast(self.name(), reference, DatabaseObject::as_primary_key)?;
        downcast(self.name(), comparison, DatabaseObject::as_primary_key)?;

        let exclude = excluding(exclude, [Field::Name, Field::BackingIndex, Field::Columns]);
        let mut differences = chain.find_differences(Some(reference), Some(comparison), &exclude)?;
        differences.compare(Field::Columns, reference, comparison, &column_names_equal)?;
        Ok(differences)
    }
}
