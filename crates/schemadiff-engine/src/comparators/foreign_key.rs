use super::downcast;
use crate::chain::ComparatorChain;
use crate::comparator::{excluding, DatabaseObjectComparator, Priority};
use crate::compare::NameCompareFunction;
use crate::differences::ObjectDifferences;
use crate::error::CompareError;
use schemadiff_core::{Column, Database, DatabaseObject, Field, ForeignKey, ObjectKind, Table};
use std::collections::HashSet;
use std::sync::Arc;

fn joined(columns: &[Arc<Column>]) -> String {
    columns
        .iter()
        .map(|c| c.unqualified_name())
        .collect::<Vec<_>>()
        .join(",")
}

fn table_object(table: &Arc<Table>) -> DatabaseObject {
    DatabaseObject::Table(table.clone())
}

fn fully_resolved(key: &ForeignKey) -> bool {
    key.foreign_key_table.is_some() && key.primary_key_table.is_some()
}

/// Foreign keys are identified by what they link, not by their names
///
/// With both ends resolved on both sides, two keys are the same when they
/// join the same column lists between the same tables. Otherwise only the
/// constraint name and, when known, the referencing table can be used.
#[derive(Debug, Clone, Copy, Default)]
pub struct ForeignKeyComparator;

impl DatabaseObjectComparator for ForeignKeyComparator {
    fn name(&self) -> &'static str {
        "foreignKey"
    }

    fn priority(&self, kind: ObjectKind, _database: &dyn Database) -> Priority {
        match kind {
            ObjectKind::ForeignKey => Priority::Type,
            _ => Priority::NotApplicable,
        }
    }

    fn hash(
        &self,
        object: &DatabaseObject,
        chain: &ComparatorChain<'_>,
    ) -> Result<Option<Vec<String>>, CompareError> {
        let key = downcast(self.name(), object, DatabaseObject::as_foreign_key)?;
        let table_name = key.foreign_key_table.as_ref().and_then(|t| t.name.as_deref());

        match (&key.name, table_name) {
            (None, _) => {
                let table = key.foreign_key_table.as_ref().map(table_object);
                chain.context().hash(table.as_ref())
            }
            (Some(name), None) => Ok(Some(vec![name.to_lowercase()])),
            (Some(name), Some(table)) => Ok(Some(vec![name.to_lowercase(), table.to_lowercase()])),
        }
    }

    fn is_same_object(
        &self,
        reference: &DatabaseObject,
        comparison: &DatabaseObject,
        chain: &ComparatorChain<'_>,
    ) -> Result<bool, CompareError> {
        let this = downcast(self.name(), reference, DatabaseObject::as_foreign_key)?;
        let that = downcast(self.name(), comparison, DatabaseObject::as_foreign_key)?;
        let database = chain.database();

        if !fully_resolved(this) || !fully_resolved(that) {
            let named = |key: &ForeignKey| {
                key.foreign_key_table
                    .as_ref()
                    .filter(|t| t.name.is_some())
                    .map(table_object)
            };

            // Constraint names are only unique per table
            if let (Some(a), Some(b)) = (named(this), named(that)) {
                if !chain.context().is_same_object(Some(&a), Some(&b))? {
                    return Ok(false);
                }
            }

            return Ok(match (this.name.as_deref(), that.name.as_deref()) {
                (Some(a), Some(b)) => database.names_equal(a, b),
                _ => false,
            });
        }

        let columns_same = database.names_equal(
            &joined(&this.foreign_key_columns),
            &joined(&that.foreign_key_columns),
        ) && database.names_equal(
            &joined(&this.primary_key_columns),
            &joined(&that.primary_key_columns),
        );
        if !columns_same {
            return Ok(false);
        }

        let context = chain.context();
        let this_fk_table = this.foreign_key_table.as_ref().map(table_object);
        let that_fk_table = that.foreign_key_table.as_ref().map(table_object);
        if !context.is_same_object(this_fk_table.as_ref(), that_fk_table.as_ref())? {
            return Ok(false);
        }

        let this_pk_table = this.primary_key_table.as_ref().map(table_object);
        let that_pk_table = that.primary_key_table.as_ref().map(table_object);
        context.is_same_object(this_pk_table.as_ref(), that_pk_table.as_ref())
    }

    fn find_differences(
        &self,
        reference: &DatabaseObject,
        comparison: &DatabaseObject,
        chain: &ComparatorChain<'_>,
        exclude: &HashSet<Field>,
    ) -> Result<ObjectDifferences, CompareError> {
        downcast(self.name(), reference, DatabaseObject::as_foreign_key)?;
        downcast(self.name(), comparison, DatabaseObject::as_foreign_key)?;

        let exclude = excluding(
            exclude,
            [
                Field::Name,
                Field::BackingIndex,
                Field::ForeignKeyColumns,
                Field::PrimaryKeyColumns,
                Field::ForeignKeyTable,
                Field::PrimaryKeyTable,
            ],
        );
        let mut differences = chain.find_differences(Some(reference), Some(comparison), &exclude)?;

        let database = chain.database();
        let by_column = NameCompareFunction::new(ObjectKind::Column, database);
        let by_table = NameCompareFunction::new(ObjectKind::Table, database);
        differences.compare(Field::ForeignKeyColumns, reference, comparison, &by_column)?;
        differences.compare(Field::PrimaryKeyColumns, reference, comparison, &by_column)?;
        differences.compare(Field::ForeignKeyTable, reference, comparison, &by_table)?;
        differences.compare(Field::PrimaryKeyTable, reference, comparison, &by_table)?;

        Ok(differences)
    }
}
