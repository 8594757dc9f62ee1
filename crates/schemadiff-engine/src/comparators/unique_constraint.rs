use super::index::{indexed_hash, same_indexed, Indexed};
use super::{column_names_equal, downcast};
use crate::chain::ComparatorChain;
use crate::comparator::{excluding, DatabaseObjectComparator, Priority};
use crate::compare::StandardCompareFunction;
use crate::differences::ObjectDifferences;
use crate::error::CompareError;
use schemadiff_core::{Column, Database, DatabaseObject, Field, ObjectKind, UniqueConstraint};
use std::collections::HashSet;
use std::sync::Arc;

/// Constraint columns re-parented onto the constraint's table
///
/// Snapshots do not always link constraint columns to a relation; identity
/// is decided as if they belonged to the constraint's table. The snapshot's
/// own columns are left untouched.
fn owned_columns(constraint: &UniqueConstraint) -> Vec<DatabaseObject> {
    constraint
        .columns
        .iter()
        .map(|column| {
            let mut owned = Column::clone(column);
            owned.relation = constraint.table.clone();
            DatabaseObject::Column(Arc::new(owned))
        })
        .collect()
}

#[derive(Debug, Clone, Copy, Default)]
pub struct UniqueConstraintComparator;

impl DatabaseObjectComparator for UniqueConstraintComparator {
    fn name(&self) -> &'static str {
        "uniqueConstraint"
    }

    fn priority(&self, kind: ObjectKind, _database: &dyn Database) -> Priority {
        match kind {
            ObjectKind::UniqueConstraint => Priority::Type,
            _ => Priority::NotApplicable,
        }
    }

    fn hash(
        &self,
        object: &DatabaseObject,
        chain: &ComparatorChain<'_>,
    ) -> Result<Option<Vec<String>>, CompareError> {
        let constraint = downcast(self.name(), object, DatabaseObject::as_unique_constraint)?;
        indexed_hash(&chain.context(), constraint.name.as_deref(), constraint.table.as_ref())
    }

    fn is_same_object(
        &self,
        reference: &DatabaseObject,
        comparison: &DatabaseObject,
        chain: &ComparatorChain<'_>,
    ) -> Result<bool, CompareError> {
        let this = downcast(self.name(), reference, DatabaseObject::as_unique_constraint)?;
        let that = downcast(self.name(), comparison, DatabaseObject::as_unique_constraint)?;

        same_indexed(
            &chain.context(),
            &Indexed::new(reference, this.table.as_ref(), this.schema(), owned_columns(this)),
            &Indexed::new(comparison, that.table.as_ref(), that.schema(), owned_columns(that)),
        )
    }

    fn find_differences(
        &self,
        reference: &DatabaseObject,
        comparison: &DatabaseObject,
        chain: &ComparatorChain<'_>,
        exclude: &HashSet<Field>,
    ) -> Result<ObjectDifferences, CompareError> {
        downcast(self.name(), reference, DatabaseObject::as_unique_constraint)?;
        downcast(self.name(), comparison, DatabaseObject::as_unique_constraint)?;

        let exclude = excluding(exclude, [Field::Name, Field::Columns, Field::BackingIndex]);
        let mut differences = chain.find_differences(Some(reference), Some(comparison), &exclude)?;
        differences.compare(Field::Columns, reference, comparison, &column_names_equal)?;
        differences.compare(
            Field::BackingIndex,
            reference,
            comparison,
            &StandardCompareFunction::new(chain.context()),
        )?;
        Ok(differences)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comparators::testing::Harness;
    use pretty_assertions::assert_eq;
    use schemadiff_core::{DialectProfile, Index, Table};

    fn bare_columns(names: &[&str]) -> Vec<Arc<Column>> {
        names.iter().map(|n| Arc::new(Column::new(*n))).collect()
    }

    fn constraint(constraint: UniqueConstraint) -> DatabaseObject {
        DatabaseObject::UniqueConstraint(Arc::new(constraint))
    }

    #[test]
    fn unlinked_columns_take_the_constraint_table() {
        let harness = Harness::new(DialectProfile::postgres());
        let users = Arc::new(Table::new("users"));
        let a = constraint(
            UniqueConstraint::new("uq_a")
                .with_table(users.clone())
                .with_columns(bare_columns(&["email"])),
        );
        let b = constraint(
            UniqueConstraint::new("uq_b")
                .with_table(users.clone())
                .with_columns(bare_columns(&["EMAIL"])),
        );
        let c = constraint(
            UniqueConstraint::new("uq_c")
                .with_table(users)
                .with_columns(bare_columns(&["name"])),
        );
        assert!(harness.same(&a, &b));
        assert!(!harness.same(&a, &c));
    }

    #[test]
    fn originals_are_not_modified() {
        let columns = bare_columns(&["email"]);
        let uc = UniqueConstraint::new("uq")
            .with_table(Arc::new(Table::new("users")))
            .with_columns(columns.clone());
        let owned = owned_columns(&uc);
        assert!(owned[0].as_column().unwrap().relation.is_some());
        assert!(columns[0].relation.is_none());
    }

    #[test]
    fn backing_index_compares_by_identity() {
        let harness = Harness::new(DialectProfile::postgres());
        let users = Arc::new(Table::new("users"));
        let with_index = |name: &str| {
            constraint(
                UniqueConstraint::new("uq")
                    .with_table(users.clone())
                    .with_columns(bare_columns(&["email"]))
                    .with_backing_index(Arc::new(Index::new(name).with_table(users.clone()))),
            )
        };
        assert!(harness.differences(&with_index("uq_idx"), &with_index("UQ_IDX")).is_empty());
        assert_eq!(
            harness.differences(&with_index("uq_idx"), &with_index("other_idx")),
            vec!["backingIndex".to_string()]
        );
    }
}
