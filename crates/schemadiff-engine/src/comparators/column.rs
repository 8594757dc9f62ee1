use super::{downcast, name_matches};
use crate::chain::ComparatorChain;
use crate::comparator::{excluding, DatabaseObjectComparator, Priority};
use crate::compare::NameCompareFunction;
use crate::differences::ObjectDifferences;
use crate::error::CompareError;
use schemadiff_core::{AttrValue, Database, DatabaseObject, Field, ObjectKind};
use std::collections::HashSet;

/// Column identity within its relation
///
/// Columns are the most numerous objects in a snapshot, so identity is
/// decided here without consulting the rest of the chain.
#[derive(Debug, Clone, Copy, Default)]
pub struct ColumnComparator;

impl DatabaseObjectComparator for ColumnComparator {
    fn name(&self) -> &'static str {
        "column"
    }

    fn priority(&self, kind: ObjectKind, _database: &dyn Database) -> Priority {
        match kind {
            ObjectKind::Column => Priority::Type,
            _ => Priority::NotApplicable,
        }
    }

    fn hash(
        &self,
        object: &DatabaseObject,
        _chain: &ComparatorChain<'_>,
    ) -> Result<Option<Vec<String>>, CompareError> {
        let column = downcast(self.name(), object, DatabaseObject::as_column)?;

        let mut key = column.unqualified_name().to_string();
        if let Some(table) = column.relation.as_ref().and_then(|t| t.name.as_deref()) {
            key.push(':');
            key.push_str(table);
        }
        if column.is_computed() {
            key.push_str(":computed");
        }
        if column.is_descending() {
            key.push_str(":descending");
        }

        Ok(Some(vec![key.to_lowercase()]))
    }

    fn is_same_object(
        &self,
        reference: &DatabaseObject,
        comparison: &DatabaseObject,
        chain: &ComparatorChain<'_>,
    ) -> Result<bool, CompareError> {
        let this = downcast(self.name(), reference, DatabaseObject::as_column)?;
        let that = downcast(self.name(), comparison, DatabaseObject::as_column)?;

        if !name_matches(reference, comparison, chain.database()) {
            return Ok(false);
        }

        let this_relation = this.relation.clone().map(DatabaseObject::Table);
        let that_relation = that.relation.clone().map(DatabaseObject::Table);
        if !chain
            .context()
            .is_same_object(this_relation.as_ref(), that_relation.as_ref())?
        {
            return Ok(false);
        }

        Ok(this.is_computed() == that.is_computed() && this.is_descending() == that.is_descending())
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
        let control = chain.control();

        let mut handled = vec![Field::Name, Field::Type, Field::AutoIncrementInformation];
        if !control.diff_column_order {
            handled.push(Field::Order);
        }
        let exclude = excluding(exclude, handled);

        let mut differences = chain.find_differences(Some(reference), Some(comparison), &exclude)?;

        let function = NameCompareFunction::new(ObjectKind::Column, chain.database());
        differences.compare(Field::Name, reference, comparison, &function)?;
        differences.compare(Field::Type, reference, comparison, &function)?;

        // Start and increment values routinely differ between environments;
        // only whether the column auto-increments at all is reported.
        let (this_auto, that_auto) = (this.is_auto_increment(), that.is_auto_increment());
        if this_auto != that_auto
            && !control.is_suppressed(ObjectKind::Column, &Field::AutoIncrementInformation)
        {
            differences.add_difference(
                Field::AutoIncrement,
                Some(AttrValue::Bool(this_auto)),
                Some(AttrValue::Bool(that_auto)),
            );
        }

        Ok(differences)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comparators::testing::Harness;
    use pretty_assertions::assert_eq;
    use schemadiff_core::{
        AutoIncrementInfo, Column, CompareControl, DataType, DialectProfile, Table,
    };
    use std::sync::Arc;

    fn users() -> Arc<Table> {
        Arc::new(Table::new("users"))
    }

    fn column(column: Column) -> DatabaseObject {
        DatabaseObject::Column(Arc::new(column))
    }

    #[test]
    fn identity_needs_same_relation_and_flags() {
        let harness = Harness::new(DialectProfile::postgres());
        let id = column(Column::new("ID").with_relation(users()));

        assert!(harness.same(&id, &column(Column::new("id").with_relation(users()))));
        assert!(!harness.same(
            &id,
            &column(Column::new("id").with_relation(Arc::new(Table::new("orders"))))
        ));
        assert!(!harness.same(
            &id,
            &column(Column::new("id").with_relation(users()).with_computed(true))
        ));
        assert!(!harness.same(
            &id,
            &column(Column::new("id").with_relation(users()).with_descending(true))
        ));
    }

    #[test]
    fn hash_includes_relation_and_flags() {
        let harness = Harness::new(DialectProfile::postgres());
        let object = column(Column::new("Email").with_relation(users()).with_descending(true));
        assert_eq!(harness.hash(&object), Some(vec!["email:users:descending".to_string()]));
    }

    #[test]
    fn auto_increment_is_reported_as_flag() {
        let harness = Harness::new(DialectProfile::generic());
        let a = column(
            Column::new("id")
                .with_relation(users())
                .with_auto_increment(AutoIncrementInfo::default()),
        );
        let b = column(Column::new("id").with_relation(users()));
        assert_eq!(harness.differences(&a, &b), vec!["autoIncrement".to_string()]);

        let control = CompareControl::new()
            .with_suppressed_field(ObjectKind::Column, Field::AutoIncrementInformation);
        let harness = Harness::with_control(DialectProfile::generic(), control);
        assert!(harness.differences(&a, &b).is_empty());
    }

    #[test]
    fn sequence_settings_are_ignored() {
        let harness = Harness::new(DialectProfile::generic());
        let a = column(Column::new("id").with_auto_increment(AutoIncrementInfo {
            start_with: Some(1),
            increment_by: Some(1),
        }));
        let b = column(Column::new("id").with_auto_increment(AutoIncrementInfo {
            start_with: Some(1000),
            increment_by: Some(1),
        }));
        assert!(harness.differences(&a, &b).is_empty());
    }

    #[test]
    fn order_only_counts_when_enabled() {
        let a = column(Column::new("id").with_order(1));
        let b = column(Column::new("id").with_order(2));

        assert!(Harness::new(DialectProfile::generic()).differences(&a, &b).is_empty());

        let control = CompareControl::new().with_diff_column_order(true);
        let harness = Harness::with_control(DialectProfile::generic(), control);
        assert_eq!(harness.differences(&a, &b), vec!["order".to_string()]);
    }

    #[test]
    fn type_and_nullability_differences() {
        let harness = Harness::new(DialectProfile::generic());
        let a = column(
            Column::new("name")
                .with_type(DataType::new("varchar").with_size(100))
                .with_nullable(true),
        );
        let b = column(
            Column::new("name")
                .with_type(DataType::new("VARCHAR").with_size(100))
                .with_nullable(false),
        );
        assert_eq!(harness.differences(&a, &b), vec!["nullable".to_string()]);

        let c = column(
            Column::new("name")
                .with_type(DataType::new("varchar").with_size(200))
                .with_nullable(true),
        );
        assert_eq!(harness.differences(&a, &c), vec!["type".to_string()]);
    }
}
