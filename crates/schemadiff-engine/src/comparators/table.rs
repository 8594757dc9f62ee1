use super::{downcast, name_matches};
use crate::chain::ComparatorChain;
use crate::comparator::{excluding, DatabaseObjectComparator, Priority};
use crate::compare::NameCompareFunction;
use crate::differences::ObjectDifferences;
use crate::error::CompareError;
use schemadiff_core::{Database, DatabaseObject, Field, ObjectKind};
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, Default)]
pub struct TableComparator;

impl DatabaseObjectComparator for TableComparator {
    fn name(&self) -> &'static str {
        "table"
    }

    fn priority(&self, kind: ObjectKind, _database: &dyn Database) -> Priority {
        match kind {
            ObjectKind::Table => Priority::Type,
            _ => Priority::NotApplicable,
        }
    }

    fn hash(
        &self,
        object: &DatabaseObject,
        chain: &ComparatorChain<'_>,
    ) -> Result<Option<Vec<String>>, CompareError> {
        downcast(self.name(), object, DatabaseObject::as_table)?;
        chain.hash(object)
    }

    fn is_same_object(
        &self,
        reference: &DatabaseObject,
        comparison: &DatabaseObject,
        chain: &ComparatorChain<'_>,
    ) -> Result<bool, CompareError> {
        let this = downcast(self.name(), reference, DatabaseObject::as_table)?;
        let that = downcast(self.name(), comparison, DatabaseObject::as_table)?;

        if !name_matches(reference, comparison, chain.database()) {
            return Ok(false);
        }

        let this_schema = this.schema.clone().map(DatabaseObject::Schema);
        let that_schema = that.schema.clone().map(DatabaseObject::Schema);
        chain.context().is_same_object(this_schema.as_ref(), that_schema.as_ref())
    }

    fn find_differences(
        &self,
        reference: &DatabaseObject,
        comparison: &DatabaseObject,
        chain: &ComparatorChain<'_>,
        exclude: &HashSet<Field>,
    ) -> Result<ObjectDifferences, CompareError> {
        let this = downcast(self.name(), reference, DatabaseObject::as_table)?;
        let that = downcast(self.name(), comparison, DatabaseObject::as_table)?;

        let exclude = excluding(exclude, [Field::Name, Field::Schema]);
        let mut differences = chain.find_differences(Some(reference), Some(comparison), &exclude)?;

        let function = NameCompareFunction::new(ObjectKind::Table, chain.database());
        differences.compare(Field::Name, reference, comparison, &function)?;

        if this.is_default_tablespace() && that.is_default_tablespace() {
            differences.remove_difference(&Field::Tablespace);
        }
        differences.remove_difference(&Field::DefaultTablespace);

        Ok(differences)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comparators::testing::Harness;
    use pretty_assertions::assert_eq;
    use schemadiff_core::{DialectProfile, Schema, Table};
    use std::sync::Arc;

    fn table(table: Table) -> DatabaseObject {
        DatabaseObject::Table(Arc::new(table))
    }

    fn in_schema(name: &str, schema: &str) -> DatabaseObject {
        table(Table::new(name).with_schema(Arc::new(Schema::new(schema))))
    }

    #[test]
    fn case_rule_decides_identity() {
        let insensitive = Harness::new(DialectProfile::postgres());
        assert!(insensitive.same(&table(Table::new("Users")), &table(Table::new("users"))));

        let sensitive = Harness::new(DialectProfile::generic().with_case_sensitive(true));
        assert!(!sensitive.same(&table(Table::new("Users")), &table(Table::new("users"))));
    }

    #[test]
    fn schemas_must_match() {
        let harness = Harness::new(DialectProfile::postgres());
        assert!(harness.same(&in_schema("orders", "sales"), &in_schema("orders", "SALES")));
        assert!(!harness.same(&in_schema("orders", "sales"), &in_schema("orders", "hr")));
        assert!(!harness.same(&in_schema("orders", "sales"), &table(Table::new("orders"))));
    }

    #[test]
    fn hash_delegates_to_name() {
        let harness = Harness::new(DialectProfile::postgres());
        assert_eq!(harness.hash(&in_schema("Orders", "sales")), Some(vec!["orders".to_string()]));
    }

    #[test]
    fn default_tablespaces_are_not_differences() {
        let harness = Harness::new(DialectProfile::postgres());

        let a = table(Table::new("orders").with_tablespace("pg_default", true));
        let b = table(Table::new("orders").with_tablespace("main", true));
        assert!(harness.differences(&a, &b).is_empty());

        let c = table(Table::new("orders").with_tablespace("fast", false));
        assert_eq!(harness.differences(&a, &c), vec!["tablespace".to_string()]);
    }

    #[test]
    fn remarks_are_compared() {
        let harness = Harness::new(DialectProfile::postgres());
        let a = table(Table::new("orders").with_remarks("all orders"));
        let b = table(Table::new("orders"));
        assert_eq!(harness.differences(&a, &b), vec!["remarks".to_string()]);
    }
}
