use super::{column_names_equal, downcast, name_matches};
use crate::chain::{CompareContext, ComparatorChain};
use crate::comparator::{excluding, DatabaseObjectComparator, Priority};
use crate::differences::ObjectDifferences;
use crate::error::CompareError;
use schemadiff_core::{Column, Database, DatabaseObject, Field, ObjectKind, Schema, Table};
use std::collections::HashSet;
use std::sync::Arc;

/// The parts of an index-like object that identity depends on
///
/// Shared with unique constraints, which follow the same rules.
pub(crate) struct Indexed<'o> {
    pub object: &'o DatabaseObject,
    pub table: Option<&'o Arc<Table>>,
    pub schema: Option<&'o Arc<Schema>>,
    pub columns: Vec<DatabaseObject>,
}

impl<'o> Indexed<'o> {
    pub fn new(
        object: &'o DatabaseObject,
        table: Option<&'o Arc<Table>>,
        schema: Option<&'o Arc<Schema>>,
        columns: Vec<DatabaseObject>,
    ) -> Self {
        Self {
            object,
            table,
            schema,
            columns,
        }
    }
}

fn schemas_differ(
    context: &CompareContext<'_>,
    this: &Indexed<'_>,
    that: &Indexed<'_>,
) -> Result<bool, CompareError> {
    match (this.schema, that.schema) {
        (Some(a), Some(b)) => {
            let (a, b) = (DatabaseObject::Schema(a.clone()), DatabaseObject::Schema(b.clone()));
            Ok(!context.is_same_object(Some(&a), Some(&b))?)
        }
        _ => Ok(false),
    }
}

/// Identity rules common to indexes and unique constraints
pub(crate) fn same_indexed(
    context: &CompareContext<'_>,
    this: &Indexed<'_>,
    that: &Indexed<'_>,
) -> Result<bool, CompareError> {
    let database = context.database;
    let (this_size, that_size) = (this.columns.len(), that.columns.len());

    let (Some(this_table), Some(that_table)) = (this.table, that.table) else {
        if this_size > 0 && that_size > 0 && this_size != that_size {
            return Ok(false);
        }
        if !name_matches(this.object, that.object, database) {
            return Ok(false);
        }
        return Ok(!schemas_differ(context, this, that)?);
    };

    let (a, b) = (
        DatabaseObject::Table(this_table.clone()),
        DatabaseObject::Table(that_table.clone()),
    );
    if !context.is_same_object(Some(&a), Some(&b))? {
        return Ok(false);
    }
    if schemas_differ(context, this, that)? {
        return Ok(false);
    }

    let both_named = this.object.name().is_some() && that.object.name().is_some();
    if both_named && name_matches(this.object, that.object, database) {
        return Ok(true);
    }

    if this_size == 0 || that_size == 0 {
        return Ok(name_matches(this.object, that.object, database));
    }
    if this_size != that_size {
        return Ok(false);
    }

    for (a, b) in this.columns.iter().zip(&that.columns) {
        if !context.is_same_object(Some(a), Some(b))? {
            return Ok(false);
        }
    }
    Ok(true)
}

/// Name keys plus the owning table's keys
pub(crate) fn indexed_hash(
    context: &CompareContext<'_>,
    name: Option<&str>,
    table: Option<&Arc<Table>>,
) -> Result<Option<Vec<String>>, CompareError> {
    let mut keys = Vec::new();
    if let Some(name) = name {
        keys.push(name.to_lowercase());
    }
    if let Some(table) = table {
        let table = DatabaseObject::Table(table.clone());
        keys.extend(context.hash(Some(&table))?.unwrap_or_default());
    }
    Ok(Some(keys))
}

fn column_objects(columns: &[Arc<Column>]) -> Vec<DatabaseObject> {
    columns.iter().cloned().map(DatabaseObject::Column).collect()
}

/// Index identity by table plus name, or by column list when names differ
#[derive(Debug, Clone, Copy, Default)]
pub struct IndexComparator;

impl DatabaseObjectComparator for IndexComparator {
    fn name(&self) -> &'static str {
        "index"
    }

    fn priority(&self, kind: ObjectKind, _database: &dyn Database) -> Priority {
        match kind {
            ObjectKind::Index => Priority::Type,
            _ => Priority::NotApplicable,
        }
    }

    fn hash(
        &self,
        object: &DatabaseObject,
        chain: &ComparatorChain<'_>,
    ) -> Result<Option<Vec<String>>, CompareError> {
        let index = downcast(self.name(), object, DatabaseObject::as_index)?;
        indexed_hash(&chain.context(), index.name.as_deref(), index.table.as_ref())
    }

    fn is_same_object(
        &self,
        reference: &DatabaseObject,
        comparison: &DatabaseObject,
        chain: &ComparatorChain<'_>,
    ) -> Result<bool, CompareError> {
        let this = downcast(self.name(), reference, DatabaseObject::as_index)?;
        let that = downcast(self.name(), comparison, DatabaseObject::as_index)?;

        same_indexed(
            &chain.context(),
            &Indexed::new(
                reference,
                this.table.as_ref(),
                this.schema(),
                column_objects(&this.columns),
            ),
            &Indexed::new(
                comparison,
                that.table.as_ref(),
                that.schema(),
                column_objects(&that.columns),
            ),
        )
    }

    fn find_differences(
        &self,
        reference: &DatabaseObject,
        comparison: &DatabaseObject,
        chain: &ComparatorChain<'_>,
        exclude: &HashSet<Field>,
    ) -> Result<ObjectDifferences, CompareError> {
        downcast(self.name(), reference, DatabaseObject::as_index)?;
        downcast(self.name(), comparison, DatabaseObject::as_index)?;

        let exclude = excluding(exclude, [Field::Name, Field::Columns]);
        let mut differences = chain.find_differences(Some(reference), Some(comparison), &exclude)?;
        differences.compare(Field::Columns, reference, comparison, &column_names_equal)?;
        Ok(differences)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comparators::testing::Harness;
    use pretty_assertions::assert_eq;
    use schemadiff_core::{DialectProfile, Index};

    fn users() -> Arc<Table> {
        Arc::new(Table::new("users").with_schema(Arc::new(Schema::new("public"))))
    }

    fn columns(table: &Arc<Table>, names: &[&str]) -> Vec<Arc<Column>> {
        names
            .iter()
            .map(|n| Arc::new(Column::new(*n).with_relation(table.clone())))
            .collect()
    }

    fn index(index: Index) -> DatabaseObject {
        DatabaseObject::Index(Arc::new(index))
    }

    #[test]
    fn same_name_on_same_table() {
        let harness = Harness::new(DialectProfile::postgres());
        let table = users();
        let a = index(
            Index::new("idx_email")
                .with_table(table.clone())
                .with_columns(columns(&table, &["email"])),
        );
        let b = index(
            Index::new("IDX_EMAIL")
                .with_table(users())
                .with_columns(columns(&table, &["name"])),
        );
        assert!(harness.same(&a, &b));
    }

    #[test]
    fn renamed_index_matches_by_columns() {
        let harness = Harness::new(DialectProfile::postgres());
        let table = users();
        let on_users = |name: &str, names: &[&str]| {
            index(
                Index::new(name)
                    .with_table(table.clone())
                    .with_columns(columns(&table, names)),
            )
        };
        let a = on_users("idx_a", &["email", "name"]);
        let b = on_users("idx_b", &["email", "name"]);
        let c = on_users("idx_c", &["name", "email"]);
        let d = on_users("idx_d", &["email"]);
        assert!(harness.same(&a, &b));
        assert!(!harness.same(&a, &c));
        assert!(!harness.same(&a, &d));
    }

    #[test]
    fn other_table_never_matches() {
        let harness = Harness::new(DialectProfile::postgres());
        let orders = Arc::new(Table::new("orders"));
        let a = index(Index::new("idx").with_table(users()));
        let b = index(Index::new("idx").with_table(orders));
        assert!(!harness.same(&a, &b));
    }

    #[test]
    fn unresolved_tables_fall_back_to_name() {
        let harness = Harness::new(DialectProfile::postgres());
        assert!(harness.same(&index(Index::new("idx")), &index(Index::new("IDX"))));
        assert!(!harness.same(&index(Index::new("idx")), &index(Index::new("other"))));
        assert!(harness.same(
            &index(Index::new("idx")),
            &index(Index::new("idx").with_table(users()))
        ));
    }

    #[test]
    fn hash_joins_name_and_table() {
        let harness = Harness::new(DialectProfile::postgres());
        assert_eq!(
            harness.hash(&index(Index::new("IDX").with_table(users()))),
            Some(vec!["idx".to_string(), "users".to_string()])
        );
        assert_eq!(harness.hash(&index(Index::unnamed())), Some(vec![]));
    }

    #[test]
    fn column_and_uniqueness_differences() {
        let harness = Harness::new(DialectProfile::postgres());
        let table = users();
        let a = index(
            Index::new("idx")
                .with_table(table.clone())
                .with_columns(columns(&table, &["email"]))
                .with_unique(true),
        );
        let b = index(
            Index::new("idx")
                .with_table(table.clone())
                .with_columns(columns(&table, &["email", "name"]))
                .with_unique(false),
        );
        assert_eq!(harness.differences(&a, &b), vec!["columns".to_string(), "unique".to_string()]);
    }
}
