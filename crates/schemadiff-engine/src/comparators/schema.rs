use super::{alias_names, downcast, equals_schemas};
use crate::chain::ComparatorChain;
use crate::compare::NameCompareFunction;
use crate::comparator::{DatabaseObjectComparator, Priority};
use crate::differences::ObjectDifferences;
use crate::error::CompareError;
use schemadiff_core::{
    CatalogAndSchema, Database, DatabaseObject, Field, NameCase, ObjectKind, Schema,
};
use std::collections::HashSet;

/// The name a dialect identifies a schema by: its own, or its catalog's when
/// the dialect has no schemas
fn container_name(schema: &Schema, database: &dyn Database) -> Option<String> {
    if database.supports_schemas() {
        schema.name.clone()
    } else if database.supports_catalogs() {
        schema.catalog_name().map(str::to_string)
    } else {
        None
    }
}

fn or_default_name(name: Option<String>, database: &dyn Database) -> Option<String> {
    name.or_else(|| {
        if database.supports_schemas() {
            database.default_schema_name().map(str::to_string)
        } else if database.supports_catalogs() {
            database.default_catalog_name().map(str::to_string)
        } else {
            None
        }
    })
}

/// Substitute `name` by its alias counterpart when it matches one side
fn substitute(
    database: &dyn Database,
    name: Option<&str>,
    first: Option<&str>,
    second: Option<&str>,
) -> Option<String> {
    let case_sensitive = database.schema_and_catalog_case() == NameCase::Original;
    let matches = |candidate: Option<&str>| match (candidate, name) {
        (Some(candidate), Some(name)) if case_sensitive => candidate == name,
        (Some(candidate), Some(name)) => candidate.to_lowercase() == name.to_lowercase(),
        _ => false,
    };

    if matches(first) {
        second.map(str::to_string)
    } else if matches(second) {
        first.map(str::to_string)
    } else {
        name.map(str::to_string)
    }
}

/// Schema identity with default-schema and alias handling
#[derive(Debug, Clone, Copy, Default)]
pub struct SchemaComparator;

impl DatabaseObjectComparator for SchemaComparator {
    fn name(&self) -> &'static str {
        "schema"
    }

    fn priority(&self, kind: ObjectKind, _database: &dyn Database) -> Priority {
        match kind {
            ObjectKind::Schema => Priority::Type,
            _ => Priority::NotApplicable,
        }
    }

    fn hash(
        &self,
        object: &DatabaseObject,
        _chain: &ComparatorChain<'_>,
    ) -> Result<Option<Vec<String>>, CompareError> {
        downcast(self.name(), object, DatabaseObject::as_schema)?;
        Ok(None)
    }

    fn is_same_object(
        &self,
        reference: &DatabaseObject,
        comparison: &DatabaseObject,
        chain: &ComparatorChain<'_>,
    ) -> Result<bool, CompareError> {
        let this = downcast(self.name(), reference, DatabaseObject::as_schema)?;
        let that = downcast(self.name(), comparison, DatabaseObject::as_schema)?;
        let database = chain.database();

        if chain.control().include_catalog {
            let this_catalog = this.catalog.clone().map(DatabaseObject::Catalog);
            let that_catalog = that.catalog.clone().map(DatabaseObject::Catalog);
            if !chain
                .context()
                .is_same_object(this_catalog.as_ref(), that_catalog.as_ref())?
            {
                return Ok(false);
            }
        }

        let this_name = container_name(this, database);
        let that_name = container_name(that, database);
        if equals_schemas(database, this_name.as_deref(), that_name.as_deref()) {
            return Ok(true);
        }

        let this_name = or_default_name(this_name, database);
        let that_name = or_default_name(that_name, database);
        if equals_schemas(database, this_name.as_deref(), that_name.as_deref()) {
            return Ok(true);
        }

        for alias in chain.schema_comparisons() {
            let (comparison_name, reference_name) = alias_names(database, alias);
            let (comparison_name, reference_name) =
                (comparison_name.as_deref(), reference_name.as_deref());

            let final_this =
                substitute(database, this_name.as_deref(), comparison_name, reference_name);
            if equals_schemas(database, final_this.as_deref(), that_name.as_deref()) {
                return Ok(true);
            }

            let final_that =
                substitute(database, that_name.as_deref(), reference_name, comparison_name);
            if equals_schemas(database, final_this.as_deref(), final_that.as_deref()) {
                return Ok(true);
            }
        }

        let this_standard =
            CatalogAndSchema::new(this.catalog_name(), this.name.as_deref()).standardize(database);
        let that_standard =
            CatalogAndSchema::new(that.catalog_name(), that.name.as_deref()).standardize(database);
        Ok(equals_schemas(
            database,
            this_standard.schema_name.as_deref(),
            that_standard.schema_name.as_deref(),
        ))
    }

    fn find_differences(
        &self,
        reference: &DatabaseObject,
        comparison: &DatabaseObject,
        chain: &ComparatorChain<'_>,
        _exclude: &HashSet<Field>,
    ) -> Result<ObjectDifferences, CompareError> {
        downcast(self.name(), reference, DatabaseObject::as_schema)?;
        downcast(self.name(), comparison, DatabaseObject::as_schema)?;

        let mut differences = ObjectDifferences::new(chain.control(), ObjectKind::Schema);
        let function = NameCompareFunction::new(ObjectKind::Schema, chain.database());
        differences.compare(Field::Name, reference, comparison, &function)?;
        Ok(differences)
    }
}
