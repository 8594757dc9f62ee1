use super::{alias_names, downcast, equals_schemas, same_ignoring_case};
use crate::chain::ComparatorChain;
use crate::compare::NameCompareFunction;
use crate::comparator::{DatabaseObjectComparator, Priority};
use crate::differences::ObjectDifferences;
use crate::error::CompareError;
use schemadiff_core::{CatalogAndSchema, Database, DatabaseObject, Field, ObjectKind};
use std::collections::HashSet;

fn trim_eq_ignore_case(a: Option<&str>, b: Option<&str>) -> bool {
    a.map(str::trim).unwrap_or("").to_lowercase() == b.map(str::trim).unwrap_or("").to_lowercase()
}

/// Catalog identity with default-catalog elision and schema aliases
#[derive(Debug, Clone, Copy, Default)]
pub struct CatalogComparator;

impl DatabaseObjectComparator for CatalogComparator {
    fn name(&self) -> &'static str {
        "catalog"
    }

    fn priority(&self, kind: ObjectKind, _database: &dyn Database) -> Priority {
        match kind {
            ObjectKind::Catalog => Priority::Type,
            _ => Priority::NotApplicable,
        }
    }

    fn hash(
        &self,
        object: &DatabaseObject,
        _chain: &ComparatorChain<'_>,
    ) -> Result<Option<Vec<String>>, CompareError> {
        downcast(self.name(), object, DatabaseObject::as_catalog)?;
        Ok(None)
    }

    fn is_same_object(
        &self,
        reference: &DatabaseObject,
        comparison: &DatabaseObject,
        chain: &ComparatorChain<'_>,
    ) -> Result<bool, CompareError> {
        let this = downcast(self.name(), reference, DatabaseObject::as_catalog)?;
        let that = downcast(self.name(), comparison, DatabaseObject::as_catalog)?;
        let database = chain.database();

        if !database.supports_catalogs() {
            return Ok(true);
        }

        let include_catalog = chain.control().include_catalog;
        let effective_name = |catalog: &schemadiff_core::Catalog| {
            if !include_catalog && catalog.is_default {
                None
            } else {
                catalog.name.clone()
            }
        };
        let this_name = effective_name(this.as_ref());
        let that_name = effective_name(that.as_ref());

        let this_standard = CatalogAndSchema::new(this_name.as_deref(), None).standardize(database);
        let that_standard = CatalogAndSchema::new(that_name.as_deref(), None).standardize(database);

        let Some(this_final) = this_standard.catalog_name.as_deref() else {
            return Ok(that_standard.catalog_name.is_none());
        };

        if equals_schemas(database, this_name.as_deref(), that_name.as_deref()) {
            return Ok(true);
        }

        for alias in chain.schema_comparisons() {
            let (comparison_name, reference_name) = alias_names(database, alias);
            let (comparison_name, reference_name) =
                (comparison_name.as_deref(), reference_name.as_deref());

            let mut final_this = Some(this_final);
            let mut final_that = that_standard.catalog_name.as_deref();

            if same_ignoring_case(comparison_name, final_this) {
                final_this = reference_name;
            } else if same_ignoring_case(reference_name, final_this) {
                final_this = comparison_name;
            }

            if trim_eq_ignore_case(final_this, final_that) {
                return Ok(true);
            }

            if same_ignoring_case(comparison_name, final_that) {
                final_that = reference_name;
            } else if same_ignoring_case(reference_name, final_that) {
                final_that = comparison_name;
            }

            if trim_eq_ignore_case(final_this, final_that) {
                return Ok(true);
            }
        }

        Ok(false)
    }

    fn find_differences(
        &self,
        reference: &DatabaseObject,
        comparison: &DatabaseObject,
        chain: &ComparatorChain<'_>,
        _exclude: &HashSet<Field>,
    ) -> Result<ObjectDifferences, CompareError> {
        downcast(self.name(), reference, DatabaseObject::as_catalog)?;
        downcast(self.name(), comparison, DatabaseObject::as_catalog)?;

        let mut differences = ObjectDifferences::new(chain.control(), ObjectKind::Catalog);
        let function = NameCompareFunction::new(ObjectKind::Catalog, chain.database());
        differences.compare(Field::Name, reference, comparison, &function)?;
        Ok(differences)
    }
}
