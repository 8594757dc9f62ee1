//! Generic fallback comparator
//!
//! Registered for every kind at the lowest priority, it terminates each
//! chain: identity by name, and an attribute-by-attribute diff whose compare
//! function is chosen from the attribute's value type.

use super::name_matches;
use crate::chain::ComparatorChain;
use crate::compare::{
    DataTypeCompareFunction, NameCompareFunction, OrderedCollectionCompareFunction,
    StandardCompareFunction,
    ToStringCompareFunction,
};
use crate::comparator::{DatabaseObjectComparator, Priority};
use crate::differences::ObjectDifferences;
use crate::error::CompareError;
use schemadiff_core::{AttrValue, Database, DatabaseObject, Field, ObjectKind};
use std::collections::{BTreeSet, HashSet};

#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultComparator;

impl DatabaseObjectComparator for DefaultComparator {
    fn name(&self) -> &'static str {
        "default"
    }

    fn priority(&self, _kind: ObjectKind, _database: &dyn Database) -> Priority {
        Priority::Default
    }

    fn hash(
        &self,
        object: &DatabaseObject,
        _chain: &ComparatorChain<'_>,
    ) -> Result<Option<Vec<String>>, CompareError> {
        let key = object.name().map(str::to_lowercase).unwrap_or_else(|| "null".to_string());
        Ok(Some(vec![key]))
    }

    fn is_same_object(
        &self,
        reference: &DatabaseObject,
        comparison: &DatabaseObject,
        chain: &ComparatorChain<'_>,
    ) -> Result<bool, CompareError> {
        Ok(name_matches(reference, comparison, chain.database()))
    }

    fn find_differences(
        &self,
        reference: &DatabaseObject,
        comparison: &DatabaseObject,
        chain: &ComparatorChain<'_>,
        exclude: &HashSet<Field>,
    ) -> Result<ObjectDifferences, CompareError> {
        let database = chain.database();
        let standard = StandardCompareFunction::new(chain.context());
        let mut differences = ObjectDifferences::new(chain.control(), reference.kind());

        let mut fields: BTreeSet<Field> = reference.attribute_fields().into_iter().collect();
        fields.extend(comparison.attribute_fields());

        for field in fields {
            // Containers are identity, handled by each kind's own rules
            if exclude.contains(&field) || matches!(field, Field::Schema | Field::Catalog) {
                continue;
            }

            let reference_value = reference.attribute(&field);
            let comparison_value = comparison.attribute(&field);

            match (reference_value.as_ref(), comparison_value.as_ref()) {
                (Some(AttrValue::Object(object)), _) | (None, Some(AttrValue::Object(object))) => {
                    let function = NameCompareFunction::new(object.kind(), database);
                    differences.compare(field, reference, comparison, &function)?;
                }
                (Some(AttrValue::DataType(_)), _) | (None, Some(AttrValue::DataType(_))) => {
                    differences.compare(field, reference, comparison, &DataTypeCompareFunction)?;
                }
                (Some(AttrValue::AutoIncrement(_)), _)
                | (None, Some(AttrValue::AutoIncrement(_))) => {
                    let function = ToStringCompareFunction::new(false);
                    differences.compare(field, reference, comparison, &function)?;
                }
                (Some(AttrValue::List(_)), Some(AttrValue::List(_))) => {
                    let function = OrderedCollectionCompareFunction::new(standard);
                    differences.compare(field, reference, comparison, &function)?;
                }
                _ => {
                    differences.compare(field, reference, comparison, &standard)?;
                }
            }
        }

        Ok(differences)
    }
}
