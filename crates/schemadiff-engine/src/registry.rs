//! Comparator registry
//!
//! Built once per dialect from a comparator list. For every object kind the
//! applicable comparators are resolved up front and kept in descending
//! priority order, so building a chain is just borrowing a slice.

use crate::chain::{CompareContext, ComparatorChain};
use crate::comparator::DatabaseObjectComparator;
use crate::comparators;
use crate::differences::ObjectDifferences;
use crate::error::CompareError;
use schemadiff_core::{CompareControl, Database, DatabaseObject, ObjectKind};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// Priority-ordered comparators per object kind
pub struct ComparatorRegistry {
    by_kind: HashMap<ObjectKind, Vec<Arc<dyn DatabaseObjectComparator>>>,
}

impl ComparatorRegistry {
    /// Resolve `comparators` against `database`
    ///
    /// Comparators answering [`Priority::NotApplicable`](crate::Priority) for
    /// a kind are left out of that kind's chain. Ties keep registration order.
    pub fn new(
        comparators: Vec<Arc<dyn DatabaseObjectComparator>>,
        database: &dyn Database,
    ) -> Self {
        let mut by_kind = HashMap::new();

        for kind in ObjectKind::ALL {
            let mut applicable: Vec<_> = comparators
                .iter()
                .map(|c| (c.priority(kind, database), c))
                .filter(|(priority, _)| priority.is_applicable())
                .collect();
            applicable.sort_by(|a, b| b.0.cmp(&a.0));

            tracing::trace!(
                kind = %kind,
                comparators = ?applicable.iter().map(|(_, c)| c.name()).collect::<Vec<_>>(),
                "Resolved comparator chain"
            );

            by_kind.insert(kind, applicable.into_iter().map(|(_, c)| Arc::clone(c)).collect());
        }

        Self { by_kind }
    }

    /// The built-in comparator set
    pub fn with_defaults(database: &dyn Database) -> Self {
        Self::new(comparators::builtin(), database)
    }

    /// Comparators for `kind`, highest priority first
    pub fn comparators_for(&self, kind: ObjectKind) -> &[Arc<dyn DatabaseObjectComparator>] {
        self.by_kind.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }

    /// A fresh chain positioned at the head of `kind`'s comparators
    pub fn chain<'a>(
        &'a self,
        kind: ObjectKind,
        database: &'a dyn Database,
        control: &'a CompareControl,
    ) -> ComparatorChain<'a> {
        ComparatorChain::new(
            CompareContext::new(self, database, control),
            self.comparators_for(kind),
        )
    }

    pub fn is_same_object(
        &self,
        reference: Option<&DatabaseObject>,
        comparison: Option<&DatabaseObject>,
        database: &dyn Database,
        control: &CompareControl,
    ) -> Result<bool, CompareError> {
        let kind = match reference.or(comparison) {
            Some(object) => object.kind(),
            None => return Ok(true),
        };
        self.chain(kind, database, control).is_same_object(reference, comparison)
    }

    pub fn hash(
        &self,
        object: &DatabaseObject,
        database: &dyn Database,
        control: &CompareControl,
    ) -> Result<Option<Vec<String>>, CompareError> {
        self.chain(object.kind(), database, control).hash(object)
    }

    pub fn find_differences(
        &self,
        reference: Option<&DatabaseObject>,
        comparison: Option<&DatabaseObject>,
        database: &dyn Database,
        control: &CompareControl,
    ) -> Result<ObjectDifferences, CompareError> {
        let kind = match reference.or(comparison) {
            Some(object) => object.kind(),
            None => return Ok(ObjectDifferences::empty()),
        };
        self.chain(kind, database, control)
            .find_differences(reference, comparison, &HashSet::new())
    }
}

impl std::fmt::Debug for ComparatorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut map = f.debug_map();
        for kind in ObjectKind::ALL {
            let names: Vec<_> = self.comparators_for(kind).iter().map(|c| c.name()).collect();
            map.entry(&kind, &names);
        }
        map.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use schemadiff_core::DialectProfile;

    fn names(registry: &ComparatorRegistry, kind: ObjectKind) -> Vec<&'static str> {
        registry.comparators_for(kind).iter().map(|c| c.name()).collect()
    }

    #[test]
    fn kind_comparators_precede_default() {
        let registry = ComparatorRegistry::with_defaults(&DialectProfile::generic());
        assert_eq!(names(&registry, ObjectKind::Table), vec!["table", "default"]);
        assert_eq!(names(&registry, ObjectKind::ForeignKey), vec!["foreignKey", "default"]);
        assert_eq!(names(&registry, ObjectKind::Column), vec!["column", "default"]);
    }

    #[test]
    fn dialect_comparators_resolve_per_database() {
        let registry = ComparatorRegistry::with_defaults(&DialectProfile::postgres());
        assert_eq!(
            names(&registry, ObjectKind::Column),
            vec!["postgresColumn", "column", "default"]
        );
    }

    #[test]
    fn null_handling_without_kind() {
        let database = DialectProfile::generic();
        let registry = ComparatorRegistry::with_defaults(&database);
        let control = CompareControl::default();
        assert!(registry.is_same_object(None, None, &database, &control).unwrap());
        assert!(registry
            .find_differences(None, None, &database, &control)
            .unwrap()
            .is_empty());
    }
}
