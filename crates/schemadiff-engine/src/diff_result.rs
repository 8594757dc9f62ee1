//! Diff result aggregation
//!
//! Classifies objects of the two snapshots into missing (reference only),
//! unexpected (comparison only) and changed (matched, with differences).
//! Accessors filter and sort for presentation but make no comparison
//! decisions of their own; example lookups go through the registry.

use crate::differences::ObjectDifferences;
use crate::error::CompareError;
use crate::registry::ComparatorRegistry;
use schemadiff_core::{CompareControl, Database, DatabaseObject, Field, ObjectKind, Snapshot};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeSet;

/// A product attribute on both sides
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StringDiff {
    pub reference: Option<String>,
    pub comparison: Option<String>,
}

impl StringDiff {
    pub fn new(reference: Option<String>, comparison: Option<String>) -> Self {
        Self { reference, comparison }
    }

    pub fn are_equal(&self) -> bool {
        self.reference == self.comparison
    }
}

/// A matched pair with its differences
#[derive(Debug, Clone, PartialEq)]
pub struct ChangedObject {
    pub reference: DatabaseObject,
    pub comparison: DatabaseObject,
    pub differences: ObjectDifferences,
}

/// Outcome of diffing two snapshots
#[derive(Debug, Clone, PartialEq)]
pub struct DiffResult {
    product_name_diff: StringDiff,
    product_version_diff: StringDiff,
    compared_types: BTreeSet<ObjectKind>,
    include_catalog: bool,
    missing: Vec<DatabaseObject>,
    unexpected: Vec<DatabaseObject>,
    changed: Vec<ChangedObject>,
}

fn is_virtual_column(object: &DatabaseObject) -> bool {
    object
        .as_column()
        .map(|c| c.is_computed() || c.is_descending())
        .unwrap_or(false)
}

fn sorted<'r, T, K, F>(items: impl Iterator<Item = &'r T>, key: K, mut compare: F) -> Vec<&'r T>
where
    T: 'r,
    K: Fn(&T) -> &DatabaseObject,
    F: FnMut(&DatabaseObject, &DatabaseObject) -> Ordering,
{
    let mut items: Vec<&T> = items.collect();
    items.sort_by(|a, b| compare(key(a), key(b)));
    items
}

impl DiffResult {
    /// An empty result for the given snapshots and run
    pub fn new(reference: &Snapshot, comparison: &Snapshot, control: &CompareControl) -> Self {
        Self {
            product_name_diff: StringDiff::new(
                reference.product_name.clone(),
                comparison.product_name.clone(),
            ),
            product_version_diff: StringDiff::new(
                reference.product_version.clone(),
                comparison.product_version.clone(),
            ),
            compared_types: control.compared_types.clone(),
            include_catalog: control.include_catalog,
            missing: Vec::new(),
            unexpected: Vec::new(),
            changed: Vec::new(),
        }
    }

    pub fn product_name_diff(&self) -> &StringDiff {
        &self.product_name_diff
    }

    pub fn product_version_diff(&self) -> &StringDiff {
        &self.product_version_diff
    }

    /// Kinds requested by the comparison control
    pub fn compared_types(&self) -> &BTreeSet<ObjectKind> {
        &self.compared_types
    }

    /// Record a reference-only object
    ///
    /// Computed and descending columns are index expressions rather than
    /// table columns and are never reported missing.
    pub fn add_missing_object(&mut self, object: DatabaseObject) {
        if is_virtual_column(&object) {
            return;
        }
        self.missing.push(object);
    }

    /// Record a comparison-only object
    pub fn add_unexpected_object(&mut self, object: DatabaseObject) {
        self.unexpected.push(object);
    }

    /// Record a matched pair; returns whether it was kept
    ///
    /// Empty difference sets are ignored. A catalog or schema whose only
    /// difference is its name is not a change unless catalogs take part in
    /// identity.
    pub fn add_changed_object(
        &mut self,
        reference: DatabaseObject,
        comparison: DatabaseObject,
        differences: ObjectDifferences,
    ) -> bool {
        if !differences.has_differences() {
            return false;
        }

        let container = matches!(reference.kind(), ObjectKind::Catalog | ObjectKind::Schema);
        let renamed_only = differences.differences().all(|d| d.field == Field::Name);
        if container && !self.include_catalog && renamed_only {
            return false;
        }

        self.changed.push(ChangedObject {
            reference,
            comparison,
            differences,
        });
        true
    }

    pub fn missing_objects(&self) -> &[DatabaseObject] {
        &self.missing
    }

    pub fn unexpected_objects(&self) -> &[DatabaseObject] {
        &self.unexpected
    }

    pub fn changed_objects(&self) -> &[ChangedObject] {
        &self.changed
    }

    pub fn missing_objects_of(&self, kind: ObjectKind) -> impl Iterator<Item = &DatabaseObject> {
        self.missing.iter().filter(move |o| o.kind() == kind)
    }

    pub fn unexpected_objects_of(&self, kind: ObjectKind) -> impl Iterator<Item = &DatabaseObject> {
        self.unexpected.iter().filter(move |o| o.kind() == kind)
    }

    pub fn changed_objects_of(&self, kind: ObjectKind) -> impl Iterator<Item = &ChangedObject> {
        self.changed.iter().filter(move |c| c.reference.kind() == kind)
    }

    pub fn missing_objects_sorted<F>(&self, kind: ObjectKind, compare: F) -> Vec<&DatabaseObject>
    where
        F: FnMut(&DatabaseObject, &DatabaseObject) -> Ordering,
    {
        sorted(self.missing_objects_of(kind), |o| o, compare)
    }

    pub fn unexpected_objects_sorted<F>(&self, kind: ObjectKind, compare: F) -> Vec<&DatabaseObject>
    where
        F: FnMut(&DatabaseObject, &DatabaseObject) -> Ordering,
    {
        sorted(self.unexpected_objects_of(kind), |o| o, compare)
    }

    /// Changed pairs of `kind`, ordered by their reference objects
    pub fn changed_objects_sorted<F>(&self, kind: ObjectKind, compare: F) -> Vec<&ChangedObject>
    where
        F: FnMut(&DatabaseObject, &DatabaseObject) -> Ordering,
    {
        sorted(self.changed_objects_of(kind), |c| &c.reference, compare)
    }

    /// The stored missing object the registry judges the same as `example`
    pub fn get_missing_object(
        &self,
        example: &DatabaseObject,
        registry: &ComparatorRegistry,
        database: &dyn Database,
        control: &CompareControl,
    ) -> Result<Option<&DatabaseObject>, CompareError> {
        let candidates = self.missing_objects_of(example.kind());
        find_same(candidates, |o| o, example, registry, database, control)
    }

    pub fn get_unexpected_object(
        &self,
        example: &DatabaseObject,
        registry: &ComparatorRegistry,
        database: &dyn Database,
        control: &CompareControl,
    ) -> Result<Option<&DatabaseObject>, CompareError> {
        let candidates = self.unexpected_objects_of(example.kind());
        find_same(candidates, |o| o, example, registry, database, control)
    }

    pub fn get_changed_object(
        &self,
        example: &DatabaseObject,
        registry: &ComparatorRegistry,
        database: &dyn Database,
        control: &CompareControl,
    ) -> Result<Option<&ChangedObject>, CompareError> {
        find_same(
            self.changed_objects_of(example.kind()),
            |c| &c.reference,
            example,
            registry,
            database,
            control,
        )
    }

    /// True when nothing is missing, unexpected or changed
    pub fn are_equal(&self) -> bool {
        self.missing.is_empty() && self.unexpected.is_empty() && self.changed.is_empty()
    }
}

fn find_same<'r, T, K>(
    items: impl Iterator<Item = &'r T>,
    key: K,
    example: &DatabaseObject,
    registry: &ComparatorRegistry,
    database: &dyn Database,
    control: &CompareControl,
) -> Result<Option<&'r T>, CompareError>
where
    T: 'r,
    K: Fn(&T) -> &DatabaseObject,
{
    for item in items {
        if registry.is_same_object(Some(key(item)), Some(example), database, control)? {
            return Ok(Some(item));
        }
    }
    Ok(None)
}
