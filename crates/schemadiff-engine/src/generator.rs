//! Diff generator
//!
//! Drives a comparison run: for every compared kind, pairs reference objects
//! with comparison objects and classifies them into a [`DiffResult`].
//!
//! Candidates are pre-filtered by comparator hash keys. Keys are only a
//! bucketing aid; every pairing is decided by `is_same_object`. Objects
//! whose hash is missing or empty land in a catch-all bucket that is always
//! scanned.

use crate::diff_result::DiffResult;
use crate::error::{CompareError, DiffError};
use crate::registry::ComparatorRegistry;
use schemadiff_core::{
    CompareControl, Database, DatabaseObject, ObjectKind, Snapshot, SnapshotSource,
};
use std::collections::{BTreeSet, HashMap};
use tracing::{debug, info, trace};

/// Hash buckets over one kind's comparison objects
struct Candidates<'s> {
    objects: &'s [DatabaseObject],
    by_key: HashMap<String, Vec<usize>>,
    catch_all: Vec<usize>,
}

impl<'s> Candidates<'s> {
    fn build(
        generator: &DiffGenerator<'_>,
        objects: &'s [DatabaseObject],
    ) -> Result<Self, CompareError> {
        let mut by_key: HashMap<String, Vec<usize>> = HashMap::new();
        let mut catch_all = Vec::new();

        for (position, object) in objects.iter().enumerate() {
            match generator.keys(object)? {
                Some(keys) => {
                    for key in keys {
                        by_key.entry(key).or_default().push(position);
                    }
                }
                None => catch_all.push(position),
            }
        }

        Ok(Self {
            objects,
            by_key,
            catch_all,
        })
    }

    /// Positions worth testing against an object with `keys`, in snapshot order
    fn for_keys(&self, keys: Option<Vec<String>>) -> Vec<usize> {
        let Some(keys) = keys else {
            return (0..self.objects.len()).collect();
        };

        let positions: BTreeSet<usize> = keys
            .iter()
            .filter_map(|key| self.by_key.get(key))
            .flatten()
            .chain(&self.catch_all)
            .copied()
            .collect();
        positions.into_iter().collect()
    }
}

/// Compares two snapshots using a comparator registry
pub struct DiffGenerator<'a> {
    registry: &'a ComparatorRegistry,
    database: &'a dyn Database,
    control: &'a CompareControl,
}

impl<'a> DiffGenerator<'a> {
    pub fn new(
        registry: &'a ComparatorRegistry,
        database: &'a dyn Database,
        control: &'a CompareControl,
    ) -> Self {
        Self {
            registry,
            database,
            control,
        }
    }

    /// Hash keys, with an empty key list folded into "unknown"
    fn keys(&self, object: &DatabaseObject) -> Result<Option<Vec<String>>, CompareError> {
        let keys = self.registry.hash(object, self.database, self.control)?;
        Ok(keys.filter(|keys| !keys.is_empty()))
    }

    /// Diff `comparison` against the `reference` baseline
    pub fn compare(
        &self,
        reference: &Snapshot,
        comparison: &Snapshot,
    ) -> Result<DiffResult, CompareError> {
        let mut result = DiffResult::new(reference, comparison, self.control);

        for kind in self.control.ordered_types() {
            self.compare_kind(kind, reference, comparison, &mut result)?;
        }

        info!(
            missing = result.missing_objects().len(),
            unexpected = result.unexpected_objects().len(),
            changed = result.changed_objects().len(),
            "Diff complete"
        );

        Ok(result)
    }

    fn compare_kind(
        &self,
        kind: ObjectKind,
        reference: &Snapshot,
        comparison: &Snapshot,
        result: &mut DiffResult,
    ) -> Result<(), CompareError> {
        let reference_objects = reference.objects(kind);
        let comparison_objects = comparison.objects(kind);

        debug!(
            kind = %kind,
            reference = reference_objects.len(),
            comparison = comparison_objects.len(),
            "Comparing objects"
        );

        let candidates = Candidates::build(self, comparison_objects)?;
        let mut matched = vec![false; comparison_objects.len()];

        for object in reference_objects {
            let mut found = None;
            for position in candidates.for_keys(self.keys(object)?) {
                if matched[position] {
                    continue;
                }
                let candidate = &comparison_objects[position];
                if self
                    .registry
                    .is_same_object(Some(object), Some(candidate), self.database, self.control)?
                {
                    found = Some(position);
                    break;
                }
            }

            let Some(position) = found else {
                trace!(kind = %kind, object = %object, "Missing");
                result.add_missing_object(object.clone());
                continue;
            };

            matched[position] = true;
            let candidate = &comparison_objects[position];
            let differences =
                self.registry
                    .find_differences(Some(object), Some(candidate), self.database, self.control)?;

            if differences.has_differences() {
                let fields: Vec<_> =
                    differences.differences().map(|d| d.field.to_string()).collect();
                if result.add_changed_object(object.clone(), candidate.clone(), differences) {
                    trace!(kind = %kind, object = %object, fields = ?fields, "Changed");
                }
            }
        }

        for (position, object) in comparison_objects.iter().enumerate() {
            if !matched[position] {
                trace!(kind = %kind, object = %object, "Unexpected");
                result.add_unexpected_object(object.clone());
            }
        }

        Ok(())
    }
}

/// Load both sides and diff them with the built-in comparators
pub fn diff(
    reference: &dyn SnapshotSource,
    comparison: &dyn SnapshotSource,
    database: &dyn Database,
    control: &CompareControl,
) -> Result<DiffResult, DiffError> {
    let load = |source: &dyn SnapshotSource| {
        debug!(source = source.name(), "Loading snapshot");
        source.load().map_err(|error| DiffError::Snapshot {
            source_name: source.name().to_string(),
            error,
        })
    };

    let reference = load(reference)?;
    let comparison = load(comparison)?;

    let registry = ComparatorRegistry::with_defaults(database);
    Ok(DiffGenerator::new(&registry, database, control).compare(&reference, &comparison)?)
}
