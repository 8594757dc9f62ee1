//! Comparator chain
//!
//! A chain is an immutable view over the priority-ordered comparators of one
//! kind plus a position. Delegating to the rest of the chain hands the next
//! comparator a copy positioned one step further, so no cursor state is ever
//! shared between calls or threads.

use crate::comparator::DatabaseObjectComparator;
use crate::differences::ObjectDifferences;
use crate::error::CompareError;
use crate::registry::ComparatorRegistry;
use schemadiff_core::{CompareControl, Database, DatabaseObject, Field, SchemaComparison};
use std::collections::HashSet;
use std::sync::Arc;

/// Everything a comparison needs besides the objects themselves
#[derive(Clone, Copy)]
pub struct CompareContext<'a> {
    pub registry: &'a ComparatorRegistry,
    pub database: &'a dyn Database,
    pub control: &'a CompareControl,
}

impl<'a> CompareContext<'a> {
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

    /// Identity through a fresh chain for the objects' kind
    pub fn is_same_object(
        &self,
        reference: Option<&DatabaseObject>,
        comparison: Option<&DatabaseObject>,
    ) -> Result<bool, CompareError> {
        self.registry
            .is_same_object(reference, comparison, self.database, self.control)
    }

    /// Hash keys through a fresh chain for the object's kind
    pub fn hash(
        &self,
        object: Option<&DatabaseObject>,
    ) -> Result<Option<Vec<String>>, CompareError> {
        match object {
            Some(object) => self.registry.hash(object, self.database, self.control),
            None => Ok(None),
        }
    }
}

/// Chain-of-responsibility cursor over one kind's comparators
#[derive(Clone, Copy)]
pub struct ComparatorChain<'a> {
    context: CompareContext<'a>,
    comparators: &'a [Arc<dyn DatabaseObjectComparator>],
    position: usize,
}

impl<'a> ComparatorChain<'a> {
    pub fn new(
        context: CompareContext<'a>,
        comparators: &'a [Arc<dyn DatabaseObjectComparator>],
    ) -> Self {
        Self {
            context,
            comparators,
            position: 0,
        }
    }

    pub fn context(&self) -> CompareContext<'a> {
        self.context
    }

    pub fn database(&self) -> &'a dyn Database {
        self.context.database
    }

    pub fn control(&self) -> &'a CompareControl {
        self.context.control
    }

    pub fn schema_comparisons(&self) -> &'a [SchemaComparison] {
        &self.context.control.schema_comparisons
    }

    /// The next comparator and the chain it should delegate to
    fn next(&self) -> Option<(&'a dyn DatabaseObjectComparator, ComparatorChain<'a>)> {
        let comparator = self.comparators.get(self.position)?;
        let rest = ComparatorChain {
            position: self.position + 1,
            ..*self
        };
        Some((comparator.as_ref(), rest))
    }

    /// Identity check; an exhausted chain has no objection
    pub fn is_same_object(
        &self,
        reference: Option<&DatabaseObject>,
        comparison: Option<&DatabaseObject>,
    ) -> Result<bool, CompareError> {
        let (reference, comparison) = match (reference, comparison) {
            (None, None) => return Ok(true),
            (Some(reference), Some(comparison)) => (reference, comparison),
            _ => return Ok(false),
        };

        if reference.kind() != comparison.kind() {
            return Ok(false);
        }

        // An object is always itself, whatever its kind's rules fall back to
        if reference.same_instance(comparison) {
            return Ok(true);
        }

        match self.next() {
            Some((comparator, rest)) => comparator.is_same_object(reference, comparison, &rest),
            None => Ok(true),
        }
    }

    /// Bucket keys; `None` when no comparator produces any
    pub fn hash(&self, object: &DatabaseObject) -> Result<Option<Vec<String>>, CompareError> {
        match self.next() {
            Some((comparator, rest)) => comparator.hash(object, &rest),
            None => Ok(None),
        }
    }

    /// Attribute differences of two objects already judged the same
    pub fn find_differences(
        &self,
        reference: Option<&DatabaseObject>,
        comparison: Option<&DatabaseObject>,
        exclude: &HashSet<Field>,
    ) -> Result<ObjectDifferences, CompareError> {
        let control = self.control();
        let (reference, comparison) = match (reference, comparison) {
            (None, None) => return Ok(ObjectDifferences::empty()),
            (None, Some(comparison)) => {
                let mut differences = ObjectDifferences::new(control, comparison.kind());
                differences.add_difference_with_message(
                    "Reference value was null",
                    Field::This,
                    None,
                    None,
                );
                return Ok(differences);
            }
            (Some(reference), None) => {
                let mut differences = ObjectDifferences::new(control, reference.kind());
                differences.add_difference_with_message(
                    "Compared value was null",
                    Field::This,
                    None,
                    None,
                );
                return Ok(differences);
            }
            (Some(reference), Some(comparison)) => (reference, comparison),
        };

        match self.next() {
            Some((comparator, rest)) => {
                comparator.find_differences(reference, comparison, &rest, exclude)
            }
            None => Ok(ObjectDifferences::new(control, reference.kind())),
        }
    }
}
