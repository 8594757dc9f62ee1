//! Difference ledger for one object pair

use crate::compare::CompareFunction;
use crate::error::CompareError;
use schemadiff_core::{AttrValue, CompareControl, DatabaseObject, Field, ObjectKind};
use std::collections::{BTreeMap, HashSet};
use std::fmt;

/// One differing attribute
#[derive(Debug, Clone, PartialEq)]
pub struct Difference {
    pub field: Field,
    pub reference_value: Option<AttrValue>,
    pub comparison_value: Option<AttrValue>,

    /// Replaces the generated description when set
    pub message: Option<String>,
}

impl Difference {
    pub fn new(
        field: Field,
        reference_value: Option<AttrValue>,
        comparison_value: Option<AttrValue>,
    ) -> Self {
        Self {
            field,
            reference_value,
            comparison_value,
            message: None,
        }
    }
}

fn render(value: &Option<AttrValue>) -> String {
    match value {
        Some(value) => value.to_string(),
        None => "null".to_string(),
    }
}

impl fmt::Display for Difference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.message {
            Some(message) => write!(f, "{}", message),
            None => write!(
                f,
                "{} changed from '{}' to '{}'",
                self.field,
                render(&self.reference_value),
                render(&self.comparison_value)
            ),
        }
    }
}

/// Unwrap a one-element list when the other side is a bare value of the
/// same variant. Snapshot sources are inconsistent about this.
fn undo_collection(potential: Option<AttrValue>, other: Option<&AttrValue>) -> Option<AttrValue> {
    match (potential, other) {
        (Some(AttrValue::List(mut items)), Some(other))
            if !matches!(other, AttrValue::List(_))
                && items.len() == 1
                && items[0].same_variant(other) =>
        {
            items.pop()
        }
        (potential, _) => potential,
    }
}

/// Per-field differences between a reference and a comparison object
///
/// Fields are unique; adding a field again replaces the earlier entry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectDifferences {
    suppressed: HashSet<Field>,
    differences: BTreeMap<Field, Difference>,
}

impl ObjectDifferences {
    /// A ledger honouring the control's suppressed fields for `kind`
    pub fn new(control: &CompareControl, kind: ObjectKind) -> Self {
        Self {
            suppressed: control.suppressed_fields.get(&kind).cloned().unwrap_or_default(),
            differences: BTreeMap::new(),
        }
    }

    /// A ledger with no suppressed fields
    pub fn empty() -> Self {
        Self::default()
    }

    /// Differences ordered by field name
    pub fn differences(&self) -> impl Iterator<Item = &Difference> {
        self.differences.values()
    }

    pub fn get_difference(&self, field: &Field) -> Option<&Difference> {
        self.differences.get(field)
    }

    pub fn is_different(&self, field: &Field) -> bool {
        self.differences.contains_key(field)
    }

    pub fn has_differences(&self) -> bool {
        !self.differences.is_empty()
    }

    pub fn len(&self) -> usize {
        self.differences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.differences.is_empty()
    }

    pub fn add_difference(
        &mut self,
        field: Field,
        reference_value: Option<AttrValue>,
        comparison_value: Option<AttrValue>,
    ) -> &mut Self {
        self.differences
            .insert(field.clone(), Difference::new(field, reference_value, comparison_value));
        self
    }

    pub fn add_difference_with_message(
        &mut self,
        message: impl Into<String>,
        field: Field,
        reference_value: Option<AttrValue>,
        comparison_value: Option<AttrValue>,
    ) -> &mut Self {
        let mut difference = Difference::new(field.clone(), reference_value, comparison_value);
        difference.message = Some(message.into());
        self.differences.insert(field, difference);
        self
    }

    /// Withdraw a difference; returns whether one was recorded
    pub fn remove_difference(&mut self, field: &Field) -> bool {
        self.differences.remove(field).is_some()
    }

    /// Compare one attribute of both objects and record it if unequal
    ///
    /// Suppressed fields are skipped. Returns whether a difference was
    /// recorded.
    pub fn compare<F: CompareFunction>(
        &mut self,
        field: Field,
        reference: &DatabaseObject,
        comparison: &DatabaseObject,
        function: &F,
    ) -> Result<bool, CompareError> {
        if self.suppressed.contains(&field) {
            return Ok(false);
        }

        let reference_value = reference.attribute(&field);
        let comparison_value = comparison.attribute(&field);

        let reference_value = undo_collection(reference_value, comparison_value.as_ref());
        let comparison_value = undo_collection(comparison_value, reference_value.as_ref());

        let different = match (&reference_value, &comparison_value) {
            (None, None) => false,
            (Some(a), Some(b)) => !function.values_equal(a, b).map_err(|e| e.for_field(&field))?,
            _ => true,
        };

        if different {
            self.add_difference(field, reference_value, comparison_value);
        }
        Ok(different)
    }
}
