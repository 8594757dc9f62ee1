//! Attribute-level equality strategies
//!
//! Every function treats `(None, None)` as equal and a single `None` as
//! unequal; implementors only decide the both-present case.

use crate::chain::CompareContext;
use crate::error::CompareError;
use schemadiff_core::{AttrValue, Database, ObjectKind};

/// Decides whether two attribute values are equal
pub trait CompareFunction {
    /// Compare two present values
    fn values_equal(
        &self,
        reference: &AttrValue,
        comparison: &AttrValue,
    ) -> Result<bool, CompareError>;

    fn are_equal(
        &self,
        reference: Option<&AttrValue>,
        comparison: Option<&AttrValue>,
    ) -> Result<bool, CompareError> {
        match (reference, comparison) {
            (None, None) => Ok(true),
            (Some(reference), Some(comparison)) => self.values_equal(reference, comparison),
            _ => Ok(false),
        }
    }
}

impl<F> CompareFunction for F
where
    F: Fn(&AttrValue, &AttrValue) -> Result<bool, CompareError>,
{
    fn values_equal(
        &self,
        reference: &AttrValue,
        comparison: &AttrValue,
    ) -> Result<bool, CompareError> {
        self(reference, comparison)
    }
}

fn expect_list<'v>(value: &'v AttrValue) -> Result<&'v [AttrValue], CompareError> {
    value
        .as_list()
        .ok_or_else(|| CompareError::type_mismatch("list", value.type_name()))
}

/// Objects by identity, numbers by value, everything else structurally
#[derive(Clone, Copy)]
pub struct StandardCompareFunction<'a> {
    context: CompareContext<'a>,
}

impl<'a> StandardCompareFunction<'a> {
    pub fn new(context: CompareContext<'a>) -> Self {
        Self { context }
    }
}

impl CompareFunction for StandardCompareFunction<'_> {
    fn values_equal(
        &self,
        reference: &AttrValue,
        comparison: &AttrValue,
    ) -> Result<bool, CompareError> {
        match (reference, comparison) {
            (AttrValue::Object(a), AttrValue::Object(b)) => {
                self.context.is_same_object(Some(a), Some(b))
            }
            (AttrValue::Number(a), AttrValue::Number(b)) => Ok(a.numerically_equal(b)),
            (AttrValue::List(a), AttrValue::List(b)) => {
                if a.len() != b.len() {
                    return Ok(false);
                }
                for (x, y) in a.iter().zip(b) {
                    if !self.values_equal(x, y)? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
            (a, b) => Ok(a == b),
        }
    }
}

/// Compares display names under the dialect's case rule
///
/// Objects contribute their corrected name; other values their string form.
/// Sequences compare element-wise and must have equal length.
#[derive(Clone, Copy)]
pub struct NameCompareFunction<'a> {
    database: &'a dyn Database,
    kind: ObjectKind,
}

impl<'a> NameCompareFunction<'a> {
    pub fn new(kind: ObjectKind, database: &'a dyn Database) -> Self {
        Self { database, kind }
    }

    fn display_name(&self, value: &AttrValue) -> Option<String> {
        match value {
            AttrValue::Object(object) => object
                .name()
                .map(|name| self.database.correct_object_name(name, self.kind)),
            other if self.kind == ObjectKind::Column => {
                Some(self.database.correct_object_name(&other.to_string(), self.kind))
            }
            other => Some(other.to_string()),
        }
    }
}

impl CompareFunction for NameCompareFunction<'_> {
    fn values_equal(
        &self,
        reference: &AttrValue,
        comparison: &AttrValue,
    ) -> Result<bool, CompareError> {
        match (reference, comparison) {
            (AttrValue::List(a), AttrValue::List(b)) => {
                if a.len() != b.len() {
                    return Ok(false);
                }
                for (x, y) in a.iter().zip(b) {
                    if !self.values_equal(x, y)? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
            (AttrValue::List(_), _) | (_, AttrValue::List(_)) => Ok(false),
            (a, b) => Ok(match (self.display_name(a), self.display_name(b)) {
                (None, None) => true,
                (Some(a), Some(b)) => self.database.names_equal(&a, &b),
                _ => false,
            }),
        }
    }
}

/// Compares rendered string forms
#[derive(Debug, Clone, Copy)]
pub struct ToStringCompareFunction {
    pub case_sensitive: bool,
}

impl ToStringCompareFunction {
    pub fn new(case_sensitive: bool) -> Self {
        Self { case_sensitive }
    }
}

impl CompareFunction for ToStringCompareFunction {
    fn values_equal(
        &self,
        reference: &AttrValue,
        comparison: &AttrValue,
    ) -> Result<bool, CompareError> {
        let (a, b) = (reference.to_string(), comparison.to_string());
        Ok(if self.case_sensitive {
            a == b
        } else {
            a.to_lowercase() == b.to_lowercase()
        })
    }
}

/// Data type equivalence
///
/// Type names compare case-insensitively. Parameters only matter when both
/// sides carry them, so `varchar` is compatible with `varchar(255)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DataTypeCompareFunction;

impl CompareFunction for DataTypeCompareFunction {
    fn values_equal(
        &self,
        reference: &AttrValue,
        comparison: &AttrValue,
    ) -> Result<bool, CompareError> {
        let (AttrValue::DataType(a), AttrValue::DataType(b)) = (reference, comparison) else {
            let found = if matches!(reference, AttrValue::DataType(_)) {
                comparison.type_name()
            } else {
                reference.type_name()
            };
            return Err(CompareError::type_mismatch("dataType", found));
        };

        if a.type_name.to_lowercase() != b.type_name.to_lowercase() {
            return Ok(false);
        }

        if a.has_parameters() && b.has_parameters() {
            return Ok(a.to_string().to_lowercase() == b.to_string().to_lowercase());
        }

        Ok(true)
    }
}

/// Equal length, then pairwise in order
#[derive(Clone, Copy)]
pub struct OrderedCollectionCompareFunction<F> {
    element: F,
}

impl<F: CompareFunction> OrderedCollectionCompareFunction<F> {
    pub fn new(element: F) -> Self {
        Self { element }
    }
}

impl<F: CompareFunction> CompareFunction for OrderedCollectionCompareFunction<F> {
    fn values_equal(
        &self,
        reference: &AttrValue,
        comparison: &AttrValue,
    ) -> Result<bool, CompareError> {
        let (reference, comparison) = (expect_list(reference)?, expect_list(comparison)?);
        if reference.len() != comparison.len() {
            return Ok(false);
        }

        for (a, b) in reference.iter().zip(comparison) {
            if !self.element.values_equal(a, b)? {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

/// Multiset match: each comparison element can satisfy one reference element
#[derive(Clone, Copy)]
pub struct UnorderedCollectionCompareFunction<F> {
    element: F,
}

impl<F: CompareFunction> UnorderedCollectionCompareFunction<F> {
    pub fn new(element: F) -> Self {
        Self { element }
    }
}

impl<F: CompareFunction> CompareFunction for UnorderedCollectionCompareFunction<F> {
    fn values_equal(
        &self,
        reference: &AttrValue,
        comparison: &AttrValue,
    ) -> Result<bool, CompareError> {
        let (reference, comparison) = (expect_list(reference)?, expect_list(comparison)?);
        if reference.len() != comparison.len() {
            return Ok(false);
        }

        let mut unmatched: Vec<&AttrValue> = comparison.iter().collect();
        for wanted in reference {
            let mut found = None;
            for (i, candidate) in unmatched.iter().enumerate() {
                if self.element.values_equal(wanted, candidate)? {
                    found = Some(i);
                    break;
                }
            }

            match found {
                Some(i) => {
                    unmatched.swap_remove(i);
                }
                None => return Ok(false),
            }
        }
        Ok(true)
    }
}
