//! Comparator trait

use crate::chain::ComparatorChain;
use crate::differences::ObjectDifferences;
use crate::error::CompareError;
use schemadiff_core::{Database, DatabaseObject, Field, ObjectKind};
use std::collections::HashSet;

/// How specific a comparator is for a kind; higher runs first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Priority {
    /// The comparator does not handle the kind
    NotApplicable,

    /// Generic fallback for every kind
    Default,

    /// Kind-specific rules
    Type,

    /// Kind- and dialect-specific rules
    Database,
}

impl Priority {
    pub fn value(&self) -> i32 {
        match self {
            Self::NotApplicable => -1,
            Self::Default => 1,
            Self::Type => 5,
            Self::Database => 10,
        }
    }

    pub fn is_applicable(&self) -> bool {
        *self != Self::NotApplicable
    }
}

/// Identity, hashing and differencing rules for one or more object kinds
///
/// Implementations may delegate to the rest of `chain` to obtain a baseline
/// before refining it.
pub trait DatabaseObjectComparator: Send + Sync {
    /// Name used in logs and contract errors
    fn name(&self) -> &'static str;

    fn priority(&self, kind: ObjectKind, database: &dyn Database) -> Priority;

    /// Bucket keys for candidate pre-filtering; `None` means "any bucket"
    fn hash(
        &self,
        object: &DatabaseObject,
        chain: &ComparatorChain<'_>,
    ) -> Result<Option<Vec<String>>, CompareError>;

    fn is_same_object(
        &self,
        reference: &DatabaseObject,
        comparison: &DatabaseObject,
        chain: &ComparatorChain<'_>,
    ) -> Result<bool, CompareError>;

    /// Differences between two objects already judged the same
    ///
    /// `exclude` lists fields an earlier comparator handles itself.
    fn find_differences(
        &self,
        reference: &DatabaseObject,
        comparison: &DatabaseObject,
        chain: &ComparatorChain<'_>,
        exclude: &HashSet<Field>,
    ) -> Result<ObjectDifferences, CompareError>;
}

/// Extend an exclusion set with the fields a comparator handles itself
pub(crate) fn excluding<I>(exclude: &HashSet<Field>, fields: I) -> HashSet<Field>
where
    I: IntoIterator<Item = Field>,
{
    let mut exclude = exclude.clone();
    exclude.extend(fields);
    exclude
}
