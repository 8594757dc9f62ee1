//! Engine errors
//!
//! [`CompareError`] is an internal-contract failure: a defect in comparator
//! registration or snapshot population, never "a difference was found".
//! [`DiffError`] wraps everything a whole run can fail with.

use schemadiff_core::{Field, ObjectKind, SnapshotError};

/// Comparison failure types
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CompareError {
    #[error("Comparator '{comparator}' does not handle {kind} objects")]
    UnsupportedKind {
        comparator: &'static str,
        kind: ObjectKind,
    },

    #[error("Attribute '{field}' expected {expected}, found {found}")]
    AttributeType {
        field: Field,
        expected: &'static str,
        found: &'static str,
    },
}

impl CompareError {
    pub fn unsupported(comparator: &'static str, kind: ObjectKind) -> Self {
        Self::UnsupportedKind { comparator, kind }
    }

    /// Type confusion inside a compare function, before the field is known
    pub fn type_mismatch(expected: &'static str, found: &'static str) -> Self {
        Self::AttributeType {
            field: Field::This,
            expected,
            found,
        }
    }

    /// Attach the attribute being compared
    pub fn for_field(self, field: &Field) -> Self {
        match self {
            Self::AttributeType { expected, found, .. } => Self::AttributeType {
                field: field.clone(),
                expected,
                found,
            },
            other => other,
        }
    }
}

/// Failure of a whole diff run
#[derive(Debug, thiserror::Error)]
pub enum DiffError {
    #[error("Failed to load snapshot '{source_name}': {error}")]
    Snapshot {
        source_name: String,
        #[source]
        error: SnapshotError,
    },

    #[error(transparent)]
    Compare(#[from] CompareError),
}
