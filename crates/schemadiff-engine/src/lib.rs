//! schemadiff engine - Comparison logic
//!
//! This crate implements the comparison side of schemadiff:
//! - Attribute compare functions and the per-object difference ledger
//! - Priority-ordered comparator registry and delegation chains
//! - Per-kind identity and difference rules
//! - Diff generation over two snapshots
//! - Report generation

pub mod chain;
pub mod comparator;
pub mod comparators;
pub mod compare;
pub mod diff_result;
pub mod differences;
pub mod error;
pub mod generator;
pub mod registry;
pub mod report;

pub use chain::{CompareContext, ComparatorChain};
pub use comparator::{DatabaseObjectComparator, Priority};
pub use compare::{
    CompareFunction, DataTypeCompareFunction, NameCompareFunction, OrderedCollectionCompareFunction,
    StandardCompareFunction, ToStringCompareFunction, UnorderedCollectionCompareFunction,
};
pub use diff_result::{ChangedObject, DiffResult, StringDiff};
pub use differences::{Difference, ObjectDifferences};
pub use error::{CompareError, DiffError};
pub use generator::{diff, DiffGenerator};
pub use registry::ComparatorRegistry;
pub use report::{
    DiffReport, KindSummary, ReportEntry, ReportSummary, ReportVersion, ReportedDifference,
};
