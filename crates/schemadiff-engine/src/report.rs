//! Diff report schema (stable v1)
//!
//! This schema is STABLE and VERSIONED.
//! Breaking changes require a new version.

use crate::diff_result::{ChangedObject, DiffResult, StringDiff};
use crate::differences::Difference;
use schemadiff_core::{DatabaseObject, Field, ObjectKind};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Report schema version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportVersion {
    /// Major version (breaking changes)
    pub major: u32,

    /// Minor version (backward-compatible additions)
    pub minor: u32,
}

impl ReportVersion {
    /// Current report schema version
    pub const CURRENT: ReportVersion = ReportVersion { major: 1, minor: 0 };
}

impl std::fmt::Display for ReportVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// Counts for one object kind
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KindSummary {
    pub missing: usize,
    pub unexpected: usize,
    pub changed: usize,
}

/// Summary statistics for a report
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSummary {
    /// Objects only in the reference snapshot
    pub missing: usize,

    /// Objects only in the comparison snapshot
    pub unexpected: usize,

    /// Matched objects with differences
    pub changed: usize,

    /// Per-kind breakdown; kinds without findings are omitted
    pub by_kind: BTreeMap<ObjectKind, KindSummary>,
}

/// One differing attribute, rendered
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportedDifference {
    pub field: Field,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub comparison: Option<String>,

    /// Human-readable description
    pub message: String,
}

impl From<&Difference> for ReportedDifference {
    fn from(difference: &Difference) -> Self {
        Self {
            field: difference.field.clone(),
            reference: difference.reference_value.as_ref().map(ToString::to_string),
            comparison: difference.comparison_value.as_ref().map(ToString::to_string),
            message: difference.to_string(),
        }
    }
}

/// One reported object
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportEntry {
    pub kind: ObjectKind,

    /// Display name of the (reference side) object
    pub object: String,

    /// Display name on the comparison side, for changed objects
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comparison: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub differences: Vec<ReportedDifference>,
}

impl ReportEntry {
    fn object(object: &DatabaseObject) -> Self {
        Self {
            kind: object.kind(),
            object: object.to_string(),
            comparison: None,
            differences: Vec::new(),
        }
    }

    fn changed(changed: &ChangedObject) -> Self {
        Self {
            kind: changed.reference.kind(),
            object: changed.reference.to_string(),
            comparison: Some(changed.comparison.to_string()),
            differences: changed.differences.differences().map(ReportedDifference::from).collect(),
        }
    }
}

/// Diff report (diff-report.json v1)
///
/// This is the stable output format.
/// All fields are versioned and backward-compatible.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiffReport {
    /// Schema version
    pub version: ReportVersion,

    /// Timestamp (ISO 8601)
    pub timestamp: String,

    /// Database product name on both sides
    pub product_name: StringDiff,

    /// Database product version on both sides
    pub product_version: StringDiff,

    /// Summary statistics
    pub summary: ReportSummary,

    pub missing: Vec<ReportEntry>,

    pub unexpected: Vec<ReportEntry>,

    pub changed: Vec<ReportEntry>,

    /// Metadata
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
}

fn by_display(a: &DatabaseObject, b: &DatabaseObject) -> std::cmp::Ordering {
    a.to_string().cmp(&b.to_string())
}

impl DiffReport {
    /// Create a new empty report
    pub fn new() -> Self {
        Self {
            version: ReportVersion::CURRENT,
            timestamp: chrono::Utc::now().to_rfc3339(),
            product_name: StringDiff::default(),
            product_version: StringDiff::default(),
            summary: ReportSummary::default(),
            missing: Vec::new(),
            unexpected: Vec::new(),
            changed: Vec::new(),
            metadata: None,
        }
    }

    /// Render a diff result; entries are grouped by kind and sorted by name
    pub fn from_result(result: &DiffResult) -> Self {
        let mut report = Self {
            product_name: result.product_name_diff().clone(),
            product_version: result.product_version_diff().clone(),
            ..Self::new()
        };

        let kinds = ObjectKind::ALL
            .into_iter()
            .filter(|kind| result.compared_types().contains(kind));

        for kind in kinds {
            let missing = result.missing_objects_sorted(kind, by_display);
            let unexpected = result.unexpected_objects_sorted(kind, by_display);
            let changed = result.changed_objects_sorted(kind, by_display);

            let counts = KindSummary {
                missing: missing.len(),
                unexpected: unexpected.len(),
                changed: changed.len(),
            };
            if counts != KindSummary::default() {
                report.summary.by_kind.insert(kind, counts);
            }

            report.missing.extend(missing.into_iter().map(ReportEntry::object));
            report.unexpected.extend(unexpected.into_iter().map(ReportEntry::object));
            report.changed.extend(changed.into_iter().map(ReportEntry::changed));
        }

        report.summary.missing = report.missing.len();
        report.summary.unexpected = report.unexpected.len();
        report.summary.changed = report.changed.len();
        report
    }

    /// Check if the snapshots differed
    pub fn has_differences(&self) -> bool {
        self.summary.missing + self.summary.unexpected + self.summary.changed > 0
    }

    /// Serialize to JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Save to file
    pub fn save_to_file(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let json = self.to_json()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
        std::fs::write(path, json)
    }
}

impl Default for DiffReport {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::differences::ObjectDifferences;
    use pretty_assertions::assert_eq;
    use schemadiff_core::{AttrValue, Column, CompareControl, Snapshot, Table};
    use std::sync::Arc;

    fn column(name: &str) -> DatabaseObject {
        let users = Arc::new(Table::new("users"));
        DatabaseObject::Column(Arc::new(Column::new(name).with_relation(users)))
    }

    fn sample_result() -> DiffResult {
        let mut result = DiffResult::new(
            &Snapshot::new().with_product("PostgreSQL", "15.4"),
            &Snapshot::new().with_product("PostgreSQL", "16.1"),
            &CompareControl::default(),
        );
        result.add_missing_object(column("zip"));
        result.add_missing_object(column("email"));
        result.add_unexpected_object(DatabaseObject::Table(Arc::new(Table::new("audit"))));

        let mut differences = ObjectDifferences::empty();
        differences.add_difference(
            Field::Nullable,
            Some(AttrValue::Bool(true)),
            Some(AttrValue::Bool(false)),
        );
        result.add_changed_object(column("id"), column("id"), differences);
        result
    }

    #[test]
    fn empty_report() {
        let report = DiffReport::new();
        assert_eq!(report.version, ReportVersion::CURRENT);
        assert_eq!(report.version.to_string(), "1.0");
        assert!(!report.has_differences());
    }

    #[test]
    fn report_from_result() {
        let report = DiffReport::from_result(&sample_result());

        assert!(report.has_differences());
        assert_eq!(report.summary.missing, 2);
        assert_eq!(report.summary.unexpected, 1);
        assert_eq!(report.summary.changed, 1);
        assert_eq!(
            report.summary.by_kind.get(&ObjectKind::Column),
            Some(&KindSummary { missing: 2, unexpected: 0, changed: 1 })
        );
        assert!(!report.summary.by_kind.contains_key(&ObjectKind::Index));

        let missing: Vec<_> = report.missing.iter().map(|e| e.object.as_str()).collect();
        assert_eq!(missing, vec!["users.email", "users.zip"]);
        assert!(!report.product_version.are_equal());

        let changed = &report.changed[0];
        assert_eq!(changed.differences[0].field, Field::Nullable);
        assert_eq!(changed.differences[0].message, "nullable changed from 'true' to 'false'");
    }

    #[test]
    fn report_serialization() {
        let report = DiffReport::from_result(&sample_result());
        let json = report.to_json().unwrap();

        assert!(json.contains("\"version\""));
        assert!(json.contains("\"nullable\""));
        assert!(json.contains("\"by_kind\""));

        let parsed: DiffReport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, report);
    }

    #[test]
    fn save_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("diff-report.json");

        DiffReport::from_result(&sample_result()).save_to_file(&path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("users.email"));
    }
}
