//! Per-run comparison control

use crate::database::CatalogAndSchema;
use crate::field::{Field, ObjectKind};
use std::collections::{BTreeSet, HashMap, HashSet};

/// A schema alias pair: `reference` on one side is treated as `comparison`
/// on the other
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SchemaComparison {
    pub reference: CatalogAndSchema,
    pub comparison: CatalogAndSchema,
}

impl SchemaComparison {
    pub fn new(reference: CatalogAndSchema, comparison: CatalogAndSchema) -> Self {
        Self { reference, comparison }
    }

    /// Alias two bare schema names
    pub fn schemas(reference: &str, comparison: &str) -> Self {
        Self::new(
            CatalogAndSchema::new(None, Some(reference)),
            CatalogAndSchema::new(None, Some(comparison)),
        )
    }
}

/// What to compare and how, for one comparison run
#[derive(Debug, Clone, PartialEq)]
pub struct CompareControl {
    /// Kinds to compare
    pub compared_types: BTreeSet<ObjectKind>,

    /// Fields skipped entirely, per kind
    pub suppressed_fields: HashMap<ObjectKind, HashSet<Field>>,

    /// Cross-environment schema aliases, in lookup order
    pub schema_comparisons: Vec<SchemaComparison>,

    /// Whether catalog names take part in identity
    pub include_catalog: bool,

    /// Whether column ordinal positions are compared
    pub diff_column_order: bool,
}

impl Default for CompareControl {
    fn default() -> Self {
        Self {
            compared_types: ObjectKind::ALL.into_iter().collect(),
            suppressed_fields: HashMap::new(),
            schema_comparisons: Vec::new(),
            include_catalog: false,
            diff_column_order: false,
        }
    }
}

impl CompareControl {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict the run to the given kinds
    pub fn with_types<I>(mut self, kinds: I) -> Self
    where
        I: IntoIterator<Item = ObjectKind>,
    {
        self.compared_types = kinds.into_iter().collect();
        self
    }

    pub fn with_suppressed_field(mut self, kind: ObjectKind, field: impl Into<Field>) -> Self {
        self.suppressed_fields.entry(kind).or_default().insert(field.into());
        self
    }

    pub fn with_schema_comparison(mut self, comparison: SchemaComparison) -> Self {
        self.schema_comparisons.push(comparison);
        self
    }

    pub fn with_include_catalog(mut self, include: bool) -> Self {
        self.include_catalog = include;
        self
    }

    pub fn with_diff_column_order(mut self, enabled: bool) -> Self {
        self.diff_column_order = enabled;
        self
    }

    pub fn compares(&self, kind: ObjectKind) -> bool {
        self.compared_types.contains(&kind)
    }

    pub fn is_suppressed(&self, kind: ObjectKind, field: &Field) -> bool {
        self.suppressed_fields
            .get(&kind)
            .map(|fields| fields.contains(field))
            .unwrap_or(false)
    }

    /// Compared kinds, containers first
    pub fn ordered_types(&self) -> Vec<ObjectKind> {
        ObjectKind::ALL
            .into_iter()
            .filter(|kind| self.compares(*kind))
            .collect()
    }
}
