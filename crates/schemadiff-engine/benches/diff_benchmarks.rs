//! Benchmarks for diff generation over large snapshots
//!
//! These benchmarks measure how the diff generator scales with the number of
//! columns, where hash bucketing keeps candidate scans short.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use schemadiff_core::{CompareControl, DialectProfile, Snapshot, SnapshotDocument};
use schemadiff_engine::{ComparatorRegistry, DiffGenerator};

const COLUMNS_PER_TABLE: usize = 20;

/// Generate a snapshot document with N tables of 20 columns each
///
/// With `drift` set, every tenth table loses its last column, gains a new
/// one and has its first non-key column turned nullable.
fn generate_document(num_tables: usize, drift: bool) -> String {
    let mut tables = Vec::new();
    let mut columns = Vec::new();
    let mut primary_keys = Vec::new();
    let mut foreign_keys = Vec::new();

    for t in 0..num_tables {
        let table = format!("table_{}", t);
        let drifted = drift && t % 10 == 0;
        tables.push(serde_json::json!({ "name": table, "schema": "public" }));

        let last = if drifted { COLUMNS_PER_TABLE - 1 } else { COLUMNS_PER_TABLE };
        for c in 0..last {
            let data_type = if c == 0 { "int8" } else { "varchar(255)" };
            let nullable = (c != 0 && c % 2 == 0) || (drifted && c == 1);
            columns.push(serde_json::json!({
                "table": table,
                "schema": "public",
                "name": format!("col_{}", c),
                "type": data_type,
                "nullable": nullable,
                "order": c + 1,
            }));
        }
        if drifted {
            columns.push(serde_json::json!({
                "table": table,
                "schema": "public",
                "name": "added_col",
                "type": "text",
                "nullable": true,
            }));
        }

        primary_keys.push(serde_json::json!({
            "name": format!("{}_pkey", table),
            "table": table,
            "schema": "public",
            "columns": ["col_0"],
        }));

        if t > 0 {
            foreign_keys.push(serde_json::json!({
                "name": format!("fk_{}_parent", table),
                "table": table,
                "schema": "public",
                "columns": ["col_0"],
                "referenced_table": format!("table_{}", t - 1),
                "referenced_schema": "public",
                "referenced_columns": ["col_0"],
            }));
        }
    }

    serde_json::json!({
        "product_name": "PostgreSQL",
        "product_version": "16.1",
        "schemas": [{ "name": "public", "default": true }],
        "tables": tables,
        "columns": columns,
        "primary_keys": primary_keys,
        "foreign_keys": foreign_keys,
    })
    .to_string()
}

fn snapshot(num_tables: usize, drift: bool) -> Snapshot {
    SnapshotDocument::from_json(&generate_document(num_tables, drift))
        .and_then(|document| document.resolve())
        .unwrap()
}

/// Benchmark: Resolve snapshot documents (50, 100, 250 tables)
fn bench_document_resolution(c: &mut Criterion) {
    let mut group = c.benchmark_group("document_resolution");

    for num_tables in [50, 100, 250].iter() {
        let document = SnapshotDocument::from_json(&generate_document(*num_tables, false)).unwrap();

        group.bench_with_input(BenchmarkId::from_parameter(num_tables), num_tables, |b, _| {
            b.iter(|| black_box(document.resolve().unwrap()));
        });
    }

    group.finish();
}

/// Benchmark: Diff identical captures (1000 to 5000 columns)
fn bench_identical_snapshots(c: &mut Criterion) {
    let mut group = c.benchmark_group("identical_snapshots");
    let database = DialectProfile::postgres();
    let control = CompareControl::default();
    let registry = ComparatorRegistry::with_defaults(&database);

    for num_tables in [50, 100, 250].iter() {
        let (reference, comparison) = (snapshot(*num_tables, false), snapshot(*num_tables, false));

        let id = BenchmarkId::from_parameter(num_tables * COLUMNS_PER_TABLE);
        group.bench_with_input(id, num_tables, |b, _| {
            b.iter(|| {
                let generator = DiffGenerator::new(&registry, &database, &control);
                black_box(generator.compare(&reference, &comparison).unwrap())
            });
        });
    }

    group.finish();
}

/// Benchmark: Diff drifted captures
fn bench_drifted_snapshots(c: &mut Criterion) {
    let mut group = c.benchmark_group("drifted_snapshots");
    let database = DialectProfile::postgres();
    let control = CompareControl::default();
    let registry = ComparatorRegistry::with_defaults(&database);

    for num_tables in [50, 100, 250].iter() {
        let (reference, comparison) = (snapshot(*num_tables, false), snapshot(*num_tables, true));

        let id = BenchmarkId::from_parameter(num_tables * COLUMNS_PER_TABLE);
        group.bench_with_input(id, num_tables, |b, _| {
            b.iter(|| {
                let generator = DiffGenerator::new(&registry, &database, &control);
                black_box(generator.compare(&reference, &comparison).unwrap())
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_document_resolution,
    bench_identical_snapshots,
    bench_drifted_snapshots
);

criterion_main!(benches);
