//! Test fixtures for diff integration tests
//!
//! Reusable snapshots modelled on a small e-commerce database. Every call
//! builds fresh objects, so two calls give structurally equal snapshots that
//! share no allocations, like two captures of the same database.

#![allow(dead_code)]

use schemadiff_core::{
    AutoIncrementInfo, Column, DataType, DatabaseObject, ForeignKey, Index, ObjectKind,
    PrimaryKey, Schema, Snapshot, Table,
    UniqueConstraint,
};
use std::sync::Arc;

/// Column builder shorthand
pub fn column(table: &Arc<Table>, name: &str, data_type: &str, nullable: bool) -> Column {
    Column::new(name)
        .with_relation(table.clone())
        .with_type(DataType::parse(data_type))
        .with_nullable(nullable)
}

/// A table in `schema` holding `columns` of (name, type, nullable)
pub fn table_with_columns(
    snapshot: &mut Snapshot,
    schema: &Arc<Schema>,
    name: &str,
    columns: &[(&str, &str, bool)],
) -> (Arc<Table>, Vec<Arc<Column>>) {
    let table = Arc::new(Table::new(name).with_schema(schema.clone()));
    snapshot.add(table.clone());

    let columns: Vec<_> = columns
        .iter()
        .enumerate()
        .map(|(position, (name, data_type, nullable))| {
            let column = column(&table, name, data_type, *nullable).with_order(position as i64 + 1);
            let column = Arc::new(column);
            snapshot.add(column.clone());
            column
        })
        .collect();

    (table, columns)
}

/// Create the baseline e-commerce snapshot
///
/// Contains:
/// - Schema `public` (default)
/// - Tables `users` and `orders` with primary keys
/// - Foreign key `orders.user_id -> users.id`
/// - Unique constraint on `users.email` backed by an index
/// - An expression index on `lower(email)`
pub fn ecommerce_v1() -> Snapshot {
    let mut snapshot = Snapshot::new().with_product("PostgreSQL", "15.4");
    let public = Arc::new(Schema::new("public").with_default(true));
    snapshot.add(public.clone());

    let (users, user_columns) = table_with_columns(
        &mut snapshot,
        &public,
        "users",
        &[
            ("id", "int8", false),
            ("email", "varchar(255)", false),
            ("name", "varchar(100)", true),
            ("created_at", "timestamp", false),
        ],
    );
    let (orders, order_columns) = table_with_columns(
        &mut snapshot,
        &public,
        "orders",
        &[
            ("id", "int8", false),
            ("user_id", "int8", false),
            ("total", "numeric(10,2)", false),
            ("status", "varchar(20)", false),
        ],
    );

    snapshot.add(Arc::new(
        PrimaryKey::new("users_pkey")
            .with_table(users.clone())
            .with_columns(vec![user_columns[0].clone()]),
    ));
    snapshot.add(Arc::new(
        PrimaryKey::new("orders_pkey")
            .with_table(orders.clone())
            .with_columns(vec![order_columns[0].clone()]),
    ));

    snapshot.add(Arc::new(
        ForeignKey::new("fk_orders_user")
            .with_foreign_key(orders.clone(), vec![order_columns[1].clone()])
            .with_primary_key(users.clone(), vec![user_columns[0].clone()])
            .with_delete_rule("CASCADE"),
    ));

    let email_index = Arc::new(
        Index::new("uq_users_email_idx")
            .with_table(users.clone())
            .with_columns(vec![user_columns[1].clone()])
            .with_unique(true),
    );
    snapshot.add(email_index.clone());
    snapshot.add(Arc::new(
        UniqueConstraint::new("uq_users_email")
            .with_table(users.clone())
            .with_columns(vec![user_columns[1].clone()])
            .with_backing_index(email_index),
    ));

    let lower_email = Arc::new(
        Column::new("lower(email)")
            .with_relation(users.clone())
            .with_computed(true),
    );
    snapshot.add(lower_email.clone());
    snapshot.add(Arc::new(
        Index::new("idx_users_lower_email")
            .with_table(users)
            .with_columns(vec![lower_email]),
    ));

    snapshot
}

/// The baseline after a release
///
/// Relative to [`ecommerce_v1`]:
/// - `users.name` dropped, `users.phone` added
/// - `orders.status` became nullable
/// - the foreign key was renamed to the Postgres default name
/// - the foreign key delete rule changed to `RESTRICT`
pub fn ecommerce_v2() -> Snapshot {
    let mut snapshot = Snapshot::new().with_product("PostgreSQL", "16.1");
    let public = Arc::new(Schema::new("public").with_default(true));
    snapshot.add(public.clone());

    let (users, user_columns) = table_with_columns(
        &mut snapshot,
        &public,
        "users",
        &[
            ("id", "int8", false),
            ("email", "varchar(255)", false),
            ("phone", "varchar(20)", true),
            ("created_at", "timestamp", false),
        ],
    );
    let (orders, order_columns) = table_with_columns(
        &mut snapshot,
        &public,
        "orders",
        &[
            ("id", "int8", false),
            ("user_id", "int8", false),
            ("total", "numeric(10,2)", false),
            ("status", "varchar(20)", true),
        ],
    );

    snapshot.add(Arc::new(
        PrimaryKey::new("users_pkey")
            .with_table(users.clone())
            .with_columns(vec![user_columns[0].clone()]),
    ));
    snapshot.add(Arc::new(
        PrimaryKey::new("orders_pkey")
            .with_table(orders.clone())
            .with_columns(vec![order_columns[0].clone()]),
    ));

    snapshot.add(Arc::new(
        ForeignKey::new("orders_user_id_fkey")
            .with_foreign_key(orders, vec![order_columns[1].clone()])
            .with_primary_key(users.clone(), vec![user_columns[0].clone()])
            .with_delete_rule("RESTRICT"),
    ));

    let email_index = Arc::new(
        Index::new("uq_users_email_idx")
            .with_table(users.clone())
            .with_columns(vec![user_columns[1].clone()])
            .with_unique(true),
    );
    snapshot.add(email_index.clone());
    snapshot.add(Arc::new(
        UniqueConstraint::new("uq_users_email")
            .with_table(users)
            .with_columns(vec![user_columns[1].clone()])
            .with_backing_index(email_index),
    ));

    snapshot
}

/// A single table in schema `schema`
pub fn single_table(schema: &str, table: &str) -> Snapshot {
    let mut snapshot = Snapshot::new();
    let schema = Arc::new(Schema::new(schema));
    snapshot.add(schema.clone());
    table_with_columns(&mut snapshot, &schema, table, &[("id", "int4", false)]);
    snapshot
}

/// An auto-increment column `id` of `data_type` on table `events`
pub fn serial_column(data_type: &str) -> Snapshot {
    let events = Arc::new(Table::new("events"));
    let id = column(&events, "id", data_type, false)
        .with_auto_increment(AutoIncrementInfo::default());
    Snapshot::new().with(events).with(Arc::new(id))
}

/// `orders` in schema `schema` with a half-resolved foreign key `fk_customer`
///
/// Only the referencing side is linked, so identity falls back to the
/// constraint name and the referencing table.
pub fn unresolved_foreign_key(schema: &str) -> Snapshot {
    let mut snapshot = Snapshot::new();
    let schema = Arc::new(Schema::new(schema));
    snapshot.add(schema.clone());
    let (orders, columns) =
        table_with_columns(&mut snapshot, &schema, "orders", &[("customer_id", "int8", false)]);

    snapshot.add(Arc::new(ForeignKey::new("fk_customer").with_foreign_key(orders, columns)));
    snapshot
}

/// Objects whose identity rests on the name fallbacks: keys without tables,
/// unnamed and blank-named keys, foreign keys with unresolved targets
pub fn fallback_identity_objects() -> Vec<DatabaseObject> {
    let mut objects = vec![
        DatabaseObject::PrimaryKey(Arc::new(PrimaryKey::unnamed())),
        DatabaseObject::PrimaryKey(Arc::new(PrimaryKey::new("  "))),
        DatabaseObject::PrimaryKey(Arc::new(PrimaryKey::new(""))),
        DatabaseObject::PrimaryKey(Arc::new(PrimaryKey::new(" PK_USERS "))),
        DatabaseObject::PrimaryKey(Arc::new(PrimaryKey::new("pk_users"))),
        DatabaseObject::ForeignKey(Arc::new(ForeignKey::unnamed())),
        DatabaseObject::ForeignKey(Arc::new(ForeignKey::new("fk_customer"))),
    ];
    for schema in ["sales", "hr", "sales"] {
        let snapshot = unresolved_foreign_key(schema);
        objects.extend(snapshot.objects(ObjectKind::ForeignKey).to_vec());
    }
    objects
}

/// Every object of `snapshot`, all kinds
pub fn all_objects(snapshot: &Snapshot) -> Vec<DatabaseObject> {
    snapshot
        .kinds()
        .into_iter()
        .flat_map(|kind| snapshot.objects(kind).to_vec())
        .collect()
}

/// The baseline as a snapshot document
pub const ECOMMERCE_DOCUMENT: &str = r#"{
  "product_name": "PostgreSQL",
  "product_version": "15.4",
  "schemas": [{ "name": "public", "default": true }],
  "tables": [
    { "name": "users", "schema": "public" },
    { "name": "orders", "schema": "public" }
  ],
  "columns": [
    { "table": "users", "schema": "public", "name": "id", "type": "int8", "nullable": false, "order": 1 },
    { "table": "users", "schema": "public", "name": "email", "type": "varchar(255)", "nullable": false, "order": 2 },
    { "table": "orders", "schema": "public", "name": "id", "type": "int8", "nullable": false, "order": 1 },
    { "table": "orders", "schema": "public", "name": "user_id", "type": "int8", "nullable": false, "order": 2 }
  ],
  "indexes": [
    { "name": "idx_users_lower_email", "table": "users", "schema": "public",
      "columns": [{ "name": "lower(email)", "computed": true }] }
  ],
  "primary_keys": [
    { "name": "users_pkey", "table": "users", "schema": "public", "columns": ["id"] },
    { "name": "orders_pkey", "table": "orders", "schema": "public", "columns": ["id"] }
  ],
  "foreign_keys": [
    { "name": "fk_orders_user", "table": "orders", "schema": "public", "columns": ["user_id"],
      "referenced_table": "users", "referenced_schema": "public", "referenced_columns": ["id"],
      "delete_rule": "CASCADE" }
  ]
}"#;
