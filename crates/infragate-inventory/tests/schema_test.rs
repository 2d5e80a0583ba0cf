//! Integration tests for schema initialization using in-memory SurrealDB.

use infragate_core::id::ResourceKind;
use infragate_core::inventory::{InventoryClient, ResourceFilter};
use infragate_core::models::RegionResource;
use surrealdb::Surreal;
use surrealdb::engine::local::Mem;
use uuid::Uuid;

#[tokio::test]
async fn schema_migration_applies_successfully() {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();

    infragate_inventory::run_migrations(&db).await.unwrap();

    let mut result = db.query("INFO FOR DB").await.unwrap();
    let info: Option<surrealdb_types::Value> = result.take(0).unwrap();
    let info = info.expect("INFO FOR DB should return a value");
    let info_str = format!("{:?}", info);

    assert!(info_str.contains("resource"), "missing resource table");
    assert!(info_str.contains("_migration"), "missing migration table");
}

#[tokio::test]
async fn migrations_are_idempotent() {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();

    infragate_inventory::run_migrations(&db).await.unwrap();
    infragate_inventory::run_migrations(&db).await.unwrap();
}

#[tokio::test]
async fn open_migrates_and_returns_a_working_store() {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    let inv = infragate_inventory::open(db, "infragate", "inventory").await.unwrap();

    let tenant = Uuid::new_v4();
    inv.create(
        tenant,
        RegionResource {
            name: "emea".into(),
            ..Default::default()
        }
        .into(),
    )
    .await
    .unwrap();
    let listed = inv
        .list(tenant, ResourceFilter::new(ResourceKind::Region).with_page(0, 10))
        .await
        .unwrap();
    assert_eq!(listed.total_elements, 1);
}
