//! Integration tests for schema initialization using in-memory SurrealDB.

use surrealdb::Surreal;
use surrealdb::engine::local::Mem;

#[tokio::test]
async fn schema_migration_applies_successfully() {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();

    sealbox_db::run_migrations(&db).await.unwrap();

    // Verify that all tables exist by querying INFO FOR DB.
    let mut result = db.query("INFO FOR DB").await.unwrap();
    let info: Option<surrealdb_types::Value> = result.take(0).unwrap();
    let info = info.expect("INFO FOR DB should return a value");
    let info_str = format!("{:?}", info);

    assert!(
        info_str.contains("organization"),
        "missing organization table"
    );
    assert!(info_str.contains("user"), "missing user table");
    assert!(info_str.contains("membership"), "missing membership table");
    assert!(
        info_str.contains("provider_key"),
        "missing provider_key table"
    );
    assert!(
        info_str.contains("tenant_config"),
        "missing tenant_config table"
    );

    // Verify migration was recorded.
    assert!(info_str.contains("_migration"), "missing _migration table");
}

#[tokio::test]
async fn migration_is_idempotent() {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();

    // Run twice — should not fail.
    sealbox_db::run_migrations(&db).await.unwrap();
    sealbox_db::run_migrations(&db).await.unwrap();

    // Verify only one migration record exists.
    let mut result = db.query("SELECT * FROM _migration").await.unwrap();
    let records: Vec<surrealdb_types::Value> = result.take(0).unwrap();
    assert_eq!(records.len(), 1, "expected exactly one migration record");
}

#[tokio::test]
async fn unique_index_prevents_duplicate_provider_keys() {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();

    sealbox_db::run_migrations(&db).await.unwrap();

    db.query(
        "CREATE provider_key SET \
         organization_id = 'org-1', \
         provider = 'OPENAI', \
         encrypted_key = 'c1'",
    )
    .await
    .unwrap()
    .check()
    .unwrap();

    // Second raw CREATE for the same (org, provider) — should fail.
    let result = db
        .query(
            "CREATE provider_key SET \
             organization_id = 'org-1', \
             provider = 'OPENAI', \
             encrypted_key = 'c2'",
        )
        .await
        .unwrap()
        .check();

    assert!(
        result.is_err(),
        "duplicate (organization, provider) should be rejected"
    );

    // A different provider for the same organization is fine.
    db.query(
        "CREATE provider_key SET \
         organization_id = 'org-1', \
         provider = 'GEMINI', \
         encrypted_key = 'c3'",
    )
    .await
    .unwrap()
    .check()
    .unwrap();
}
