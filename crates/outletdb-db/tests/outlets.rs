//! Store round-trips against an in-memory `SQLite` database.

use outletdb_core::{FeatureKey, FeatureSet, OutletRecord};
use outletdb_db::{
    connect_pool, get_outlet, list_outlet_records, list_outlets, run_migrations, upsert_outlet,
    upsert_outlets, PoolConfig, UpsertOutcome,
};
use sqlx::SqlitePool;

async fn test_pool() -> SqlitePool {
    let pool = connect_pool("sqlite::memory:", PoolConfig::in_memory())
        .await
        .expect("connect in-memory sqlite");
    run_migrations(&pool).await.expect("run migrations");
    pool
}

fn outlet(name: &str, address: &str, coordinates: Option<(f64, f64)>) -> OutletRecord {
    let mut features = FeatureSet::new();
    features.set(FeatureKey::Wifi, true);
    OutletRecord::new(
        name.to_string(),
        address.to_string(),
        coordinates,
        Some("03-2141 3567".to_string()),
        features,
    )
}

#[tokio::test]
async fn upsert_inserts_then_updates_same_key() {
    let pool = test_pool().await;

    let first = outlet("McDonald's KLCC", "Jalan Ampang, 50450 Kuala Lumpur", None);
    let inserted = upsert_outlet(&pool, &first).await.expect("insert");
    assert!(matches!(inserted, UpsertOutcome::Inserted(_)));

    let mut second = outlet(
        "McDonald's KLCC",
        "Jalan Ampang, 50450 Kuala Lumpur",
        Some((3.1579, 101.7116)),
    );
    second.features.set(FeatureKey::McCafe, true);
    second.telephone = Some("03-0000 0000".to_string());
    let updated = upsert_outlet(&pool, &second).await.expect("update");
    assert_eq!(updated, UpsertOutcome::Updated(inserted.id()));

    let rows = list_outlets(&pool).await.expect("list");
    assert_eq!(rows.len(), 1, "same (name, address) must not duplicate");

    let record = rows.into_iter().next().expect("row").into_record().expect("decode");
    assert_eq!(record.latitude, Some(3.1579));
    assert_eq!(record.longitude, Some(101.7116));
    assert_eq!(record.telephone.as_deref(), Some("03-0000 0000"));
    assert_eq!(
        record.google_map_link.as_deref(),
        Some("https://www.google.com/maps?q=3.1579,101.7116")
    );
    assert!(record.features.get(FeatureKey::McCafe));
    assert!(record.features.get(FeatureKey::Wifi));
}

#[tokio::test]
async fn upserting_the_same_batch_twice_is_idempotent() {
    let pool = test_pool().await;
    let batch = vec![
        outlet("McDonald's Bangsar", "Jalan Telawi 3, Bangsar", Some((3.13, 101.67))),
        outlet("McDonald's Cheras", "Jalan Cheras, Kuala Lumpur", None),
    ];

    let (new_first, updated_first) = upsert_outlets(&pool, &batch).await.expect("first run");
    let (new_second, updated_second) = upsert_outlets(&pool, &batch).await.expect("second run");

    assert_eq!((new_first, updated_first), (2, 0));
    assert_eq!((new_second, updated_second), (0, 2));
    assert_eq!(list_outlets(&pool).await.expect("list").len(), 2);
}

#[tokio::test]
async fn same_name_different_address_is_a_different_outlet() {
    let pool = test_pool().await;
    let batch = vec![
        outlet("McDonald's Drive-Thru", "Jalan Ipoh, Kuala Lumpur", None),
        outlet("McDonald's Drive-Thru", "Jalan Kuching, Kuala Lumpur", None),
    ];
    let (new_count, _) = upsert_outlets(&pool, &batch).await.expect("upsert");
    assert_eq!(new_count, 2);
}

#[tokio::test]
async fn get_outlet_returns_row_or_none() {
    let pool = test_pool().await;
    let id = upsert_outlet(&pool, &outlet("McDonald's Sentul", "Jalan Sentul", None))
        .await
        .expect("insert")
        .id();

    let row = get_outlet(&pool, id).await.expect("query").expect("row exists");
    assert_eq!(row.name, "McDonald's Sentul");
    assert!(row.waze_link.is_none());

    let missing = get_outlet(&pool, id + 100).await.expect("query");
    assert!(missing.is_none());
}

#[tokio::test]
async fn stored_features_are_complete_json() {
    let pool = test_pool().await;
    upsert_outlet(&pool, &outlet("McDonald's Pudu", "Jalan Pudu", None))
        .await
        .expect("insert");

    let raw: String = sqlx::query_scalar("SELECT features FROM outlets LIMIT 1")
        .fetch_one(&pool)
        .await
        .expect("features column");
    let value: serde_json::Value = serde_json::from_str(&raw).expect("json");
    let obj = value.as_object().expect("object");
    assert_eq!(obj.len(), FeatureKey::ALL.len());
    assert_eq!(obj["has_wifi"], serde_json::Value::Bool(true));
}

#[tokio::test]
async fn list_outlet_records_decodes_features() {
    let pool = test_pool().await;
    upsert_outlets(
        &pool,
        &[
            outlet("McDonald's Kepong", "Jalan Kepong", Some((3.2, 101.64))),
            outlet("McDonald's Setapak", "Jalan Genting Kelang", None),
        ],
    )
    .await
    .expect("upsert");

    let records = list_outlet_records(&pool).await.expect("records");
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].name, "McDonald's Kepong");
    assert!(records.iter().all(|r| r.features.get(FeatureKey::Wifi)));
    assert!(records[1].google_map_link.is_none());
}
