//! Write operations for the `outlets` table.

use outletdb_core::OutletRecord;
use sqlx::SqlitePool;

use super::types::UpsertOutcome;
use crate::DbError;

/// Insert an outlet or refresh the existing row with the same `(name, address)`.
///
/// The key pair is never rewritten; coordinates, telephone, links and
/// features take the values from `outlet`. Update-then-insert runs inside one
/// transaction so a concurrent writer cannot slip a duplicate in between.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if a query fails, or [`DbError::EncodeFeatures`]
/// if the feature map cannot be serialized.
pub async fn upsert_outlet(
    pool: &SqlitePool,
    outlet: &OutletRecord,
) -> Result<UpsertOutcome, DbError> {
    let features = serde_json::to_string(&outlet.features).map_err(DbError::EncodeFeatures)?;

    let mut tx = pool.begin().await?;

    let existing: Option<i64> = sqlx::query_scalar::<_, i64>(
        "UPDATE outlets SET \
             latitude        = ?, \
             longitude       = ?, \
             telephone       = ?, \
             waze_link       = ?, \
             google_map_link = ?, \
             features        = ? \
         WHERE name = ? AND address = ? \
         RETURNING id",
    )
    .bind(outlet.latitude)
    .bind(outlet.longitude)
    .bind(&outlet.telephone)
    .bind(&outlet.waze_link)
    .bind(&outlet.google_map_link)
    .bind(&features)
    .bind(&outlet.name)
    .bind(&outlet.address)
    .fetch_optional(&mut *tx)
    .await?;

    let outcome = if let Some(id) = existing {
        UpsertOutcome::Updated(id)
    } else {
        let id: i64 = sqlx::query_scalar::<_, i64>(
            "INSERT INTO outlets \
                 (name, address, latitude, longitude, telephone, waze_link, google_map_link, features) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?) \
             RETURNING id",
        )
        .bind(&outlet.name)
        .bind(&outlet.address)
        .bind(outlet.latitude)
        .bind(outlet.longitude)
        .bind(&outlet.telephone)
        .bind(&outlet.waze_link)
        .bind(&outlet.google_map_link)
        .bind(&features)
        .fetch_one(&mut *tx)
        .await?;
        UpsertOutcome::Inserted(id)
    };

    tx.commit().await?;
    Ok(outcome)
}

/// Upsert each outlet in turn.
///
/// Returns `(new_count, updated_count)`. Each record commits on its own, so
/// a failure part-way leaves the earlier records stored; re-running is safe
/// because the key pair is unique.
///
/// # Errors
///
/// Returns the first [`DbError`] encountered.
pub async fn upsert_outlets(
    pool: &SqlitePool,
    outlets: &[OutletRecord],
) -> Result<(u64, u64), DbError> {
    let mut new_count: u64 = 0;
    let mut updated_count: u64 = 0;

    for outlet in outlets {
        if upsert_outlet(pool, outlet).await?.is_new() {
            new_count += 1;
        } else {
            updated_count += 1;
        }
    }

    Ok((new_count, updated_count))
}
