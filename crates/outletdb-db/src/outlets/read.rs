//! Read operations for the `outlets` table.

use outletdb_core::OutletRecord;
use sqlx::SqlitePool;

use super::types::OutletRow;
use crate::DbError;

/// List every stored outlet, ordered by `id ASC`.
///
/// # Errors
///
/// Returns [`sqlx::Error`] if the query fails.
pub async fn list_outlets(pool: &SqlitePool) -> Result<Vec<OutletRow>, sqlx::Error> {
    sqlx::query_as::<_, OutletRow>(
        "SELECT id, name, address, latitude, longitude, telephone, \
                waze_link, google_map_link, features \
         FROM outlets \
         ORDER BY id ASC",
    )
    .fetch_all(pool)
    .await
}

/// Fetch one outlet by id. Returns `None` when no row has that id.
///
/// # Errors
///
/// Returns [`sqlx::Error`] if the query fails.
pub async fn get_outlet(pool: &SqlitePool, id: i64) -> Result<Option<OutletRow>, sqlx::Error> {
    sqlx::query_as::<_, OutletRow>(
        "SELECT id, name, address, latitude, longitude, telephone, \
                waze_link, google_map_link, features \
         FROM outlets \
         WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// List every stored outlet as a domain record, ordered by `id ASC`.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails, or
/// [`DbError::CorruptFeatures`] if any row's feature JSON cannot be decoded.
pub async fn list_outlet_records(pool: &SqlitePool) -> Result<Vec<OutletRecord>, DbError> {
    list_outlets(pool)
        .await?
        .into_iter()
        .map(OutletRow::into_record)
        .collect()
}
