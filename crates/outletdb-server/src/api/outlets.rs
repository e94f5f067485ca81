use axum::{
    extract::{Path, State},
    Extension, Json,
};
use outletdb_core::FeatureSet;
use outletdb_db::{DbError, OutletRow};
use serde::Serialize;

use crate::middleware::RequestId;

use super::{map_db_error, ApiError, ApiResponse, AppState};

#[derive(Debug, Serialize)]
pub(super) struct OutletItem {
    pub id: i64,
    pub name: String,
    pub address: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub telephone: Option<String>,
    pub waze_link: Option<String>,
    pub google_map_link: Option<String>,
    pub features: FeatureSet,
}

impl TryFrom<OutletRow> for OutletItem {
    type Error = DbError;

    fn try_from(row: OutletRow) -> Result<Self, Self::Error> {
        let features = row.features()?;
        Ok(Self {
            id: row.id,
            name: row.name,
            address: row.address,
            latitude: row.latitude,
            longitude: row.longitude,
            telephone: row.telephone,
            waze_link: row.waze_link,
            google_map_link: row.google_map_link,
            features,
        })
    }
}

pub(super) async fn list_outlets(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Json<ApiResponse<Vec<OutletItem>>>, ApiError> {
    let rows = outletdb_db::list_outlets(&state.pool)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &DbError::from(e)))?;

    let data = rows
        .into_iter()
        .map(OutletItem::try_from)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse::new(data, req_id.0)))
}

pub(super) async fn get_outlet(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<OutletItem>>, ApiError> {
    let row = outletdb_db::get_outlet(&state.pool, id)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &DbError::from(e)))?
        .ok_or_else(|| ApiError::new(req_id.0.clone(), "not_found", "Outlet not found"))?;

    let item = OutletItem::try_from(row).map_err(|e| map_db_error(req_id.0.clone(), &e))?;
    Ok(Json(ApiResponse::new(item, req_id.0)))
}
