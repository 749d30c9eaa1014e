use axum::{extract::State, Json};
use service::spots::{AvailableSpot, ParkingSummary};

use crate::{errors::JsonApiError, state::AppState};

#[utoipa::path(
    get, path = "/parking/available", tag = "parking",
    responses((status = 200, description = "Free spot ids ordered by id", body = [crate::openapi::AvailableSpotDoc]))
)]
pub async fn available(State(state): State<AppState>) -> Result<Json<Vec<AvailableSpot>>, JsonApiError> {
    Ok(Json(state.spots.list_available().await?))
}

#[utoipa::path(
    get, path = "/parking/state", tag = "parking",
    responses((status = 200, description = "Occupancy counts", body = crate::openapi::ParkingSummaryDoc))
)]
pub async fn summary(State(state): State<AppState>) -> Result<Json<ParkingSummary>, JsonApiError> {
    Ok(Json(state.spots.aggregate().await?))
}
