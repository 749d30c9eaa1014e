use axum::{extract::{Path, State}, http::StatusCode, Json};
use common::types::Ack;
use models::spot;
use service::spots::{CreateSpotInput, SpotStatusView, UpdateSpotStatusInput};
use tracing::info;

use crate::{errors::JsonApiError, metrics::SPOT_WRITES_TOTAL, state::AppState};

#[utoipa::path(
    get, path = "/places", tag = "places",
    responses(
        (status = 200, description = "All spots ordered by id", body = [crate::openapi::SpotDoc]),
        (status = 500, description = "Storage unavailable", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<spot::Model>>, JsonApiError> {
    let spots = state.spots.list().await?;
    Ok(Json(spots))
}

/// A missing or non-JSON body counts as `{}` so the store reports which field is wrong.
#[utoipa::path(
    post, path = "/places", tag = "places",
    request_body = crate::openapi::CreateSpotDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::SpotDoc),
        (status = 400, description = "Validation Error", body = crate::openapi::ErrorDoc),
        (status = 409, description = "Spot already exists", body = crate::openapi::ErrorDoc),
        (status = 500, description = "Storage unavailable", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn create(
    State(state): State<AppState>,
    body: Option<Json<CreateSpotInput>>,
) -> Result<(StatusCode, Json<spot::Model>), JsonApiError> {
    let input = body.map(|Json(b)| b).unwrap_or_default();
    let created = state.spots.create(input).await?;
    SPOT_WRITES_TOTAL.with_label_values(&["create"]).inc();
    info!(id = %created.id, "created spot");
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    get, path = "/places/{id}", tag = "places",
    params(("id" = String, Path, description = "Spot ID")),
    responses(
        (status = 200, description = "OK", body = crate::openapi::SpotDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn get(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<spot::Model>, JsonApiError> {
    Ok(Json(state.spots.get(&id).await?))
}

#[utoipa::path(
    get, path = "/places/{id}/status", tag = "places",
    params(("id" = String, Path, description = "Spot ID")),
    responses(
        (status = 200, description = "OK", body = crate::openapi::SpotStatusDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn get_status(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<SpotStatusView>, JsonApiError> {
    Ok(Json(state.spots.get_status(&id).await?))
}

#[utoipa::path(
    put, path = "/places/{id}/status", tag = "places",
    params(("id" = String, Path, description = "Spot ID")),
    request_body = crate::openapi::UpdateSpotStatusDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::SpotDoc),
        (status = 400, description = "Validation Error", body = crate::openapi::ErrorDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Option<Json<UpdateSpotStatusInput>>,
) -> Result<Json<spot::Model>, JsonApiError> {
    let input = body.map(|Json(b)| b).unwrap_or_default();
    let updated = state.spots.update_status(&id, input).await?;
    SPOT_WRITES_TOTAL.with_label_values(&["update_status"]).inc();
    info!(id = %updated.id, status = %updated.status, "updated spot status");
    Ok(Json(updated))
}

#[utoipa::path(
    delete, path = "/places/{id}", tag = "places",
    params(("id" = String, Path, description = "Spot ID")),
    responses(
        (status = 200, description = "Deleted", body = crate::openapi::AckDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Ack>, JsonApiError> {
    state.spots.delete(&id).await?;
    SPOT_WRITES_TOTAL.with_label_values(&["delete"]).inc();
    info!(%id, "deleted spot");
    Ok(Json(Ack::ok()))
}
