use axum::{extract::{Path, State}, Json};
use models::BarrierState;
use serde::Serialize;
use service::barriers::{BarrierView, SetBarrierStateInput};
use tracing::info;

use crate::{errors::JsonApiError, metrics::BARRIER_WRITES_TOTAL, state::AppState};

#[derive(Debug, Serialize)]
pub struct BarrierWritten {
    pub ok: bool,
    pub id: String,
    pub state: BarrierState,
    pub updated_at: String,
}

#[utoipa::path(
    get, path = "/barrier/{id}", tag = "barrier",
    params(("id" = String, Path, description = "Barrier ID")),
    responses(
        (status = 200, description = "OK", body = crate::openapi::BarrierDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn get(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<BarrierView>, JsonApiError> {
    Ok(Json(state.barriers.get(&id).await?))
}

#[utoipa::path(
    put, path = "/barrier/{id}/state", tag = "barrier",
    params(("id" = String, Path, description = "Barrier ID")),
    request_body = crate::openapi::SetBarrierStateDoc,
    responses(
        (status = 200, description = "Stored (created on first write)", body = crate::openapi::BarrierWrittenDoc),
        (status = 400, description = "State outside the allowed set", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn set_state(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Option<Json<SetBarrierStateInput>>,
) -> Result<Json<BarrierWritten>, JsonApiError> {
    let input = body.map(|Json(b)| b).unwrap_or_default();
    let written = state.barriers.set_state(&id, input).await?;
    BARRIER_WRITES_TOTAL.with_label_values(&[written.state.as_str()]).inc();
    info!(id = %written.id, state = %written.state, "barrier state written");
    Ok(Json(BarrierWritten { ok: true, id: written.id, state: written.state, updated_at: written.updated_at }))
}
