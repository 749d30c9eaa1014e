use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct ErrorDoc {
    /// Stable code such as `INVALID_DISTANCE` or `NOT_FOUND`
    pub error: String,
    pub message: String,
    /// Present on `INVALID_STATE` only
    pub allowed: Option<Vec<String>>,
}

#[derive(ToSchema)]
pub struct AckDoc { pub ok: bool }

#[derive(ToSchema)]
pub struct SpotDoc {
    pub id: String,
    pub label: String,
    /// `FREE` or `OCCUPIED`
    pub status: String,
    pub distance: Option<f64>,
    pub threshold: Option<f64>,
    pub debounce: Option<i64>,
    pub updated_at: String,
}

#[derive(ToSchema)]
pub struct CreateSpotDoc {
    pub id: String,
    /// Defaults to `id`
    pub label: Option<String>,
    pub distance: Option<f64>,
    pub threshold: Option<f64>,
    pub debounce: Option<i64>,
}

/// Omitted fields keep their stored value; `null` clears them.
#[derive(ToSchema)]
pub struct UpdateSpotStatusDoc {
    pub status: String,
    pub distance: Option<f64>,
    pub threshold: Option<f64>,
    pub debounce: Option<i64>,
}

#[derive(ToSchema)]
pub struct SpotStatusDoc { pub status: String }

#[derive(ToSchema)]
pub struct AvailableSpotDoc { pub id: String }

#[derive(ToSchema)]
pub struct ParkingSummaryDoc { pub total: u64, pub free: u64, pub occupied: u64 }

#[derive(ToSchema)]
pub struct BarrierDoc {
    /// `OPENING`, `OPENED`, `CLOSING` or `CLOSED`
    pub state: String,
    pub updated_at: String,
}

#[derive(ToSchema)]
pub struct SetBarrierStateDoc { pub state: String }

#[derive(ToSchema)]
pub struct BarrierWrittenDoc { pub ok: bool, pub id: String, pub state: String, pub updated_at: String }

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::places::list,
        crate::routes::places::create,
        crate::routes::places::get,
        crate::routes::places::get_status,
        crate::routes::places::update_status,
        crate::routes::places::delete,
        crate::routes::parking::available,
        crate::routes::parking::summary,
        crate::routes::barrier::get,
        crate::routes::barrier::set_state,
    ),
    components(
        schemas(
            HealthResponse,
            ErrorDoc,
            AckDoc,
            SpotDoc,
            CreateSpotDoc,
            UpdateSpotStatusDoc,
            SpotStatusDoc,
            AvailableSpotDoc,
            ParkingSummaryDoc,
            BarrierDoc,
            SetBarrierStateDoc,
            BarrierWrittenDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "places"),
        (name = "parking"),
        (name = "barrier")
    )
)]
pub struct ApiDoc;
