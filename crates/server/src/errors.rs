use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use models::BarrierState;
use serde::Serialize;
use service::errors::{ErrorKind, InvalidField, ServiceError};
use tracing::error;

use crate::metrics::API_ERRORS_TOTAL;

/// JSON error body: `{"error": CODE, "message": ..., "allowed"?: [...]}`.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed: Option<Vec<&'static str>>,
}

#[derive(Debug)]
pub struct JsonApiError {
    pub status: StatusCode,
    pub body: ErrorBody,
}

impl JsonApiError {
    pub fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self { status, body: ErrorBody { error: code, message: message.into(), allowed: None } }
    }

    pub fn with_allowed(mut self, allowed: Vec<&'static str>) -> Self {
        self.body.allowed = Some(allowed);
        self
    }
}

impl From<ServiceError> for JsonApiError {
    fn from(e: ServiceError) -> Self {
        let code = e.code();
        API_ERRORS_TOTAL.with_label_values(&[code]).inc();
        match e.kind() {
            ErrorKind::InvalidArgument => {
                let err = JsonApiError::new(StatusCode::BAD_REQUEST, code, e.to_string());
                match e {
                    ServiceError::InvalidArgument { field: InvalidField::State, .. } => {
                        err.with_allowed(BarrierState::allowed())
                    }
                    _ => err,
                }
            }
            ErrorKind::NotFound => JsonApiError::new(StatusCode::NOT_FOUND, code, e.to_string()),
            ErrorKind::AlreadyExists => JsonApiError::new(StatusCode::CONFLICT, code, e.to_string()),
            ErrorKind::Unavailable => {
                error!(err = %e, "storage failure");
                JsonApiError::new(StatusCode::INTERNAL_SERVER_ERROR, code, "storage unavailable")
            }
        }
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}
