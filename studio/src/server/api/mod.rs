//! JSON API handlers grouped by resource.

pub mod exports;
pub mod sessions;
pub mod settings;

use axum::Json;
use axum::http::StatusCode;
use qr_generator::ExportError;
use serde_json::{Value, json};

use crate::services::ServiceError;

pub type ApiError = (StatusCode, Json<Value>);
pub type ApiResult = Result<Json<Value>, ApiError>;

/// Standard error response.
pub fn err_json(status: u16, message: &str) -> ApiError {
    (
        StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        Json(json!({ "status": "error", "error": message })),
    )
}

/// Map a service failure onto an HTTP status and JSON body.
pub fn service_error(e: ServiceError) -> ApiError {
    let status = match &e {
        ServiceError::SessionNotFound(_) => 404,
        ServiceError::Render(_) => 422,
        ServiceError::Export(ExportError::Cancelled) => 409,
        ServiceError::Export(ExportError::TimedOut(_)) => 504,
        ServiceError::Export(_) => 500,
    };
    err_json(status, &e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use uuid::Uuid;

    #[test]
    fn service_errors_map_to_statuses() {
        let (status, body) = service_error(ServiceError::SessionNotFound(Uuid::nil()));
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body.0["status"], "error");

        let (status, _) = service_error(ServiceError::Export(ExportError::Cancelled));
        assert_eq!(status, StatusCode::CONFLICT);

        let (status, _) = service_error(ServiceError::Export(ExportError::TimedOut(
            Duration::from_secs(1),
        )));
        assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);
    }
}
