pub mod api;
pub mod device;
pub mod emulator;
pub mod incubator;

pub use api::ApiError;
pub use device::DeviceError;
pub use emulator::EmulatorError;
pub use incubator::IncubatorError;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use uuid::Uuid;

fn internal_error(kind: &str, error: &dyn std::fmt::Display) -> (StatusCode, String, Option<String>) {
    let error_id = Uuid::new_v4();
    tracing::error!(error_id = ?error_id, "{}: {}", kind, error);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "Internal server error".to_string(),
        Some(error_id.to_string()),
    )
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // Extract status code and error message from the specific error type
        let (status, error_message, error_id) = match self {
            ApiError::DeviceError(e) => (e.status_code(), e.to_string(), None),
            ApiError::IncubatorError(e) => (e.status_code(), e.to_string(), None),
            ApiError::EmulatorError(e) if e.status_code().is_server_error() => {
                internal_error("Emulator error", &e)
            }
            ApiError::EmulatorError(e) => (e.status_code(), e.to_string(), None),
            ApiError::InvalidRequest(message) => (StatusCode::BAD_REQUEST, message, None),
            ApiError::DatabaseError(e) => internal_error("Database error", &e),
            ApiError::InternalError(e) => internal_error("Internal error", &e),
        };

        let mut error_obj = json!({
            "code": status.as_u16(),
            "message": error_message
        });

        // Only internal errors carry an id to correlate with the logs
        if let Some(error_id) = error_id {
            error_obj["error_id"] = json!(error_id);
        }

        let body = Json(json!({
            "error": error_obj
        }));

        (status, body).into_response()
    }
}
