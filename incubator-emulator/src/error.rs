use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use incubator_api::models::UnknownActuator;
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("{0}")]
    UnknownActuator(#[from] UnknownActuator),

    #[error("Invalid command: {0}")]
    InvalidCommand(String),
}

impl CommandError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            CommandError::UnknownActuator(_) => StatusCode::BAD_REQUEST,
            CommandError::InvalidCommand(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl From<JsonRejection> for CommandError {
    fn from(rejection: JsonRejection) -> Self {
        CommandError::InvalidCommand(rejection.body_text())
    }
}

impl IntoResponse for CommandError {
    fn into_response(self) -> Response {
        tracing::warn!("rejected actuator command: {}", self);

        (self.status_code(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}
