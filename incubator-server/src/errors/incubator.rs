use axum::http::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum IncubatorError {
    #[error("Incubator not found")]
    IncubatorNotFound,

    #[error("Invalid request parameters")]
    InvalidRequest,

    #[error("Device not found in incubator")]
    DeviceNotInIncubator,
}

impl IncubatorError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            IncubatorError::IncubatorNotFound => StatusCode::NOT_FOUND,
            IncubatorError::InvalidRequest => StatusCode::BAD_REQUEST,
            IncubatorError::DeviceNotInIncubator => StatusCode::NOT_FOUND,
        }
    }
}
