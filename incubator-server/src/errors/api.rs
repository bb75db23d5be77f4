use super::{DeviceError, EmulatorError, IncubatorError};

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Device error: {0}")]
    DeviceError(#[from] DeviceError),

    #[error("Incubator error: {0}")]
    IncubatorError(#[from] IncubatorError),

    #[error("Emulator error: {0}")]
    EmulatorError(#[from] EmulatorError),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    InternalError(#[from] anyhow::Error),
}

impl From<axum::extract::rejection::JsonRejection> for ApiError {
    fn from(rejection: axum::extract::rejection::JsonRejection) -> Self {
        ApiError::InvalidRequest(rejection.body_text())
    }
}
