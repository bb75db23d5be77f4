use axum::http::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum DeviceError {
    #[error("Device not found")]
    DeviceNotFound,

    #[error("Invalid request parameters")]
    InvalidRequest,

    #[error("Device state is required")]
    MissingState,

    #[error("Device is protected and cannot be deleted")]
    ProtectedDevice,

    #[error("Device is not an actuator")]
    NotAnActuator,
}

impl DeviceError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            DeviceError::DeviceNotFound => StatusCode::NOT_FOUND,
            DeviceError::InvalidRequest => StatusCode::BAD_REQUEST,
            DeviceError::MissingState => StatusCode::BAD_REQUEST,
            DeviceError::ProtectedDevice => StatusCode::FORBIDDEN,
            DeviceError::NotAnActuator => StatusCode::BAD_REQUEST,
        }
    }
}
