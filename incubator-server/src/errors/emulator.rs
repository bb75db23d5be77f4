use axum::http::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum EmulatorError {
    #[error("Emulator unreachable: {0}")]
    Unreachable(#[from] reqwest::Error),

    #[error("Emulator rejected command: {0}")]
    Rejected(String),

    #[error("Emulator responded with status {0}")]
    Status(u16),
}

impl EmulatorError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            EmulatorError::Unreachable(_) => StatusCode::INTERNAL_SERVER_ERROR,
            EmulatorError::Rejected(_) => StatusCode::BAD_REQUEST,
            EmulatorError::Status(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
