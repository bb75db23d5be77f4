mod actuator;
mod device;
mod incubator;
mod sensor;

pub use actuator::*;
pub use device::*;
pub use incubator::*;
pub use sensor::*;

use serde::{Deserialize, Serialize};

pub type Id = i32;

#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Operation result message
    pub message: String,
}

impl MessageResponse {
    pub fn ok() -> Self {
        Self {
            message: String::from("OK"),
        }
    }
}

/// Round a measurement to two decimal places for presentation.
pub fn round_2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
