use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::{Id, round_2};

/// Point-in-time temperature and humidity snapshot.
#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensorReading {
    /// Temperature in Celsius
    pub temperature: f64,
    /// Relative humidity %
    pub humidity: f64,
}

impl SensorReading {
    pub fn rounded(temperature: f64, humidity: f64) -> Self {
        Self {
            temperature: round_2(temperature),
            humidity: round_2(humidity),
        }
    }
}

/// Full emulator state, exposed for debugging.
#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentSnapshot {
    /// Temperature in Celsius
    pub temperature: f64,
    /// Relative humidity %
    pub humidity: f64,
    /// Lamp intensity, 0-100
    pub dimmer_level: u8,
    /// Heating plate switch
    pub heater_on: bool,
    /// Vaporizer switch
    pub vaporizer_on: bool,
}

#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorLogResponse {
    /// Log entry identifier
    pub id: Id,
    /// Device the reading is keyed to
    pub device_id: Id,
    /// Temperature in Celsius
    pub temperature: f64,
    /// Relative humidity %
    pub humidity: f64,
    /// Time the reading was stored
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
}
