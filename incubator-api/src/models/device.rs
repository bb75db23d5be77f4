use serde::{Deserialize, Serialize};

use super::Id;

#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateDeviceRequest {
    /// Device name
    pub name: String,
    /// Free-form description
    #[serde(default)]
    pub description: Option<String>,
    /// Device category, e.g. dimmer, heater, vaporizer or sensor
    #[serde(default, rename = "type", alias = "device_type")]
    pub device_type: Option<String>,
    /// Room the device is placed in
    #[serde(default)]
    pub room: Option<String>,
    /// Dashboard icon name
    #[serde(default)]
    pub icon: Option<String>,
    /// Owning incubator
    #[serde(default)]
    pub incubator_id: Option<Id>,
}

#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateDeviceRequest {
    /// Device name
    #[serde(default)]
    pub name: Option<String>,
    /// Free-form description
    #[serde(default)]
    pub description: Option<String>,
    /// Device category
    #[serde(default, rename = "type", alias = "device_type")]
    pub device_type: Option<String>,
    /// Room the device is placed in
    #[serde(default)]
    pub room: Option<String>,
    /// Dashboard icon name
    #[serde(default)]
    pub icon: Option<String>,
    /// Owning incubator
    #[serde(default)]
    pub incubator_id: Option<Id>,
}

#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateDeviceStateRequest {
    /// New state value; required
    pub state: Option<f64>,
}

#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceStateResponse {
    /// Device identifier
    pub id: Id,
    /// Stored state value
    pub state: f64,
}

#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceResponse {
    /// Device identifier
    pub id: Id,
    /// Owning incubator
    pub incubator_id: Option<Id>,
    /// Device name
    pub name: String,
    /// Free-form description
    pub description: Option<String>,
    /// Device category
    #[serde(rename = "type")]
    pub device_type: String,
    /// Room the device is placed in
    pub room: Option<String>,
    /// Dashboard icon name
    pub icon: String,
    /// Last stored state value
    pub state: f64,
}
