use incubator_api::models::{ActuatorKind, DeviceResponse};
use serde::{Deserialize, Serialize};

use super::Table;

pub const DEFAULT_DEVICE_TYPE: &str = "default";
pub const DEFAULT_ICON: &str = "default";

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Device {
    pub id: i32,
    pub incubator_id: Option<i32>,
    pub name: String,
    pub description: Option<String>,
    pub device_type: String,
    pub room: Option<String>,
    pub icon: String,
    /// Last known actuator level or switch value
    pub state: f64,
}

impl Device {
    pub fn actuator(&self) -> Option<ActuatorKind> {
        self.device_type.parse().ok()
    }
}

impl From<Device> for DeviceResponse {
    fn from(device: Device) -> Self {
        DeviceResponse {
            id: device.id,
            incubator_id: device.incubator_id,
            name: device.name,
            description: device.description,
            device_type: device.device_type,
            room: device.room,
            icon: device.icon,
            state: device.state,
        }
    }
}

#[derive(Clone)]
pub struct DeviceTable;

impl Table for DeviceTable {
    fn name(&self) -> &'static str {
        "devices"
    }

    fn create(&self) -> String {
        String::from(
            r#"
            CREATE TABLE IF NOT EXISTS devices (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                incubator_id INTEGER,
                name TEXT NOT NULL,
                description TEXT,
                device_type TEXT NOT NULL DEFAULT 'default',
                room TEXT,
                icon TEXT NOT NULL DEFAULT 'default',
                state REAL NOT NULL DEFAULT 0,
                FOREIGN KEY (incubator_id) REFERENCES incubators (id) ON DELETE SET NULL
            );
            "#,
        )
    }

    fn dispose(&self) -> String {
        String::from("DROP TABLE IF EXISTS devices;")
    }

    fn dependencies(&self) -> Vec<&'static str> {
        vec!["incubators"]
    }
}
