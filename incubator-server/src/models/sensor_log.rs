use incubator_api::models::SensorLogResponse;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::Table;

#[derive(Clone, Debug, Serialize, Deserialize, sqlx::FromRow)]
pub struct SensorLog {
    pub id: i32,
    pub device_id: i32,
    /// Temperature in Celsius
    pub temperature: f64,
    /// Relative humidity %
    pub humidity: f64,
    /// The time of the reading
    pub time: OffsetDateTime,
}

impl From<SensorLog> for SensorLogResponse {
    fn from(log: SensorLog) -> Self {
        SensorLogResponse {
            id: log.id,
            device_id: log.device_id,
            temperature: log.temperature,
            humidity: log.humidity,
            timestamp: log.time,
        }
    }
}

#[derive(Clone)]
pub struct SensorLogTable;

impl Table for SensorLogTable {
    fn name(&self) -> &'static str {
        "sensor_logs"
    }

    fn create(&self) -> String {
        String::from(
            r#"
            CREATE TABLE IF NOT EXISTS sensor_logs (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                device_id INTEGER NOT NULL,
                temperature REAL NOT NULL,
                humidity REAL NOT NULL,
                time TIMESTAMP NOT NULL,
                FOREIGN KEY (device_id) REFERENCES devices (id) ON DELETE CASCADE
            );
            "#,
        )
    }

    fn dispose(&self) -> String {
        String::from("DROP TABLE IF EXISTS sensor_logs;")
    }

    fn dependencies(&self) -> Vec<&'static str> {
        vec!["devices"]
    }
}
