use std::sync::Arc;

use sqlx::{Error, Pool, Sqlite, Transaction};

use crate::configs::Storage;
use crate::models::SensorLog;

#[derive(Clone)]
pub struct SensorLogRepository {
    storage: Arc<Storage>,
}

impl SensorLogRepository {
    pub fn new(storage: Arc<Storage>) -> Self {
        Self { storage }
    }

    pub fn get_pool(&self) -> &Pool<Sqlite> {
        self.storage.get_pool()
    }
}

impl SensorLogRepository {
    // Append a new sample
    pub async fn create(
        &self,
        item: &SensorLog,
        transaction: &mut Transaction<'_, Sqlite>,
    ) -> Result<i32, Error> {
        let id = sqlx::query(
            r#"
            INSERT INTO sensor_logs (device_id, temperature, humidity, time)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(item.device_id)
        .bind(item.temperature)
        .bind(item.humidity)
        .bind(item.time)
        .execute(&mut **transaction)
        .await?
        .last_insert_rowid();

        Ok(id as i32)
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<SensorLog>, Error> {
        let log: Option<SensorLog> = sqlx::query_as("SELECT * FROM sensor_logs WHERE id = $1")
            .bind(id)
            .fetch_optional(self.storage.get_pool())
            .await?;

        Ok(log)
    }

    // Latest N samples of one device, oldest first.
    // Timestamps are text, so ordering goes through julianday() to compare instants.
    pub async fn find_latest_by_device_id(
        &self,
        device_id: i32,
        limit: i64,
    ) -> Result<Vec<SensorLog>, Error> {
        let mut logs: Vec<SensorLog> = sqlx::query_as(
            r#"
            SELECT * FROM sensor_logs
            WHERE device_id = $1
            ORDER BY julianday(time) DESC, id DESC
            LIMIT $2
            "#,
        )
        .bind(device_id)
        .bind(limit)
        .fetch_all(self.storage.get_pool())
        .await?;

        logs.reverse();
        Ok(logs)
    }

    // Latest N samples over every device of an incubator, oldest first
    pub async fn find_latest_by_incubator_id(
        &self,
        incubator_id: i32,
        limit: i64,
    ) -> Result<Vec<SensorLog>, Error> {
        let mut logs: Vec<SensorLog> = sqlx::query_as(
            r#"
            SELECT sl.* FROM sensor_logs sl
            INNER JOIN devices d ON sl.device_id = d.id
            WHERE d.incubator_id = $1
            ORDER BY julianday(sl.time) DESC, sl.id DESC
            LIMIT $2
            "#,
        )
        .bind(incubator_id)
        .bind(limit)
        .fetch_all(self.storage.get_pool())
        .await?;

        logs.reverse();
        Ok(logs)
    }
}
