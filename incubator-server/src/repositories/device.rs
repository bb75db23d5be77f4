use std::sync::Arc;

use sqlx::{Error, Pool, Sqlite, Transaction};

use crate::configs::Storage;
use crate::models::Device;

#[derive(Clone)]
pub struct DeviceRepository {
    storage: Arc<Storage>,
}

impl DeviceRepository {
    pub fn new(storage: Arc<Storage>) -> Self {
        Self { storage }
    }

    pub fn get_pool(&self) -> &Pool<Sqlite> {
        self.storage.get_pool()
    }
}

impl DeviceRepository {
    pub async fn create(
        &self,
        item: &Device,
        transaction: &mut Transaction<'_, Sqlite>,
    ) -> Result<i32, Error> {
        let id = sqlx::query(
            r#"
            INSERT INTO devices (incubator_id, name, description, device_type, room, icon, state)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(item.incubator_id)
        .bind(&item.name)
        .bind(&item.description)
        .bind(&item.device_type)
        .bind(&item.room)
        .bind(&item.icon)
        .bind(item.state)
        .execute(&mut **transaction)
        .await?
        .last_insert_rowid();

        Ok(id as i32)
    }

    pub async fn find_all(&self) -> Result<Vec<Device>, Error> {
        let devices: Vec<Device> = sqlx::query_as("SELECT * FROM devices ORDER BY id")
            .fetch_all(self.storage.get_pool())
            .await?;

        Ok(devices)
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Device>, Error> {
        let device: Option<Device> = sqlx::query_as("SELECT * FROM devices WHERE id = $1")
            .bind(id)
            .fetch_optional(self.storage.get_pool())
            .await?;

        Ok(device)
    }

    pub async fn find_by_incubator_id(&self, incubator_id: i32) -> Result<Vec<Device>, Error> {
        let devices: Vec<Device> =
            sqlx::query_as("SELECT * FROM devices WHERE incubator_id = $1 ORDER BY id")
                .bind(incubator_id)
                .fetch_all(self.storage.get_pool())
                .await?;

        Ok(devices)
    }

    pub async fn update(
        &self,
        id: i32,
        item: &Device,
        transaction: &mut Transaction<'_, Sqlite>,
    ) -> Result<(), Error> {
        sqlx::query(
            r#"
            UPDATE devices
            SET incubator_id = $1, name = $2, description = $3, device_type = $4, room = $5, icon = $6
            WHERE id = $7
            "#,
        )
        .bind(item.incubator_id)
        .bind(&item.name)
        .bind(&item.description)
        .bind(&item.device_type)
        .bind(&item.room)
        .bind(&item.icon)
        .bind(id)
        .execute(&mut **transaction)
        .await?;

        Ok(())
    }

    /// Returns false when no device has the given id.
    pub async fn update_state(
        &self,
        id: i32,
        state: f64,
        transaction: &mut Transaction<'_, Sqlite>,
    ) -> Result<bool, Error> {
        let result = sqlx::query(
            r#"
            UPDATE devices
            SET state = $1
            WHERE id = $2
            "#,
        )
        .bind(state)
        .bind(id)
        .execute(&mut **transaction)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn delete(
        &self,
        id: i32,
        transaction: &mut Transaction<'_, Sqlite>,
    ) -> Result<bool, Error> {
        let result = sqlx::query("DELETE FROM devices WHERE id = $1")
            .bind(id)
            .execute(&mut **transaction)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use crate::configs::{Database, SchemaManager};
    use crate::models::Incubator;
    use crate::repositories::IncubatorRepository;

    use super::*;

    async fn setup_test_db() -> Arc<Storage> {
        Arc::new(
            Storage::new(
                Database {
                    migration_path: None,
                    clean_start: true,
                    url: String::from("sqlite::memory:"),
                },
                SchemaManager::default(),
            )
            .await
            .unwrap(),
        )
    }

    async fn create_test_incubator(storage: Arc<Storage>) -> i32 {
        let incubator = Incubator {
            id: 0,
            name: "Test Incubator".to_string(),
            description: None,
        };

        let repo = IncubatorRepository::new(storage.clone());
        let mut tx = storage.get_pool().begin().await.unwrap();
        let id = repo.create(&incubator, &mut tx).await.unwrap();
        tx.commit().await.unwrap();

        id
    }

    fn test_device(incubator_id: Option<i32>, name: &str, device_type: &str) -> Device {
        Device {
            id: 0,
            incubator_id,
            name: name.to_string(),
            description: None,
            device_type: device_type.to_string(),
            room: Some("Lab".to_string()),
            icon: "default".to_string(),
            state: 0.0,
        }
    }

    #[tokio::test]
    async fn test_create_and_find_device() {
        let storage = setup_test_db().await;
        let incubator_id = create_test_incubator(storage.clone()).await;

        let repo = DeviceRepository::new(storage.clone());
        let mut tx = storage.get_pool().begin().await.unwrap();
        let id = repo
            .create(&test_device(Some(incubator_id), "Lamp", "dimmer"), &mut tx)
            .await
            .unwrap();
        tx.commit().await.unwrap();

        let found = repo.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(found.name, "Lamp");
        assert_eq!(found.device_type, "dimmer");
        assert_eq!(found.incubator_id, Some(incubator_id));
        assert_eq!(found.state, 0.0);

        assert!(repo.find_by_id(id + 100).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_find_by_incubator_id() {
        let storage = setup_test_db().await;
        let incubator_id = create_test_incubator(storage.clone()).await;

        let repo = DeviceRepository::new(storage.clone());
        let mut tx = storage.get_pool().begin().await.unwrap();
        repo.create(&test_device(Some(incubator_id), "Lamp", "dimmer"), &mut tx)
            .await
            .unwrap();
        repo.create(&test_device(Some(incubator_id), "Heater", "heater"), &mut tx)
            .await
            .unwrap();
        repo.create(&test_device(None, "Loose", "sensor"), &mut tx)
            .await
            .unwrap();
        tx.commit().await.unwrap();

        let devices = repo.find_by_incubator_id(incubator_id).await.unwrap();
        assert_eq!(devices.len(), 2);
        assert_eq!(devices[0].name, "Lamp");
        assert_eq!(devices[1].name, "Heater");

        assert_eq!(repo.find_all().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_update_keeps_state() {
        let storage = setup_test_db().await;
        let repo = DeviceRepository::new(storage.clone());

        let mut tx = storage.get_pool().begin().await.unwrap();
        let id = repo
            .create(&test_device(None, "Lamp", "dimmer"), &mut tx)
            .await
            .unwrap();
        assert!(repo.update_state(id, 42.0, &mut tx).await.unwrap());
        tx.commit().await.unwrap();

        let mut device = repo.find_by_id(id).await.unwrap().unwrap();
        device.name = "Top Lamp".to_string();
        device.room = None;

        let mut tx = storage.get_pool().begin().await.unwrap();
        repo.update(id, &device, &mut tx).await.unwrap();
        tx.commit().await.unwrap();

        let updated = repo.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(updated.name, "Top Lamp");
        assert_eq!(updated.room, None);
        assert_eq!(updated.state, 42.0);
    }

    #[tokio::test]
    async fn test_update_state_and_delete_missing_device() {
        let storage = setup_test_db().await;
        let repo = DeviceRepository::new(storage.clone());

        let mut tx = storage.get_pool().begin().await.unwrap();
        assert!(!repo.update_state(99, 1.0, &mut tx).await.unwrap());
        assert!(!repo.delete(99, &mut tx).await.unwrap());
        tx.commit().await.unwrap();
    }

    #[tokio::test]
    async fn test_delete_device() {
        let storage = setup_test_db().await;
        let repo = DeviceRepository::new(storage.clone());

        let mut tx = storage.get_pool().begin().await.unwrap();
        let id = repo
            .create(&test_device(None, "Lamp", "dimmer"), &mut tx)
            .await
            .unwrap();
        assert!(repo.delete(id, &mut tx).await.unwrap());
        tx.commit().await.unwrap();

        assert!(repo.find_by_id(id).await.unwrap().is_none());
    }
}
