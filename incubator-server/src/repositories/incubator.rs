use std::sync::Arc;

use sqlx::{Error, Pool, Sqlite, Transaction};

use crate::configs::Storage;
use crate::models::Incubator;

#[derive(Clone)]
pub struct IncubatorRepository {
    storage: Arc<Storage>,
}

impl IncubatorRepository {
    pub fn new(storage: Arc<Storage>) -> Self {
        Self { storage }
    }

    pub fn get_pool(&self) -> &Pool<Sqlite> {
        self.storage.get_pool()
    }
}

impl IncubatorRepository {
    pub async fn create(
        &self,
        item: &Incubator,
        transaction: &mut Transaction<'_, Sqlite>,
    ) -> Result<i32, Error> {
        let id = sqlx::query(
            r#"
            INSERT INTO incubators (name, description)
            VALUES ($1, $2)
            "#,
        )
        .bind(&item.name)
        .bind(&item.description)
        .execute(&mut **transaction)
        .await?
        .last_insert_rowid();

        Ok(id as i32)
    }

    pub async fn find_all(&self) -> Result<Vec<Incubator>, Error> {
        let incubators: Vec<Incubator> = sqlx::query_as("SELECT * FROM incubators ORDER BY id")
            .fetch_all(self.storage.get_pool())
            .await?;

        Ok(incubators)
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Incubator>, Error> {
        let incubator: Option<Incubator> =
            sqlx::query_as("SELECT * FROM incubators WHERE id = $1")
                .bind(id)
                .fetch_optional(self.storage.get_pool())
                .await?;

        Ok(incubator)
    }
}

#[cfg(test)]
mod tests {
    use crate::configs::{Database, SchemaManager};

    use super::*;

    #[tokio::test]
    async fn test_create_and_list_incubators() {
        let storage = Arc::new(
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
        );
        let repo = IncubatorRepository::new(storage.clone());

        let mut tx = repo.get_pool().begin().await.unwrap();
        let first = repo
            .create(
                &Incubator {
                    id: 0,
                    name: "Main".to_string(),
                    description: Some("Lab bench".to_string()),
                },
                &mut tx,
            )
            .await
            .unwrap();
        repo.create(
            &Incubator {
                id: 0,
                name: "Spare".to_string(),
                description: None,
            },
            &mut tx,
        )
        .await
        .unwrap();
        tx.commit().await.unwrap();

        let found = repo.find_by_id(first).await.unwrap().unwrap();
        assert_eq!(found.name, "Main");
        assert_eq!(found.description.as_deref(), Some("Lab bench"));

        let all = repo.find_all().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[1].name, "Spare");

        assert!(repo.find_by_id(42).await.unwrap().is_none());
    }
}
