use std::path::Path;

use sqlx::migrate::Migrator;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Error, SqlitePool};

use crate::configs::schema::SchemaManager;
use crate::configs::settings::Database;

#[derive(Clone)]
pub struct Storage {
    pool: SqlitePool,
}

impl Storage {
    pub async fn new(database: Database, schema_manager: SchemaManager) -> Result<Self, Error> {
        let pool = SqlitePoolOptions::new()
            .min_connections(1) // in memory db might drop connection when 0
            .max_connections(10)
            .connect(&database.url)
            .await?;

        Self::create_schema(&pool, &schema_manager, &database).await?;

        Ok(Self { pool })
    }

    pub fn get_pool(&self) -> &SqlitePool {
        &self.pool
    }

    async fn create_schema(
        pool: &SqlitePool,
        schema: &SchemaManager,
        database: &Database,
    ) -> Result<(), Error> {
        if database.clean_start {
            // Clean migration history so seed data is applied again
            sqlx::query("DROP TABLE IF EXISTS _sqlx_migrations")
                .execute(pool)
                .await?;

            for statement in schema.dispose_schema() {
                sqlx::query(&statement).execute(pool).await?;
            }

            tracing::warn!("perform a clean boot: clean and recreate schema");
        }

        for statement in schema.create_schema() {
            sqlx::query(&statement).execute(pool).await?;
        }

        match database.migration_path.as_deref() {
            Some(migration_path) if Path::new(migration_path).is_dir() => {
                let migrator = Migrator::new(Path::new(migration_path)).await?;
                migrator.run(pool).await?;

                tracing::info!("database migration success");
            }
            Some(migration_path) => {
                tracing::warn!("migration path {} not found, skipping migrations", migration_path);
            }
            None => {}
        }

        Ok(())
    }
}
