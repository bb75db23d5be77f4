use incubator_api::models::IncubatorResponse;
use serde::{Deserialize, Serialize};

use super::Table;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Incubator {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
}

impl From<Incubator> for IncubatorResponse {
    fn from(incubator: Incubator) -> Self {
        IncubatorResponse {
            id: incubator.id,
            name: incubator.name,
            description: incubator.description,
        }
    }
}

#[derive(Clone)]
pub struct IncubatorTable;

impl Table for IncubatorTable {
    fn name(&self) -> &'static str {
        "incubators"
    }

    fn create(&self) -> String {
        String::from(
            r#"
            CREATE TABLE IF NOT EXISTS incubators (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                description TEXT
            );
            "#,
        )
    }

    fn dispose(&self) -> String {
        String::from("DROP TABLE IF EXISTS incubators;")
    }

    fn dependencies(&self) -> Vec<&'static str> {
        vec![]
    }
}
