use std::env;
use std::path::Path;

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

use crate::configs::normalize_path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Server {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Logger {
    pub level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Database {
    pub migration_path: Option<String>,
    pub clean_start: bool,
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Emulator {
    /// Base URL of the incubator emulator
    pub url: String,
    /// Request timeout in milliseconds
    pub timeout: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recorder {
    /// Milliseconds between two samples
    pub interval: u64,
    /// Device the samples are stored under
    pub device_id: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Registry {
    /// Device that refuses deletion (the main sensor)
    pub protected_device_id: i32,
    /// Rows returned by the history endpoint
    pub history_limit: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub server: Server,
    pub logger: Logger,
    pub database: Database,
    pub emulator: Emulator,
    pub recorder: Recorder,
    pub registry: Registry,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        Self::from_dir("configs")
    }

    pub fn from_dir(dir: &str) -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or("development".into());

        let mut settings: Settings = Config::builder()
            .set_default("emulator.url", "http://localhost:3001")?
            .set_default("emulator.timeout", 5000)?
            .add_source(File::with_name(&format!("{dir}/default")))
            .add_source(File::with_name(&format!("{dir}/{run_mode}")).required(false))
            .add_source(Environment::default().separator("_"))
            .build()?
            .try_deserialize()?;

        if settings.recorder.interval == 0 {
            return Err(ConfigError::Message(
                "recorder.interval must be greater than zero".into(),
            ));
        }

        // A missing directory is left as configured and skipped by storage
        if let Some(migrate) = &settings.database.migration_path {
            if Path::new(migrate).is_dir() {
                let migrate_path = normalize_path(migrate)
                    .map_err(|e| ConfigError::Message(e.to_string()))?
                    .to_string_lossy()
                    .to_string();

                settings.database.migration_path = Some(migrate_path);
            }
        }

        settings.emulator.url = settings.emulator.url.trim_end_matches('/').to_string();

        Ok(settings)
    }
}
