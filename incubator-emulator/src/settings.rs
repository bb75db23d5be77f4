use std::error::Error;

use serde::{Deserialize, Serialize};

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
pub struct Simulation {
    /// Milliseconds between two simulation steps
    pub tick_interval: u64,
    /// Starting temperature in Celsius
    pub temperature: f64,
    /// Starting relative humidity %
    pub humidity: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub server: Server,
    pub logger: Logger,
    pub simulation: Simulation,
}

impl Settings {
    pub fn new() -> Result<Self, Box<dyn Error>> {
        Self::parse(include_str!(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/../",
            "configs/emulator.toml"
        )))
    }

    pub fn parse(source: &str) -> Result<Self, Box<dyn Error>> {
        let settings: Settings = toml::from_str(source)?;

        if settings.simulation.tick_interval == 0 {
            return Err("simulation.tick_interval must be greater than zero".into());
        }

        Ok(settings)
    }
}
