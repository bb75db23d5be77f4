use incubator_api::models::{EnvironmentSnapshot, SensorReading};

pub const MIN_TEMPERATURE: f64 = 15.0;
pub const MAX_TEMPERATURE: f64 = 45.0;
pub const MIN_HUMIDITY: f64 = 30.0;
pub const MAX_HUMIDITY: f64 = 95.0;

/// Degrees gained per tick while the heating plate is on.
pub const HEATING_RATE: f64 = 0.2;
/// Degrees lost per tick while the heating plate is off.
pub const COOLING_RATE: f64 = 0.05;
/// Degrees contributed per tick by the lamp at full intensity.
pub const LAMP_HEAT: f64 = 0.1;
/// Humidity points gained per tick while the vaporizer runs.
pub const VAPORIZING_RATE: f64 = 0.5;
/// Humidity points lost per tick while the vaporizer is off.
pub const DRYING_RATE: f64 = 0.1;

/// Environmental state of the simulated incubator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnvironmentState {
    /// Temperature in Celsius
    pub temperature: f64,
    /// Relative humidity %
    pub humidity: f64,
    /// Lamp intensity, 0-100
    pub dimmer_level: u8,
    pub heater_on: bool,
    pub vaporizer_on: bool,
}

impl EnvironmentState {
    pub fn new(temperature: f64, humidity: f64) -> Self {
        Self {
            temperature,
            humidity,
            dimmer_level: 0,
            heater_on: false,
            vaporizer_on: false,
        }
    }

    /// Advance the environment by one simulation step.
    pub fn tick(&mut self) {
        self.temperature += if self.heater_on {
            HEATING_RATE
        } else {
            -COOLING_RATE
        };

        // The lamp warms the chamber whatever the heater does
        self.temperature += (f64::from(self.dimmer_level) / 100.0) * LAMP_HEAT;

        self.humidity += if self.vaporizer_on {
            VAPORIZING_RATE
        } else {
            -DRYING_RATE
        };

        self.temperature = self.temperature.clamp(MIN_TEMPERATURE, MAX_TEMPERATURE);
        self.humidity = self.humidity.clamp(MIN_HUMIDITY, MAX_HUMIDITY);
    }

    pub fn reading(&self) -> SensorReading {
        SensorReading::rounded(self.temperature, self.humidity)
    }

    pub fn snapshot(&self) -> EnvironmentSnapshot {
        EnvironmentSnapshot {
            temperature: self.temperature,
            humidity: self.humidity,
            dimmer_level: self.dimmer_level,
            heater_on: self.heater_on,
            vaporizer_on: self.vaporizer_on,
        }
    }
}

impl Default for EnvironmentState {
    fn default() -> Self {
        Self::new(25.0, 60.0)
    }
}
