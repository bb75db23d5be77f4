use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::Id;

/// Controllable outputs of an incubator.
#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActuatorKind {
    /// Lamp intensity, 0-100
    Dimmer,
    /// Heating plate, on/off
    Heater,
    /// Vaporizer, on/off
    Vaporizer,
}

impl ActuatorKind {
    pub const ALL: [ActuatorKind; 3] = [
        ActuatorKind::Dimmer,
        ActuatorKind::Heater,
        ActuatorKind::Vaporizer,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ActuatorKind::Dimmer => "dimmer",
            ActuatorKind::Heater => "heater",
            ActuatorKind::Vaporizer => "vaporizer",
        }
    }
}

impl fmt::Display for ActuatorKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownActuator(pub String);

impl fmt::Display for UnknownActuator {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "unrecognized actuator: {}", self.0)
    }
}

impl std::error::Error for UnknownActuator {}

impl FromStr for ActuatorKind {
    type Err = UnknownActuator;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input {
            "dimmer" => Ok(ActuatorKind::Dimmer),
            "heater" => Ok(ActuatorKind::Heater),
            "vaporizer" => Ok(ActuatorKind::Vaporizer),
            other => Err(UnknownActuator(other.to_string())),
        }
    }
}

/// Value carried by an actuator command, either a level or a switch.
#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ActuatorValue {
    Bool(bool),
    Number(f64),
}

impl ActuatorValue {
    /// Numeric view: switches map to 1 and 0.
    pub fn as_number(&self) -> f64 {
        match *self {
            ActuatorValue::Bool(true) => 1.0,
            ActuatorValue::Bool(false) => 0.0,
            ActuatorValue::Number(value) => value,
        }
    }

    /// Boolean view: any non-zero number is on, NaN is off.
    pub fn as_bool(&self) -> bool {
        match *self {
            ActuatorValue::Bool(value) => value,
            ActuatorValue::Number(value) => value != 0.0 && !value.is_nan(),
        }
    }

    /// Dimmer view: clamped to 0..=100 and rounded, NaN is 0.
    pub fn as_level(&self) -> u8 {
        let level = self.as_number();
        if level.is_nan() {
            return 0;
        }

        level.clamp(0.0, 100.0).round() as u8
    }
}

impl ActuatorKind {
    /// Numeric state the hardware settles on after receiving `value`.
    pub fn settled_state(&self, value: ActuatorValue) -> f64 {
        match self {
            ActuatorKind::Dimmer => f64::from(value.as_level()),
            ActuatorKind::Heater | ActuatorKind::Vaporizer => {
                if value.as_bool() { 1.0 } else { 0.0 }
            }
        }
    }
}

impl From<bool> for ActuatorValue {
    fn from(value: bool) -> Self {
        ActuatorValue::Bool(value)
    }
}

impl From<f64> for ActuatorValue {
    fn from(value: f64) -> Self {
        ActuatorValue::Number(value)
    }
}

/// Command accepted by the emulator. The name stays a raw string so that
/// unknown actuators reach validation instead of failing deserialization.
#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActuatorCommand {
    /// Actuator name: dimmer, heater or vaporizer
    pub name: String,
    /// Level or switch value
    pub value: ActuatorValue,
}

impl ActuatorCommand {
    pub fn new(kind: ActuatorKind, value: ActuatorValue) -> Self {
        Self {
            name: kind.to_string(),
            value,
        }
    }

    pub fn kind(&self) -> Result<ActuatorKind, UnknownActuator> {
        self.name.parse()
    }
}

#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActuatorRequest {
    /// Level or switch value to forward
    pub value: ActuatorValue,
}

#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActuatorResponse {
    /// Target device identifier
    pub device_id: Id,
    /// Actuator the device drives
    pub name: ActuatorKind,
    /// Value forwarded to the hardware
    pub value: ActuatorValue,
    /// Acknowledgement from the hardware
    pub message: String,
}
