use std::sync::Arc;

use incubator_api::models::{ActuatorCommand, ActuatorResponse, ActuatorValue};

use crate::errors::{ApiError, DeviceError, IncubatorError};
use crate::repositories::{DeviceRepository, IncubatorRepository};
use crate::services::EmulatorClient;

/// Forwards actuator commands from the registry to the emulator.
pub struct ActuatorService {
    incubator_repository: Arc<IncubatorRepository>,
    device_repository: Arc<DeviceRepository>,
    emulator: Arc<dyn EmulatorClient>,
}

impl ActuatorService {
    pub fn new(
        incubator_repository: Arc<IncubatorRepository>,
        device_repository: Arc<DeviceRepository>,
        emulator: Arc<dyn EmulatorClient>,
    ) -> Self {
        Self {
            incubator_repository,
            device_repository,
            emulator,
        }
    }

    /// Drive one actuator of an incubator.
    ///
    /// The emulator is the source of truth: once it accepts the command the call
    /// succeeds, even when the stored device state could not be updated.
    pub async fn actuate(
        &self,
        incubator_id: i32,
        device_id: i32,
        value: ActuatorValue,
    ) -> Result<ActuatorResponse, ApiError> {
        self.incubator_repository
            .find_by_id(incubator_id)
            .await?
            .ok_or(IncubatorError::IncubatorNotFound)?;

        let device = self
            .device_repository
            .find_by_id(device_id)
            .await?
            .filter(|device| device.incubator_id == Some(incubator_id))
            .ok_or(IncubatorError::DeviceNotInIncubator)?;

        let kind = device.actuator().ok_or(DeviceError::NotAnActuator)?;

        let acknowledgement = self
            .emulator
            .send_command(&ActuatorCommand::new(kind, value))
            .await?;

        tracing::info!("device {} ({}) set to {:?}", device.id, kind, value);

        if let Err(e) = self.persist_state(device.id, kind.settled_state(value)).await {
            tracing::warn!("failed to persist state of device {}: {}", device.id, e);
        }

        Ok(ActuatorResponse {
            device_id: device.id,
            name: kind,
            value,
            message: acknowledgement.message,
        })
    }

    async fn persist_state(&self, device_id: i32, state: f64) -> Result<(), sqlx::Error> {
        let mut tx = self.device_repository.get_pool().begin().await?;
        self.device_repository
            .update_state(device_id, state, &mut tx)
            .await?;
        tx.commit().await?;

        Ok(())
    }
}
