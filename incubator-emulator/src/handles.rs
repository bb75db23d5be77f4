use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use incubator_api::models::{ActuatorCommand, EnvironmentSnapshot, MessageResponse, SensorReading};

use crate::error::CommandError;
use crate::incubator::Incubator;

#[derive(Clone)]
pub struct EmulatorState {
    pub incubator: Incubator,
}

pub async fn get_status(State(state): State<EmulatorState>) -> Json<SensorReading> {
    Json(state.incubator.reading().await)
}

pub async fn post_actuator(
    State(state): State<EmulatorState>,
    payload: Result<Json<ActuatorCommand>, JsonRejection>,
) -> Result<Json<MessageResponse>, CommandError> {
    let Json(command) = payload?;

    let kind = state.incubator.execute(&command).await?;

    tracing::info!("command received: {} = {:?}", kind, command.value);

    Ok(Json(MessageResponse::ok()))
}

pub async fn get_full_state(State(state): State<EmulatorState>) -> Json<EnvironmentSnapshot> {
    Json(state.incubator.snapshot().await)
}
