use std::sync::Arc;

use anyhow::anyhow;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use incubator_api::models::*;

use crate::errors::{ApiError, IncubatorError};
use crate::models::Incubator;
use crate::repositories::{DeviceRepository, IncubatorRepository, SensorLogRepository};
use crate::services::{ActuatorService, EmulatorClient};

#[derive(Clone)]
pub struct IncubatorState {
    pub incubator_repository: Arc<IncubatorRepository>,
    pub device_repository: Arc<DeviceRepository>,
    pub sensor_log_repository: Arc<SensorLogRepository>,
    pub actuator_service: Arc<ActuatorService>,
    pub emulator: Arc<dyn EmulatorClient>,
    pub history_limit: i64,
}

pub fn incubator_router(incubator_state: IncubatorState) -> Router {
    Router::new()
        .route("/api/incubators", get(get_incubators).post(create_incubator))
        .route(
            "/api/incubators/:incubator_id/devices",
            get(get_incubator_devices),
        )
        .route(
            "/api/incubators/:incubator_id/sensors/reading",
            get(get_sensor_reading),
        )
        .route(
            "/api/incubators/:incubator_id/actuators/:device_id",
            post(control_actuator),
        )
        .route(
            "/api/incubators/:incubator_id/history",
            get(get_incubator_history),
        )
        .with_state(incubator_state)
}

async fn find_incubator(state: &IncubatorState, incubator_id: i32) -> Result<Incubator, ApiError> {
    let incubator = state
        .incubator_repository
        .find_by_id(incubator_id)
        .await?
        .ok_or(IncubatorError::IncubatorNotFound)?;

    Ok(incubator)
}

#[utoipa::path(
    get,
    path = "/api/incubators",
    tag = "incubator",
    responses(
        (status = 200, description = "Successfully retrieved incubator list", body = Vec<IncubatorResponse>),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_incubators(
    State(state): State<IncubatorState>,
) -> Result<Json<Vec<IncubatorResponse>>, ApiError> {
    let incubators = state.incubator_repository.find_all().await?;

    Ok(Json(incubators.into_iter().map(IncubatorResponse::from).collect()))
}

#[utoipa::path(
    post,
    path = "/api/incubators",
    tag = "incubator",
    request_body = CreateIncubatorRequest,
    responses(
        (status = 201, description = "Incubator created successfully", body = IncubatorResponse),
        (status = 400, description = "Invalid request parameters"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn create_incubator(
    State(state): State<IncubatorState>,
    body: Result<Json<CreateIncubatorRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<IncubatorResponse>), ApiError> {
    let Json(body) = body?;

    if body.name.trim().is_empty() {
        return Err(IncubatorError::InvalidRequest.into());
    }

    let incubator = Incubator {
        id: 0,
        name: body.name,
        description: body.description,
    };

    let pool = state.incubator_repository.get_pool();
    let mut tx = pool.begin().await?;

    let incubator_id = state.incubator_repository.create(&incubator, &mut tx).await?;

    tx.commit().await?;

    let created_incubator = state
        .incubator_repository
        .find_by_id(incubator_id)
        .await?
        .ok_or_else(|| anyhow!("incubator {} missing after insert", incubator_id))?;

    tracing::info!("created incubator {} ({})", created_incubator.id, created_incubator.name);

    Ok((StatusCode::CREATED, Json(created_incubator.into())))
}

#[utoipa::path(
    get,
    path = "/api/incubators/{incubator_id}/devices",
    tag = "incubator",
    params(
        ("incubator_id" = i32, Path, description = "Incubator ID")
    ),
    responses(
        (status = 200, description = "Successfully retrieved incubator devices", body = Vec<DeviceResponse>),
        (status = 404, description = "Incubator not found"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_incubator_devices(
    State(state): State<IncubatorState>,
    Path(incubator_id): Path<i32>,
) -> Result<Json<Vec<DeviceResponse>>, ApiError> {
    find_incubator(&state, incubator_id).await?;

    let devices = state
        .device_repository
        .find_by_incubator_id(incubator_id)
        .await?;

    Ok(Json(devices.into_iter().map(DeviceResponse::from).collect()))
}

#[utoipa::path(
    get,
    path = "/api/incubators/{incubator_id}/sensors/reading",
    tag = "incubator",
    params(
        ("incubator_id" = i32, Path, description = "Incubator ID")
    ),
    responses(
        (status = 200, description = "Current reading from the emulator", body = SensorReading),
        (status = 404, description = "Incubator not found"),
        (status = 500, description = "Emulator unavailable")
    )
)]
pub async fn get_sensor_reading(
    State(state): State<IncubatorState>,
    Path(incubator_id): Path<i32>,
) -> Result<Json<SensorReading>, ApiError> {
    find_incubator(&state, incubator_id).await?;

    let reading = state.emulator.read_sensors().await?;

    Ok(Json(reading))
}

#[utoipa::path(
    post,
    path = "/api/incubators/{incubator_id}/actuators/{device_id}",
    tag = "incubator",
    params(
        ("incubator_id" = i32, Path, description = "Incubator ID"),
        ("device_id" = i32, Path, description = "Actuator device ID")
    ),
    request_body = ActuatorRequest,
    responses(
        (status = 200, description = "Command accepted by the emulator", body = ActuatorResponse),
        (status = 400, description = "Invalid value, not an actuator or rejected by the emulator"),
        (status = 404, description = "Incubator or device not found"),
        (status = 500, description = "Emulator unavailable")
    )
)]
pub async fn control_actuator(
    State(state): State<IncubatorState>,
    Path((incubator_id, device_id)): Path<(i32, i32)>,
    body: Result<Json<ActuatorRequest>, JsonRejection>,
) -> Result<Json<ActuatorResponse>, ApiError> {
    let Json(body) = body?;

    let response = state
        .actuator_service
        .actuate(incubator_id, device_id, body.value)
        .await?;

    Ok(Json(response))
}

#[utoipa::path(
    get,
    path = "/api/incubators/{incubator_id}/history",
    tag = "incubator",
    params(
        ("incubator_id" = i32, Path, description = "Incubator ID")
    ),
    responses(
        (status = 200, description = "Latest sensor logs, oldest first", body = Vec<SensorLogResponse>),
        (status = 404, description = "Incubator not found"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_incubator_history(
    State(state): State<IncubatorState>,
    Path(incubator_id): Path<i32>,
) -> Result<Json<Vec<SensorLogResponse>>, ApiError> {
    find_incubator(&state, incubator_id).await?;

    let logs = state
        .sensor_log_repository
        .find_latest_by_incubator_id(incubator_id, state.history_limit)
        .await?;

    Ok(Json(logs.into_iter().map(SensorLogResponse::from).collect()))
}
