use std::sync::Arc;

use anyhow::anyhow;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, put};
use axum::{Json, Router};
use incubator_api::models::*;

use crate::errors::{ApiError, DeviceError, IncubatorError};
use crate::models::{DEFAULT_DEVICE_TYPE, DEFAULT_ICON, Device};
use crate::repositories::{DeviceRepository, IncubatorRepository};

#[derive(Clone)]
pub struct DeviceState {
    pub device_repository: Arc<DeviceRepository>,
    pub incubator_repository: Arc<IncubatorRepository>,
    pub protected_device_id: i32,
}

pub fn device_router(device_state: DeviceState) -> Router {
    Router::new()
        .route("/api/devices", get(get_devices).post(create_device))
        .route(
            "/api/devices/:device_id",
            get(get_device_by_id)
                .put(update_device)
                .delete(delete_device),
        )
        .route("/api/devices/:device_id/state", put(update_device_state))
        .with_state(device_state)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

async fn ensure_incubator(state: &DeviceState, incubator_id: Option<i32>) -> Result<(), ApiError> {
    if let Some(incubator_id) = incubator_id {
        state
            .incubator_repository
            .find_by_id(incubator_id)
            .await?
            .ok_or(IncubatorError::IncubatorNotFound)?;
    }

    Ok(())
}

#[utoipa::path(
    get,
    path = "/api/devices",
    tag = "device",
    responses(
        (status = 200, description = "Successfully retrieved device list", body = Vec<DeviceResponse>),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_devices(
    State(state): State<DeviceState>,
) -> Result<Json<Vec<DeviceResponse>>, ApiError> {
    let devices = state.device_repository.find_all().await?;

    Ok(Json(devices.into_iter().map(DeviceResponse::from).collect()))
}

#[utoipa::path(
    get,
    path = "/api/devices/{device_id}",
    tag = "device",
    params(
        ("device_id" = i32, Path, description = "Device ID")
    ),
    responses(
        (status = 200, description = "Successfully retrieved device details", body = DeviceResponse),
        (status = 404, description = "Device not found"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_device_by_id(
    State(state): State<DeviceState>,
    Path(device_id): Path<i32>,
) -> Result<Json<DeviceResponse>, ApiError> {
    let device = state
        .device_repository
        .find_by_id(device_id)
        .await?
        .ok_or(DeviceError::DeviceNotFound)?;

    Ok(Json(device.into()))
}

#[utoipa::path(
    post,
    path = "/api/devices",
    tag = "device",
    request_body = CreateDeviceRequest,
    responses(
        (status = 201, description = "Device created successfully", body = DeviceResponse),
        (status = 400, description = "Invalid request parameters"),
        (status = 404, description = "Incubator not found"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn create_device(
    State(state): State<DeviceState>,
    body: Result<Json<CreateDeviceRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<DeviceResponse>), ApiError> {
    let Json(body) = body?;

    // Validate request
    if body.name.trim().is_empty() {
        return Err(DeviceError::InvalidRequest.into());
    }

    ensure_incubator(&state, body.incubator_id).await?;

    let device = Device {
        id: 0,
        incubator_id: body.incubator_id,
        name: body.name,
        description: body.description,
        device_type: non_empty(body.device_type).unwrap_or_else(|| DEFAULT_DEVICE_TYPE.to_string()),
        room: body.room,
        icon: non_empty(body.icon).unwrap_or_else(|| DEFAULT_ICON.to_string()),
        state: 0.0,
    };

    let pool = state.device_repository.get_pool();
    let mut tx = pool.begin().await?;

    let device_id = state.device_repository.create(&device, &mut tx).await?;

    tx.commit().await?;

    let created_device = state
        .device_repository
        .find_by_id(device_id)
        .await?
        .ok_or_else(|| anyhow!("device {} missing after insert", device_id))?;

    tracing::info!("created device {} ({})", created_device.id, created_device.name);

    Ok((StatusCode::CREATED, Json(created_device.into())))
}

#[utoipa::path(
    put,
    path = "/api/devices/{device_id}",
    tag = "device",
    params(
        ("device_id" = i32, Path, description = "Device ID")
    ),
    request_body = UpdateDeviceRequest,
    responses(
        (status = 200, description = "Device updated successfully", body = DeviceResponse),
        (status = 400, description = "Invalid request parameters"),
        (status = 404, description = "Device or incubator not found"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn update_device(
    State(state): State<DeviceState>,
    Path(device_id): Path<i32>,
    body: Result<Json<UpdateDeviceRequest>, JsonRejection>,
) -> Result<Json<DeviceResponse>, ApiError> {
    let Json(body) = body?;

    if body.name.as_deref().is_some_and(|name| name.trim().is_empty()) {
        return Err(DeviceError::InvalidRequest.into());
    }

    let mut device = state
        .device_repository
        .find_by_id(device_id)
        .await?
        .ok_or(DeviceError::DeviceNotFound)?;

    ensure_incubator(&state, body.incubator_id).await?;

    // Absent fields keep their stored value
    if let Some(name) = body.name {
        device.name = name;
    }
    if let Some(description) = body.description {
        device.description = Some(description);
    }
    if let Some(device_type) = non_empty(body.device_type) {
        device.device_type = device_type;
    }
    if let Some(room) = body.room {
        device.room = Some(room);
    }
    if let Some(icon) = non_empty(body.icon) {
        device.icon = icon;
    }
    if let Some(incubator_id) = body.incubator_id {
        device.incubator_id = Some(incubator_id);
    }

    let pool = state.device_repository.get_pool();
    let mut tx = pool.begin().await?;

    state
        .device_repository
        .update(device_id, &device, &mut tx)
        .await?;

    tx.commit().await?;

    Ok(Json(device.into()))
}

#[utoipa::path(
    put,
    path = "/api/devices/{device_id}/state",
    tag = "device",
    params(
        ("device_id" = i32, Path, description = "Device ID")
    ),
    request_body = UpdateDeviceStateRequest,
    responses(
        (status = 200, description = "Device state updated successfully", body = DeviceStateResponse),
        (status = 400, description = "State is missing"),
        (status = 404, description = "Device not found"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn update_device_state(
    State(state): State<DeviceState>,
    Path(device_id): Path<i32>,
    body: Result<Json<UpdateDeviceStateRequest>, JsonRejection>,
) -> Result<Json<DeviceStateResponse>, ApiError> {
    let Json(body) = body?;
    let device_state = body.state.ok_or(DeviceError::MissingState)?;

    let pool = state.device_repository.get_pool();
    let mut tx = pool.begin().await?;

    let updated = state
        .device_repository
        .update_state(device_id, device_state, &mut tx)
        .await?;

    if !updated {
        return Err(DeviceError::DeviceNotFound.into());
    }

    tx.commit().await?;

    Ok(Json(DeviceStateResponse {
        id: device_id,
        state: device_state,
    }))
}

#[utoipa::path(
    delete,
    path = "/api/devices/{device_id}",
    tag = "device",
    params(
        ("device_id" = i32, Path, description = "Device ID")
    ),
    responses(
        (status = 204, description = "Device deleted successfully"),
        (status = 403, description = "Device is protected"),
        (status = 404, description = "Device not found"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn delete_device(
    State(state): State<DeviceState>,
    Path(device_id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    if device_id == state.protected_device_id {
        return Err(DeviceError::ProtectedDevice.into());
    }

    let pool = state.device_repository.get_pool();
    let mut tx = pool.begin().await?;

    let deleted = state.device_repository.delete(device_id, &mut tx).await?;

    if !deleted {
        return Err(DeviceError::DeviceNotFound.into());
    }

    tx.commit().await?;

    tracing::info!("deleted device {}", device_id);

    Ok(StatusCode::NO_CONTENT)
}
