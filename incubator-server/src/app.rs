use std::sync::Arc;

use axum::routing::get;
use axum::{Json, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

use crate::configs::{Registry, SchemaManager, Settings, Storage};
use crate::handles::*;
use crate::repositories::{DeviceRepository, IncubatorRepository, SensorLogRepository};
use crate::services::{ActuatorService, EmulatorClient, HttpEmulatorClient, RecorderService};

#[derive(OpenApi)]
#[openapi(
    paths(
        get_devices,
        get_device_by_id,
        create_device,
        update_device,
        update_device_state,
        delete_device,
        get_incubators,
        create_incubator,
        get_incubator_devices,
        get_sensor_reading,
        control_actuator,
        get_incubator_history,
    ),
    tags(
        (name = "device", description = "Device registry"),
        (name = "incubator", description = "Incubators, sensor readings and actuator control")
    )
)]
pub struct ApiDoc;

/// Build the registry routes on top of an existing store and emulator client.
pub fn create_router(
    storage: Arc<Storage>,
    emulator: Arc<dyn EmulatorClient>,
    registry: &Registry,
) -> Router {
    let device_repository = Arc::new(DeviceRepository::new(storage.clone()));
    let incubator_repository = Arc::new(IncubatorRepository::new(storage.clone()));
    let sensor_log_repository = Arc::new(SensorLogRepository::new(storage.clone()));

    let actuator_service = Arc::new(ActuatorService::new(
        incubator_repository.clone(),
        device_repository.clone(),
        emulator.clone(),
    ));

    let devices = device_router(DeviceState {
        device_repository: device_repository.clone(),
        incubator_repository: incubator_repository.clone(),
        protected_device_id: registry.protected_device_id,
    });

    let incubators = incubator_router(IncubatorState {
        incubator_repository,
        device_repository,
        sensor_log_repository,
        actuator_service,
        emulator,
        history_limit: registry.history_limit,
    });

    Router::new()
        .merge(devices)
        .merge(incubators)
        .route("/api/openapi.json", get(|| async { Json(ApiDoc::openapi()) }))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

pub async fn create_app(settings: &Arc<Settings>) -> anyhow::Result<Router> {
    let storage = Arc::new(Storage::new(settings.database.clone(), SchemaManager::default()).await?);

    let emulator: Arc<dyn EmulatorClient> = Arc::new(HttpEmulatorClient::new(&settings.emulator)?);

    let recorder_service = Arc::new(RecorderService::new(
        &settings.recorder,
        Arc::new(SensorLogRepository::new(storage.clone())),
        emulator.clone(),
    ));
    recorder_service.start();

    tracing::info!(
        "recording emulator readings every {} ms for device {}",
        settings.recorder.interval,
        settings.recorder.device_id
    );

    Ok(create_router(storage, emulator, &settings.registry))
}
