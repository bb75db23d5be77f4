use std::error::Error;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::routing::{get, post};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handles::{EmulatorState, get_full_state, get_status, post_actuator};
use crate::incubator::Incubator;
use crate::settings::Settings;
use crate::simulate::EnvironmentState;

pub mod command;
pub mod error;
pub mod handles;
pub mod incubator;
pub mod settings;
pub mod simulate;

pub fn create_app(incubator: Incubator) -> Router {
    Router::new()
        .route("/status", get(get_status))
        .route("/actuator", post(post_actuator))
        .route("/full-state", get(get_full_state))
        .with_state(EmulatorState { incubator })
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

pub async fn run(settings: &Arc<Settings>) -> Result<(), Box<dyn Error>> {
    let simulation = &settings.simulation;
    let incubator = Incubator::new(EnvironmentState::new(
        simulation.temperature,
        simulation.humidity,
    ));

    let ticker = incubator.spawn_ticker(Duration::from_millis(simulation.tick_interval));

    let ip_addr = settings.server.host.parse::<IpAddr>()?;
    let address = SocketAddr::from((ip_addr, settings.server.port));
    let listener = TcpListener::bind(&address).await?;

    tracing::info!("emulator listening on {:?}", address);

    axum::serve(listener, create_app(incubator))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    ticker.cancel();
    tracing::info!("emulator stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {}", e);
    }
}
