use std::sync::Arc;
use std::time::Duration;

use incubator_api::models::{ActuatorCommand, ActuatorKind, EnvironmentSnapshot, SensorReading};
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

use crate::command;
use crate::error::CommandError;
use crate::simulate::EnvironmentState;

/// Shared handle to the single environment owned by the emulator.
///
/// Ticks and commands both go through the write lock and never hold it
/// across an await point, so they are applied one at a time.
#[derive(Clone, Default)]
pub struct Incubator {
    state: Arc<RwLock<EnvironmentState>>,
}

impl Incubator {
    pub fn new(state: EnvironmentState) -> Self {
        Self {
            state: Arc::new(RwLock::new(state)),
        }
    }

    /// Run one simulation step immediately.
    pub async fn step(&self) -> EnvironmentState {
        let mut state = self.state.write().await;
        state.tick();
        *state
    }

    pub async fn execute(&self, command: &ActuatorCommand) -> Result<ActuatorKind, CommandError> {
        let mut state = self.state.write().await;
        command::dispatch(&mut state, command)
    }

    pub async fn reading(&self) -> SensorReading {
        self.state.read().await.reading()
    }

    pub async fn snapshot(&self) -> EnvironmentSnapshot {
        self.state.read().await.snapshot()
    }

    /// Start advancing the environment every `period`.
    ///
    /// The first step happens one period after the call. Late ticks are
    /// delayed rather than replayed in a burst.
    pub fn spawn_ticker(&self, period: Duration) -> TickerHandle {
        let incubator = self.clone();

        let handle = tokio::spawn(async move {
            let mut interval = time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                interval.tick().await;

                let state = incubator.step().await;
                tracing::trace!(
                    temperature = state.temperature,
                    humidity = state.humidity,
                    "simulation tick"
                );
            }
        });

        TickerHandle { handle }
    }
}

/// Cancellation handle for a running simulation ticker.
pub struct TickerHandle {
    handle: JoinHandle<()>,
}

impl TickerHandle {
    pub fn cancel(&self) {
        self.handle.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}
