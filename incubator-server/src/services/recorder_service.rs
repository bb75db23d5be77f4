use std::sync::Arc;
use std::time::Duration;

use time::OffsetDateTime;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

use crate::configs::Recorder;
use crate::errors::ApiError;
use crate::models::SensorLog;
use crate::repositories::SensorLogRepository;
use crate::services::EmulatorClient;

/// Samples the emulator on a fixed period and appends the readings to the sensor log.
pub struct RecorderService {
    sensor_log_repository: Arc<SensorLogRepository>,
    emulator: Arc<dyn EmulatorClient>,
    period: Duration,
    device_id: i32,
}

impl RecorderService {
    pub fn new(
        recorder: &Recorder,
        sensor_log_repository: Arc<SensorLogRepository>,
        emulator: Arc<dyn EmulatorClient>,
    ) -> Self {
        Self {
            sensor_log_repository,
            emulator,
            period: Duration::from_millis(recorder.interval),
            device_id: recorder.device_id,
        }
    }

    /// Take one sample and store it.
    pub async fn record_once(&self) -> Result<SensorLog, ApiError> {
        let reading = self.emulator.read_sensors().await?;

        let mut log = SensorLog {
            id: 0,
            device_id: self.device_id,
            temperature: reading.temperature,
            humidity: reading.humidity,
            time: OffsetDateTime::now_utc(),
        };

        let mut tx = self.sensor_log_repository.get_pool().begin().await?;
        log.id = self.sensor_log_repository.create(&log, &mut tx).await?;
        tx.commit().await?;

        Ok(log)
    }

    /// Spawn the sampling loop. The first sample is taken one period after start.
    pub fn start(self: Arc<Self>) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut interval = interval_at(Instant::now() + self.period, self.period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                interval.tick().await;

                match self.record_once().await {
                    Ok(log) => tracing::debug!(
                        "recorded {:.2}°C {:.2}% for device {}",
                        log.temperature,
                        log.humidity,
                        log.device_id
                    ),
                    Err(e) => tracing::error!("failed to record sensor reading: {}", e),
                }
            }
        })
    }
}
