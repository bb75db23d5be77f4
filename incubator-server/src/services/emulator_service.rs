use std::time::Duration;

use async_trait::async_trait;
use incubator_api::models::{ActuatorCommand, MessageResponse, SensorReading};
use reqwest::StatusCode;
use serde_json::Value;

use crate::configs::Emulator;
use crate::errors::EmulatorError;

/// Access to the incubator emulator peripheral.
#[async_trait]
pub trait EmulatorClient: Send + Sync {
    /// Current rounded temperature and humidity
    async fn read_sensors(&self) -> Result<SensorReading, EmulatorError>;

    /// Forward one actuator command, returning the emulator acknowledgement
    async fn send_command(&self, command: &ActuatorCommand) -> Result<MessageResponse, EmulatorError>;
}

pub struct HttpEmulatorClient {
    base_url: String,
    http_client: reqwest::Client,
}

impl HttpEmulatorClient {
    pub fn new(emulator: &Emulator) -> Result<Self, EmulatorError> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_millis(emulator.timeout))
            .build()?;

        Ok(Self {
            base_url: emulator.url.trim_end_matches('/').to_string(),
            http_client,
        })
    }
}

#[async_trait]
impl EmulatorClient for HttpEmulatorClient {
    async fn read_sensors(&self) -> Result<SensorReading, EmulatorError> {
        let response = self
            .http_client
            .get(format!("{}/status", self.base_url))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(EmulatorError::Status(response.status().as_u16()));
        }

        Ok(response.json::<SensorReading>().await?)
    }

    async fn send_command(&self, command: &ActuatorCommand) -> Result<MessageResponse, EmulatorError> {
        let response = self
            .http_client
            .post(format!("{}/actuator", self.base_url))
            .json(command)
            .send()
            .await?;

        match response.status() {
            status if status.is_success() => Ok(response.json::<MessageResponse>().await?),
            StatusCode::BAD_REQUEST => {
                let body: Value = response.json().await.unwrap_or(Value::Null);
                let message = body["error"]
                    .as_str()
                    .unwrap_or("command rejected")
                    .to_string();

                Err(EmulatorError::Rejected(message))
            }
            status => Err(EmulatorError::Status(status.as_u16())),
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::extract::Json;
    use axum::http::StatusCode as HttpStatus;
    use axum::routing::{get, post};
    use axum::Router;
    use incubator_api::models::{ActuatorKind, ActuatorValue};
    use serde_json::json;
    use tokio::net::TcpListener;

    use super::*;

    async fn spawn_fake_emulator() -> String {
        let app = Router::new()
            .route(
                "/status",
                get(|| async { Json(SensorReading::rounded(25.004, 60.0)) }),
            )
            .route(
                "/actuator",
                post(|Json(command): Json<ActuatorCommand>| async move {
                    match command.kind() {
                        Ok(_) => (HttpStatus::OK, Json(json!({ "message": "OK" }))),
                        Err(e) => (HttpStatus::BAD_REQUEST, Json(json!({ "error": e.to_string() }))),
                    }
                }),
            );

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        format!("http://{address}/")
    }

    fn client(url: String) -> HttpEmulatorClient {
        HttpEmulatorClient::new(&Emulator { url, timeout: 1000 }).unwrap()
    }

    #[tokio::test]
    async fn test_read_sensors() {
        let client = client(spawn_fake_emulator().await);

        let reading = client.read_sensors().await.unwrap();
        assert_eq!(reading.temperature, 25.0);
        assert_eq!(reading.humidity, 60.0);
    }

    #[tokio::test]
    async fn test_send_command() {
        let client = client(spawn_fake_emulator().await);

        let command = ActuatorCommand::new(ActuatorKind::Heater, ActuatorValue::Bool(true));
        let response = client.send_command(&command).await.unwrap();
        assert_eq!(response.message, "OK");
    }

    #[tokio::test]
    async fn test_rejected_command() {
        let client = client(spawn_fake_emulator().await);

        let command = ActuatorCommand {
            name: "fan".to_string(),
            value: ActuatorValue::Number(1.0),
        };
        let error = client.send_command(&command).await.unwrap_err();
        assert!(matches!(&error, EmulatorError::Rejected(message) if message.contains("fan")));
        assert_eq!(error.status_code(), HttpStatus::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_unreachable_emulator() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();
        drop(listener);

        let client = client(format!("http://{address}"));

        let error = client.read_sensors().await.unwrap_err();
        assert!(matches!(error, EmulatorError::Unreachable(_)));
        assert_eq!(error.status_code(), HttpStatus::INTERNAL_SERVER_ERROR);
    }
}
