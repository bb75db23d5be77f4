use std::sync::Arc;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Method, Request, StatusCode};
use axum::response::Response;
use serde_json::Value;
use tower::ServiceExt;

use incubator_server::app::create_router;
use incubator_server::configs::{Registry, Storage};
use incubator_server::tests::{MockEmulatorClient, create_test_storage};

pub const PROTECTED_DEVICE_ID: i32 = 4;

pub struct MockApp {
    pub storage: Arc<Storage>,
    pub emulator: Arc<MockEmulatorClient>,
    pub router: Router,
}

impl MockApp {
    pub async fn new() -> Self {
        Self::with_history_limit(50).await
    }

    pub async fn with_history_limit(history_limit: i64) -> Self {
        let storage = create_test_storage().await;
        let emulator = Arc::new(MockEmulatorClient::default());

        let router = create_router(
            storage.clone(),
            emulator.clone(),
            &Registry {
                protected_device_id: PROTECTED_DEVICE_ID,
                history_limit,
            },
        );

        Self {
            storage,
            emulator,
            router,
        }
    }

    pub async fn request(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().uri(uri).method(method);

        let request = match body {
            Some(body) => builder
                .header("Content-Type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        read_json(response).await
    }

    pub async fn raw_request(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        read_json(response).await
    }
}

async fn read_json(response: Response) -> (StatusCode, Value) {
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();

    if body.is_empty() {
        (status, Value::Null)
    } else {
        (status, serde_json::from_slice(&body).unwrap())
    }
}
