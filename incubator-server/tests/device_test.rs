use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use serde_json::{Value, json};

use incubator_server::tests::{create_test_device, create_test_incubator};

mod common;
use common::mock_app::{MockApp, PROTECTED_DEVICE_ID};

#[tokio::test]
async fn test_create_device() {
    let app = MockApp::new().await;
    let incubator = create_test_incubator(app.storage.clone(), "Main").await;

    let (status, body) = app
        .request(
            Method::POST,
            "/api/devices",
            Some(json!({
                "name": "Lamp",
                "description": "Heat lamp",
                "type": "dimmer",
                "room": "Lab",
                "incubator_id": incubator.id
            })),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["name"], json!("Lamp"));
    assert_eq!(body["type"], json!("dimmer"));
    assert_eq!(body["room"], json!("Lab"));
    assert_eq!(body["icon"], json!("default"));
    assert_eq!(body["state"], json!(0.0));
    assert_eq!(body["incubator_id"], json!(incubator.id));
    assert!(body["id"].is_i64());
}

#[tokio::test]
async fn test_create_device_defaults() {
    let app = MockApp::new().await;

    let (status, body) = app
        .request(Method::POST, "/api/devices", Some(json!({ "name": "Spare" })))
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["type"], json!("default"));
    assert_eq!(body["icon"], json!("default"));
    assert_eq!(body["incubator_id"], Value::Null);
}

#[tokio::test]
async fn test_create_device_validation() {
    let app = MockApp::new().await;

    let (status, body) = app
        .request(Method::POST, "/api/devices", Some(json!({ "name": "  " })))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], json!(400));

    let (status, _) = app
        .request(Method::POST, "/api/devices", Some(json!({ "type": "dimmer" })))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let request = Request::builder()
        .uri("/api/devices")
        .method(Method::POST)
        .header("Content-Type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, _) = app.raw_request(request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .request(
            Method::POST,
            "/api/devices",
            Some(json!({ "name": "Lamp", "incubator_id": 999 })),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_get_devices() {
    let app = MockApp::new().await;
    let incubator = create_test_incubator(app.storage.clone(), "Main").await;
    create_test_device(app.storage.clone(), Some(incubator.id), "Lamp", "dimmer").await;
    create_test_device(app.storage.clone(), None, "Spare", "sensor").await;

    let (status, body) = app.request(Method::GET, "/api/devices", None).await;

    assert_eq!(status, StatusCode::OK);
    let devices = body.as_array().unwrap();
    assert_eq!(devices.len(), 2);
    assert_eq!(devices[0]["name"], json!("Lamp"));
    assert_eq!(devices[1]["name"], json!("Spare"));
}

#[tokio::test]
async fn test_get_device_by_id() {
    let app = MockApp::new().await;
    let device = create_test_device(app.storage.clone(), None, "Lamp", "dimmer").await;

    let (status, body) = app
        .request(Method::GET, &format!("/api/devices/{}", device.id), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], json!(device.id));
    assert_eq!(body["type"], json!("dimmer"));

    let (status, body) = app.request(Method::GET, "/api/devices/999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["message"], json!("Device not found"));
}

#[tokio::test]
async fn test_update_device_keeps_missing_fields() {
    let app = MockApp::new().await;
    let device = create_test_device(app.storage.clone(), None, "Lamp", "dimmer").await;

    let (status, body) = app
        .request(
            Method::PUT,
            &format!("/api/devices/{}", device.id),
            Some(json!({ "name": "Top Lamp", "icon": "sun" })),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], json!("Top Lamp"));
    assert_eq!(body["icon"], json!("sun"));
    assert_eq!(body["type"], json!("dimmer"));
    assert_eq!(body["room"], json!("Lab"));

    let (_, body) = app
        .request(Method::GET, &format!("/api/devices/{}", device.id), None)
        .await;
    assert_eq!(body["name"], json!("Top Lamp"));

    let (status, _) = app
        .request(Method::PUT, "/api/devices/999", Some(json!({ "name": "Ghost" })))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app
        .request(
            Method::PUT,
            &format!("/api/devices/{}", device.id),
            Some(json!({ "name": "" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_device_state() {
    let app = MockApp::new().await;
    let device = create_test_device(app.storage.clone(), None, "Lamp", "dimmer").await;

    let (status, body) = app
        .request(
            Method::PUT,
            &format!("/api/devices/{}/state", device.id),
            Some(json!({ "state": 55.5 })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "id": device.id, "state": 55.5 }));

    let (_, body) = app
        .request(Method::GET, &format!("/api/devices/{}", device.id), None)
        .await;
    assert_eq!(body["state"], json!(55.5));

    let (status, body) = app
        .request(
            Method::PUT,
            &format!("/api/devices/{}/state", device.id),
            Some(json!({})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["message"], json!("Device state is required"));

    let (status, _) = app
        .request(Method::PUT, "/api/devices/999/state", Some(json!({ "state": 1 })))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_device() {
    let app = MockApp::new().await;
    let device = create_test_device(app.storage.clone(), None, "Lamp", "dimmer").await;

    let (status, body) = app
        .request(Method::DELETE, &format!("/api/devices/{}", device.id), None)
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (status, _) = app
        .request(Method::GET, &format!("/api/devices/{}", device.id), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app
        .request(Method::DELETE, &format!("/api/devices/{}", device.id), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_protected_device_cannot_be_deleted() {
    let app = MockApp::new().await;
    for name in ["Lamp", "Heater", "Vaporizer", "Main Sensor"] {
        create_test_device(app.storage.clone(), None, name, "sensor").await;
    }

    let (status, body) = app
        .request(
            Method::DELETE,
            &format!("/api/devices/{PROTECTED_DEVICE_ID}"),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"]["code"], json!(403));

    let (status, body) = app
        .request(Method::GET, &format!("/api/devices/{PROTECTED_DEVICE_ID}"), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], json!("Main Sensor"));
}
