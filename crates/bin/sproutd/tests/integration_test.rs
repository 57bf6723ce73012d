//! End-to-end smoke tests for the full sproutd stack.
//!
//! Each test spins up the complete application (in-memory storage, virtual
//! classifier, real services, real axum router) and exercises the HTTP
//! layer via `tower::ServiceExt::oneshot` — no TCP port is bound.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use tower::ServiceExt;

use sprout_adapter_http_axum::router;
use sprout_adapter_http_axum::state::{AppState, SystemInfo};
use sprout_adapter_memory::{MemoryHistoryStore, MemoryProfileRepository};
use sprout_adapter_virtual::VirtualClassifier;
use sprout_app::coordinator::WateringCoordinator;
use sprout_app::event_bus::InProcessEventBus;
use sprout_app::services::diagnosis_service::DiagnosisService;
use sprout_app::services::history_service::HistoryService;
use sprout_app::services::notification_service::NotificationService;
use sprout_app::services::profile_service::ProfileService;
use sprout_app::services::telemetry_service::TelemetryService;
use sprout_app::services::watering_service::WateringService;

/// Build a fully-wired router backed by in-memory adapters.
fn app() -> axum::Router {
    let profiles = Arc::new(MemoryProfileRepository::new());
    let history = Arc::new(MemoryHistoryStore::new());
    let event_bus = Arc::new(InProcessEventBus::new(256));
    let coordinator = Arc::new(WateringCoordinator::new());

    let state = AppState::new(
        WateringService::new(
            Arc::clone(&coordinator),
            Arc::clone(&profiles),
            Arc::clone(&history),
            Arc::clone(&event_bus),
        ),
        TelemetryService::new(
            Arc::clone(&coordinator),
            Arc::clone(&profiles),
            Arc::clone(&history),
            Arc::clone(&event_bus),
        ),
        ProfileService::new(Arc::clone(&profiles)),
        HistoryService::new(Arc::clone(&history)),
        DiagnosisService::new(VirtualClassifier::new(), Arc::clone(&history), event_bus),
        Arc::new(NotificationService::new()),
        coordinator,
        SystemInfo {
            version: "0.0.0-test",
            storage_backend: "memory",
            classifier_backend: "virtual",
            started_at: sprout_domain::time::now(),
        },
    );
    router::build(state)
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn put_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("PUT")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn multipart_image(uri: &str, extra_fields: &[(&str, &str)]) -> Request<Body> {
    let boundary = "sprout-test-boundary";
    let mut body = String::new();
    for (name, value) in extra_fields {
        body.push_str(&format!(
            "--{boundary}\r\ncontent-disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
        ));
    }
    body.push_str(&format!(
        "--{boundary}\r\ncontent-disposition: form-data; name=\"image\"; filename=\"plant.jpg\"\r\ncontent-type: image/jpeg\r\n\r\nfake image bytes\r\n--{boundary}--\r\n"
    ));
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(Body::from(body))
        .unwrap()
}

// ---------------------------------------------------------------------------
// Health & discovery
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_return_ok_when_health_check_called() {
    let resp = app().oneshot(get("/health")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_text(resp).await, "OK");
}

#[tokio::test]
async fn should_serve_endpoint_map_at_root() {
    let resp = app().oneshot(get("/")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let json = body_json(resp).await;
    assert_eq!(json["name"], "sprout");
    assert_eq!(
        json["endpoints"]["watering_system"]["trigger_watering"],
        "POST /api/trigger-watering"
    );
}

// ---------------------------------------------------------------------------
// Watering: trigger → poll → poll again
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_deliver_manual_watering_command_exactly_once() {
    let app = app();

    let resp = app
        .clone()
        .oneshot(post_json(
            "/api/trigger-watering",
            serde_json::json!({"plant_id": "main_plant", "duration": 5}),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::ACCEPTED);
    let json = body_json(resp).await;
    assert_eq!(json["duration_seconds"], 5);
    assert_eq!(json["source"], "manual");

    // device polls: command delivered once
    let resp = app
        .clone()
        .oneshot(get("/api/should-water?plant_id=main_plant"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_text(resp).await, "true");

    // second poll finds nothing
    let resp = app
        .oneshot(get("/api/should-water?plant_id=main_plant"))
        .await
        .unwrap();
    assert_eq!(body_text(resp).await, "false");
}

#[tokio::test]
async fn should_reject_zero_duration_trigger() {
    let resp = app()
        .oneshot(post_json(
            "/api/trigger-watering",
            serde_json::json!({"duration": 0}),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn should_record_watering_history_for_trigger() {
    let app = app();
    app.clone()
        .oneshot(post_json(
            "/api/trigger-watering",
            serde_json::json!({"duration": 4}),
        ))
        .await
        .unwrap();

    let resp = app.oneshot(get("/api/watering-history")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let json = body_json(resp).await;
    assert_eq!(json.as_array().unwrap().len(), 1);
    assert_eq!(json[0]["status"], "queued");
    assert_eq!(json[0]["triggered_by"], "mobile_app");
}

// ---------------------------------------------------------------------------
// Sensor feed & auto-watering
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_auto_water_on_low_moisture_reading() {
    let app = app();

    let resp = app
        .clone()
        .oneshot(post_json(
            "/api/sensor-data",
            serde_json::json!({"moisture": 25, "temperature": 23.5, "humidity": 60}),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let json = body_json(resp).await;
    assert_eq!(json["level"], "low");
    assert_eq!(json["watering_queued"], true);

    let resp = app.oneshot(get("/api/should-water")).await.unwrap();
    assert_eq!(body_text(resp).await, "true");
}

#[tokio::test]
async fn should_not_auto_water_on_normal_reading() {
    let app = app();

    let resp = app
        .clone()
        .oneshot(post_json(
            "/api/sensor-data",
            serde_json::json!({"moisture": 55}),
        ))
        .await
        .unwrap();
    let json = body_json(resp).await;
    assert_eq!(json["level"], "normal");
    assert_eq!(json["watering_queued"], false);

    let resp = app.oneshot(get("/api/should-water")).await.unwrap();
    assert_eq!(body_text(resp).await, "false");
}

#[tokio::test]
async fn should_record_moisture_history_from_sensor_data() {
    let app = app();
    app.clone()
        .oneshot(post_json(
            "/api/sensor-data",
            serde_json::json!({"moisture": 42, "temperature": 21.0}),
        ))
        .await
        .unwrap();

    let resp = app
        .oneshot(get("/api/moisture-history?days=7&limit=10"))
        .await
        .unwrap();
    let json = body_json(resp).await;
    assert_eq!(json.as_array().unwrap().len(), 1);
    assert_eq!(json[0]["moisture_percent"], 42);
}

#[tokio::test]
async fn should_record_completed_watering_on_pump_report() {
    let app = app();
    app.clone()
        .oneshot(post_json(
            "/api/pump-status",
            serde_json::json!({"pumpActive": true}),
        ))
        .await
        .unwrap();

    let resp = app.oneshot(get("/api/watering-history")).await.unwrap();
    let json = body_json(resp).await;
    assert_eq!(json[0]["status"], "completed");
    assert_eq!(json[0]["kind"], "automatic");
}

// ---------------------------------------------------------------------------
// Profile & settings
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_create_and_fetch_plant_profile() {
    let app = app();

    let resp = app
        .clone()
        .oneshot(post_json(
            "/api/plant-profile",
            serde_json::json!({"plant_type": "Aloe Vera", "plant_name": "Desk Aloe"}),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let json = body_json(resp).await;
    assert_eq!(json["action"], "created");

    let resp = app.oneshot(get("/api/plant-profile")).await.unwrap();
    let json = body_json(resp).await;
    assert_eq!(json["profile"]["plant_type"], "Aloe Vera");
    assert_eq!(json["profile"]["plant_name"], "Desk Aloe");
}

#[tokio::test]
async fn should_return_null_profile_when_never_created() {
    let resp = app().oneshot(get("/api/plant-profile")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let json = body_json(resp).await;
    assert!(json["profile"].is_null());
}

#[tokio::test]
async fn should_serve_default_settings_and_apply_patch() {
    let app = app();

    let resp = app.clone().oneshot(get("/api/plant-settings")).await.unwrap();
    let json = body_json(resp).await;
    assert_eq!(json["moisture_threshold"], 30);
    assert_eq!(json["auto_watering"], true);

    // settings PUT needs a profile first
    let resp = app
        .clone()
        .oneshot(put_json(
            "/api/plant-settings",
            serde_json::json!({"moisture_threshold": 45}),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    app.clone()
        .oneshot(post_json(
            "/api/plant-profile",
            serde_json::json!({"plant_type": "Aloe Vera"}),
        ))
        .await
        .unwrap();

    let resp = app
        .clone()
        .oneshot(put_json(
            "/api/plant-settings",
            serde_json::json!({"moisture_threshold": 45, "auto_watering": false}),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let json = body_json(resp).await;
    assert_eq!(json["moisture_threshold"], 45);
    assert_eq!(json["auto_watering"], false);

    // the new threshold drives classification
    let resp = app
        .oneshot(post_json(
            "/api/sensor-data",
            serde_json::json!({"moisture": 40}),
        ))
        .await
        .unwrap();
    let json = body_json(resp).await;
    assert_eq!(json["level"], "low");
    assert_eq!(json["watering_queued"], false);
}

// ---------------------------------------------------------------------------
// Plants & diagnosis
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_list_supported_plants() {
    let resp = app().oneshot(get("/api/plants")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let json = body_json(resp).await;
    assert!(json["total"].as_u64().unwrap() > 0);
    assert!(
        json["plants"]
            .as_array()
            .unwrap()
            .contains(&serde_json::json!("Aloe Vera"))
    );
}

#[tokio::test]
async fn should_identify_plant_from_multipart_image() {
    let resp = app()
        .oneshot(multipart_image("/api/identify-plant", &[]))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let json = body_json(resp).await;
    assert_eq!(json["predictions"].as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn should_reject_identify_without_image() {
    let boundary = "sprout-test-boundary";
    let body = format!(
        "--{boundary}\r\ncontent-disposition: form-data; name=\"plant_id\"\r\n\r\nmain_plant\r\n--{boundary}--\r\n"
    );
    let request = Request::builder()
        .method("POST")
        .uri("/api/identify-plant")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(Body::from(body))
        .unwrap();

    let resp = app().oneshot(request).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn should_check_disease_and_record_history() {
    let app = app();

    let resp = app
        .clone()
        .oneshot(multipart_image(
            "/api/check-disease",
            &[("plant_type", "Aloe Vera")],
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let json = body_json(resp).await;
    assert_eq!(json["model"], "virtual:Aloe Vera");

    let resp = app.oneshot(get("/api/disease-history")).await.unwrap();
    let json = body_json(resp).await;
    assert_eq!(json.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn should_accept_catalog_plant_selection() {
    let resp = app()
        .oneshot(post_json(
            "/api/plant-selection",
            serde_json::json!({"selected_plant": "Orchid"}),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let json = body_json(resp).await;
    assert_eq!(json["has_specific_disease_model"], true);
    assert_eq!(json["plant_type"], "Orchid");
}

#[tokio::test]
async fn should_reject_unknown_plant_selection() {
    let resp = app()
        .oneshot(post_json(
            "/api/plant-selection",
            serde_json::json!({"selected_plant": "Triffid"}),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// System status
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_report_pending_commands_in_system_status() {
    let app = app();

    let resp = app.clone().oneshot(get("/api/system-status")).await.unwrap();
    let json = body_json(resp).await;
    assert_eq!(json["pending_water_commands"], 0);
    assert_eq!(json["storage_backend"], "memory");

    app.clone()
        .oneshot(post_json(
            "/api/trigger-watering",
            serde_json::json!({"duration": 3}),
        ))
        .await
        .unwrap();

    let resp = app.oneshot(get("/api/system-status")).await.unwrap();
    let json = body_json(resp).await;
    assert_eq!(json["pending_water_commands"], 1);
}
