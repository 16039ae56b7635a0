//! Tests de integración de la API de cargas
//!
//! Levantan el router real contra el repositorio en memoria y lo
//! ejercitan request a request con `tower::ServiceExt::oneshot`.

use axum::body::Body;
use axum::Router;
use http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

use load_tracking::config::environment::EnvironmentConfig;
use load_tracking::repositories::MemoryLoadRepository;
use load_tracking::routes::create_app;
use load_tracking::state::AppState;

fn test_config() -> EnvironmentConfig {
    EnvironmentConfig {
        environment: "test".to_string(),
        port: 0,
        host: "127.0.0.1".to_string(),
        database_url: None,
        cors_origins: vec![],
    }
}

fn create_test_app() -> Router {
    let repository = Arc::new(MemoryLoadRepository::new());
    create_app(AppState::new(repository, test_config()))
}

async fn create_seeded_app() -> Router {
    let repository = Arc::new(MemoryLoadRepository::with_sample_data().await);
    create_app(AppState::new(repository, test_config()))
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn sample_create_body() -> Value {
    json!({
        "sender": { "company": "Alpha Corp", "address": "123 Main St", "contact": "John" },
        "receiver": { "company": "Beta Inc", "address": "456 Oak Ave", "contact": "Jane" },
        "items": [{ "description": "Electronics", "quantity": 50 }],
        "expectedDeliveryDate": "2024-03-10"
    })
}

/// Crear una carga y devolver su documento JSON
async fn create_load(app: &Router) -> Value {
    let response = app
        .clone()
        .oneshot(json_request("POST", "/api/loads", sample_create_body()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}

/// Avanzar una carga etapa a etapa vía PATCH hasta `target`
async fn advance_to(app: &Router, id: &str, stages: &[&str]) {
    for stage in stages {
        let response = app
            .clone()
            .oneshot(json_request(
                "PATCH",
                &format!("/api/loads/{}/status", id),
                json!({ "status": stage }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK, "transition to {} failed", stage);
    }
}

#[tokio::test]
async fn test_health_check() {
    let app = create_test_app();
    let response = app.oneshot(get("/api/health")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "API is running");
}

#[tokio::test]
async fn test_create_then_fetch_round_trip() {
    let app = create_test_app();
    let created = create_load(&app).await;

    assert_eq!(created["status"], "order_received");
    assert_eq!(created["timeline"].as_array().unwrap().len(), 1);
    assert_eq!(created["timeline"][0]["status"], "order_received");
    assert_eq!(created["plannedDates"]["clientDelivery"], "2024-03-10T00:00:00Z");

    let id = created["id"].as_str().unwrap();
    let response = app
        .oneshot(get(&format!("/api/loads/{}", id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let fetched = body_json(response).await;
    assert_eq!(fetched["id"], created["id"]);
    assert_eq!(fetched["status"], "order_received");
}

#[tokio::test]
async fn test_create_rejects_incomplete_payload() {
    let app = create_test_app();
    let response = app
        .oneshot(json_request(
            "POST",
            "/api/loads",
            json!({
                "sender": { "company": "", "address": "", "contact": "" },
                "receiver": { "company": "Beta Inc", "address": "456 Oak Ave", "contact": "Jane" },
                "items": [{ "description": "Electronics", "quantity": 50 }]
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_get_unknown_load_returns_404() {
    let app = create_test_app();
    let response = app
        .oneshot(get("/api/loads/550e8400-e29b-41d4-a716-446655440000"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_status_transition_adjacent_and_rejected() {
    let app = create_test_app();
    let created = create_load(&app).await;
    let id = created["id"].as_str().unwrap();

    // Saltarse etapas se rechaza
    let response = app
        .clone()
        .oneshot(json_request(
            "PATCH",
            &format!("/api/loads/{}/status", id),
            json!({ "status": "unloading" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["code"], "INVALID_TRANSITION");

    // La etapa adyacente sí avanza
    let response = app
        .clone()
        .oneshot(json_request(
            "PATCH",
            &format!("/api/loads/{}/status", id),
            json!({ "status": "in_transit_to_warehouse", "notes": "Truck left", "actualDate": "2024-03-02" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let updated = body_json(response).await;
    assert_eq!(updated["status"], "in_transit_to_warehouse");
    let timeline = updated["timeline"].as_array().unwrap();
    assert_eq!(timeline.len(), 2);
    assert_eq!(timeline[1]["status"], "in_transit_to_warehouse");
    assert_eq!(timeline[1]["userEnteredDate"], "2024-03-02T00:00:00Z");
    assert_eq!(updated["statusDates"]["inTransitToWarehouse"], "2024-03-02T00:00:00Z");
}

#[tokio::test]
async fn test_unknown_status_key_is_rejected() {
    let app = create_test_app();
    let created = create_load(&app).await;
    let id = created["id"].as_str().unwrap();

    let response = app
        .oneshot(json_request(
            "PATCH",
            &format!("/api/loads/{}/status", id),
            json!({ "status": "teleported" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_deliver_respects_adjacency() {
    let app = create_test_app();
    let created = create_load(&app).await;
    let id = created["id"].as_str().unwrap();

    // Recién creada: entregar directamente es ilegal
    let response = app
        .clone()
        .oneshot(json_request(
            "PATCH",
            &format!("/api/loads/{}/deliver", id),
            json!({}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    advance_to(
        &app,
        id,
        &[
            "in_transit_to_warehouse",
            "unloading",
            "in_warehouse",
            "transport_issued",
            "loading",
            "in_transit_to_destination",
        ],
    )
    .await;

    let response = app
        .clone()
        .oneshot(json_request(
            "PATCH",
            &format!("/api/loads/{}/deliver", id),
            json!({}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let delivered = body_json(response).await;
    assert_eq!(delivered["status"], "arrived");
    assert!(delivered["actualDeliveryDate"].is_string());
    assert!(delivered["actualDates"]["clientDelivery"].is_string());
    let last = delivered["timeline"].as_array().unwrap().last().unwrap().clone();
    assert_eq!(last["notes"], "Load delivered to final destination");
}

#[tokio::test]
async fn test_list_by_status() {
    let app = create_seeded_app().await;

    let response = app
        .clone()
        .oneshot(get("/api/loads/status/in_warehouse"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let loads = body.as_array().unwrap();
    assert_eq!(loads.len(), 1);
    assert_eq!(loads[0]["status"], "in_warehouse");

    // Clave de estado desconocida
    let response = app.oneshot(get("/api/loads/status/teleported")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_by_date() {
    let app = create_seeded_app().await;
    let today = chrono::Utc::now().format("%Y-%m-%d").to_string();

    let response = app
        .clone()
        .oneshot(get(&format!("/api/loads/date/{}", today)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    // Las tres cargas sembradas tienen alguna fecha relevante hoy
    assert_eq!(body.as_array().unwrap().len(), 3);

    // Fecha mal formada
    let response = app.oneshot(get("/api/loads/date/03-05-2024")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_calendar_in_out_shape() {
    let app = create_seeded_app().await;
    let today = chrono::Utc::now().format("%Y-%m-%d").to_string();

    let response = app
        .clone()
        .oneshot(get(&format!("/api/loads/calendar/{}", today)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert!(body["in"].is_array());
    assert!(body["out"].is_array());
    // Dos cargas entraron al almacén hoy
    assert_eq!(body["in"].as_array().unwrap().len(), 2);
    // La carga en tránsito despachó hoy
    assert_eq!(body["out"].as_array().unwrap().len(), 1);

    // Mismo query dos veces: mismo resultado
    let response = app
        .oneshot(get(&format!("/api/loads/calendar/{}", today)))
        .await
        .unwrap();
    let again = body_json(response).await;
    assert_eq!(body, again);
}

#[tokio::test]
async fn test_board_groups_by_status_column() {
    let app = create_seeded_app().await;
    let today = chrono::Utc::now().format("%Y-%m-%d").to_string();

    let response = app
        .oneshot(get(&format!("/api/loads/board/{}", today)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let columns = body.as_array().unwrap();
    assert_eq!(columns.len(), 8);
    assert_eq!(columns[0]["status"], "order_received");
    assert_eq!(columns[7]["status"], "arrived");

    // La carga sembrada en almacén aparece en su columna hoy
    let in_warehouse = columns
        .iter()
        .find(|column| column["status"] == "in_warehouse")
        .unwrap();
    assert_eq!(in_warehouse["loads"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_update_warehouse_defaults_incoming_date() {
    let app = create_test_app();
    let created = create_load(&app).await;
    let id = created["id"].as_str().unwrap();

    let response = app
        .oneshot(json_request(
            "PATCH",
            &format!("/api/loads/{}/warehouse", id),
            json!({ "palletLocation": "A-12", "warehouseNotes": "Fragile" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let updated = body_json(response).await;
    assert_eq!(updated["warehouse"]["palletLocation"], "A-12");
    assert_eq!(updated["warehouse"]["notes"], "Fragile");
    // Sin fecha en el request, la entrada se fecha ahora
    assert!(updated["warehouse"]["incomingDate"].is_string());
}

#[tokio::test]
async fn test_update_transport() {
    let app = create_test_app();
    let created = create_load(&app).await;
    let id = created["id"].as_str().unwrap();

    let response = app
        .oneshot(json_request(
            "PATCH",
            &format!("/api/loads/{}/transport", id),
            json!({ "truckId": "TRK-001", "carrier": "FastFreight", "dispatchDate": "2024-03-06" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let updated = body_json(response).await;
    assert_eq!(updated["transport"]["truckId"], "TRK-001");
    assert_eq!(updated["transport"]["carrier"], "FastFreight");
    assert_eq!(updated["transport"]["dispatchDate"], "2024-03-06T00:00:00Z");
}

#[tokio::test]
async fn test_create_from_file_upload() {
    let app = create_test_app();
    let mut body = sample_create_body();
    body["fileName"] = json!("loads_2024-03.csv");

    let response = app
        .clone()
        .oneshot(json_request("POST", "/api/loads/upload/file", body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let created = body_json(response).await;
    assert_eq!(created["status"], "order_received");
    assert_eq!(
        created["timeline"][0]["notes"],
        "Created from file upload: loads_2024-03.csv"
    );
}

#[tokio::test]
async fn test_list_all_most_recent_first() {
    let app = create_test_app();
    let first = create_load(&app).await;
    let second = create_load(&app).await;

    let response = app.oneshot(get("/api/loads")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let loads = body.as_array().unwrap();
    assert_eq!(loads.len(), 2);
    // Más recientes primero
    assert_eq!(loads[0]["id"], second["id"]);
    assert_eq!(loads[1]["id"], first["id"]);
}
