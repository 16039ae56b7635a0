//! Tests de escenario de los motores de estado y calendario
//!
//! Recorren el pipeline completo de una carga a través del controlador
//! y verifican los hitos registrados y su clasificación por fechas
//! día a día.

use chrono::{NaiveDate, TimeZone, Utc};
use std::sync::Arc;

use load_tracking::controllers::LoadController;
use load_tracking::dto::load_dto::{CreateLoadRequest, UpdateStatusRequest};
use load_tracking::models::LoadStatus;
use load_tracking::repositories::MemoryLoadRepository;
use load_tracking::services::calendar;
use uuid::Uuid;

fn controller() -> LoadController {
    LoadController::new(Arc::new(MemoryLoadRepository::new()))
}

fn create_request() -> CreateLoadRequest {
    serde_json::from_value(serde_json::json!({
        "sender": { "company": "Alpha Corp", "address": "123 Main St", "contact": "John" },
        "receiver": { "company": "Beta Inc", "address": "456 Oak Ave", "contact": "Jane" },
        "items": [{ "description": "Electronics", "quantity": 50 }]
    }))
    .unwrap()
}

fn status_request(status: &str, date: &str) -> UpdateStatusRequest {
    serde_json::from_value(serde_json::json!({
        "status": status,
        "actualDate": date,
    }))
    .unwrap()
}

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Recorrido completo del pipeline con fechas efectivas explícitas:
/// verifica hitos, timeline y la clasificación por columnas día a día
#[tokio::test]
async fn test_full_pipeline_walkthrough() {
    let controller = controller();
    let load = controller.create(create_request()).await.unwrap();
    let id = load.id;

    let schedule = [
        ("in_transit_to_warehouse", "2024-03-02"),
        ("unloading", "2024-03-04"),
        ("in_warehouse", "2024-03-04"),
        ("transport_issued", "2024-03-05"),
        ("loading", "2024-03-05"),
        ("in_transit_to_destination", "2024-03-05"),
        ("arrived", "2024-03-08"),
    ];
    for (status, date) in schedule {
        controller
            .update_status(id, status_request(status, date))
            .await
            .unwrap();
    }

    let load = controller.get_by_id(id).await.unwrap();

    // Invariante: status == última entrada del timeline
    assert_eq!(load.status, LoadStatus::Arrived);
    assert_eq!(load.timeline.last().unwrap().status, LoadStatus::Arrived);
    assert_eq!(load.timeline.len(), 8);

    // Mapeo de hitos: cada campo lo escribe su transición asociada
    let ts = |d: u32| Utc.with_ymd_and_hms(2024, 3, d, 0, 0, 0).unwrap();
    assert_eq!(load.actual_dates.warehouse_arrival, Some(ts(4)));
    // warehouse_dispatch lo fija 'loading', no la re-escritura de 'in_transit'
    assert_eq!(load.actual_dates.warehouse_dispatch, Some(ts(5)));
    assert_eq!(load.actual_dates.client_delivery, Some(ts(8)));
    assert_eq!(load.actual_delivery_date, Some(ts(8)));

    // Ya entregada, solo el día de llegada la clasifica
    assert!(calendar::matches_status_column(&load, LoadStatus::Arrived, day(2024, 3, 8)));
    assert!(!calendar::matches_status_column(&load, LoadStatus::Arrived, day(2024, 3, 7)));
    assert!(!calendar::matches_status_column(
        &load,
        LoadStatus::InTransitToDestination,
        day(2024, 3, 7)
    ));
}

/// Exclusión del día de llegada: en tránsito el 7, fuera el 8
#[tokio::test]
async fn test_transit_boundary_against_arrival_day() {
    let controller = controller();
    let load = controller.create(create_request()).await.unwrap();
    let id = load.id;

    let schedule = [
        ("in_transit_to_warehouse", "2024-03-02"),
        ("unloading", "2024-03-03"),
        ("in_warehouse", "2024-03-03"),
        ("transport_issued", "2024-03-04"),
        ("loading", "2024-03-05"),
        ("in_transit_to_destination", "2024-03-05"),
    ];
    for (status, date) in schedule {
        controller
            .update_status(id, status_request(status, date))
            .await
            .unwrap();
    }

    let mut load = controller.get_by_id(id).await.unwrap();
    // La llegada está registrada en fechas pero la carga sigue en tránsito
    load.status_dates
        .set(LoadStatus::Arrived, Utc.with_ymd_and_hms(2024, 3, 8, 9, 0, 0).unwrap());

    let column = LoadStatus::InTransitToDestination;
    assert!(calendar::matches_status_column(&load, column, day(2024, 3, 5)));
    assert!(calendar::matches_status_column(&load, column, day(2024, 3, 7)));
    assert!(!calendar::matches_status_column(&load, column, day(2024, 3, 8)));
}

/// Retroceder y volver a avanzar duplica entradas sin perder historia
#[tokio::test]
async fn test_backward_moves_append_history() {
    let controller = controller();
    let load = controller.create(create_request()).await.unwrap();
    let id = load.id;

    for (status, date) in [
        ("in_transit_to_warehouse", "2024-03-02"),
        ("unloading", "2024-03-03"),
        ("in_transit_to_warehouse", "2024-03-03"),
        ("unloading", "2024-03-04"),
    ] {
        controller
            .update_status(id, status_request(status, date))
            .await
            .unwrap();
    }

    let load = controller.get_by_id(id).await.unwrap();
    assert_eq!(load.status, LoadStatus::Unloading);
    assert_eq!(load.timeline.len(), 5);

    let unloading_entries = load
        .timeline
        .iter()
        .filter(|entry| entry.status == LoadStatus::Unloading)
        .count();
    assert_eq!(unloading_entries, 2);

    // status_dates conserva la última re-entrada
    assert_eq!(
        load.status_dates.unloading,
        Some(Utc.with_ymd_and_hms(2024, 3, 4, 0, 0, 0).unwrap())
    );
}

/// Transicionar una carga inexistente devuelve NotFound
#[tokio::test]
async fn test_transition_unknown_load() {
    let controller = controller();
    let result = controller
        .update_status(Uuid::new_v4(), status_request("in_transit_to_warehouse", "2024-03-02"))
        .await;
    assert!(result.is_err());
}

/// Una carga sin ninguna fecha relevante no aparece en ningún bucket IN
#[tokio::test]
async fn test_missing_dates_exclude_from_calendar() {
    let controller = controller();
    controller.create(create_request()).await.unwrap();

    // Dos meses de días alrededor de la creación: IN siempre vacío
    let today = Utc::now().date_naive();
    for offset in -30..30i64 {
        let reference = today + chrono::Duration::days(offset);
        let cell = controller
            .calendar_for_date(&reference.format("%Y-%m-%d").to_string())
            .await
            .unwrap();
        assert!(cell.incoming.is_empty());
    }
}
