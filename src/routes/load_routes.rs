//! Rutas de cargas
//!
//! La superficie HTTP que el cliente existente consume: listados,
//! vistas de calendario/tablero, creación y actualizaciones parciales.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, patch, post},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::LoadController;
use crate::dto::load_dto::{
    BoardColumn, CalendarDayResponse, CreateLoadFromFileRequest, CreateLoadRequest,
    UpdateStatusRequest, UpdateTransportRequest, UpdateWarehouseRequest,
};
use crate::models::Load;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_load_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_all_loads))
        .route("/", post(create_load))
        .route("/status/:status", get(get_loads_by_status))
        .route("/date/:date", get(get_loads_by_date))
        .route("/calendar/:date", get(get_calendar_for_date))
        .route("/board/:date", get(get_board_for_date))
        .route("/upload/file", post(create_load_from_file))
        .route("/:id", get(get_load))
        .route("/:id/status", patch(update_load_status))
        .route("/:id/deliver", patch(mark_as_delivered))
        .route("/:id/warehouse", patch(update_warehouse_info))
        .route("/:id/transport", patch(update_transport_info))
}

async fn get_all_loads(State(state): State<AppState>) -> Result<Json<Vec<Load>>, AppError> {
    let controller = LoadController::new(state.repository.clone());
    Ok(Json(controller.list().await?))
}

async fn get_loads_by_status(
    State(state): State<AppState>,
    Path(status): Path<String>,
) -> Result<Json<Vec<Load>>, AppError> {
    let controller = LoadController::new(state.repository.clone());
    Ok(Json(controller.list_by_status(&status).await?))
}

async fn get_loads_by_date(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> Result<Json<Vec<Load>>, AppError> {
    let controller = LoadController::new(state.repository.clone());
    Ok(Json(controller.list_by_date(&date).await?))
}

async fn get_calendar_for_date(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> Result<Json<CalendarDayResponse>, AppError> {
    let controller = LoadController::new(state.repository.clone());
    Ok(Json(controller.calendar_for_date(&date).await?))
}

async fn get_board_for_date(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> Result<Json<Vec<BoardColumn>>, AppError> {
    let controller = LoadController::new(state.repository.clone());
    Ok(Json(controller.board_for_date(&date).await?))
}

async fn get_load(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Load>, AppError> {
    let controller = LoadController::new(state.repository.clone());
    Ok(Json(controller.get_by_id(id).await?))
}

async fn create_load(
    State(state): State<AppState>,
    Json(request): Json<CreateLoadRequest>,
) -> Result<(StatusCode, Json<Load>), AppError> {
    let controller = LoadController::new(state.repository.clone());
    let load = controller.create(request).await?;
    Ok((StatusCode::CREATED, Json(load)))
}

async fn create_load_from_file(
    State(state): State<AppState>,
    Json(request): Json<CreateLoadFromFileRequest>,
) -> Result<(StatusCode, Json<Load>), AppError> {
    let controller = LoadController::new(state.repository.clone());
    let load = controller.create_from_file(request).await?;
    Ok((StatusCode::CREATED, Json(load)))
}

async fn update_load_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateStatusRequest>,
) -> Result<Json<Load>, AppError> {
    let controller = LoadController::new(state.repository.clone());
    Ok(Json(controller.update_status(id, request).await?))
}

async fn mark_as_delivered(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Load>, AppError> {
    let controller = LoadController::new(state.repository.clone());
    Ok(Json(controller.mark_as_delivered(id).await?))
}

async fn update_warehouse_info(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateWarehouseRequest>,
) -> Result<Json<Load>, AppError> {
    let controller = LoadController::new(state.repository.clone());
    Ok(Json(controller.update_warehouse(id, request).await?))
}

async fn update_transport_info(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateTransportRequest>,
) -> Result<Json<Load>, AppError> {
    let controller = LoadController::new(state.repository.clone());
    Ok(Json(controller.update_transport(id, request).await?))
}
