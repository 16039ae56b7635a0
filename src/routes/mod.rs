//! Rutas de la API
//!
//! Este módulo monta el router completo de la aplicación, que comparten
//! el binario y los tests de integración.

pub mod load_routes;

use axum::{response::Json, routing::get, Router};
use serde_json::json;

use crate::middleware::cors::{cors_middleware, cors_middleware_with_origins};
use crate::state::AppState;

/// Construir la aplicación completa: rutas de cargas, health check y CORS
pub fn create_app(state: AppState) -> Router {
    // Sin orígenes configurados, CORS permisivo de desarrollo
    let cors = if state.config.cors_origins.is_empty() {
        cors_middleware()
    } else {
        cors_middleware_with_origins(state.config.cors_origins.clone())
    };

    Router::new()
        .nest("/api/loads", load_routes::create_load_router())
        .route("/api/health", get(health_check))
        .layer(cors)
        .with_state(state)
}

/// Health check simple para liveness
async fn health_check() -> Json<serde_json::Value> {
    Json(json!({
        "status": "API is running",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
