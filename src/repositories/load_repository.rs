//! Contrato del repositorio de cargas

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::models::{Load, LoadStatus};
use crate::utils::errors::AppResult;

/// Operaciones de persistencia sobre cargas
///
/// El router mantiene un `Arc<dyn LoadRepository>`, así que el trait
/// debe ser object-safe. Las listas se devuelven de más reciente a más
/// antigua por fecha de creación.
#[async_trait]
pub trait LoadRepository: Send + Sync {
    /// Insertar una carga ya construida
    async fn create(&self, load: Load) -> AppResult<Load>;

    /// Buscar una carga por id
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Load>>;

    /// Todas las cargas, más recientes primero
    async fn find_all(&self) -> AppResult<Vec<Load>>;

    /// Cargas en un estado concreto, más recientes primero
    async fn find_by_status(&self, status: LoadStatus) -> AppResult<Vec<Load>>;

    /// Reescribir el documento completo de una carga existente
    async fn update(&self, load: Load) -> AppResult<Load>;

    /// Aplicar una transición de estado de forma atómica para el llamador
    ///
    /// No hay control de concurrencia optimista: dos transiciones
    /// simultáneas sobre la misma carga compiten y gana la última
    /// escritura (ambas entradas de timeline sobreviven si se
    /// intercalan las lecturas).
    async fn apply_transition(
        &self,
        id: Uuid,
        target: LoadStatus,
        effective_date: Option<DateTime<Utc>>,
        notes: Option<String>,
    ) -> AppResult<Load>;
}
