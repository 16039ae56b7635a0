//! Repositorio de cargas sobre PostgreSQL
//!
//! PostgreSQL se usa como document store: el documento completo de la
//! carga vive en una columna JSONB y solo `id`, `status` y `created_at`
//! se materializan como columnas para filtrar y ordenar.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{Load, LoadStatus};
use crate::services::status_flow;
use crate::utils::errors::{not_found_error, AppError, AppResult};

use super::LoadRepository;

pub struct PgLoadRepository {
    pool: PgPool,
}

impl PgLoadRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn to_document(load: &Load) -> AppResult<serde_json::Value> {
        serde_json::to_value(load)
            .map_err(|e| AppError::Internal(format!("Error serializing load: {}", e)))
    }

    fn from_document(doc: serde_json::Value) -> AppResult<Load> {
        serde_json::from_value(doc)
            .map_err(|e| AppError::Internal(format!("Error deserializing load: {}", e)))
    }
}

#[async_trait]
impl LoadRepository for PgLoadRepository {
    async fn create(&self, load: Load) -> AppResult<Load> {
        let doc = Self::to_document(&load)?;

        sqlx::query(
            r#"
            INSERT INTO loads (id, status, created_at, doc)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(load.id)
        .bind(load.status.as_str())
        .bind(load.created_at)
        .bind(doc)
        .execute(&self.pool)
        .await?;

        Ok(load)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Load>> {
        let row: Option<(serde_json::Value,)> =
            sqlx::query_as("SELECT doc FROM loads WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        row.map(|(doc,)| Self::from_document(doc)).transpose()
    }

    async fn find_all(&self) -> AppResult<Vec<Load>> {
        let rows: Vec<(serde_json::Value,)> =
            sqlx::query_as("SELECT doc FROM loads ORDER BY created_at DESC")
                .fetch_all(&self.pool)
                .await?;

        rows.into_iter()
            .map(|(doc,)| Self::from_document(doc))
            .collect()
    }

    async fn find_by_status(&self, status: LoadStatus) -> AppResult<Vec<Load>> {
        let rows: Vec<(serde_json::Value,)> =
            sqlx::query_as("SELECT doc FROM loads WHERE status = $1 ORDER BY created_at DESC")
                .bind(status.as_str())
                .fetch_all(&self.pool)
                .await?;

        rows.into_iter()
            .map(|(doc,)| Self::from_document(doc))
            .collect()
    }

    async fn update(&self, load: Load) -> AppResult<Load> {
        let doc = Self::to_document(&load)?;

        let result = sqlx::query(
            r#"
            UPDATE loads
            SET status = $2, doc = $3
            WHERE id = $1
            "#,
        )
        .bind(load.id)
        .bind(load.status.as_str())
        .bind(doc)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(not_found_error("Load", &load.id.to_string()));
        }
        Ok(load)
    }

    async fn apply_transition(
        &self,
        id: Uuid,
        target: LoadStatus,
        effective_date: Option<DateTime<Utc>>,
        notes: Option<String>,
    ) -> AppResult<Load> {
        // Read-modify-write sin compare-and-swap: dos transiciones
        // concurrentes sobre la misma carga compiten y gana la última
        let mut load = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Load", &id.to_string()))?;

        status_flow::transition(&mut load, target, effective_date, notes)?;
        self.update(load).await
    }
}
