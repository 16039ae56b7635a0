//! Repositorio de cargas en memoria
//!
//! Sustituto del document store para tests y para arrancar el servidor
//! sin `DATABASE_URL` (el modo desarrollo siembra datos de ejemplo).

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::{Load, LoadItem, LoadStatus, Party};
use crate::services::status_flow;
use crate::utils::errors::{not_found_error, AppResult};

use super::LoadRepository;

/// Mapa de cargas protegido por un RwLock
#[derive(Clone, Default)]
pub struct MemoryLoadRepository {
    loads: Arc<RwLock<HashMap<Uuid, Load>>>,
}

impl MemoryLoadRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Crear el repositorio con cargas de ejemplo en distintas etapas
    pub async fn with_sample_data() -> Self {
        let repository = Self::new();
        repository.seed_sample_loads().await;
        repository
    }

    /// Sembrar tres cargas de ejemplo en etapas intermedias del pipeline
    ///
    /// Las cargas se construyen aplicando transiciones reales, así los
    /// invariantes (timeline, hitos, status_dates) quedan consistentes.
    pub async fn seed_sample_loads(&self) {
        let today = Utc::now();
        let yesterday = today - Duration::days(1);
        let tomorrow = today + Duration::days(1);
        let next_day = today + Duration::days(2);

        let mut in_warehouse = sample_load(
            ("Alpha Corp", "123 Main St", "John"),
            ("Beta Inc", "456 Oak Ave", "Jane"),
            "Electronics",
            50,
        );
        advance_to(&mut in_warehouse, LoadStatus::InWarehouse, today);
        in_warehouse.warehouse.incoming_date = Some(today);
        in_warehouse.warehouse.pallet_location = Some("A-12".to_string());
        in_warehouse.transport.dispatch_date = Some(tomorrow);
        in_warehouse.planned_dates.client_delivery = Some(next_day);

        let mut loading = sample_load(
            ("Gamma Ltd", "789 Elm Rd", "Bob"),
            ("Delta Co", "321 Pine St", "Alice"),
            "Textiles",
            100,
        );
        advance_to(&mut loading, LoadStatus::Loading, today);
        loading.warehouse.incoming_date = Some(today);
        loading.warehouse.pallet_location = Some("B-5".to_string());
        loading.transport.dispatch_date = Some(tomorrow);
        loading.transport.truck_id = Some("TRK-001".to_string());
        loading.planned_dates.client_delivery = Some(next_day);

        let mut in_transit = sample_load(
            ("Epsilon Sp", "555 Ash Ln", "Charlie"),
            ("Zeta Group", "777 Birch Dr", "Diana"),
            "Machinery",
            10,
        );
        advance_to(&mut in_transit, LoadStatus::InWarehouse, yesterday);
        advance_to(&mut in_transit, LoadStatus::InTransitToDestination, today);
        in_transit.warehouse.incoming_date = Some(yesterday);
        in_transit.warehouse.pallet_location = Some("C-8".to_string());
        in_transit.transport.dispatch_date = Some(today);
        in_transit.transport.truck_id = Some("TRK-002".to_string());
        in_transit.transport.driver_id = Some("DRV-001".to_string());
        in_transit.planned_dates.client_delivery = Some(tomorrow);

        let mut loads = self.loads.write().await;
        for mut load in [in_warehouse, loading, in_transit] {
            // Los pedidos de ejemplo se recibieron hace dos días
            load.created_at = today - Duration::days(2);
            loads.insert(load.id, load);
        }
        tracing::info!("✅ Sembradas {} cargas de ejemplo", loads.len());
    }
}

fn sample_load(
    sender: (&str, &str, &str),
    receiver: (&str, &str, &str),
    description: &str,
    quantity: u32,
) -> Load {
    Load::new(
        Party {
            company: sender.0.to_string(),
            address: sender.1.to_string(),
            contact: sender.2.to_string(),
        },
        Party {
            company: receiver.0.to_string(),
            address: receiver.1.to_string(),
            contact: receiver.2.to_string(),
        },
        vec![LoadItem { description: description.to_string(), quantity }],
    )
}

fn advance_to(load: &mut Load, target: LoadStatus, effective: DateTime<Utc>) {
    while load.status != target {
        let next = load.status.next().expect("sample seed never passes 'arrived'");
        status_flow::transition(load, next, Some(effective), None)
            .expect("adjacent moves in seed are always legal");
    }
}

fn sort_most_recent_first(loads: &mut [Load]) {
    loads.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}

#[async_trait]
impl LoadRepository for MemoryLoadRepository {
    async fn create(&self, load: Load) -> AppResult<Load> {
        let mut loads = self.loads.write().await;
        loads.insert(load.id, load.clone());
        Ok(load)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Load>> {
        let loads = self.loads.read().await;
        Ok(loads.get(&id).cloned())
    }

    async fn find_all(&self) -> AppResult<Vec<Load>> {
        let loads = self.loads.read().await;
        let mut all: Vec<Load> = loads.values().cloned().collect();
        sort_most_recent_first(&mut all);
        Ok(all)
    }

    async fn find_by_status(&self, status: LoadStatus) -> AppResult<Vec<Load>> {
        let loads = self.loads.read().await;
        let mut matching: Vec<Load> = loads
            .values()
            .filter(|load| load.status == status)
            .cloned()
            .collect();
        sort_most_recent_first(&mut matching);
        Ok(matching)
    }

    async fn update(&self, load: Load) -> AppResult<Load> {
        let mut loads = self.loads.write().await;
        if !loads.contains_key(&load.id) {
            return Err(not_found_error("Load", &load.id.to_string()));
        }
        loads.insert(load.id, load.clone());
        Ok(load)
    }

    async fn apply_transition(
        &self,
        id: Uuid,
        target: LoadStatus,
        effective_date: Option<DateTime<Utc>>,
        notes: Option<String>,
    ) -> AppResult<Load> {
        // Una sola adquisición del write-lock: la transición es atómica
        // para el llamador
        let mut loads = self.loads.write().await;
        let load = loads
            .get_mut(&id)
            .ok_or_else(|| not_found_error("Load", &id.to_string()))?;
        status_flow::transition(load, target, effective_date, notes)?;
        Ok(load.clone())
    }
}
