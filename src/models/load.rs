//! Modelo de cargas (loads)
//!
//! Una carga atraviesa un pipeline fijo de 8 etapas logísticas, desde
//! `order_received` hasta `arrived`. El timeline es un log append-only
//! de transiciones; `status` siempre coincide con la última entrada.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Estados del pipeline logístico, en orden fijo (índices 0..7)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadStatus {
    OrderReceived,
    InTransitToWarehouse,
    Unloading,
    InWarehouse,
    TransportIssued,
    Loading,
    InTransitToDestination,
    Arrived,
}

/// Orden total de las etapas del pipeline
pub const STAGE_ORDER: [LoadStatus; 8] = [
    LoadStatus::OrderReceived,
    LoadStatus::InTransitToWarehouse,
    LoadStatus::Unloading,
    LoadStatus::InWarehouse,
    LoadStatus::TransportIssued,
    LoadStatus::Loading,
    LoadStatus::InTransitToDestination,
    LoadStatus::Arrived,
];

impl LoadStatus {
    /// Índice de la etapa dentro del pipeline (0..7)
    pub fn index(&self) -> usize {
        STAGE_ORDER.iter().position(|s| s == self).unwrap_or(0)
    }

    /// Etapa siguiente, si existe (`arrived` es terminal)
    pub fn next(&self) -> Option<LoadStatus> {
        STAGE_ORDER.get(self.index() + 1).copied()
    }

    /// Etapa anterior, si existe (`order_received` es la primera)
    pub fn previous(&self) -> Option<LoadStatus> {
        self.index().checked_sub(1).map(|i| STAGE_ORDER[i])
    }

    /// Verificar si `target` es la etapa inmediatamente anterior o siguiente
    pub fn is_adjacent(&self, target: LoadStatus) -> bool {
        self.next() == Some(target) || self.previous() == Some(target)
    }

    /// Clave snake_case usada en la API y la base de datos
    pub fn as_str(&self) -> &'static str {
        match self {
            LoadStatus::OrderReceived => "order_received",
            LoadStatus::InTransitToWarehouse => "in_transit_to_warehouse",
            LoadStatus::Unloading => "unloading",
            LoadStatus::InWarehouse => "in_warehouse",
            LoadStatus::TransportIssued => "transport_issued",
            LoadStatus::Loading => "loading",
            LoadStatus::InTransitToDestination => "in_transit_to_destination",
            LoadStatus::Arrived => "arrived",
        }
    }

    /// Parsear una clave snake_case a su etapa
    pub fn parse(value: &str) -> Option<LoadStatus> {
        STAGE_ORDER.iter().find(|s| s.as_str() == value).copied()
    }
}

impl std::fmt::Display for LoadStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Remitente o destinatario de una carga
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Party {
    pub company: String,
    pub address: String,
    pub contact: String,
}

/// Ítem transportado dentro de una carga
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadItem {
    pub description: String,
    pub quantity: u32,
}

/// Fechas objetivo fijadas en la creación, nunca tocadas por transiciones
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlannedDates {
    pub warehouse_arrival: Option<DateTime<Utc>>,
    pub warehouse_dispatch: Option<DateTime<Utc>>,
    pub client_delivery: Option<DateTime<Utc>>,
}

/// Fechas reales de los tres hitos principales
///
/// Cada campo lo escribe exactamente una transición de estado y
/// conserva el primer valor (una re-entrada nunca lo sobreescribe).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActualDates {
    pub warehouse_arrival: Option<DateTime<Utc>>,
    pub warehouse_dispatch: Option<DateTime<Utc>>,
    pub client_delivery: Option<DateTime<Utc>>,
}

/// Una fecha opcional por etapa, sobreescrita en cada (re-)entrada
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusDates {
    pub order_received: Option<DateTime<Utc>>,
    pub in_transit_to_warehouse: Option<DateTime<Utc>>,
    pub unloading: Option<DateTime<Utc>>,
    pub in_warehouse: Option<DateTime<Utc>>,
    pub transport_issued: Option<DateTime<Utc>>,
    pub loading: Option<DateTime<Utc>>,
    pub in_transit_to_destination: Option<DateTime<Utc>>,
    pub arrived: Option<DateTime<Utc>>,
}

impl StatusDates {
    /// Obtener la fecha registrada para una etapa
    pub fn get(&self, status: LoadStatus) -> Option<DateTime<Utc>> {
        match status {
            LoadStatus::OrderReceived => self.order_received,
            LoadStatus::InTransitToWarehouse => self.in_transit_to_warehouse,
            LoadStatus::Unloading => self.unloading,
            LoadStatus::InWarehouse => self.in_warehouse,
            LoadStatus::TransportIssued => self.transport_issued,
            LoadStatus::Loading => self.loading,
            LoadStatus::InTransitToDestination => self.in_transit_to_destination,
            LoadStatus::Arrived => self.arrived,
        }
    }

    /// Registrar (sobreescribir) la fecha de una etapa
    pub fn set(&mut self, status: LoadStatus, date: DateTime<Utc>) {
        let slot = match status {
            LoadStatus::OrderReceived => &mut self.order_received,
            LoadStatus::InTransitToWarehouse => &mut self.in_transit_to_warehouse,
            LoadStatus::Unloading => &mut self.unloading,
            LoadStatus::InWarehouse => &mut self.in_warehouse,
            LoadStatus::TransportIssued => &mut self.transport_issued,
            LoadStatus::Loading => &mut self.loading,
            LoadStatus::InTransitToDestination => &mut self.in_transit_to_destination,
            LoadStatus::Arrived => &mut self.arrived,
        };
        *slot = Some(date);
    }
}

/// Entrada del log de transiciones
///
/// `timestamp` es la hora del sistema en el momento de la llamada;
/// `user_entered_date` es la fecha efectiva indicada por el usuario.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineEntry {
    pub status: LoadStatus,
    pub timestamp: DateTime<Utc>,
    pub user_entered_date: Option<DateTime<Utc>>,
    pub notes: Option<String>,
}

/// Metadatos de almacén (canal lateral, fuera de la máquina de estados)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WarehouseInfo {
    pub pallet_location: Option<String>,
    pub incoming_date: Option<DateTime<Utc>>,
    pub notes: Option<String>,
}

/// Metadatos de transporte (canal lateral, fuera de la máquina de estados)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransportInfo {
    pub truck_id: Option<String>,
    pub driver_id: Option<String>,
    pub carrier: Option<String>,
    pub dispatch_date: Option<DateTime<Utc>>,
}

/// Código QR generado por un colaborador en la creación; opaco para el core
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BarcodeInfo {
    pub qr_code_data: Option<String>,
    pub barcode_id: Option<String>,
    pub generated_at: Option<DateTime<Utc>>,
}

/// Carga: la entidad única del sistema
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Load {
    pub id: Uuid,
    pub status: LoadStatus,
    pub sender: Party,
    pub receiver: Party,
    pub items: Vec<LoadItem>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub planned_dates: PlannedDates,
    #[serde(default)]
    pub actual_dates: ActualDates,
    /// Duplicado legacy de `actual_dates.client_delivery` (lo lee el cliente antiguo)
    pub actual_delivery_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub status_dates: StatusDates,
    pub timeline: Vec<TimelineEntry>,
    #[serde(default)]
    pub warehouse: WarehouseInfo,
    #[serde(default)]
    pub transport: TransportInfo,
    pub barcode: Option<BarcodeInfo>,
}

impl Load {
    /// Crear una carga nueva en `order_received` con su entrada inicial de timeline
    pub fn new(sender: Party, receiver: Party, items: Vec<LoadItem>) -> Self {
        let now = Utc::now();
        let mut status_dates = StatusDates::default();
        status_dates.set(LoadStatus::OrderReceived, now);

        Self {
            id: Uuid::new_v4(),
            status: LoadStatus::OrderReceived,
            sender,
            receiver,
            items,
            created_at: now,
            updated_at: now,
            planned_dates: PlannedDates::default(),
            actual_dates: ActualDates::default(),
            actual_delivery_date: None,
            status_dates,
            timeline: vec![TimelineEntry {
                status: LoadStatus::OrderReceived,
                timestamp: now,
                user_entered_date: Some(now),
                notes: Some("Order placed".to_string()),
            }],
            warehouse: WarehouseInfo::default(),
            transport: TransportInfo::default(),
            barcode: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_order_roundtrip() {
        for (i, status) in STAGE_ORDER.iter().enumerate() {
            assert_eq!(status.index(), i);
            assert_eq!(LoadStatus::parse(status.as_str()), Some(*status));
        }
        assert_eq!(LoadStatus::parse("delivered"), None);
    }

    #[test]
    fn test_adjacency() {
        assert!(LoadStatus::Unloading.is_adjacent(LoadStatus::InWarehouse));
        assert!(LoadStatus::Unloading.is_adjacent(LoadStatus::InTransitToWarehouse));
        assert!(!LoadStatus::Unloading.is_adjacent(LoadStatus::Loading));
        assert!(!LoadStatus::Unloading.is_adjacent(LoadStatus::Unloading));
        assert_eq!(LoadStatus::Arrived.next(), None);
        assert_eq!(LoadStatus::OrderReceived.previous(), None);
    }

    #[test]
    fn test_new_load_seeds_timeline() {
        let load = Load::new(
            Party {
                company: "Alpha Corp".into(),
                address: "123 Main St".into(),
                contact: "John".into(),
            },
            Party {
                company: "Beta Inc".into(),
                address: "456 Oak Ave".into(),
                contact: "Jane".into(),
            },
            vec![LoadItem { description: "Electronics".into(), quantity: 50 }],
        );

        assert_eq!(load.status, LoadStatus::OrderReceived);
        assert_eq!(load.timeline.len(), 1);
        assert_eq!(load.timeline[0].status, LoadStatus::OrderReceived);
        assert!(load.status_dates.order_received.is_some());
    }

    #[test]
    fn test_wire_format_is_camel_case() {
        let load = Load::new(
            Party { company: "A".into(), address: "B".into(), contact: "C".into() },
            Party { company: "D".into(), address: "E".into(), contact: "F".into() },
            vec![],
        );

        let json = serde_json::to_value(&load).unwrap();
        assert_eq!(json["status"], "order_received");
        assert!(json.get("createdAt").is_some());
        assert!(json.get("plannedDates").is_some());
        assert!(json["plannedDates"].get("warehouseArrival").is_some());
    }
}
