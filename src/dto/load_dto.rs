//! DTOs de cargas
//!
//! Requests de la API de cargas y responses de las vistas de calendario
//! y tablero. Las fechas llegan como string porque el cliente mezcla
//! fechas simples (inputs `type=date`) y timestamps RFC3339.

use serde::{Deserialize, Serialize};

use crate::models::{BarcodeInfo, Load, LoadItem, LoadStatus, Party};

/// Request para crear una carga
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLoadRequest {
    pub sender: Party,
    pub receiver: Party,
    pub items: Vec<LoadItem>,
    /// Fecha objetivo de entrada al almacén (alias legacy `incomingDate`)
    #[serde(alias = "incomingDate")]
    pub warehouse_arrival_date: Option<String>,
    /// Fecha objetivo de despacho del almacén
    pub warehouse_dispatch_date: Option<String>,
    /// Fecha objetivo de entrega al cliente (alias legacy `expectedDeliveryDate`)
    #[serde(alias = "expectedDeliveryDate")]
    pub client_delivery_date: Option<String>,
    pub warehouse: Option<WarehouseRequest>,
    pub transport: Option<TransportRequest>,
    /// Código QR generado por el colaborador de intake; opaco para el core
    pub barcode: Option<BarcodeInfo>,
}

/// Request para crear una carga a partir de un fichero ya parseado
///
/// El parseo del fichero es un colaborador externo: aquí solo llegan los
/// campos extraídos más el nombre del fichero de origen.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLoadFromFileRequest {
    pub file_name: Option<String>,
    #[serde(flatten)]
    pub load: CreateLoadRequest,
}

/// Request para transicionar el estado de una carga
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStatusRequest {
    pub status: String,
    pub notes: Option<String>,
    /// Fecha efectiva indicada por el usuario (alias legacy `userEnteredDate`)
    #[serde(alias = "userEnteredDate")]
    pub actual_date: Option<String>,
}

/// Request para actualizar los metadatos de almacén
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateWarehouseRequest {
    pub pallet_location: Option<String>,
    pub warehouse_notes: Option<String>,
    pub incoming_date: Option<String>,
}

/// Request para actualizar los metadatos de transporte
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTransportRequest {
    pub truck_id: Option<String>,
    pub driver_id: Option<String>,
    pub carrier: Option<String>,
    pub dispatch_date: Option<String>,
}

/// Metadatos de almacén dentro del request de creación
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WarehouseRequest {
    pub pallet_location: Option<String>,
    pub incoming_date: Option<String>,
    pub notes: Option<String>,
}

/// Metadatos de transporte dentro del request de creación
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransportRequest {
    pub truck_id: Option<String>,
    pub driver_id: Option<String>,
    pub carrier: Option<String>,
    pub dispatch_date: Option<String>,
}

/// Celda IN/OUT del calendario mensual para un día
#[derive(Debug, Serialize)]
pub struct CalendarDayResponse {
    #[serde(rename = "in")]
    pub incoming: Vec<Load>,
    #[serde(rename = "out")]
    pub outgoing: Vec<Load>,
}

/// Columna del tablero por estado para un día
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardColumn {
    pub status: LoadStatus,
    pub loads: Vec<Load>,
}
