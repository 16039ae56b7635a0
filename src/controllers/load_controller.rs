//! Controlador de cargas
//!
//! Valida los requests, construye la entidad y orquesta el repositorio
//! con los servicios de estado y calendario. Las consultas por fecha
//! trabajan sobre un snapshot en memoria: una sola lectura del
//! repositorio y después solo funciones puras.

use chrono::{DateTime, NaiveDate, Utc};
use std::sync::Arc;
use uuid::Uuid;

use crate::dto::load_dto::{
    BoardColumn, CalendarDayResponse, CreateLoadFromFileRequest, CreateLoadRequest,
    UpdateStatusRequest, UpdateTransportRequest, UpdateWarehouseRequest,
};
use crate::models::{Load, LoadStatus};
use crate::repositories::LoadRepository;
use crate::services::calendar;
use crate::utils::errors::{not_found_error, validation_error, AppError, AppResult};
use crate::utils::validation::{parse_flexible_date, validate_date, validate_not_empty, validate_status};

pub struct LoadController {
    repository: Arc<dyn LoadRepository>,
}

impl LoadController {
    pub fn new(repository: Arc<dyn LoadRepository>) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<Load>> {
        self.repository.find_all().await
    }

    pub async fn list_by_status(&self, status: &str) -> AppResult<Vec<Load>> {
        let status = parse_status(status)?;
        self.repository.find_by_status(status).await
    }

    /// Filtro grueso por día: cualquiera de las fechas relevantes de la
    /// carga cae en el día pedido
    pub async fn list_by_date(&self, date: &str) -> AppResult<Vec<Load>> {
        let day = parse_day(date)?;
        let loads = self.repository.find_all().await?;
        Ok(loads
            .into_iter()
            .filter(|load| calendar::matches_any_date(load, day))
            .collect())
    }

    /// Celda IN/OUT del calendario mensual para un día
    pub async fn calendar_for_date(&self, date: &str) -> AppResult<CalendarDayResponse> {
        let day = parse_day(date)?;
        let loads = self.repository.find_all().await?;

        let incoming = loads
            .iter()
            .filter(|load| calendar::is_incoming_on(load, day))
            .cloned()
            .collect();
        let outgoing = loads
            .iter()
            .filter(|load| calendar::is_outgoing_on(load, day))
            .cloned()
            .collect();

        Ok(CalendarDayResponse { incoming, outgoing })
    }

    /// Tablero por columnas de estado para un día
    pub async fn board_for_date(&self, date: &str) -> AppResult<Vec<BoardColumn>> {
        let day = parse_day(date)?;
        let loads = self.repository.find_all().await?;

        Ok(calendar::board_for_day(&loads, day)
            .into_iter()
            .map(|(status, column)| BoardColumn {
                status,
                loads: column.into_iter().cloned().collect(),
            })
            .collect())
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<Load> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Load", &id.to_string()))
    }

    pub async fn create(&self, request: CreateLoadRequest) -> AppResult<Load> {
        let load = build_load(request, None)?;
        self.repository.create(load).await
    }

    /// Crear una carga a partir de un fichero ya parseado por el
    /// colaborador de intake
    pub async fn create_from_file(&self, request: CreateLoadFromFileRequest) -> AppResult<Load> {
        let note = request
            .file_name
            .map(|name| format!("Created from file upload: {}", name));
        let load = build_load(request.load, note)?;
        self.repository.create(load).await
    }

    pub async fn update_status(&self, id: Uuid, request: UpdateStatusRequest) -> AppResult<Load> {
        let target = parse_status(&request.status)?;
        let effective_date = parse_optional_date(request.actual_date.as_deref())?;
        self.repository
            .apply_transition(id, target, effective_date, request.notes)
            .await
    }

    /// Atajo del cliente para marcar la entrega; sigue sujeto a la
    /// política de adyacencia
    pub async fn mark_as_delivered(&self, id: Uuid) -> AppResult<Load> {
        self.repository
            .apply_transition(
                id,
                LoadStatus::Arrived,
                None,
                Some("Load delivered to final destination".to_string()),
            )
            .await
    }

    pub async fn update_warehouse(&self, id: Uuid, request: UpdateWarehouseRequest) -> AppResult<Load> {
        let mut load = self.get_by_id(id).await?;
        let now = Utc::now();

        if let Some(pallet_location) = request.pallet_location {
            load.warehouse.pallet_location = Some(pallet_location);
        }
        if let Some(notes) = request.warehouse_notes {
            load.warehouse.notes = Some(notes);
        }
        // Sin fecha en el request, la entrada al almacén se fecha ahora
        load.warehouse.incoming_date =
            Some(parse_optional_date(request.incoming_date.as_deref())?.unwrap_or(now));
        load.updated_at = now;

        self.repository.update(load).await
    }

    pub async fn update_transport(&self, id: Uuid, request: UpdateTransportRequest) -> AppResult<Load> {
        let mut load = self.get_by_id(id).await?;

        if let Some(truck_id) = request.truck_id {
            load.transport.truck_id = Some(truck_id);
        }
        if let Some(driver_id) = request.driver_id {
            load.transport.driver_id = Some(driver_id);
        }
        if let Some(carrier) = request.carrier {
            load.transport.carrier = Some(carrier);
        }
        if let Some(dispatch_date) = parse_optional_date(request.dispatch_date.as_deref())? {
            load.transport.dispatch_date = Some(dispatch_date);
        }
        load.updated_at = Utc::now();

        self.repository.update(load).await
    }
}

/// Validar el payload de creación y construir la entidad
fn build_load(request: CreateLoadRequest, seed_note: Option<String>) -> AppResult<Load> {
    validate_party("sender", &request.sender)?;
    validate_party("receiver", &request.receiver)?;
    if request.items.is_empty() {
        return Err(validation_error("items", "at least one item is required"));
    }
    for item in &request.items {
        if item.description.trim().is_empty() {
            return Err(validation_error("items", "item description is required"));
        }
    }

    let mut load = Load::new(request.sender, request.receiver, request.items);

    load.planned_dates.warehouse_arrival =
        parse_optional_date(request.warehouse_arrival_date.as_deref())?;
    load.planned_dates.warehouse_dispatch =
        parse_optional_date(request.warehouse_dispatch_date.as_deref())?;
    load.planned_dates.client_delivery =
        parse_optional_date(request.client_delivery_date.as_deref())?;

    if let Some(warehouse) = request.warehouse {
        load.warehouse.pallet_location = warehouse.pallet_location;
        load.warehouse.incoming_date = parse_optional_date(warehouse.incoming_date.as_deref())?;
        load.warehouse.notes = warehouse.notes;
    }
    if let Some(transport) = request.transport {
        load.transport.truck_id = transport.truck_id;
        load.transport.driver_id = transport.driver_id;
        load.transport.carrier = transport.carrier;
        load.transport.dispatch_date = parse_optional_date(transport.dispatch_date.as_deref())?;
    }
    load.barcode = request.barcode;

    if let Some(note) = seed_note {
        if let Some(entry) = load.timeline.first_mut() {
            entry.notes = Some(note);
        }
    }

    Ok(load)
}

fn validate_party(field: &'static str, party: &crate::models::Party) -> AppResult<()> {
    validate_not_empty(&party.company)
        .and_then(|_| validate_not_empty(&party.address))
        .and_then(|_| validate_not_empty(&party.contact))
        .map_err(|_| validation_error(field, "company, address and contact are required"))
}

fn parse_status(value: &str) -> AppResult<LoadStatus> {
    validate_status(value).map_err(|e| {
        let mut errors = validator::ValidationErrors::new();
        errors.add("status", e);
        AppError::Validation(errors)
    })
}

fn parse_day(value: &str) -> AppResult<NaiveDate> {
    validate_date(value).map_err(|e| {
        let mut errors = validator::ValidationErrors::new();
        errors.add("date", e);
        AppError::Validation(errors)
    })
}

fn parse_optional_date(value: Option<&str>) -> AppResult<Option<DateTime<Utc>>> {
    value
        .map(|raw| {
            parse_flexible_date(raw).map_err(|e| {
                let mut errors = validator::ValidationErrors::new();
                errors.add("date", e);
                AppError::Validation(errors)
            })
        })
        .transpose()
}
