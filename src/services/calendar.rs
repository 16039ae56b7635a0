//! Motor de clasificación por fechas (bucketing)
//!
//! Funciones puras, de solo lectura, que deciden en qué celda del
//! calendario o columna del tablero aparece una carga para un día de
//! referencia. Una fecha ausente hace que la regla evalúe a falso;
//! nunca es un error. El marco de referencia para normalizar es UTC.

use chrono::{DateTime, NaiveDate, Utc};

use crate::models::{Load, LoadStatus, STAGE_ORDER};

/// Truncar un timestamp a su día de calendario (UTC)
pub fn normalize_to_day(timestamp: DateTime<Utc>) -> NaiveDate {
    timestamp.date_naive()
}

/// Pertenencia a un intervalo de días, inclusivo en `start`
///
/// Sin `end`, cualquier día `>= start` pertenece; con `end`, pertenece
/// si `start <= day <= end`.
pub fn is_between(day: NaiveDate, start: NaiveDate, end: Option<NaiveDate>) -> bool {
    match end {
        Some(end) => start <= day && day <= end,
        None => day >= start,
    }
}

/// Día registrado para una etapa: `status_dates` primero, con fallback al
/// timeline (documentos antiguos sin `status_dates`)
pub fn status_day(load: &Load, status: LoadStatus) -> Option<NaiveDate> {
    if let Some(date) = load.status_dates.get(status) {
        return Some(normalize_to_day(date));
    }
    load.timeline
        .iter()
        .rev()
        .find(|entry| entry.status == status)
        .map(|entry| normalize_to_day(entry.user_entered_date.unwrap_or(entry.timestamp)))
}

/// Día de carga (loading), con la cadena de fallbacks del tablero:
/// fecha de etapa, fecha de despacho del transporte, despacho planificado
fn loading_day(load: &Load) -> Option<NaiveDate> {
    status_day(load, LoadStatus::Loading)
        .or_else(|| load.transport.dispatch_date.map(normalize_to_day))
        .or_else(|| load.planned_dates.warehouse_dispatch.map(normalize_to_day))
}

/// Día de llegada al destino final
fn arrival_day(load: &Load) -> Option<NaiveDate> {
    status_day(load, LoadStatus::Arrived)
        .or_else(|| load.actual_delivery_date.map(normalize_to_day))
}

/// ¿Pertenece la carga a la columna `column` para el día `day`?
///
/// Una carga solo se evalúa contra la regla de su estado actual: una
/// carga `in_warehouse` nunca aparece bajo `loading` aunque alguna fecha
/// coincida.
pub fn matches_status_column(load: &Load, column: LoadStatus, day: NaiveDate) -> bool {
    if load.status != column {
        return false;
    }

    match column {
        LoadStatus::OrderReceived => normalize_to_day(load.created_at) == day,

        LoadStatus::InTransitToWarehouse => {
            let start = status_day(load, LoadStatus::InTransitToWarehouse)
                .unwrap_or_else(|| normalize_to_day(load.created_at));
            is_between(day, start, status_day(load, LoadStatus::Unloading))
        }

        // Evento de un solo día
        LoadStatus::Unloading => status_day(load, LoadStatus::Unloading) == Some(day),

        LoadStatus::InWarehouse => {
            let start = status_day(load, LoadStatus::InWarehouse)
                .or_else(|| load.actual_dates.warehouse_arrival.map(normalize_to_day))
                .or_else(|| load.warehouse.incoming_date.map(normalize_to_day));
            match start {
                Some(start) => is_between(day, start, status_day(load, LoadStatus::TransportIssued)),
                None => false,
            }
        }

        LoadStatus::TransportIssued => {
            match status_day(load, LoadStatus::TransportIssued) {
                Some(start) => is_between(day, start, status_day(load, LoadStatus::Loading)),
                None => false,
            }
        }

        // Evento de un solo día
        LoadStatus::Loading => loading_day(load) == Some(day),

        LoadStatus::InTransitToDestination => {
            let start = status_day(load, LoadStatus::InTransitToDestination)
                .or_else(|| loading_day(load));
            match start {
                // El día de llegada pertenece a 'arrived', no al tránsito
                Some(start) => match arrival_day(load) {
                    Some(arrival) => start <= day && day < arrival,
                    None => day >= start,
                },
                None => false,
            }
        }

        LoadStatus::Arrived => arrival_day(load) == Some(day),
    }
}

/// Agrupar cargas por columna de estado para un día de referencia
pub fn board_for_day<'a>(loads: &'a [Load], day: NaiveDate) -> Vec<(LoadStatus, Vec<&'a Load>)> {
    STAGE_ORDER
        .iter()
        .map(|status| {
            let column = loads
                .iter()
                .filter(|load| matches_status_column(load, *status, day))
                .collect();
            (*status, column)
        })
        .collect()
}

fn falls_on(date: Option<DateTime<Utc>>, day: NaiveDate) -> bool {
    date.map(normalize_to_day) == Some(day)
}

/// ¿Entra la carga (IN) el día `day`? Vista gruesa del calendario mensual
pub fn is_incoming_on(load: &Load, day: NaiveDate) -> bool {
    falls_on(load.warehouse.incoming_date, day)
        || falls_on(load.planned_dates.warehouse_arrival, day)
        || falls_on(load.planned_dates.client_delivery, day)
}

/// ¿Sale la carga (OUT) el día `day`?
pub fn is_outgoing_on(load: &Load, day: NaiveDate) -> bool {
    falls_on(load.transport.dispatch_date, day)
        || (load.status == LoadStatus::Loading && falls_on(Some(load.created_at), day))
}

/// Filtro grueso por día para `GET /loads/date/:date`: cualquiera de las
/// fechas relevantes de la carga cae en el día
pub fn matches_any_date(load: &Load, day: NaiveDate) -> bool {
    falls_on(load.warehouse.incoming_date, day)
        || falls_on(load.planned_dates.warehouse_arrival, day)
        || falls_on(load.planned_dates.client_delivery, day)
        || falls_on(load.transport.dispatch_date, day)
        || falls_on(Some(load.created_at), day)
}
