//! Máquina de estados del pipeline de cargas
//!
//! Aplica transiciones entre etapas adyacentes y registra las fechas de
//! hito asociadas. La política de adyacencia es estricta: solo se permite
//! pasar a la etapa inmediatamente siguiente o anterior; re-entrar a la
//! misma etapa también se rechaza. Retroceder y volver a avanzar produce
//! entradas duplicadas en el timeline (el log nunca se trunca).

use chrono::{DateTime, Utc};

use crate::models::{Load, LoadStatus, TimelineEntry};
use crate::utils::errors::{AppError, AppResult};

/// Aplicar una transición de estado a una carga
///
/// `effective_date` es la fecha efectiva indicada por el usuario; si no se
/// indica se usa la hora actual del sistema.
pub fn transition(
    load: &mut Load,
    target: LoadStatus,
    effective_date: Option<DateTime<Utc>>,
    notes: Option<String>,
) -> AppResult<()> {
    transition_at(load, target, effective_date, notes, Utc::now())
}

/// Variante con hora del sistema inyectada, para poder fijarla en tests
pub fn transition_at(
    load: &mut Load,
    target: LoadStatus,
    effective_date: Option<DateTime<Utc>>,
    notes: Option<String>,
    now: DateTime<Utc>,
) -> AppResult<()> {
    let current = load.status;
    if !current.is_adjacent(target) {
        return Err(AppError::InvalidTransition(format!(
            "cannot move from '{}' to '{}': only the immediate next or previous stage is allowed",
            current.as_str(),
            target.as_str()
        )));
    }

    let effective = effective_date.unwrap_or(now);

    load.status = target;
    load.timeline.push(TimelineEntry {
        status: target,
        timestamp: now,
        user_entered_date: Some(effective),
        notes,
    });
    load.status_dates.set(target, effective);
    record_milestone(load, target, effective);
    load.updated_at = now;

    Ok(())
}

/// Registrar el hito asociado a la etapa alcanzada
///
/// Cada campo de `actual_dates` conserva su primer valor: una re-entrada
/// posterior no lo sobreescribe.
fn record_milestone(load: &mut Load, target: LoadStatus, effective: DateTime<Utc>) {
    match target {
        LoadStatus::InWarehouse => {
            load.actual_dates.warehouse_arrival.get_or_insert(effective);
        }
        LoadStatus::Loading | LoadStatus::InTransitToDestination => {
            load.actual_dates.warehouse_dispatch.get_or_insert(effective);
        }
        LoadStatus::Arrived => {
            load.actual_dates.client_delivery.get_or_insert(effective);
            // Campo legacy que el cliente antiguo sigue leyendo
            load.actual_delivery_date.get_or_insert(effective);
        }
        _ => {}
    }
}
