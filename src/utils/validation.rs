//! Utilidades de validación
//!
//! Este módulo contiene funciones helper para validación de datos
//! y conversión de fechas recibidas como string.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use uuid::Uuid;
use validator::ValidationError;

use crate::models::LoadStatus;

/// Validar y convertir string a UUID
pub fn validate_uuid(value: &str) -> Result<Uuid, ValidationError> {
    Uuid::parse_str(value).map_err(|_| {
        let mut error = ValidationError::new("uuid");
        error.add_param("value".into(), &value.to_string());
        error
    })
}

/// Validar y convertir string a fecha (YYYY-MM-DD)
pub fn validate_date(value: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        let mut error = ValidationError::new("date");
        error.add_param("value".into(), &value.to_string());
        error.add_param("format".into(), &"YYYY-MM-DD".to_string());
        error
    })
}

/// Validar y convertir string a datetime RFC3339
pub fn validate_datetime(value: &str) -> Result<DateTime<Utc>, ValidationError> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| {
            let mut error = ValidationError::new("datetime");
            error.add_param("value".into(), &value.to_string());
            error.add_param("format".into(), &"RFC3339".to_string());
            error
        })
}

/// Parsear una fecha flexible: RFC3339 o fecha simple YYYY-MM-DD
///
/// Los formularios del cliente envían fechas simples (inputs `type=date`);
/// una fecha simple se interpreta como medianoche UTC de ese día.
pub fn parse_flexible_date(value: &str) -> Result<DateTime<Utc>, ValidationError> {
    if let Ok(dt) = validate_datetime(value) {
        return Ok(dt);
    }
    let date = validate_date(value)?;
    Ok(Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0).unwrap()))
}

/// Validar y convertir una clave de estado del pipeline
pub fn validate_status(value: &str) -> Result<LoadStatus, ValidationError> {
    LoadStatus::parse(value).ok_or_else(|| {
        let mut error = ValidationError::new("status");
        error.add_param("value".into(), &value.to_string());
        error.add_param(
            "allowed_values".into(),
            &"order_received..arrived (8 stage keys)".to_string(),
        );
        error
    })
}

/// Validar que un string no esté vacío
pub fn validate_not_empty(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("not_empty");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}
