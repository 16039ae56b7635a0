//! Utilidades del sistema
//!
//! Este módulo contiene utilidades para manejo de errores,
//! validación y conversión de fechas.

pub mod errors;
pub mod validation;
