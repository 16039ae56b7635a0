//! Servicios del sistema
//!
//! Este módulo contiene la lógica de negocio: la máquina de estados
//! del pipeline y el motor de clasificación por fechas.

pub mod calendar;
pub mod status_flow;
