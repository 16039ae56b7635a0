//! Modelos de datos del sistema
//!
//! Este módulo contiene el modelo de datos de las cargas (loads)
//! y el enum de estados del pipeline logístico.

pub mod load;

pub use load::*;
