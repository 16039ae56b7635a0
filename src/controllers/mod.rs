//! Controladores de la API
//!
//! Este módulo contiene la orquestación entre rutas, validación,
//! servicios y repositorio.

pub mod load_controller;

pub use load_controller::LoadController;
