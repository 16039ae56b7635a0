//! DTOs de la API
//!
//! Este módulo contiene los requests y responses de la API HTTP.

pub mod load_dto;

pub use load_dto::*;
