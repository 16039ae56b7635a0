//! Load Tracking - seguimiento de cargas por el pipeline logístico
//!
//! El core es la máquina de estados de 8 etapas (`services::status_flow`)
//! y el motor de clasificación por fechas (`services::calendar`); el resto
//! es la API HTTP y la persistencia alrededor.

pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;
