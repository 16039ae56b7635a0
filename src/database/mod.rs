//! Módulo de base de datos
//!
//! Maneja la conexión y el esquema de PostgreSQL.

pub mod connection;

pub use connection::{ensure_schema, mask_database_url};
