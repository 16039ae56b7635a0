//! Repositorios de acceso a datos
//!
//! Este módulo define el contrato `LoadRepository` y sus dos
//! implementaciones: PostgreSQL como document store y una versión
//! en memoria para tests y para el arranque sin base de datos.

pub mod load_repository;
pub mod memory_load_repository;
pub mod pg_load_repository;

pub use load_repository::LoadRepository;
pub use memory_load_repository::MemoryLoadRepository;
pub use pg_load_repository::PgLoadRepository;
