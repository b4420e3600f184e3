//! services/mod.rs
//! Capa de negocio: timeline, consulta de estado y acceso a datos.

pub mod status_service;
pub mod study_store;
pub mod timeline_service;
