//! models/mod.rs
//! Módulo raíz para modelos/estructuras compartidas.

pub mod stage_model;
pub mod statistics_model;
pub mod study_model;
pub mod timeline_model;
