//! models/study_model.rs
//! Registro de estado de un estudio y respuestas del endpoint de consulta.

use serde::{Deserialize, Serialize};

use crate::error::StudyStatusError;
use crate::models::stage_model::Stage;
use crate::models::statistics_model::StatisticsSnapshot;
use crate::models::timeline_model::TimelineEntry;
use crate::services::timeline_service::parse_status;

/// Último estado conocido de un estudio.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusRecord {
    pub status: Stage,
    pub timestamp: String, // ISO-8601
}

/// Fila cruda de `study_status`, antes de validar la etapa
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct StatusRow {
    pub status: String,
    pub timestamp: String,
}

impl TryFrom<StatusRow> for StatusRecord {
    type Error = StudyStatusError;

    fn try_from(row: StatusRow) -> Result<Self, Self::Error> {
        Ok(StatusRecord {
            status: parse_status(&row.status)?,
            timestamp: row.timestamp,
        })
    }
}

/// Respuesta de `/api/study-status`. `status` es null si el estudio
/// todavía no tiene ningún evento registrado.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: Option<StatusRecord>,
    pub statistics: StatisticsSnapshot,
}

/// Vista del dashboard para `/token/{token}`.
///
/// `timeline` es null cuando no hay registro de estado (el timeline se oculta).
/// El token se devuelve tal cual para que el cliente descarte respuestas
/// que ya no corresponden a su búsqueda activa.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardView {
    pub token: String,
    pub status: Option<StatusRecord>,
    pub timeline: Option<Vec<TimelineEntry>>,
    pub statistics: StatisticsSnapshot,
}
