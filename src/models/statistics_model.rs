//! models/statistics_model.rs
//! Estadísticas agregadas sobre la ventana de tiempo configurada.

use serde::{Deserialize, Serialize};

/// Snapshot que se envía al cliente (minutos y porcentaje).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatisticsSnapshot {
    pub average_wait_time: i64,
    pub estimated_queue_time: i64,
    pub total_processed: i64,
    pub success_rate: f64, // 0-100
}

/// Resultado crudo de la agregación en la base de datos.
/// Cualquier campo puede venir NULL si no hubo eventos en la ventana.
#[derive(Debug, Clone, Default, sqlx::FromRow)]
pub struct AggregateStatisticsRow {
    pub avg_wait_time: Option<f64>,
    pub total_processed: Option<i64>,
    pub success_rate: Option<f64>,
}
