//! services/status_service.rs
//! Resuelve un token a su último estado + estadísticas agregadas.

use crate::error::{StudyResult, StudyStatusError};
use crate::models::statistics_model::{AggregateStatisticsRow, StatisticsSnapshot};
use crate::models::study_model::{DashboardView, StatusResponse};
use crate::services::study_store::StudyStore;
use crate::services::timeline_service::derive_timeline_from_history;

/// Fracción del tiempo de espera promedio que se estima como cola.
pub const QUEUE_TIME_FACTOR: f64 = 0.8;

#[derive(Clone, Debug)]
pub struct StatusService {
    store: StudyStore,
    statistics_window_hours: u32,
}

impl StatusService {
    pub fn new(store: StudyStore, statistics_window_hours: u32) -> Self {
        StatusService {
            store,
            statistics_window_hours,
        }
    }

    /// Último estado del token (o null) y estadísticas de la ventana.
    /// "No encontrado" no es un error.
    pub async fn resolve_status(&self, token: &str) -> StudyResult<StatusResponse> {
        validate_token(token)?;

        let status = self.store.latest_status(token).await?;
        if status.is_none() {
            log::debug!("Sin registro de estado para token {}", token);
        }

        let statistics = self.statistics().await?;
        Ok(StatusResponse { status, statistics })
    }

    /// Lo mismo que `resolve_status` más el timeline armado con el historial
    /// de eventos. Sin registro de estado el timeline es None.
    pub async fn dashboard(&self, token: &str) -> StudyResult<DashboardView> {
        validate_token(token)?;

        let status = self.store.latest_status(token).await?;
        let timeline = match &status {
            Some(current) => {
                let history = self.store.status_history(token).await?;
                Some(derive_timeline_from_history(current, &history))
            }
            None => None,
        };

        let statistics = self.statistics().await?;
        Ok(DashboardView {
            token: token.to_string(),
            status,
            timeline,
            statistics,
        })
    }

    async fn statistics(&self) -> StudyResult<StatisticsSnapshot> {
        let row = self
            .store
            .aggregate_statistics(self.statistics_window_hours)
            .await?;
        Ok(build_snapshot(row))
    }
}

fn validate_token(token: &str) -> StudyResult<()> {
    if token.is_empty() {
        return Err(StudyStatusError::InvalidRequest);
    }
    Ok(())
}

/// Aplica redondeos y defaults en cero sobre el resultado de la agregación.
pub fn build_snapshot(row: Option<AggregateStatisticsRow>) -> StatisticsSnapshot {
    let row = row.unwrap_or_default();
    let avg_wait_time = row.avg_wait_time.unwrap_or(0.0);

    StatisticsSnapshot {
        average_wait_time: avg_wait_time.round() as i64,
        estimated_queue_time: (avg_wait_time * QUEUE_TIME_FACTOR).round() as i64,
        total_processed: row.total_processed.unwrap_or(0),
        success_rate: (row.success_rate.unwrap_or(0.0) * 100.0).round() / 100.0,
    }
}
