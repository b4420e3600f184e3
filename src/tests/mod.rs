//! tests/mod.rs
//! Pruebas unitarias y de integración (HTTP + SQLite en memoria).

mod handler_tests;

use chrono::{DateTime, Duration, Utc};

use crate::models::stage_model::Stage;
use crate::services::study_store::StudyStore;

/// Store sobre SQLite en memoria con las migraciones aplicadas.
/// Una sola conexión: cada conexión en memoria es una base distinta.
pub(crate) async fn memory_store() -> StudyStore {
    let store = StudyStore::connect("sqlite::memory:", 1)
        .await
        .expect("Failed to open in-memory SQLite");
    store.run_migrations().await.expect("Failed to run migrations");
    store
}

/// Registra todas las etapas hasta `last_stage`, cada una `step_minutes`
/// después de la anterior, terminando en `last_at`.
pub(crate) async fn record_progress(
    store: &StudyStore,
    token: &str,
    last_stage: Stage,
    last_at: DateTime<Utc>,
    step_minutes: i64,
) {
    let steps = last_stage.position();
    for stage in Stage::ALL.into_iter().take(steps + 1) {
        let offset = (steps - stage.position()) as i64 * step_minutes;
        store
            .record_status(token, stage, last_at - Duration::minutes(offset))
            .await
            .expect("Failed to record status");
    }
}
