//! services/timeline_service.rs
//! Convierte el estado actual de un estudio en el timeline de etapas
//! (completadas / pendientes) que muestra el dashboard.

use crate::error::StudyResult;
use crate::models::stage_model::Stage;
use crate::models::study_model::StatusRecord;
use crate::models::timeline_model::TimelineEntry;

/// Valida un estado crudo. Cualquier valor fuera de las cinco etapas es
/// `UnknownStatus`; nunca se interpreta como "ninguna completada".
pub fn parse_status(raw: &str) -> StudyResult<Stage> {
    raw.parse()
}

/// Una entrada por etapa, en orden fijo. Completada si su posición es
/// menor o igual a la del estado actual; sólo la etapa actual lleva timestamp.
pub fn derive_timeline(current_status: Stage, current_timestamp: &str) -> Vec<TimelineEntry> {
    let current_position = current_status.position();

    Stage::ALL
        .into_iter()
        .map(|stage| TimelineEntry {
            status: stage,
            label: stage.label().to_string(),
            timestamp: if stage == current_status {
                current_timestamp.to_string()
            } else {
                String::new()
            },
            completed: stage.position() <= current_position,
        })
        .collect()
}

/// Igual que `derive_timeline`, pero rellena el timestamp de cada etapa
/// completada con el primer evento que el historial tenga para ella.
///
/// Las etapas pendientes nunca reciben timestamp, aunque el historial traiga
/// un evento suelto para ellas.
pub fn derive_timeline_from_history(
    current: &StatusRecord,
    history: &[StatusRecord],
) -> Vec<TimelineEntry> {
    let mut timeline = derive_timeline(current.status, &current.timestamp);

    for entry in timeline.iter_mut() {
        if !entry.completed || entry.status == current.status {
            continue;
        }

        if let Some(event) = history
            .iter()
            .filter(|event| event.status == entry.status)
            .min_by(|a, b| a.timestamp.cmp(&b.timestamp))
        {
            entry.timestamp = event.timestamp.clone();
        }
    }

    timeline
}
