use serde::{Deserialize, Serialize};

use crate::models::stage_model::Stage;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineEntry {
    pub status: Stage,
    pub label: String,
    pub timestamp: String, // vacío si no se conoce
    pub completed: bool,
}
