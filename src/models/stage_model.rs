//! models/stage_model.rs
//! Las cinco etapas del pipeline, en orden fijo.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::StudyStatusError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    SendComplete,
    ReceivedCentral,
    SentToAi,
    AiProcessing,
    ResultsReceived,
}

impl Stage {
    /// Orden total del pipeline. La posición en este array es el rango.
    pub const ALL: [Stage; 5] = [
        Stage::SendComplete,
        Stage::ReceivedCentral,
        Stage::SentToAi,
        Stage::AiProcessing,
        Stage::ResultsReceived,
    ];

    pub fn position(self) -> usize {
        match self {
            Stage::SendComplete => 0,
            Stage::ReceivedCentral => 1,
            Stage::SentToAi => 2,
            Stage::AiProcessing => 3,
            Stage::ResultsReceived => 4,
        }
    }

    /// Nombre en el cable y en la tabla `study_status`
    pub fn as_str(self) -> &'static str {
        match self {
            Stage::SendComplete => "send_complete",
            Stage::ReceivedCentral => "received_central",
            Stage::SentToAi => "sent_to_ai",
            Stage::AiProcessing => "ai_processing",
            Stage::ResultsReceived => "results_received",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Stage::SendComplete => "Send Complete",
            Stage::ReceivedCentral => "Received at Central Server",
            Stage::SentToAi => "Sent to AI",
            Stage::AiProcessing => "AI Processing",
            Stage::ResultsReceived => "Results Received",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Stage {
    type Err = StudyStatusError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Stage::ALL
            .into_iter()
            .find(|stage| stage.as_str() == raw)
            .ok_or_else(|| StudyStatusError::UnknownStatus(raw.to_string()))
    }
}
