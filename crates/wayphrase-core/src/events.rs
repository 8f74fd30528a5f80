use serde::{Deserialize, Serialize};

use crate::ids::{BatchId, PlaceId};
use crate::place::Place;

/// State-transition events emitted by the application controller.
/// Host surfaces subscribe to these instead of polling state.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum StateEvent {
    #[serde(rename = "place_added")]
    PlaceAdded { place: Place },

    #[serde(rename = "place_removed")]
    PlaceRemoved { place_id: PlaceId },

    #[serde(rename = "credential_set")]
    CredentialSet,

    #[serde(rename = "batch_started")]
    BatchStarted { batch_id: BatchId, place_count: usize },

    #[serde(rename = "batch_finished")]
    BatchFinished {
        batch_id: BatchId,
        succeeded: usize,
        failed: usize,
        #[serde(skip_serializing_if = "Option::is_none")]
        error: Option<String>,
        duration_ms: u64,
    },
}

impl StateEvent {
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::PlaceAdded { .. } => "place_added",
            Self::PlaceRemoved { .. } => "place_removed",
            Self::CredentialSet => "credential_set",
            Self::BatchStarted { .. } => "batch_started",
            Self::BatchFinished { .. } => "batch_finished",
        }
    }
}
