use std::collections::HashMap;

use serde::Serialize;

use wayphrase_core::errors::GenerationError;
use wayphrase_core::ids::PlaceId;
use wayphrase_core::phrase::Phrase;

/// Per-place result of one generation call. A failed place is a value
/// here, never a propagating error, so one failure cannot cancel sibling
/// calls.
#[derive(Clone, Debug)]
pub enum PlaceResult {
    Success { id: PlaceId, phrases: Vec<Phrase> },
    Failure {
        id: PlaceId,
        name: String,
        reason: GenerationError,
    },
}

/// A failed place, reduced to what the display layer needs.
#[derive(Clone, Debug, Serialize)]
pub struct PlaceFailure {
    pub id: PlaceId,
    pub name: String,
    pub message: String,
}

/// Merged output of a settled batch. `phrases` holds only successes;
/// failed places are omitted entirely, never mapped to an empty list.
#[derive(Clone, Debug, Default, Serialize)]
pub struct BatchOutcome {
    pub phrases: HashMap<PlaceId, Vec<Phrase>>,
    pub failures: Vec<PlaceFailure>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl BatchOutcome {
    /// Fold settled per-place results into the merged outcome.
    pub fn from_results(results: Vec<PlaceResult>) -> Self {
        let mut phrases = HashMap::new();
        let mut failures = Vec::new();

        for result in results {
            match result {
                PlaceResult::Success { id, phrases: p } => {
                    phrases.insert(id, p);
                }
                PlaceResult::Failure { id, name, reason } => {
                    failures.push(PlaceFailure {
                        id,
                        name,
                        message: reason.user_message().to_string(),
                    });
                }
            }
        }

        let error = compose_aggregate(&failures);
        Self {
            phrases,
            failures,
            error,
        }
    }
}

/// Build the single user-visible error line for a batch: every failed place's
/// quoted name, then one concrete detail. The detail is the last observed
/// failure's message; when none of the failures carried one, a generic retry
/// ask stands in.
pub fn compose_aggregate(failures: &[PlaceFailure]) -> Option<String> {
    if failures.is_empty() {
        return None;
    }

    let names = failures
        .iter()
        .map(|f| format!("'{}'", f.name))
        .collect::<Vec<_>>()
        .join(", ");

    let mut message = format!("{names} 장소의 표현 생성에 실패했습니다. ");
    match failures.iter().rev().find(|f| !f.message.is_empty()) {
        Some(failure) => message.push_str(&failure.message),
        None => message.push_str("다시 시도해 주세요."),
    }
    Some(message)
}
