use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use parking_lot::RwLock;
use serde::Serialize;
use tokio::sync::broadcast;
use tracing::{instrument, warn};

use wayphrase_core::errors::GenerationError;
use wayphrase_core::events::StateEvent;
use wayphrase_core::ids::{BatchId, PlaceId};
use wayphrase_core::phrase::Phrase;
use wayphrase_core::place::{Place, PlaceSeed};
use wayphrase_core::security::ApiKey;
use wayphrase_llm::prompt::PromptConfig;
use wayphrase_llm::{PhraseGenerator, TextGenProvider};

use crate::error::EngineError;
use crate::orchestrator::PhraseOrchestrator;

const INVALID_KEY_INPUT: &str = "유효한 API 키를 입력해주세요.";
const EVENT_CAPACITY: usize = 256;

/// Builds a provider from a freshly supplied credential. Injected so the
/// controller works against any backend, mock or real.
pub type ProviderFactory = Box<dyn Fn(ApiKey) -> Arc<dyn TextGenProvider> + Send + Sync>;

/// Renderable view of the application state. The credential itself never
/// appears here, only the fact that one is present.
#[derive(Clone, Debug, Default, Serialize)]
pub struct AppSnapshot {
    pub places: Vec<Place>,
    pub phrases: HashMap<PlaceId, Vec<Phrase>>,
    pub error: Option<String>,
    pub is_loading: bool,
    pub has_credential: bool,
}

/// Owns the selected places, the per-place phrase results, the credential
/// and the status flags, and mediates between host surfaces and the
/// orchestrator. All transitions are explicit methods; host surfaces render
/// from [`AppSnapshot`] and the event stream instead of reaching inside.
pub struct AppController {
    state: RwLock<AppSnapshot>,
    orchestrator: RwLock<Option<Arc<PhraseOrchestrator>>>,
    factory: ProviderFactory,
    prompt_config: PromptConfig,
    event_tx: broadcast::Sender<StateEvent>,
}

impl AppController {
    pub fn new(factory: ProviderFactory) -> Self {
        Self::with_prompt_config(factory, PromptConfig::default())
    }

    pub fn with_prompt_config(factory: ProviderFactory, prompt_config: PromptConfig) -> Self {
        let (event_tx, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            state: RwLock::new(AppSnapshot::default()),
            orchestrator: RwLock::new(None),
            factory,
            prompt_config,
            event_tx,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<StateEvent> {
        self.event_tx.subscribe()
    }

    pub fn snapshot(&self) -> AppSnapshot {
        self.state.read().clone()
    }

    fn send_event(&self, event: StateEvent) {
        if self.event_tx.send(event).is_err() {
            warn!("no event receivers — event dropped");
        }
    }

    /// Store the credential and rebuild the generation pipeline around it.
    /// An empty key is rejected and surfaced as a user-visible error.
    pub fn set_credential(&self, key: ApiKey) -> Result<(), EngineError> {
        if key.is_empty() {
            self.state.write().error = Some(INVALID_KEY_INPUT.to_string());
            return Err(GenerationError::MissingCredential.into());
        }

        let provider = (self.factory)(key);
        let generator = Arc::new(PhraseGenerator::with_config(
            provider,
            self.prompt_config.clone(),
        ));
        *self.orchestrator.write() = Some(Arc::new(PhraseOrchestrator::new(generator)));

        {
            let mut state = self.state.write();
            state.has_credential = true;
            state.error = None;
        }
        self.send_event(StateEvent::CredentialSet);
        Ok(())
    }

    /// Add a selection. Re-selecting an already-present coordinate is a
    /// no-op that returns the existing place. Either way the current error
    /// is cleared; a fresh selection restarts the flow.
    pub fn add_place(&self, seed: PlaceSeed) -> Place {
        let place = Place::from_seed(seed);

        let (added, place) = {
            let mut state = self.state.write();
            state.error = None;
            match state.places.iter().find(|p| p.id == place.id) {
                Some(existing) => (false, existing.clone()),
                None => {
                    state.places.push(place.clone());
                    (true, place)
                }
            }
        };

        if added {
            self.send_event(StateEvent::PlaceAdded {
                place: place.clone(),
            });
        }
        place
    }

    /// Remove a place and, in the same transition, its phrase entry. The
    /// phrase map's key set must stay a subset of the selected ids.
    pub fn remove_place(&self, id: &PlaceId) -> bool {
        let removed = {
            let mut state = self.state.write();
            let before = state.places.len();
            state.places.retain(|p| p.id != *id);
            state.phrases.remove(id);
            state.places.len() < before
        };

        if removed {
            self.send_event(StateEvent::PlaceRemoved {
                place_id: id.clone(),
            });
        }
        removed
    }

    /// Run one generation batch over the current selection.
    ///
    /// Preconditions, checked in order: no batch may be in flight, a
    /// credential must be present (otherwise no call is issued at all), and
    /// an empty selection is a successful no-op. Previous results and error
    /// are cleared before the batch starts; the merged outcome is applied
    /// only after every call settles.
    #[instrument(skip(self))]
    pub async fn generate(&self) -> Result<(), EngineError> {
        let (orchestrator, places) = {
            let mut state = self.state.write();
            if state.is_loading {
                return Err(EngineError::BatchInFlight);
            }

            let orchestrator = self.orchestrator.read().clone();
            let Some(orchestrator) = orchestrator else {
                state.error = Some(GenerationError::MissingCredential.user_message().to_string());
                return Err(GenerationError::MissingCredential.into());
            };

            if state.places.is_empty() {
                return Ok(());
            }

            state.is_loading = true;
            state.error = None;
            state.phrases.clear();
            (orchestrator, state.places.clone())
        };

        let batch_id = BatchId::new();
        let started = Instant::now();
        self.send_event(StateEvent::BatchStarted {
            batch_id: batch_id.clone(),
            place_count: places.len(),
        });

        let result = orchestrator.generate_all(&places).await;
        let duration_ms = started.elapsed().as_millis() as u64;

        match result {
            Ok(outcome) => {
                let succeeded = outcome.phrases.len();
                let failed = outcome.failures.len();
                {
                    let mut state = self.state.write();
                    state.is_loading = false;
                    state.phrases = outcome.phrases;
                    state.error = outcome.error.clone();
                }
                self.send_event(StateEvent::BatchFinished {
                    batch_id,
                    succeeded,
                    failed,
                    error: outcome.error,
                    duration_ms,
                });
                Ok(())
            }
            Err(reason) => {
                let message = reason.user_message().to_string();
                {
                    let mut state = self.state.write();
                    state.is_loading = false;
                    state.error = Some(message.clone());
                }
                self.send_event(StateEvent::BatchFinished {
                    batch_id,
                    succeeded: 0,
                    failed: places.len(),
                    error: Some(message),
                    duration_ms,
                });
                Err(reason.into())
            }
        }
    }
}
