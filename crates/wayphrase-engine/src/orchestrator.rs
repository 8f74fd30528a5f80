use std::sync::Arc;

use futures::future::join_all;
use tracing::{instrument, warn};

use wayphrase_core::errors::GenerationError;
use wayphrase_core::place::Place;
use wayphrase_llm::PhraseGenerator;

use crate::outcome::{BatchOutcome, PlaceResult};

/// Fans one generation call out per selected place and merges the settled
/// results. Stateless between calls; holds nothing but the generator.
pub struct PhraseOrchestrator {
    generator: Arc<PhraseGenerator>,
}

impl PhraseOrchestrator {
    pub fn new(generator: Arc<PhraseGenerator>) -> Self {
        Self { generator }
    }

    /// Run the whole batch concurrently and wait for every call to settle.
    ///
    /// Rejects only for the missing-credential precondition, and then
    /// before any upstream call is issued. Per-place failures never reject:
    /// they are folded into the outcome alongside the successes.
    #[instrument(skip(self, places), fields(count = places.len()))]
    pub async fn generate_all(&self, places: &[Place]) -> Result<BatchOutcome, GenerationError> {
        if !self.generator.is_ready() {
            return Err(GenerationError::MissingCredential);
        }
        if places.is_empty() {
            return Ok(BatchOutcome::default());
        }

        let generator = &self.generator;
        let calls = places.iter().map(|place| async move {
            match generator.generate(&place.name, &place.country_code).await {
                Ok(phrases) => PlaceResult::Success {
                    id: place.id.clone(),
                    phrases,
                },
                Err(reason) => {
                    warn!(
                        place = %place.name,
                        kind = reason.error_kind(),
                        "phrase generation failed"
                    );
                    PlaceResult::Failure {
                        id: place.id.clone(),
                        name: place.name.clone(),
                        reason,
                    }
                }
            }
        });

        let results = join_all(calls).await;
        Ok(BatchOutcome::from_results(results))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use wayphrase_core::place::{Coordinate, PlaceSeed};
    use wayphrase_llm::{MockReply, MockTextProvider};

    fn place(name: &str, lat: f64, lng: f64, country: &str) -> Place {
        Place::from_seed(PlaceSeed {
            name: name.into(),
            address: format!("{name} street"),
            location: Coordinate { lat, lng },
            country_code: country.into(),
        })
    }

    fn orchestrator_with(replies: Vec<MockReply>) -> (PhraseOrchestrator, Arc<MockTextProvider>) {
        let mock = Arc::new(MockTextProvider::new(replies));
        let generator = Arc::new(PhraseGenerator::new(mock.clone()));
        (PhraseOrchestrator::new(generator), mock)
    }

    fn five_phrases() -> MockReply {
        MockReply::text(
            r#"{"phrases": [
                {"korean": "하나"}, {"korean": "둘"}, {"korean": "셋"},
                {"korean": "넷"}, {"korean": "다섯"}
            ]}"#,
        )
    }

    #[tokio::test]
    async fn all_success_has_no_aggregate_error() {
        let (orchestrator, mock) = orchestrator_with(vec![five_phrases(), five_phrases()]);
        let places = [place("Cafe A", 37.5, 127.0, "JP"), place("Cafe B", 35.6, 139.7, "KR")];

        let outcome = orchestrator.generate_all(&places).await.unwrap();

        assert_eq!(outcome.phrases.len(), 2);
        assert!(outcome.error.is_none());
        assert!(outcome.failures.is_empty());
        assert_eq!(mock.call_count(), 2);
    }

    #[tokio::test]
    async fn partial_failure_keeps_successes_and_reports_failures() {
        let (orchestrator, _) = orchestrator_with(vec![
            MockReply::Error(GenerationError::Upstream("quota exceeded".into())),
            five_phrases(),
        ]);
        let cafe_a = place("Cafe A", 37.5, 127.0, "JP");
        let cafe_b = place("Cafe B", 35.6, 139.7, "KR");

        let outcome = orchestrator
            .generate_all(&[cafe_a.clone(), cafe_b.clone()])
            .await
            .unwrap();

        assert_eq!(outcome.phrases.len(), 1);
        assert!(!outcome.phrases.contains_key(&cafe_a.id));
        assert_eq!(outcome.phrases[&cafe_b.id].len(), 5);

        let error = outcome.error.unwrap();
        assert!(error.starts_with("'Cafe A' 장소의 표현 생성에 실패했습니다. "));
        assert!(error.ends_with(GenerationError::Upstream("quota exceeded".into()).user_message()));
    }

    #[tokio::test]
    async fn every_failed_name_is_listed() {
        let (orchestrator, _) = orchestrator_with(vec![
            MockReply::Error(GenerationError::Upstream("down".into())),
            MockReply::Error(GenerationError::AuthRejected("bad key".into())),
        ]);
        let places = [place("Cafe A", 37.5, 127.0, "JP"), place("Cafe B", 35.6, 139.7, "FR")];

        let outcome = orchestrator.generate_all(&places).await.unwrap();

        assert!(outcome.phrases.is_empty());
        let error = outcome.error.unwrap();
        assert!(error.contains("'Cafe A', 'Cafe B'"));
        // Last observed failure's detail wins.
        assert!(error.ends_with(GenerationError::AuthRejected("bad key".into()).user_message()));
    }

    #[tokio::test]
    async fn missing_credential_issues_no_calls() {
        let mock = Arc::new(MockTextProvider::unconfigured());
        let orchestrator = PhraseOrchestrator::new(Arc::new(PhraseGenerator::new(mock.clone())));

        let err = orchestrator
            .generate_all(&[place("Cafe A", 37.5, 127.0, "JP")])
            .await
            .unwrap_err();

        assert!(matches!(err, GenerationError::MissingCredential));
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn empty_place_list_is_a_noop() {
        let (orchestrator, mock) = orchestrator_with(vec![]);

        let outcome = orchestrator.generate_all(&[]).await.unwrap();

        assert!(outcome.phrases.is_empty());
        assert!(outcome.error.is_none());
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn one_failure_does_not_cancel_slow_siblings() {
        let (orchestrator, _) = orchestrator_with(vec![
            MockReply::Error(GenerationError::Upstream("immediate".into())),
            MockReply::delayed(Duration::from_secs(5), five_phrases()),
        ]);
        let fast = place("Fast Fail", 1.0, 2.0, "JP");
        let slow = place("Slow Success", 3.0, 4.0, "FR");

        let outcome = orchestrator
            .generate_all(&[fast, slow.clone()])
            .await
            .unwrap();

        assert_eq!(outcome.phrases[&slow.id].len(), 5);
        assert_eq!(outcome.failures.len(), 1);
    }

    #[tokio::test]
    async fn mapping_keys_are_exactly_the_successful_subset() {
        let (orchestrator, _) = orchestrator_with(vec![
            five_phrases(),
            MockReply::Error(GenerationError::Upstream("down".into())),
            five_phrases(),
        ]);
        let places = [
            place("A", 1.0, 1.0, "JP"),
            place("B", 2.0, 2.0, "FR"),
            place("C", 3.0, 3.0, "KR"),
        ];

        let outcome = orchestrator.generate_all(&places).await.unwrap();

        let mut keys: Vec<&str> = outcome.phrases.keys().map(|k| k.as_str()).collect();
        keys.sort_unstable();
        assert_eq!(keys, vec!["1_1", "3_3"]);
    }
}
