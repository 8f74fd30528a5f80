use std::sync::Arc;

use tracing::instrument;

use wayphrase_core::errors::GenerationError;
use wayphrase_core::phrase::Phrase;

use crate::extract;
use crate::prompt::{self, PromptConfig};
use crate::provider::{GenerateOptions, TextGenProvider};

/// Turns a place into travel phrases: template selection, one provider call,
/// structured extraction. One invocation per place; every failure is
/// terminal and reported upward. Retrying is the user's decision.
pub struct PhraseGenerator {
    provider: Arc<dyn TextGenProvider>,
    config: PromptConfig,
}

impl PhraseGenerator {
    pub fn new(provider: Arc<dyn TextGenProvider>) -> Self {
        Self::with_config(provider, PromptConfig::default())
    }

    pub fn with_config(provider: Arc<dyn TextGenProvider>, config: PromptConfig) -> Self {
        Self { provider, config }
    }

    /// Whether the underlying provider holds a credential.
    pub fn is_ready(&self) -> bool {
        self.provider.is_configured()
    }

    #[instrument(skip(self), fields(provider = self.provider.name()))]
    pub async fn generate(
        &self,
        place_name: &str,
        country_code: &str,
    ) -> Result<Vec<Phrase>, GenerationError> {
        let code = country_code.to_uppercase();
        let prompt = prompt::build_prompt(place_name, &code, &self.config);

        let reply = self
            .provider
            .generate(&prompt, &GenerateOptions::default())
            .await?;

        extract::parse_phrases(&reply)
    }
}
