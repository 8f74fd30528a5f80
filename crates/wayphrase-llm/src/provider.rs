use async_trait::async_trait;

use wayphrase_core::errors::GenerationError;

/// Options controlling a single text-generation call.
#[derive(Clone, Debug)]
pub struct GenerateOptions {
    /// Ask the provider to ground the answer with live search results.
    pub search_grounding: bool,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            search_grounding: true,
        }
    }
}

/// Trait implemented by each text-generation backend.
///
/// The contract is deliberately request/response: one prompt in, the model's
/// full text reply out. Failures map onto [`GenerationError`] and are
/// terminal; implementations must not retry.
#[async_trait]
pub trait TextGenProvider: Send + Sync {
    fn name(&self) -> &str;
    fn model(&self) -> &str;

    /// Whether a usable credential is present. When false, callers must not
    /// issue calls at all.
    fn is_configured(&self) -> bool;

    async fn generate(
        &self,
        prompt: &str,
        options: &GenerateOptions,
    ) -> Result<String, GenerationError>;
}
