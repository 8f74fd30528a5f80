use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use secrecy::ExposeSecret;
use serde::Deserialize;
use tracing::instrument;

use wayphrase_core::errors::GenerationError;
use wayphrase_core::security::ApiKey;

use crate::provider::{GenerateOptions, TextGenProvider};

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_MODEL: &str = "gemini-2.5-flash";
const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

/// Gemini provider speaking the `generateContent` REST API with API-key auth.
pub struct GeminiProvider {
    client: Client,
    api_key: ApiKey,
    model: String,
}

impl GeminiProvider {
    pub fn new(api_key: ApiKey) -> Self {
        Self::with_model(api_key, DEFAULT_MODEL)
    }

    pub fn with_model(api_key: ApiKey, model: &str) -> Self {
        Self {
            client: Client::builder()
                .connect_timeout(CONNECT_TIMEOUT)
                .build()
                .expect("failed to build HTTP client"),
            api_key,
            model: model.to_string(),
        }
    }

    fn request_url(&self) -> String {
        format!(
            "{API_BASE}/models/{}:generateContent?key={}",
            self.model,
            self.api_key.0.expose_secret()
        )
    }

    fn build_body(&self, prompt: &str, options: &GenerateOptions) -> serde_json::Value {
        let mut body = serde_json::json!({
            "contents": [{
                "role": "user",
                "parts": [{"text": prompt}],
            }],
        });
        if options.search_grounding {
            body["tools"] = serde_json::json!([{"google_search": {}}]);
        }
        body
    }
}

#[async_trait]
impl TextGenProvider for GeminiProvider {
    fn name(&self) -> &str {
        "google"
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn is_configured(&self) -> bool {
        !self.api_key.is_empty()
    }

    #[instrument(skip(self, prompt, options), fields(model = %self.model))]
    async fn generate(
        &self,
        prompt: &str,
        options: &GenerateOptions,
    ) -> Result<String, GenerationError> {
        if self.api_key.is_empty() {
            return Err(GenerationError::MissingCredential);
        }

        let resp = self
            .client
            .post(self.request_url())
            .header("content-type", "application/json")
            .json(&self.build_body(prompt, options))
            .send()
            .await
            .map_err(|e| GenerationError::Upstream(e.to_string()))?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(GenerationError::from_status(status, body));
        }

        let reply: GenerateContentResponse = resp
            .json()
            .await
            .map_err(|e| GenerationError::Upstream(format!("invalid response body: {e}")))?;

        let text = reply.text();
        if text.is_empty() {
            return Err(GenerationError::Upstream("response carried no text".into()));
        }
        Ok(text)
    }
}

// Wire types for the slice of the generateContent response we consume.

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    #[serde(default)]
    text: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate's parts.
    fn text(&self) -> String {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|p| p.text.as_deref())
                    .collect::<String>()
            })
            .unwrap_or_default()
    }
}
