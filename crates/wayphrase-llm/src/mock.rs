use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use wayphrase_core::errors::GenerationError;

use crate::provider::{GenerateOptions, TextGenProvider};

/// Pre-programmed replies for deterministic testing without API calls.
#[derive(Clone, Debug)]
pub enum MockReply {
    /// Return this text as the model reply.
    Text(String),
    /// Fail the call with this error.
    Error(GenerationError),
    /// Wait a duration, then yield the inner reply.
    Delayed(Duration, Box<MockReply>),
}

impl MockReply {
    pub fn text(s: &str) -> Self {
        Self::Text(s.to_string())
    }

    pub fn delayed(delay: Duration, inner: MockReply) -> Self {
        Self::Delayed(delay, Box::new(inner))
    }
}

/// Mock provider that hands out replies in order. Concurrent callers drain
/// the queue in poll order, which `join_all` keeps aligned with input order.
pub struct MockTextProvider {
    replies: Mutex<VecDeque<MockReply>>,
    prompts: Mutex<Vec<String>>,
    call_count: AtomicUsize,
    configured: bool,
}

impl MockTextProvider {
    pub fn new(replies: Vec<MockReply>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            prompts: Mutex::new(Vec::new()),
            call_count: AtomicUsize::new(0),
            configured: true,
        }
    }

    /// A provider with no credential: `is_configured` reports false and any
    /// call fails with `MissingCredential`.
    pub fn unconfigured() -> Self {
        Self {
            replies: Mutex::new(VecDeque::new()),
            prompts: Mutex::new(Vec::new()),
            call_count: AtomicUsize::new(0),
            configured: false,
        }
    }

    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::Relaxed)
    }

    /// The most recent prompt passed to `generate`.
    pub fn last_prompt(&self) -> Option<String> {
        self.prompts.lock().last().cloned()
    }
}

#[async_trait]
impl TextGenProvider for MockTextProvider {
    fn name(&self) -> &str {
        "mock"
    }

    fn model(&self) -> &str {
        "mock-model"
    }

    fn is_configured(&self) -> bool {
        self.configured
    }

    async fn generate(
        &self,
        prompt: &str,
        _options: &GenerateOptions,
    ) -> Result<String, GenerationError> {
        let idx = self.call_count.fetch_add(1, Ordering::Relaxed);
        if !self.configured {
            return Err(GenerationError::MissingCredential);
        }

        self.prompts.lock().push(prompt.to_string());

        let reply = self.replies.lock().pop_front().ok_or_else(|| {
            GenerationError::Upstream(format!("MockTextProvider: no reply configured for call {idx}"))
        })?;

        let mut current = reply;
        loop {
            match current {
                MockReply::Text(text) => return Ok(text),
                MockReply::Error(e) => return Err(e),
                MockReply::Delayed(delay, inner) => {
                    tokio::time::sleep(delay).await;
                    current = *inner;
                }
            }
        }
    }
}
