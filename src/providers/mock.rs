/*!
 * Mock backend implementation for tests and offline runs.
 *
 * - `MockBackend::working()` - Always succeeds with a marked translation
 * - `MockBackend::failing_token()` - Token endpoint always fails
 * - `MockBackend::failing_translation()` - Translate call always fails
 * - `MockBackend::slow(ms)` - Succeeds after a delay on each call
 *
 * `with_delay` adds a per-call latency to any behavior.
 */

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::errors::ProviderError;
use crate::providers::TranslationBackend;

/// Behavior mode for the mock backend
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MockBehavior {
    /// Always succeeds
    Working,
    /// Token fetch always fails
    FailingToken,
    /// Token fetch succeeds, translate returns a non-2xx error
    FailingTranslation,
    /// The first `failures` translate calls fail, later ones succeed
    Flaky { failures: usize },
}

/// Mock backend with shared call counters
#[derive(Debug)]
pub struct MockBackend {
    /// Behavior mode
    behavior: MockBehavior,
    /// Latency added to every call
    delay_ms: u64,
    /// Number of token requests received
    token_calls: Arc<AtomicUsize>,
    /// Number of translate requests received
    translate_calls: Arc<AtomicUsize>,
    /// Custom response generator (optional)
    custom_response: Option<fn(&str) -> String>,
}

impl MockBackend {
    /// Create a new mock backend with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            delay_ms: 0,
            token_calls: Arc::new(AtomicUsize::new(0)),
            translate_calls: Arc::new(AtomicUsize::new(0)),
            custom_response: None,
        }
    }

    pub fn working() -> Self {
        Self::new(MockBehavior::Working)
    }

    pub fn failing_token() -> Self {
        Self::new(MockBehavior::FailingToken)
    }

    pub fn failing_translation() -> Self {
        Self::new(MockBehavior::FailingTranslation)
    }

    pub fn flaky(failures: usize) -> Self {
        Self::new(MockBehavior::Flaky { failures })
    }

    pub fn slow(delay_ms: u64) -> Self {
        Self::working().with_delay(delay_ms)
    }

    /// Sleep `delay_ms` at the start of every call
    pub fn with_delay(mut self, delay_ms: u64) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    /// Set a custom response generator
    pub fn with_custom_response(mut self, generator: fn(&str) -> String) -> Self {
        self.custom_response = Some(generator);
        self
    }

    /// Number of token requests seen so far
    pub fn token_calls(&self) -> usize {
        self.token_calls.load(Ordering::SeqCst)
    }

    /// Number of translate requests seen so far
    pub fn translate_calls(&self) -> usize {
        self.translate_calls.load(Ordering::SeqCst)
    }

    /// The translation a working mock produces for `text`
    pub fn expected_translation(text: &str) -> String {
        format!("[TRANSLATED] {}", text)
    }

    async fn simulate_latency(&self) {
        if self.delay_ms > 0 {
            tokio::time::sleep(tokio::time::Duration::from_millis(self.delay_ms)).await;
        }
    }

    fn respond(&self, text: &str) -> String {
        match self.custom_response {
            Some(generator) => generator(text),
            None => Self::expected_translation(text),
        }
    }
}

impl Clone for MockBackend {
    fn clone(&self) -> Self {
        Self {
            behavior: self.behavior,
            delay_ms: self.delay_ms,
            token_calls: Arc::clone(&self.token_calls),
            translate_calls: Arc::clone(&self.translate_calls),
            custom_response: self.custom_response,
        }
    }
}

#[async_trait]
impl TranslationBackend for MockBackend {
    async fn fetch_token(&self) -> Result<String, ProviderError> {
        self.token_calls.fetch_add(1, Ordering::SeqCst);
        self.simulate_latency().await;

        match self.behavior {
            MockBehavior::FailingToken => Err(ProviderError::AuthenticationError(
                "Simulated token endpoint failure".to_string(),
            )),
            _ => Ok("mock-token".to_string()),
        }
    }

    async fn translate(&self, token: &str, text: &str) -> Result<String, ProviderError> {
        let count = self.translate_calls.fetch_add(1, Ordering::SeqCst);
        self.simulate_latency().await;

        if token.is_empty() {
            return Err(ProviderError::AuthenticationError("Missing bearer token".to_string()));
        }

        match self.behavior {
            MockBehavior::Working | MockBehavior::FailingToken => Ok(self.respond(text)),

            MockBehavior::FailingTranslation => Err(ProviderError::ApiError {
                status_code: 500,
                message: "Simulated translate failure".to_string(),
            }),

            MockBehavior::Flaky { failures } => {
                if count < failures {
                    Err(ProviderError::ApiError {
                        status_code: 503,
                        message: format!("Simulated outage (request #{})", count + 1),
                    })
                } else {
                    Ok(self.respond(text))
                }
            }
        }
    }

    fn name(&self) -> &str {
        "mock"
    }
}
