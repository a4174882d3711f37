/*!
 * Mock provider implementations for testing.
 *
 * This module provides mock providers that simulate different behaviors:
 * - `MockTranslator::working()` - Always succeeds with translated text
 * - `MockTranslator::intermittent(n)` - Fails every nth request
 * - `MockTranslator::failing()` - Always fails with an error
 */

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use super::Translator;
use crate::errors::ProviderError;

/// Behavior mode for the mock translator
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MockBehavior {
    /// Always succeeds, prefixing texts with the target language
    Working,
    /// Fails intermittently (every Nth request)
    Intermittent { fail_every: usize },
    /// Always fails with an error
    Failing,
    /// Succeeds but returns one translation too few in batch calls
    Truncated,
    /// Simulates slow response (for timeout testing)
    Slow { delay_ms: u64 },
}

/// Mock translator for testing translation behavior
#[derive(Debug)]
pub struct MockTranslator {
    /// Behavior mode
    behavior: MockBehavior,
    /// Total request counter
    request_count: Arc<AtomicUsize>,
    /// Canned responses: source text -> translated text
    canned: Mutex<HashMap<String, String>>,
}

impl MockTranslator {
    /// Create a new mock translator with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            request_count: Arc::new(AtomicUsize::new(0)),
            canned: Mutex::new(HashMap::new()),
        }
    }

    /// Create a working mock translator that always succeeds
    pub fn working() -> Self {
        Self::new(MockBehavior::Working)
    }

    /// Create an intermittently failing mock translator
    pub fn intermittent(fail_every: usize) -> Self {
        Self::new(MockBehavior::Intermittent { fail_every })
    }

    /// Create a failing mock translator that always errors
    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    /// Create a mock that drops one entry from batch responses
    pub fn truncated() -> Self {
        Self::new(MockBehavior::Truncated)
    }

    /// Create a slow mock translator
    pub fn slow(delay_ms: u64) -> Self {
        Self::new(MockBehavior::Slow { delay_ms })
    }

    /// Register a canned translation for a specific source text
    pub fn with_canned(self, source: impl Into<String>, translated: impl Into<String>) -> Self {
        self.canned.lock().insert(source.into(), translated.into());
        self
    }

    /// Number of provider requests made so far
    pub fn request_count(&self) -> usize {
        self.request_count.load(Ordering::SeqCst)
    }

    /// Produce the mock translation for one text
    fn render(&self, text: &str, target_language: &str) -> String {
        if let Some(canned) = self.canned.lock().get(text) {
            return canned.clone();
        }
        format!("[{}] {}", target_language, text)
    }

    /// Apply the behavior mode for one request; Err means this request fails
    async fn gate(&self) -> Result<(), ProviderError> {
        let count = self.request_count.fetch_add(1, Ordering::SeqCst) + 1;

        match self.behavior {
            MockBehavior::Working | MockBehavior::Truncated => Ok(()),
            MockBehavior::Failing => Err(ProviderError::RequestFailed(
                "mock provider configured to fail".to_string(),
            )),
            MockBehavior::Intermittent { fail_every } => {
                if fail_every > 0 && count % fail_every == 0 {
                    Err(ProviderError::RequestFailed(format!(
                        "mock provider intermittent failure on request {}",
                        count
                    )))
                } else {
                    Ok(())
                }
            }
            MockBehavior::Slow { delay_ms } => {
                tokio::time::sleep(std::time::Duration::from_millis(delay_ms)).await;
                Ok(())
            }
        }
    }
}

#[async_trait]
impl Translator for MockTranslator {
    async fn translate_one(
        &self,
        text: &str,
        _source_language: &str,
        target_language: &str,
    ) -> Result<String, ProviderError> {
        self.gate().await?;
        Ok(self.render(text, target_language))
    }

    async fn translate_many(
        &self,
        texts: &[String],
        _source_language: &str,
        target_language: &str,
    ) -> Result<Vec<String>, ProviderError> {
        self.gate().await?;

        let mut translations: Vec<String> = texts
            .iter()
            .map(|text| self.render(text, target_language))
            .collect();

        if self.behavior == MockBehavior::Truncated && !translations.is_empty() {
            translations.pop();
            return Err(ProviderError::CountMismatch {
                sent: texts.len(),
                received: translations.len(),
            });
        }

        Ok(translations)
    }

    fn name(&self) -> &str {
        "mock"
    }
}
