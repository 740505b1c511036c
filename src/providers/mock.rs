/*!
 * Mock provider implementations for testing.
 *
 * This module provides a mock provider that simulates different behaviors:
 * - `MockProvider::working()` - Always succeeds, prefixing each text with the target language
 * - `MockProvider::with_translations()` - Answers from a fixed lookup table
 * - `MockProvider::failing()` - Always fails with an error
 * - `MockProvider::short_response()` - Drops the last item of every batch
 * - `MockProvider::dropping_markers()` - Strips placeholder markers from translations
 *
 * Every submitted batch is recorded so tests can assert on deduplication and batching.
 */

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

use crate::errors::ProviderError;
use crate::providers::{Provider, TranslateOptions, TranslatedText, Usage, UsageDetail};

/// Behavior mode for the mock provider
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockBehavior {
    /// Always succeeds with a proper translation
    Working,
    /// Fails on the Nth request (1-based), succeeds otherwise
    FailOn { request: usize },
    /// Always fails with an error
    Failing,
    /// Returns one item fewer than requested
    ShortResponse,
    /// Removes every `<tN/>` marker from the translated text
    DropMarkers,
}

/// Mock provider for testing translation behavior
#[derive(Debug, Clone)]
pub struct MockProvider {
    /// Behavior mode
    behavior: MockBehavior,
    /// Fixed translations; texts not in the table fall back to the default rendering
    translations: HashMap<String, String>,
    /// Every batch submitted so far, in submission order
    batches: Arc<Mutex<Vec<Vec<String>>>>,
    /// Usage reported by `usage()`
    usage: Usage,
    /// Source language reported as detected
    detected_language: Option<String>,
}

impl MockProvider {
    /// Create a new mock provider with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            translations: HashMap::new(),
            batches: Arc::new(Mutex::new(Vec::new())),
            usage: Usage {
                character: Some(UsageDetail { count: 0, limit: 500_000 }),
                document: None,
            },
            detected_language: None,
        }
    }

    /// Create a working mock provider that always succeeds
    pub fn working() -> Self {
        Self::new(MockBehavior::Working)
    }

    /// Create a working mock provider answering from a lookup table
    pub fn with_translations<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut provider = Self::working();
        provider.translations = pairs.into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        provider
    }

    /// Create a failing mock provider that always errors
    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    /// Create a mock that fails on the given request number (1-based)
    pub fn fail_on(request: usize) -> Self {
        Self::new(MockBehavior::FailOn { request })
    }

    /// Create a mock that answers with too few items
    pub fn short_response() -> Self {
        Self::new(MockBehavior::ShortResponse)
    }

    /// Create a mock that loses placeholder markers
    pub fn dropping_markers() -> Self {
        Self::new(MockBehavior::DropMarkers)
    }

    /// Set the usage reported by the mock
    pub fn with_usage(mut self, usage: Usage) -> Self {
        self.usage = usage;
        self
    }

    /// Report a detected source language on every translation
    pub fn with_detected_language(mut self, language: impl Into<String>) -> Self {
        self.detected_language = Some(language.into());
        self
    }

    /// Batches submitted so far
    pub fn submitted_batches(&self) -> Vec<Vec<String>> {
        self.batches.lock().clone()
    }

    /// Number of translate requests made
    pub fn request_count(&self) -> usize {
        self.batches.lock().len()
    }

    /// Default rendering of a translation
    fn render(&self, text: &str, options: &TranslateOptions) -> String {
        match self.translations.get(text) {
            Some(translation) => translation.clone(),
            None => format!("[{}] {}", options.target_language, text),
        }
    }
}

/// Remove every placeholder marker from a text
fn strip_markers(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(start) = rest.find("<t") {
        result.push_str(&rest[..start]);
        let tail = &rest[start + 2..];
        let digits = tail.chars().take_while(char::is_ascii_digit).count();
        if digits > 0 && tail[digits..].starts_with("/>") {
            rest = &tail[digits + 2..];
        } else {
            result.push_str("<t");
            rest = tail;
        }
    }

    result.push_str(rest);
    result
}

#[async_trait]
impl Provider for MockProvider {
    async fn translate_batch(
        &self,
        texts: &[String],
        options: &TranslateOptions,
    ) -> Result<Vec<TranslatedText>, ProviderError> {
        let request_number = {
            let mut batches = self.batches.lock();
            batches.push(texts.to_vec());
            batches.len()
        };

        match self.behavior {
            MockBehavior::Failing => {
                return Err(ProviderError::ApiError {
                    status_code: 500,
                    message: "Mock provider failure".to_string(),
                });
            }
            MockBehavior::FailOn { request } if request == request_number => {
                return Err(ProviderError::ConnectionError(format!(
                    "Mock connection dropped on request {}",
                    request_number
                )));
            }
            _ => {}
        }

        let mut translated: Vec<TranslatedText> = texts.iter()
            .map(|text| {
                let mut rendered = self.render(text, options);
                if self.behavior == MockBehavior::DropMarkers {
                    rendered = strip_markers(&rendered);
                }
                TranslatedText {
                    text: rendered,
                    detected_source_language: self.detected_language.clone(),
                }
            })
            .collect();

        if self.behavior == MockBehavior::ShortResponse {
            translated.pop();
        }

        Ok(translated)
    }

    async fn usage(&self) -> Result<Usage, ProviderError> {
        Ok(self.usage)
    }

    fn name(&self) -> &str {
        "Mock"
    }
}
