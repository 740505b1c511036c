/*!
 * Provider implementations for different translation services.
 *
 * This module contains client implementations for translation backends:
 * - DeepL: DeepL REST API (free and pro endpoints)
 * - Mock: deterministic in-process provider used by tests and benchmarks
 */

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

use crate::errors::ProviderError;

/// Stylistic register requested from the provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Formality {
    /// More formal phrasing where the target language supports it
    PreferMore,
    /// Less formal phrasing where the target language supports it
    #[default]
    PreferLess,
}

impl Formality {
    /// Map the `--formal` switch to a formality
    pub fn from_formal(formal: bool) -> Self {
        if formal { Self::PreferMore } else { Self::PreferLess }
    }

    /// Wire name of the option
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PreferMore => "prefer_more",
            Self::PreferLess => "prefer_less",
        }
    }
}

/// Options shared by every batch of a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslateOptions {
    /// Source language, `None` to let the provider detect it
    pub source_language: Option<String>,

    /// Target language
    pub target_language: String,

    /// Requested formality
    pub formality: Formality,
}

impl TranslateOptions {
    /// Create options for a target language with provider-side source detection
    pub fn new(target_language: impl Into<String>) -> Self {
        Self {
            source_language: None,
            target_language: target_language.into(),
            formality: Formality::default(),
        }
    }

    /// Set the source language
    pub fn source_language(mut self, source_language: impl Into<String>) -> Self {
        self.source_language = Some(source_language.into());
        self
    }

    /// Set the formality
    pub fn formality(mut self, formality: Formality) -> Self {
        self.formality = formality;
        self
    }
}

/// One translated item of a batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslatedText {
    /// The translated text
    pub text: String,

    /// Source language detected by the provider, if reported
    pub detected_source_language: Option<String>,
}

impl TranslatedText {
    /// Translated text without detection info
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            detected_source_language: None,
        }
    }
}

/// Consumption counter against a limit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UsageDetail {
    /// Amount used in the current period
    pub count: u64,

    /// Amount allowed in the current period
    pub limit: u64,
}

impl UsageDetail {
    /// Whether the counter reached its limit
    pub fn limit_reached(&self) -> bool {
        self.count >= self.limit
    }
}

/// Account usage reported by a provider
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Usage {
    /// Translated characters
    pub character: Option<UsageDetail>,

    /// Translated documents
    pub document: Option<UsageDetail>,
}

impl Usage {
    /// Whether any reported counter reached its limit
    pub fn any_limit_reached(&self) -> bool {
        [self.character, self.document]
            .iter()
            .flatten()
            .any(UsageDetail::limit_reached)
    }
}

/// Common trait for all translation providers
///
/// This trait defines the interface that all provider implementations must follow,
/// allowing them to be used interchangeably in the translation service.
#[async_trait]
pub trait Provider: Send + Sync + Debug {
    /// Translate a batch of texts
    ///
    /// The returned list must have the same length and order as `texts`.
    async fn translate_batch(
        &self,
        texts: &[String],
        options: &TranslateOptions,
    ) -> Result<Vec<TranslatedText>, ProviderError>;

    /// Query the account usage
    async fn usage(&self) -> Result<Usage, ProviderError>;

    /// Name used in log messages
    fn name(&self) -> &str;
}

pub mod deepl;
pub mod mock;
