/*!
 * Core translation service implementation.
 *
 * This module contains the `TranslationService`, which drives a document
 * through the collection pass, batch submission and the reconstruction pass.
 * The per-run state lives in an [`EntryCache`] owned by the caller, so the
 * steps can be run one at a time (with a confirmation or usage check in
 * between) or all at once with [`TranslationService::translate_document`].
 */

use log::{debug, info, warn};
use serde_json::Value;
use std::convert::Infallible;
use std::sync::Arc;

use crate::app_config::Config;
use crate::errors::TranslationError;
use crate::providers::{Formality, Provider, TranslateOptions, Usage};

use super::batch::{batch_count, BatchSummary, BatchTranslator, DEFAULT_MAX_BATCH_SIZE};
use super::cache::EntryCache;
use super::placeholders::{denormalize, normalize};
use super::walker::walk;

/// Figures shown to the user before submission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollectionStats {
    /// Distinct translation-safe keys
    pub entries: usize,

    /// Characters across distinct keys
    pub characters: usize,

    /// Requests needed to translate all keys
    pub batches: usize,
}

/// Summary of a completed run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationReport {
    /// Distinct translation-safe keys
    pub entries: usize,

    /// Characters submitted
    pub characters: usize,

    /// Requests sent
    pub batches: usize,

    /// Source languages the provider reported
    pub detected_languages: Vec<String>,
}

/// Translation service for JSON documents
#[derive(Clone)]
pub struct TranslationService {
    /// Provider used for every batch
    provider: Arc<dyn Provider>,

    /// Language and formality options
    pub options: TranslateOptions,

    /// Whether object keys are translated as well as values
    pub translate_keys: bool,

    /// Maximum texts per request
    pub max_batch_size: usize,
}

impl TranslationService {
    /// Create a new translation service
    pub fn new(provider: Arc<dyn Provider>, options: TranslateOptions) -> Self {
        Self {
            provider,
            options,
            translate_keys: false,
            max_batch_size: DEFAULT_MAX_BATCH_SIZE,
        }
    }

    /// Create a service configured from the application config
    pub fn from_config(provider: Arc<dyn Provider>, config: &Config) -> Result<Self, TranslationError> {
        let mut options = TranslateOptions::new(config.target_language.clone())
            .formality(Formality::from_formal(config.formal));
        options.source_language = config.source_language.clone();

        Self::new(provider, options)
            .with_translate_keys(config.translate_keys)
            .with_max_batch_size(config.max_batch_size)
    }

    /// Translate object keys too
    pub fn with_translate_keys(mut self, translate_keys: bool) -> Self {
        self.translate_keys = translate_keys;
        self
    }

    /// Set the maximum batch size
    pub fn with_max_batch_size(mut self, max_batch_size: usize) -> Result<Self, TranslationError> {
        if max_batch_size == 0 {
            return Err(TranslationError::InvalidBatchSize(max_batch_size));
        }
        self.max_batch_size = max_batch_size;
        Ok(self)
    }

    /// Name of the underlying provider
    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Collection pass: register every distinct translation-safe key of the document
    pub fn collect(&self, document: &Value) -> EntryCache {
        let mut cache = EntryCache::new();

        let _: Result<Value, Infallible> = walk(
            document,
            &mut |text: &str| {
                cache.ensure(&normalize(text).key);
                Ok(text.to_string())
            },
            self.translate_keys,
        );

        debug!("Collected {} distinct entries ({} characters)",
               cache.len(), cache.total_characters());
        cache
    }

    /// Figures for a collected cache
    pub fn stats(&self, cache: &EntryCache) -> CollectionStats {
        CollectionStats {
            entries: cache.len(),
            characters: cache.total_characters(),
            batches: batch_count(cache.pending_keys().len(), self.max_batch_size),
        }
    }

    /// Check the provider's usage counters before submitting
    ///
    /// Fails if the provider reports a reached limit, or if `usage_limit` is
    /// set and the characters already used plus the collected ones exceed it.
    /// Nothing is queried when no entry is pending, since nothing would be billed.
    pub async fn check_usage(&self, cache: &EntryCache, usage_limit: Option<u64>) -> Result<Usage, TranslationError> {
        if cache.pending_keys().is_empty() {
            debug!("No pending entries, skipping usage check");
            return Ok(Usage::default());
        }

        let usage = self.provider.usage().await?;

        if usage.any_limit_reached() {
            return Err(TranslationError::ProviderLimitReached);
        }

        if let Some(limit) = usage_limit {
            let used = usage.character.map(|c| c.count).unwrap_or(0);
            let requested = cache.total_characters() as u64;
            if used + requested > limit {
                return Err(TranslationError::UsageLimitExceeded { used, requested, limit });
            }
        }

        Ok(usage)
    }

    /// Submit all pending keys and write the translations into the cache
    pub async fn submit(
        &self,
        cache: &mut EntryCache,
        progress_callback: impl Fn(usize, usize),
    ) -> Result<BatchSummary, TranslationError> {
        let translator = BatchTranslator::new(self.provider.as_ref(), &self.options, self.max_batch_size);
        let summary = translator.translate_batches(cache, progress_callback).await?;

        if !summary.detected_languages.is_empty() {
            debug!("Detected source languages: {}", summary.detected_languages.join(", "));
        }

        Ok(summary)
    }

    /// Reconstruction pass: rebuild the document with restored translations
    pub fn reconstruct(&self, document: &Value, cache: &EntryCache) -> Result<Value, TranslationError> {
        if !cache.is_fully_resolved() {
            warn!("Reconstructing with {} unresolved entries", cache.pending_keys().len());
        }

        walk(
            document,
            &mut |text: &str| -> Result<String, TranslationError> {
                let normalized = normalize(text);
                let translated = cache.lookup(&normalized.key)?;
                Ok(denormalize(translated, &normalized.placeholders)?)
            },
            self.translate_keys,
        )
    }

    /// Run collection, submission and reconstruction in one go
    pub async fn translate_document(&self, document: &Value) -> Result<(Value, TranslationReport), TranslationError> {
        let mut cache = self.collect(document);
        let summary = self.submit(&mut cache, |_, _| {}).await?;
        let translated = self.reconstruct(document, &cache)?;

        info!("Translated {} entries in {} batches", summary.entries, summary.batches);

        Ok((translated, TranslationReport {
            entries: cache.len(),
            characters: cache.total_characters(),
            batches: summary.batches,
            detected_languages: summary.detected_languages,
        }))
    }
}
