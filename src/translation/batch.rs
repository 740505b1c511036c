/*!
 * Batch translation processing.
 *
 * This module splits the distinct cache keys into bounded batches and submits
 * them to the provider one after the other. A batch is only sent once the
 * previous one has been answered and written back into the cache.
 */

use log::{debug, error};
use std::collections::BTreeSet;
use std::time::Instant;

use crate::errors::{IntegrityError, TranslationError};
use crate::providers::{Provider, TranslateOptions};

use super::cache::EntryCache;

/// Largest batch submitted in one request, one below the provider limit of 50 texts
pub const DEFAULT_MAX_BATCH_SIZE: usize = 49;

/// Split `items` into consecutive groups of at most `max_size` items
///
/// Every group but the last is full, and concatenating the groups gives back
/// `items` in order. An empty input yields no groups.
pub fn partition<T>(items: &[T], max_size: usize) -> Result<Vec<&[T]>, TranslationError> {
    if max_size == 0 {
        return Err(TranslationError::InvalidBatchSize(max_size));
    }

    Ok(items.chunks(max_size).collect())
}

/// Number of batches `count` items split into
pub fn batch_count(count: usize, max_size: usize) -> usize {
    if max_size == 0 { 0 } else { count.div_ceil(max_size) }
}

/// Outcome of submitting all batches
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// Number of requests sent
    pub batches: usize,

    /// Number of keys resolved
    pub entries: usize,

    /// Distinct source languages reported by the provider
    pub detected_languages: Vec<String>,
}

/// Batch translator for resolving pending cache entries
pub struct BatchTranslator<'a> {
    /// The provider to submit to
    provider: &'a dyn Provider,

    /// Language and formality options for every request
    options: &'a TranslateOptions,

    /// Maximum number of texts per request
    max_batch_size: usize,
}

impl<'a> BatchTranslator<'a> {
    /// Create a new batch translator
    pub fn new(provider: &'a dyn Provider, options: &'a TranslateOptions, max_batch_size: usize) -> Self {
        Self {
            provider,
            options,
            max_batch_size,
        }
    }

    /// Translate every pending key of the cache, batch by batch
    ///
    /// The first failing request aborts the whole run; keys of earlier batches
    /// stay resolved but nothing is retried.
    pub async fn translate_batches(
        &self,
        cache: &mut EntryCache,
        progress_callback: impl Fn(usize, usize),
    ) -> Result<BatchSummary, TranslationError> {
        let keys = cache.pending_keys();
        let batches = partition(&keys, self.max_batch_size)?;
        let total_batches = batches.len();
        let mut detected = BTreeSet::new();

        for (batch_index, batch) in batches.iter().enumerate() {
            debug!("Processing batch {} of {} ({} entries) with {}",
                   batch_index + 1, total_batches, batch.len(), self.provider.name());

            let start_time = Instant::now();
            let translations = self.provider.translate_batch(batch, self.options).await
                .map_err(|e| {
                    error!("Batch {} failed: {}", batch_index + 1, e);
                    e
                })?;

            if translations.len() != batch.len() {
                return Err(IntegrityError::ResponseCountMismatch {
                    expected: batch.len(),
                    received: translations.len(),
                }.into());
            }

            for (key, translated) in batch.iter().zip(translations) {
                cache.resolve(key, translated.text)?;
                if let Some(language) = translated.detected_source_language {
                    detected.insert(language);
                }
            }

            debug!("Batch {} completed in {:?}", batch_index + 1, start_time.elapsed());
            progress_callback(batch_index + 1, total_batches);
        }

        Ok(BatchSummary {
            batches: total_batches,
            entries: keys.len(),
            detected_languages: detected.into_iter().collect(),
        })
    }
}
