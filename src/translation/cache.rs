/*!
 * Translation entry cache.
 *
 * Every distinct translation-safe key found in a document is stored once,
 * so it is submitted to the provider at most once however often it occurs.
 * Keys keep their first-discovery order, which is the order they are
 * batched and submitted in.
 */

use indexmap::IndexMap;
use log::debug;

use crate::errors::IntegrityError;

/// Cache of translation-safe keys and their translations for one run
#[derive(Debug, Default, Clone)]
pub struct EntryCache {
    /// Key to translation, `None` while the key is still pending
    entries: IndexMap<String, Option<String>>,

    /// Sum of the character counts of all distinct keys
    total_characters: usize,
}

impl EntryCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a key as pending; known keys are left as they are
    ///
    /// Returns whether the key was new.
    pub fn ensure(&mut self, key: &str) -> bool {
        if self.entries.contains_key(key) {
            return false;
        }

        self.total_characters += key.chars().count();
        self.entries.insert(key.to_string(), None);
        true
    }

    /// Store the translation for a key registered with [`EntryCache::ensure`]
    pub fn resolve(&mut self, key: &str, translation: impl Into<String>) -> Result<(), IntegrityError> {
        match self.entries.get_mut(key) {
            Some(slot) => {
                *slot = Some(translation.into());
                Ok(())
            }
            None => Err(IntegrityError::UnknownCacheKey(key.to_string())),
        }
    }

    /// Get the translation for a key
    ///
    /// Fails when the key was never collected or its batch was never resolved.
    pub fn lookup(&self, key: &str) -> Result<&str, IntegrityError> {
        match self.entries.get(key) {
            Some(Some(translation)) => Ok(translation.as_str()),
            _ => {
                debug!("Cache miss for '{}'", truncate_text(key, 30));
                Err(IntegrityError::MissingCacheEntry(key.to_string()))
            }
        }
    }

    /// Whether the key has been collected
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// All keys in first-discovery order
    pub fn keys(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    /// Keys that still wait for a translation, in first-discovery order
    pub fn pending_keys(&self) -> Vec<String> {
        self.entries
            .iter()
            .filter(|(_, translation)| translation.is_none())
            .map(|(key, _)| key.clone())
            .collect()
    }

    /// Whether every collected key has a translation
    pub fn is_fully_resolved(&self) -> bool {
        self.entries.values().all(Option::is_some)
    }

    /// Total characters across distinct keys, used for cost estimates
    pub fn total_characters(&self) -> usize {
        self.total_characters
    }

    /// Get the number of entries in the cache
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Truncate text to a maximum number of characters with ellipsis
pub(crate) fn truncate_text(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((end, _)) => format!("{}...", &text[..end]),
        None => text.to_string(),
    }
}
