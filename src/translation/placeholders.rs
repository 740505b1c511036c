/*!
 * Placeholder protection for translation.
 *
 * Template placeholders such as `{{name}}` must come back from the provider
 * untouched. Before submission every placeholder is swapped for a short
 * numbered marker (`<t0/>`, `<t1/>`, …) that translation engines pass through
 * as an inline tag; after translation the markers are swapped back.
 */

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::errors::IntegrityError;

/// Regex for matching protected tokens: `{{…}}` placeholders (non-greedy so
/// adjacent ones stay separate) and literal marker-shaped text already in the source
static PROTECTED_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{\{.*?\}\}|<t\d+/>").expect("Invalid placeholder regex")
});

/// Regex for matching the numbered markers that replace placeholders
static MARKER_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"<t\d+/>").expect("Invalid marker regex")
});

/// A display string split into its translation-safe key and the placeholders it carried
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedText {
    /// Text with each placeholder replaced by `<t{i}/>`
    pub key: String,

    /// Original protected substrings in occurrence order
    pub placeholders: Vec<String>,
}

impl NormalizedText {
    /// Whether the source text contained any placeholder
    pub fn has_placeholders(&self) -> bool {
        !self.placeholders.is_empty()
    }
}

/// Build the marker for the placeholder at `index`
pub fn marker(index: usize) -> String {
    format!("<t{}/>", index)
}

/// Whether `text` carries at least one marker
pub fn contains_marker(text: &str) -> bool {
    MARKER_REGEX.is_match(text)
}

/// Replace every placeholder in `text` with a positional marker
///
/// Source text that already looks like a marker is protected the same way,
/// so every marker in the key maps to exactly one recorded token.
pub fn normalize(text: &str) -> NormalizedText {
    let mut placeholders = Vec::new();

    let key = PROTECTED_REGEX.replace_all(text, |caps: &Captures| {
        let index = placeholders.len();
        placeholders.push(caps[0].to_string());
        marker(index)
    });

    NormalizedText {
        key: key.into_owned(),
        placeholders,
    }
}

/// Put the original placeholders back in place of the markers of a translated key
///
/// The i-th marker found left to right receives `placeholders[i]`, whatever
/// number it carries. A translation whose marker count differs from the
/// number of placeholders is rejected instead of being partially restored.
pub fn denormalize(translated: &str, placeholders: &[String]) -> Result<String, IntegrityError> {
    // Text without placeholders never went through marker substitution
    if placeholders.is_empty() {
        return Ok(translated.to_string());
    }

    let found = MARKER_REGEX.find_iter(translated).count();
    if found != placeholders.len() {
        return Err(IntegrityError::MarkerCountMismatch {
            text: translated.to_string(),
            expected: placeholders.len(),
            found,
        });
    }

    let mut next = placeholders.iter();
    let restored = MARKER_REGEX.replace_all(translated, |_: &Captures| {
        next.next().cloned().unwrap_or_default()
    });

    Ok(restored.into_owned())
}
