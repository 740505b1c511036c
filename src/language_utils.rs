//! Language utilities for provider language codes
//!
//! Providers take codes such as `FR`, `en`, `EN-GB` or `PT-BR`: an ISO 639-1
//! primary subtag, optionally followed by a region or variant.

use isolang::Language;

use crate::errors::ConfigError;

/// Split a code into its primary language subtag, lowercased
fn primary_subtag(code: &str) -> String {
    code.trim()
        .split(['-', '_'])
        .next()
        .unwrap_or_default()
        .to_lowercase()
}

/// Validate a language code and return it in the uppercase form providers expect
pub fn validate_language_code(code: &str) -> Result<String, ConfigError> {
    let primary = primary_subtag(code);

    if primary.len() == 2 && Language::from_639_1(&primary).is_some() {
        return Ok(code.trim().replace('_', "-").to_uppercase());
    }

    Err(ConfigError::InvalidLanguage(code.to_string()))
}

/// Lowercased code used in output file names
pub fn file_suffix(code: &str) -> String {
    code.trim().to_lowercase()
}

/// Get the language name from a code
pub fn get_language_name(code: &str) -> Result<String, ConfigError> {
    let primary = primary_subtag(code);
    let lang = Language::from_639_1(&primary)
        .ok_or_else(|| ConfigError::InvalidLanguage(code.to_string()))?;

    Ok(lang.to_name().to_string())
}

/// Human readable description of a language pair for log messages
pub fn describe_pair(source: Option<&str>, target: &str) -> String {
    let name = |code: &str| get_language_name(code).unwrap_or_else(|_| code.to_string());
    let source = source.map(name).unwrap_or_else(|| "auto-detected".to_string());
    format!("{} -> {}", source, name(target))
}
