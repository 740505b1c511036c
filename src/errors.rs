/*!
 * Error types for the jsonlate application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions. Every variant is
 * fatal: nothing here is retried, and no output file is written once one of
 * them is raised.
 */

use thiserror::Error;

/// Errors that can occur when working with provider APIs
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Error related to rate limiting
    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    /// The account quota for the billing period is used up
    #[error("Quota exceeded: {0}")]
    QuotaExceeded(String),

    /// Error with authentication
    #[error("Authentication error: {0}")]
    AuthenticationError(String),
}

/// Broken invariants between the collection and substitution passes
#[derive(Error, Debug, PartialEq, Eq)]
pub enum IntegrityError {
    /// A key looked up during reconstruction was never resolved
    #[error("Missing cache entry for '{0}'")]
    MissingCacheEntry(String),

    /// A translation was written for a key that was never collected
    #[error("Unknown cache key '{0}'")]
    UnknownCacheKey(String),

    /// The provider returned a different number of items than it was sent
    #[error("Provider returned {received} translations for a batch of {expected}")]
    ResponseCountMismatch {
        /// Number of texts submitted
        expected: usize,
        /// Number of translations received
        received: usize,
    },

    /// A translated text carries a different number of markers than the source had placeholders
    #[error("Translation '{text}' has {found} placeholder markers, expected {expected}")]
    MarkerCountMismatch {
        /// The translated text
        text: String,
        /// Number of stored placeholders
        expected: usize,
        /// Number of markers found in the translation
        found: usize,
    },
}

/// Errors raised while validating the configuration, before any I/O
#[derive(Error, Debug)]
pub enum ConfigError {
    /// No API key on the command line, in the config file or the environment
    #[error("No API key given: use --key or set the DEEPL_API_KEY environment variable")]
    MissingApiKey,

    /// No input file given and none found in the working directory
    #[error("No input file given and no .json file found in {0}")]
    MissingInput(String),

    /// Language code that cannot be mapped to a known language
    #[error("Invalid language code: {0}")]
    InvalidLanguage(String),

    /// Batch size must be at least one
    #[error("Invalid batch size {0}: must be at least 1")]
    InvalidBatchSize(usize),

    /// Endpoint is not a valid URL
    #[error("Invalid endpoint '{endpoint}': {reason}")]
    InvalidEndpoint {
        /// The configured endpoint
        endpoint: String,
        /// Why parsing failed
        reason: String,
    },
}

/// Errors that can occur during translation
#[derive(Error, Debug)]
pub enum TranslationError {
    /// Error from the provider API
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Broken invariant between passes
    #[error("Integrity error: {0}")]
    Integrity(#[from] IntegrityError),

    /// Partitioning was asked for batches of size zero
    #[error("Invalid batch size {0}: must be at least 1")]
    InvalidBatchSize(usize),

    /// Submitting the collected entries would go over the character budget
    #[error("Usage limit exceeded: {used} characters used + {requested} requested > {limit}")]
    UsageLimitExceeded {
        /// Characters already billed in this period
        used: u64,
        /// Characters this run would submit
        requested: u64,
        /// Allowed maximum
        limit: u64,
    },

    /// The provider reports one of its own limits as reached
    #[error("Provider usage limit reached")]
    ProviderLimitReached,
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error in the configuration
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Error from a provider
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Error from translation
    #[error("Translation error: {0}")]
    Translation(#[from] TranslationError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        Self::File(error.to_string())
    }
}
