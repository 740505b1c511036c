use anyhow::{Context, Result};
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use url::Url;

use crate::errors::ConfigError;
use crate::language_utils;
use crate::providers::deepl;
use crate::translation::DEFAULT_MAX_BATCH_SIZE;

/// Represents the application configuration
///
/// Values come from an optional JSON file and are overridden by command line flags.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Source language code, `None` for provider-side detection
    #[serde(default)]
    pub source_language: Option<String>,

    /// Target language code
    #[serde(default = "default_target_language")]
    pub target_language: String,

    /// Provider API key
    #[serde(default = "String::new")]
    pub api_key: String,

    /// Provider base URL, derived from the API key when empty
    #[serde(default)]
    pub endpoint: Option<String>,

    /// Ask for a more formal register
    #[serde(default)]
    pub formal: bool,

    /// Translate object keys as well as values
    #[serde(default)]
    pub translate_keys: bool,

    /// Ask for confirmation before submitting
    #[serde(default)]
    pub confirm: bool,

    /// Character budget checked against the provider usage before submitting
    #[serde(default)]
    pub usage_limit: Option<u64>,

    /// Maximum texts per request
    #[serde(default = "default_max_batch_size")]
    pub max_batch_size: usize,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    // @returns: Matching filter for the log crate
    pub fn to_level_filter(self) -> LevelFilter {
        match self {
            Self::Error => LevelFilter::Error,
            Self::Warn => LevelFilter::Warn,
            Self::Info => LevelFilter::Info,
            Self::Debug => LevelFilter::Debug,
            Self::Trace => LevelFilter::Trace,
        }
    }
}

fn default_target_language() -> String {
    "FR".to_string()
}

fn default_max_batch_size() -> usize {
    DEFAULT_MAX_BATCH_SIZE
}

fn default_timeout_secs() -> u64 {
    30
}

impl Config {
    /// Load a configuration file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to open config file: {:?}", path))?;

        let reader = BufReader::new(file);
        let config: Config = serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;

        Ok(config)
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_key.trim().is_empty() {
            return Err(ConfigError::MissingApiKey);
        }

        language_utils::validate_language_code(&self.target_language)?;
        if let Some(source) = &self.source_language {
            language_utils::validate_language_code(source)?;
        }

        if self.max_batch_size == 0 {
            return Err(ConfigError::InvalidBatchSize(self.max_batch_size));
        }

        let endpoint = self.get_endpoint();
        Url::parse(&endpoint).map_err(|e| ConfigError::InvalidEndpoint {
            endpoint: endpoint.clone(),
            reason: e.to_string(),
        })?;

        Ok(())
    }

    /// Validate, then store language codes in the uppercase form providers expect
    pub fn validated(mut self) -> Result<Self, ConfigError> {
        self.validate()?;

        self.target_language = language_utils::validate_language_code(&self.target_language)?;
        self.source_language = self.source_language.as_deref()
            .map(language_utils::validate_language_code)
            .transpose()?;

        Ok(self)
    }

    /// Get the endpoint, falling back to the one matching the API key's plan
    pub fn get_endpoint(&self) -> String {
        match &self.endpoint {
            Some(endpoint) if !endpoint.trim().is_empty() => endpoint.clone(),
            _ => deepl::endpoint_for_key(&self.api_key).to_string(),
        }
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            source_language: None,
            target_language: default_target_language(),
            api_key: String::new(),
            endpoint: None,
            formal: false,
            translate_keys: false,
            confirm: false,
            usage_limit: None,
            max_batch_size: default_max_batch_size(),
            timeout_secs: default_timeout_secs(),
            log_level: LogLevel::default(),
        }
    }
}
