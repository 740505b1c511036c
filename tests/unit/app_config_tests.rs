/*!
 * Tests for application configuration
 */

use anyhow::Result;
use jsonlate::app_config::{Config, LogLevel};
use jsonlate::errors::ConfigError;
use jsonlate::providers::deepl::{FREE_ENDPOINT, PRO_ENDPOINT};
use log::LevelFilter;
use crate::common;

/// Test default configuration values
#[test]
fn test_default_config_shouldHaveExpectedValues() {
    let config = Config::default();

    assert_eq!(config.target_language, "FR");
    assert_eq!(config.source_language, None);
    assert_eq!(config.max_batch_size, 49);
    assert_eq!(config.timeout_secs, 30);
    assert_eq!(config.usage_limit, None);
    assert!(!config.formal);
    assert!(!config.translate_keys);
    assert!(!config.confirm);
    assert_eq!(config.log_level, LogLevel::Info);
}

/// Test that validation requires an API key
#[test]
fn test_validate_withoutApiKey_shouldFail() {
    let config = Config::default();
    assert!(matches!(config.validate(), Err(ConfigError::MissingApiKey)));

    let config = Config { api_key: "   ".to_string(), ..Config::default() };
    assert!(matches!(config.validate(), Err(ConfigError::MissingApiKey)));
}

/// Test that a valid configuration passes
#[test]
fn test_validate_withValidConfig_shouldSucceed() {
    let config = Config {
        source_language: Some("en".to_string()),
        target_language: "pt-br".to_string(),
        ..common::test_config()
    };
    assert!(config.validate().is_ok());
}

/// Test that validated configs carry provider-style language codes
#[test]
fn test_validated_shouldUppercaseLanguageCodes() {
    let config = Config {
        source_language: Some("en_gb".to_string()),
        target_language: "de".to_string(),
        ..common::test_config()
    };

    let config = config.validated().unwrap();

    assert_eq!(config.target_language, "DE");
    assert_eq!(config.source_language.as_deref(), Some("EN-GB"));
}

/// Test that validated rejects what validate rejects
#[test]
fn test_validated_withInvalidConfig_shouldFail() {
    assert!(matches!(Config::default().validated(), Err(ConfigError::MissingApiKey)));

    let config = Config { source_language: Some("zz".to_string()), ..common::test_config() };
    assert!(matches!(config.validated(), Err(ConfigError::InvalidLanguage(_))));
}

/// Test language validation
#[test]
fn test_validate_withInvalidLanguage_shouldFail() {
    let config = Config { target_language: "klingon".to_string(), ..common::test_config() };
    assert!(matches!(config.validate(), Err(ConfigError::InvalidLanguage(_))));

    let config = Config { source_language: Some("zz".to_string()), ..common::test_config() };
    assert!(matches!(config.validate(), Err(ConfigError::InvalidLanguage(_))));
}

/// Test batch size validation
#[test]
fn test_validate_withZeroBatchSize_shouldFail() {
    let config = Config { max_batch_size: 0, ..common::test_config() };
    assert!(matches!(config.validate(), Err(ConfigError::InvalidBatchSize(0))));
}

/// Test endpoint validation
#[test]
fn test_validate_withInvalidEndpoint_shouldFail() {
    let config = Config { endpoint: Some("not a url".to_string()), ..common::test_config() };
    assert!(matches!(config.validate(), Err(ConfigError::InvalidEndpoint { .. })));
}

/// Test endpoint selection from the key
#[test]
fn test_get_endpoint_shouldFollowKeyPlan() {
    let free = Config { api_key: "abc:fx".to_string(), ..Config::default() };
    assert_eq!(free.get_endpoint(), FREE_ENDPOINT);

    let pro = Config { api_key: "abc".to_string(), ..Config::default() };
    assert_eq!(pro.get_endpoint(), PRO_ENDPOINT);

    let custom = Config { endpoint: Some("http://localhost:8080/v2".to_string()), ..pro };
    assert_eq!(custom.get_endpoint(), "http://localhost:8080/v2");
}

/// Test loading a partial config file
#[test]
fn test_from_file_withPartialConfig_shouldFillDefaults() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(
        temp_dir.path(),
        "jsonlate.conf.json",
        r#"{"target_language": "DE", "formal": true, "usage_limit": 1000, "log_level": "debug"}"#,
    )?;

    let config = Config::from_file(&path)?;

    assert_eq!(config.target_language, "DE");
    assert!(config.formal);
    assert_eq!(config.usage_limit, Some(1000));
    assert_eq!(config.log_level, LogLevel::Debug);
    assert_eq!(config.max_batch_size, 49);
    assert!(config.api_key.is_empty());

    Ok(())
}

/// Test loading a malformed config file
#[test]
fn test_from_file_withInvalidJson_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "bad.json", "{ nope")?;

    assert!(Config::from_file(&path).is_err());
    assert!(Config::from_file(temp_dir.path().join("missing.json")).is_err());

    Ok(())
}

/// Test log level conversion
#[test]
fn test_log_level_shouldMapToLevelFilter() {
    assert_eq!(LogLevel::Error.to_level_filter(), LevelFilter::Error);
    assert_eq!(LogLevel::Info.to_level_filter(), LevelFilter::Info);
    assert_eq!(LogLevel::Trace.to_level_filter(), LevelFilter::Trace);
}
