/*!
 * Controller lifecycle tests: construction, input resolution, confirmation
 */

use std::sync::Arc;
use anyhow::Result;

use jsonlate::app_config::Config;
use jsonlate::app_controller::{AutoConfirm, Controller, RunOutcome};
use jsonlate::errors::ConfigError;
use jsonlate::providers::mock::MockProvider;
use crate::common;

/// Test controller creation with the real provider
#[test]
fn test_controller_withValidConfig_shouldInitialize() {
    let controller = Controller::with_config(common::test_config());
    assert!(controller.is_ok());
}

/// Test that a missing API key is rejected before anything runs
#[test]
fn test_controller_withoutApiKey_shouldFail() {
    let result = Controller::with_config(Config::default());
    assert!(result.is_err());

    let result = Controller::with_provider(Config::default(), Arc::new(MockProvider::working()));
    assert!(result.is_err());
}

/// Test input resolution with an explicit path
#[test]
fn test_resolve_input_withExplicitPath_shouldUseIt() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_file(temp_dir.path(), "custom.txt", "{}")?;

    let resolved = Controller::resolve_input(Some(input.clone()), temp_dir.path())?;
    assert_eq!(resolved, input);

    let missing = Controller::resolve_input(Some(temp_dir.path().join("nope.json")), temp_dir.path());
    assert!(matches!(missing, Err(ConfigError::MissingInput(_))));

    Ok(())
}

/// Test input resolution from the directory listing
#[test]
fn test_resolve_input_withoutPath_shouldPickFirstJsonFile() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::create_test_file(temp_dir.path(), "b.json", "{}")?;
    common::create_test_file(temp_dir.path(), "a.json", "{}")?;

    let resolved = Controller::resolve_input(None, temp_dir.path())?;
    assert_eq!(resolved, temp_dir.path().join("a.json"));

    let empty_dir = common::create_temp_dir()?;
    let missing = Controller::resolve_input(None, empty_dir.path());
    assert!(matches!(missing, Err(ConfigError::MissingInput(_))));

    Ok(())
}

/// Test that declining the confirmation sends nothing and writes nothing
#[tokio::test]
async fn test_run_withDeclinedConfirmation_shouldAbort() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_document(temp_dir.path(), "messages.json")?;
    let provider = MockProvider::working();
    let config = Config { confirm: true, ..common::test_config() };

    let outcome = Controller::with_provider(config, Arc::new(provider.clone()))?
        .run(Some(input), None, &AutoConfirm(false))
        .await?;

    assert_eq!(outcome, RunOutcome::Aborted);
    assert_eq!(provider.request_count(), 0);
    assert!(!temp_dir.path().join("messages.fr.json").exists());

    Ok(())
}

/// Test that the confirmation is only asked when enabled
#[test]
fn test_run_withoutConfirmFlag_shouldNotAsk() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_document(temp_dir.path(), "messages.json")?;
    let controller = Controller::with_provider(common::test_config(), Arc::new(MockProvider::working()))?;

    let outcome = tokio_test::block_on(async {
        controller.run(Some(input), None, &AutoConfirm(false)).await
    })?;

    assert!(matches!(outcome, RunOutcome::Written { .. }));
    assert!(temp_dir.path().join("messages.fr.json").exists());

    Ok(())
}

/// Test that an existing output file is overwritten
#[tokio::test]
async fn test_run_withExistingOutput_shouldOverwrite() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_file(temp_dir.path(), "en.json", r#"{"a": "x"}"#)?;
    let output = common::create_test_file(temp_dir.path(), "en.fr.json", "stale")?;

    Controller::with_provider(common::test_config(), Arc::new(MockProvider::working()))?
        .run(Some(input), None, &AutoConfirm(true))
        .await?;

    assert_eq!(common::read_json(&output)?, serde_json::json!({"a": "[FR] x"}));

    Ok(())
}
