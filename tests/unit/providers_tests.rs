/*!
 * Tests for provider implementations
 */

use jsonlate::errors::ProviderError;
use jsonlate::providers::deepl::{DeepL, DeepLResponse, DeepLUsageResponse};
use jsonlate::providers::mock::MockProvider;
use jsonlate::providers::{Formality, Provider, TranslateOptions, Usage, UsageDetail};

fn texts(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_formality_fromFormal_shouldMapFlag() {
    assert_eq!(Formality::from_formal(true), Formality::PreferMore);
    assert_eq!(Formality::from_formal(false), Formality::PreferLess);
    assert_eq!(Formality::default(), Formality::PreferLess);
    assert_eq!(Formality::PreferMore.as_str(), "prefer_more");
}

#[test]
fn test_translateOptions_builders_shouldSetFields() {
    let options = TranslateOptions::new("DE")
        .source_language("EN")
        .formality(Formality::PreferMore);

    assert_eq!(options.target_language, "DE");
    assert_eq!(options.source_language.as_deref(), Some("EN"));
    assert_eq!(options.formality, Formality::PreferMore);
}

#[test]
fn test_usage_anyLimitReached_shouldCheckEveryCounter() {
    let fresh = Usage {
        character: Some(UsageDetail { count: 10, limit: 100 }),
        document: Some(UsageDetail { count: 0, limit: 5 }),
    };
    assert!(!fresh.any_limit_reached());

    let documents_exhausted = Usage {
        document: Some(UsageDetail { count: 5, limit: 5 }),
        ..fresh
    };
    assert!(documents_exhausted.any_limit_reached());

    assert!(!Usage::default().any_limit_reached());
}

#[test]
fn test_deeplUsageResponse_shouldConvertCompleteCounters() {
    let response: DeepLUsageResponse = serde_json::from_str(
        r#"{"character_count": 180118, "character_limit": 1250000}"#,
    ).unwrap();

    let usage: Usage = response.into();
    assert_eq!(usage.character, Some(UsageDetail { count: 180118, limit: 1250000 }));
    assert_eq!(usage.document, None);
}

#[test]
fn test_deeplResponse_shouldParseTranslations() {
    let response: DeepLResponse = serde_json::from_str(
        r#"{"translations": [
            {"detected_source_language": "EN", "text": "Bonjour <t0/>"},
            {"text": "Au revoir"}
        ]}"#,
    ).unwrap();

    assert_eq!(response.translations.len(), 2);
    assert_eq!(response.translations[0].text, "Bonjour <t0/>");
    assert_eq!(response.translations[0].detected_source_language.as_deref(), Some("EN"));
    assert_eq!(response.translations[1].detected_source_language, None);
}

#[tokio::test]
async fn test_deepl_withUnreachableEndpoint_shouldFailWithTransportError() {
    let provider = DeepL::new("test-key:fx", "http://127.0.0.1:9/v2", 2).unwrap();
    let options = TranslateOptions::new("FR");

    let result = provider.translate_batch(&texts(&["Hello"]), &options).await;

    assert!(matches!(
        result,
        Err(ProviderError::ConnectionError(_)) | Err(ProviderError::RequestFailed(_))
    ));
    assert_eq!(provider.name(), "DeepL");
}

#[tokio::test]
async fn test_mockProvider_working_shouldPrefixTargetLanguage() {
    let provider = MockProvider::working().with_detected_language("EN");
    let options = TranslateOptions::new("DE");

    let result = provider.translate_batch(&texts(&["Hello", "World"]), &options).await.unwrap();

    assert_eq!(result.len(), 2);
    assert_eq!(result[0].text, "[DE] Hello");
    assert_eq!(result[1].text, "[DE] World");
    assert_eq!(result[0].detected_source_language.as_deref(), Some("EN"));
    assert_eq!(provider.request_count(), 1);
}

#[tokio::test]
async fn test_mockProvider_failOn_shouldOnlyFailThatRequest() {
    let provider = MockProvider::fail_on(2);
    let options = TranslateOptions::new("FR");

    assert!(provider.translate_batch(&texts(&["a"]), &options).await.is_ok());
    assert!(provider.translate_batch(&texts(&["b"]), &options).await.is_err());
    assert!(provider.translate_batch(&texts(&["c"]), &options).await.is_ok());
    assert_eq!(provider.request_count(), 3);
}

#[tokio::test]
async fn test_mockProvider_shortResponse_shouldDropLastItem() {
    let provider = MockProvider::short_response();
    let options = TranslateOptions::new("FR");

    let result = provider.translate_batch(&texts(&["a", "b", "c"]), &options).await.unwrap();
    assert_eq!(result.len(), 2);
}

#[tokio::test]
async fn test_mockProvider_droppingMarkers_shouldStripMarkers() {
    let provider = MockProvider::dropping_markers();
    let options = TranslateOptions::new("FR");

    let result = provider.translate_batch(&texts(&["Hello <t0/>"]), &options).await.unwrap();
    assert_eq!(result[0].text, "[FR] Hello ");
}

#[tokio::test]
async fn test_mockProvider_usage_shouldReportConfiguredUsage() {
    let usage = Usage {
        character: Some(UsageDetail { count: 42, limit: 50 }),
        document: None,
    };
    let provider = MockProvider::working().with_usage(usage);

    assert_eq!(provider.usage().await.unwrap(), usage);
}
