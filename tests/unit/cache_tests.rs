/*!
 * Tests for the translation entry cache
 */

use jsonlate::errors::IntegrityError;
use jsonlate::translation::cache::EntryCache;

#[test]
fn test_cache_new_shouldBeEmpty() {
    let cache = EntryCache::new();
    assert!(cache.is_empty());
    assert_eq!(cache.len(), 0);
    assert_eq!(cache.total_characters(), 0);
    assert!(cache.is_fully_resolved());
}

#[test]
fn test_cache_ensure_withNewKey_shouldRegisterPendingEntry() {
    let mut cache = EntryCache::new();

    assert!(cache.ensure("hello"));
    assert!(cache.contains("hello"));
    assert_eq!(cache.pending_keys(), vec!["hello".to_string()]);
    assert!(!cache.is_fully_resolved());
}

#[test]
fn test_cache_ensure_withKnownKey_shouldBeNoOp() {
    let mut cache = EntryCache::new();

    assert!(cache.ensure("hello"));
    assert!(!cache.ensure("hello"));
    assert!(!cache.ensure("hello"));

    assert_eq!(cache.len(), 1);
    assert_eq!(cache.total_characters(), 5);
}

#[test]
fn test_cache_ensure_afterResolve_shouldKeepTranslation() {
    let mut cache = EntryCache::new();
    cache.ensure("hello");
    cache.resolve("hello", "bonjour").unwrap();

    cache.ensure("hello");
    assert_eq!(cache.lookup("hello"), Ok("bonjour"));
}

#[test]
fn test_cache_keys_shouldKeepFirstDiscoveryOrder() {
    let mut cache = EntryCache::new();
    for key in ["zeta", "alpha", "zeta", "mid", "alpha"] {
        cache.ensure(key);
    }

    assert_eq!(cache.keys(), vec!["zeta", "alpha", "mid"]);
}

#[test]
fn test_cache_resolve_withKnownKey_shouldStoreTranslation() {
    let mut cache = EntryCache::new();
    cache.ensure("hello");
    cache.ensure("goodbye");

    cache.resolve("hello", "bonjour").unwrap();

    assert_eq!(cache.lookup("hello"), Ok("bonjour"));
    assert_eq!(cache.pending_keys(), vec!["goodbye".to_string()]);
    assert!(!cache.is_fully_resolved());

    cache.resolve("goodbye", "au revoir").unwrap();
    assert!(cache.is_fully_resolved());
}

#[test]
fn test_cache_resolve_withUnknownKey_shouldFail() {
    let mut cache = EntryCache::new();
    let result = cache.resolve("never collected", "jamais");
    assert_eq!(result, Err(IntegrityError::UnknownCacheKey("never collected".to_string())));
}

#[test]
fn test_cache_lookup_withPendingKey_shouldReportMissingEntry() {
    let mut cache = EntryCache::new();
    cache.ensure("hello");

    assert_eq!(cache.lookup("hello"), Err(IntegrityError::MissingCacheEntry("hello".to_string())));
}

#[test]
fn test_cache_lookup_withUnknownKey_shouldReportMissingEntry() {
    let cache = EntryCache::new();
    assert_eq!(cache.lookup("ghost"), Err(IntegrityError::MissingCacheEntry("ghost".to_string())));
}

#[test]
fn test_cache_withUnicodeText_shouldCountCharacters() {
    let mut cache = EntryCache::new();

    let source = "こんにちは";
    let translation = "Bonjour 你好 مرحبا";

    cache.ensure(source);
    cache.resolve(source, translation).unwrap();

    assert_eq!(cache.lookup(source), Ok(translation));
    assert_eq!(cache.total_characters(), 5);
}

#[test]
fn test_cache_withLongText_shouldHandleCorrectly() {
    let mut cache = EntryCache::new();

    let source = "a".repeat(10000);
    let translation = "b".repeat(10000);

    cache.ensure(&source);
    cache.resolve(&source, translation.clone()).unwrap();

    assert_eq!(cache.lookup(&source), Ok(translation.as_str()));
    assert_eq!(cache.total_characters(), 10000);
}
