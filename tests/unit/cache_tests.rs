/*!
 * Tests for the in-memory translation cache
 */

use tercuman::translation::cache::TranslationCache;

#[test]
fn test_cache_get_withMissingKey_shouldReturnNone() {
    let cache = TranslationCache::new();
    let result = cache.get("en", "product.1.name");
    assert!(result.is_none());
}

#[test]
fn test_cache_store_thenGet_shouldReturnTranslation() {
    let cache = TranslationCache::new();
    cache.store("en", "product.1.name", "LED Panel");

    let result = cache.get("en", "product.1.name");
    assert_eq!(result, Some("LED Panel".to_string()));
}

#[test]
fn test_cache_get_withDifferentLanguage_shouldReturnNone() {
    let cache = TranslationCache::new();
    cache.store("en", "product.1.name", "LED Panel");

    let result = cache.get("fr", "product.1.name");
    assert!(result.is_none());
}

#[test]
fn test_cache_store_withSameKey_shouldOverwrite() {
    let cache = TranslationCache::new();

    cache.store("en", "product.1.name", "Lamp");
    cache.store("en", "product.1.name", "Light Fixture");

    assert_eq!(
        cache.get("en", "product.1.name"),
        Some("Light Fixture".to_string())
    );
}

#[test]
fn test_cache_store_withMultipleLanguages_shouldKeepSeparateEntries() {
    let cache = TranslationCache::new();

    cache.store("en", "category.lighting.name", "Lighting");
    cache.store("fr", "category.lighting.name", "Éclairage");
    cache.store("de", "category.lighting.name", "Beleuchtung");

    assert_eq!(cache.len(), 3);
    assert_eq!(
        cache.get("fr", "category.lighting.name"),
        Some("Éclairage".to_string())
    );
}

#[test]
fn test_cache_clear_shouldRemoveEverything() {
    let cache = TranslationCache::new();

    cache.store("en", "product.1.name", "Lamp");
    cache.store("fr", "product.1.name", "Lampe");
    cache.clear();

    assert!(cache.is_empty());
    assert!(cache.get("en", "product.1.name").is_none());
}

#[test]
fn test_cache_clearForKey_shouldRemoveAllLanguagesForThatKey() {
    let cache = TranslationCache::new();

    cache.store("en", "product.42.name", "Panel");
    cache.store("fr", "product.42.name", "Panneau");
    cache.store("en", "product.43.name", "Cable");

    let removed = cache.clear_for_key("product.42.name");

    assert_eq!(removed, 2);
    assert!(cache.get("en", "product.42.name").is_none());
    assert!(cache.get("fr", "product.42.name").is_none());
    // Unrelated key remains intact
    assert_eq!(cache.get("en", "product.43.name"), Some("Cable".to_string()));
}

#[test]
fn test_cache_clearForKey_withNoMatches_shouldRemoveNothing() {
    let cache = TranslationCache::new();
    cache.store("en", "product.1.name", "Lamp");

    let removed = cache.clear_for_key("category.lighting");

    assert_eq!(removed, 0);
    assert_eq!(cache.len(), 1);
}

#[test]
fn test_cache_stats_shouldCountHitsAndMisses() {
    let cache = TranslationCache::new();
    cache.store("en", "product.1.name", "Lamp");

    let _ = cache.get("en", "product.1.name"); // hit
    let _ = cache.get("en", "product.2.name"); // miss
    let _ = cache.get("en", "product.1.name"); // hit

    let (hits, misses, hit_rate) = cache.stats();
    assert_eq!(hits, 2);
    assert_eq!(misses, 1);
    assert!((hit_rate - 2.0 / 3.0).abs() < f64::EPSILON);
}

#[test]
fn test_cache_clone_shouldShareStorage() {
    let cache1 = TranslationCache::new();
    let cache2 = cache1.clone();

    cache1.store("en", "product.1.name", "Lamp");

    // cache2 should see the same data (shared storage)
    assert_eq!(cache2.get("en", "product.1.name"), Some("Lamp".to_string()));
}

#[test]
fn test_cache_withUnicodeText_shouldHandleCorrectly() {
    let cache = TranslationCache::new();

    cache.store("ar", "category.lighting.name", "إضاءة");
    cache.store("ru", "category.lighting.name", "Освещение");

    assert_eq!(
        cache.get("ar", "category.lighting.name"),
        Some("إضاءة".to_string())
    );
    assert_eq!(
        cache.get("ru", "category.lighting.name"),
        Some("Освещение".to_string())
    );
}

#[test]
fn test_cache_withEmptyValue_shouldStoreAndReturnEmpty() {
    let cache = TranslationCache::new();

    cache.store("en", "product.1.description", "");
    assert_eq!(cache.get("en", "product.1.description"), Some(String::new()));
}
