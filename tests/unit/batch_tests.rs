/*!
 * Tests for batch translation: completeness, positional correspondence,
 * layer partitioning and failure fallback
 */

use std::sync::Arc;

use tercuman::providers::MockTranslator;
use tercuman::{BatchItem, Repository, TranslateOptions, TranslationRecord};

use crate::common::{service_sharing, service_with};

fn color_items() -> Vec<BatchItem> {
    vec![
        BatchItem::new("attribute.color.red", "Kırmızı"),
        BatchItem::new("attribute.color.blue", "Mavi"),
    ]
}

#[tokio::test]
async fn test_translateBatch_shouldReturnOneEntryPerKey() {
    let provider = Arc::new(MockTranslator::working());
    let service = service_with(provider);

    let items: Vec<BatchItem> = (0..7)
        .map(|i| BatchItem::new(format!("product.{}.name", i), format!("Ürün {}", i)))
        .collect();

    let results = service.translate_batch(&items, "en", "product").await;

    assert_eq!(results.len(), items.len());
    for item in &items {
        assert!(results.contains_key(&item.key), "missing key {}", item.key);
    }
}

#[tokio::test]
async fn test_translateBatch_shouldPairTranslationsPositionally() {
    let provider = Arc::new(
        MockTranslator::working()
            .with_canned("Kırmızı", "Red")
            .with_canned("Mavi", "Blue"),
    );
    let service = service_with(provider.clone());

    let results = service.translate_batch(&color_items(), "en", "attribute").await;

    assert_eq!(results.get("attribute.color.red").unwrap(), "Red");
    assert_eq!(results.get("attribute.color.blue").unwrap(), "Blue");
    // Both texts went out in one provider request
    assert_eq!(provider.request_count(), 1);
}

#[tokio::test]
async fn test_translateBatch_shouldPersistAndCacheResults() {
    let provider = Arc::new(MockTranslator::working().with_canned("Kırmızı", "Red"));
    let service = service_with(provider);

    let items = vec![BatchItem::new("attribute.color.red", "Kırmızı")];
    service.translate_batch(&items, "en", "attribute").await;

    let row = service
        .repository()
        .get_translation("en", "attribute.color.red")
        .await
        .unwrap()
        .expect("batch result should be persisted");
    assert_eq!(row.translation_value, "Red");
    assert!(row.auto_translated);
    assert_eq!(row.translation_type, "attribute");

    assert_eq!(service.cache_len(), 1);
}

#[tokio::test]
async fn test_translateBatch_withWarmCache_shouldSkipProvider() {
    let provider = Arc::new(
        MockTranslator::working()
            .with_canned("Kırmızı", "Red")
            .with_canned("Mavi", "Blue"),
    );
    let service = service_with(provider.clone());

    let items = color_items();
    service.translate_batch(&items, "en", "attribute").await;
    assert_eq!(provider.request_count(), 1);

    // Second pass is served entirely from the in-memory cache
    let results = service.translate_batch(&items, "en", "attribute").await;
    assert_eq!(provider.request_count(), 1);
    assert_eq!(results.get("attribute.color.red").unwrap(), "Red");
    assert_eq!(results.get("attribute.color.blue").unwrap(), "Blue");
}

#[tokio::test]
async fn test_translateBatch_withStoreRows_shouldOnlySendMissesToProvider() {
    let provider = Arc::new(MockTranslator::working().with_canned("Mavi", "Blue"));
    let repository = Repository::new_in_memory().unwrap();

    // One of the two items already has a persisted translation
    let seeded = TranslationRecord::auto("en", "attribute.color.red", "Red", "Kırmızı", "attribute");
    repository.upsert_translation(&seeded).await.unwrap();

    let service = service_sharing(repository, provider.clone());

    let results = service.translate_batch(&color_items(), "en", "attribute").await;

    assert_eq!(results.get("attribute.color.red").unwrap(), "Red");
    assert_eq!(results.get("attribute.color.blue").unwrap(), "Blue");
    // Only the store miss reached the provider
    assert_eq!(provider.request_count(), 1);
}

#[tokio::test]
async fn test_translateBatch_withFailingProvider_shouldFallBackToSourceText() {
    let provider = Arc::new(MockTranslator::failing());
    let service = service_with(provider);

    let results = service.translate_batch(&color_items(), "en", "attribute").await;

    // The map stays complete, every unresolved item keeps its own text
    assert_eq!(results.len(), 2);
    assert_eq!(results.get("attribute.color.red").unwrap(), "Kırmızı");
    assert_eq!(results.get("attribute.color.blue").unwrap(), "Mavi");

    // Fallbacks are never persisted
    let row = service
        .repository()
        .get_translation("en", "attribute.color.red")
        .await
        .unwrap();
    assert!(row.is_none());
}

#[tokio::test]
async fn test_translateBatch_withTruncatedResponse_shouldNotMisattributeTranslations() {
    // The provider drops one entry; the arity check turns the whole chunk
    // into a source-text fallback instead of shifting keys
    let provider = Arc::new(MockTranslator::truncated());
    let service = service_with(provider);

    let results = service.translate_batch(&color_items(), "en", "attribute").await;

    assert_eq!(results.len(), 2);
    assert_eq!(results.get("attribute.color.red").unwrap(), "Kırmızı");
    assert_eq!(results.get("attribute.color.blue").unwrap(), "Mavi");
}

#[tokio::test]
async fn test_translateBatch_withSourceLanguage_shouldEchoWithoutIO() {
    let provider = Arc::new(MockTranslator::working());
    let service = service_with(provider.clone());

    let results = service.translate_batch(&color_items(), "tr", "attribute").await;

    assert_eq!(results.get("attribute.color.red").unwrap(), "Kırmızı");
    assert_eq!(results.get("attribute.color.blue").unwrap(), "Mavi");
    assert_eq!(provider.request_count(), 0);
    assert_eq!(service.cache_len(), 0);
}

#[tokio::test]
async fn test_translateBatch_withEmptyItems_shouldReturnEmptyMap() {
    let provider = Arc::new(MockTranslator::working());
    let service = service_with(provider.clone());

    let results = service.translate_batch(&[], "en", "product").await;

    assert!(results.is_empty());
    assert_eq!(provider.request_count(), 0);
}

#[tokio::test]
async fn test_translateBatch_withEmptyText_shouldMapToEmptyString() {
    let provider = Arc::new(MockTranslator::working());
    let service = service_with(provider.clone());

    let items = vec![
        BatchItem::new("product.1.description", "   "),
        BatchItem::new("product.1.name", "Panel"),
    ];
    let results = service.translate_batch(&items, "en", "product").await;

    assert_eq!(results.get("product.1.description").unwrap(), "");
    assert_eq!(results.get("product.1.name").unwrap(), "[en] Panel");
}

#[tokio::test]
async fn test_translateBatch_withManyItems_shouldChunkProviderRequests() {
    let provider = Arc::new(MockTranslator::working());
    let service = service_with(provider.clone());

    // 120 items -> 3 provider requests at a chunk size of 50
    let items: Vec<BatchItem> = (0..120)
        .map(|i| BatchItem::new(format!("product.{}.name", i), format!("Ürün {}", i)))
        .collect();

    let results = service.translate_batch(&items, "en", "product").await;

    assert_eq!(results.len(), 120);
    assert_eq!(provider.request_count(), 3);
}

#[tokio::test]
async fn test_translateBatch_thenTranslate_shouldShareCacheEntries() {
    let provider = Arc::new(MockTranslator::working().with_canned("Kırmızı", "Red"));
    let service = service_with(provider.clone());

    let items = vec![BatchItem::new("attribute.color.red", "Kırmızı")];
    service.translate_batch(&items, "en", "attribute").await;

    // The single-string path reuses the entry the batch call cached
    let single = service
        .translate("Kırmızı", "en", "attribute.color.red", &TranslateOptions::default())
        .await;
    assert_eq!(single, "Red");
    assert_eq!(provider.request_count(), 1);
}
