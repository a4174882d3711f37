/*!
 * Batch translation processing.
 *
 * Translating a list of keyed strings (for example every category name on
 * a listing page) goes through one store round trip and as few provider
 * round trips as the chunk size allows, instead of one of each per item.
 */

use log::{debug, error, warn};
use std::collections::HashMap;

use crate::database::models::TranslationRecord;

use super::core::TranslationService;

/// Maximum number of texts sent to the provider in one request
pub const PROVIDER_BATCH_SIZE: usize = 50;

/// One keyed string in a batch translation request
#[derive(Debug, Clone, PartialEq)]
pub struct BatchItem {
    /// Stable translation key, e.g. "category.lighting.name"
    pub key: String,
    /// Source-language text
    pub text: String,
}

impl BatchItem {
    /// Create a new batch item
    pub fn new(key: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            text: text.into(),
        }
    }
}

impl TranslationService {
    /// Translate many keyed strings at once
    ///
    /// The returned map always contains exactly one entry per input key;
    /// items the provider could not translate fall back to their own
    /// source text. Within each provider request the response array is
    /// positional: index `i` of the request corresponds to index `i` of
    /// the response.
    pub async fn translate_batch(
        &self,
        items: &[BatchItem],
        target_language: &str,
        translation_type: &str,
    ) -> HashMap<String, String> {
        let mut results: HashMap<String, String> = HashMap::with_capacity(items.len());

        if items.is_empty() {
            return results;
        }

        let target = target_language.trim();

        // Source language: every item maps to its own text, no I/O
        if self.config().is_source_language(target) {
            for item in items {
                results.insert(item.key.clone(), item.text.clone());
            }
            return results;
        }

        // Cache pass; empty texts short-circuit like the single-string path
        let mut pending: Vec<&BatchItem> = Vec::new();
        for item in items {
            if item.text.trim().is_empty() {
                results.insert(item.key.clone(), String::new());
                continue;
            }

            match self.cache().get(target, &item.key) {
                Some(cached) => {
                    results.insert(item.key.clone(), cached);
                }
                None => pending.push(item),
            }
        }

        // One store query for everything the cache did not have
        if !pending.is_empty() {
            let keys: Vec<String> = pending.iter().map(|item| item.key.clone()).collect();

            match self.repository().get_translations_batch(target, &keys).await {
                Ok(records) => {
                    for record in records {
                        if record.translation_value.is_empty() {
                            continue;
                        }
                        self.cache()
                            .store(target, &record.translation_key, &record.translation_value);
                        results.insert(record.translation_key, record.translation_value);
                    }
                }
                Err(e) => {
                    // Treated as a miss for every pending item
                    warn!(
                        "Store batch lookup failed for {} keys in '{}': {:#}",
                        keys.len(),
                        target,
                        e
                    );
                }
            }

            pending.retain(|item| !results.contains_key(&item.key));
        }

        if pending.is_empty() {
            return results;
        }

        debug!(
            "Translating {} uncached items to '{}' in chunks of {}",
            pending.len(),
            target,
            PROVIDER_BATCH_SIZE
        );

        for chunk in pending.chunks(PROVIDER_BATCH_SIZE) {
            self.limiter().acquire().await;

            let texts: Vec<String> = chunk.iter().map(|item| item.text.clone()).collect();

            match self
                .provider()
                .translate_many(&texts, &self.config().source_language, target)
                .await
            {
                Ok(translations) => {
                    // translate_many guarantees equal arity, so zip pairs
                    // each item with its own translation
                    for (item, translated) in chunk.iter().zip(translations.iter()) {
                        let record = TranslationRecord::auto(
                            target,
                            &item.key,
                            translated,
                            &item.text,
                            translation_type,
                        );

                        if let Err(e) = self.repository().upsert_translation(&record).await {
                            warn!(
                                "Failed to persist batch translation for '{}:{}': {:#}",
                                target, item.key, e
                            );
                        }

                        self.cache().store(target, &item.key, translated);
                        results.insert(item.key.clone(), translated.clone());
                    }
                }
                Err(e) => {
                    // The map must stay fully populated: unresolved items
                    // fall back to their own source text, no store write
                    error!(
                        "Provider batch of {} items failed for '{}', using source text: {}",
                        chunk.len(),
                        target,
                        e
                    );

                    for item in chunk {
                        results
                            .entry(item.key.clone())
                            .or_insert_with(|| item.text.clone());
                    }
                }
            }
        }

        results
    }
}
