/*!
 * In-memory translation cache.
 *
 * This module provides the first cache layer consulted by the translation
 * service. Entries live for the process lifetime and are only removed by
 * explicit invalidation or the startup cache-format version check.
 */

use log::debug;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// Cache key combining target language and translation key
///
/// The string form `"{language}:{key}"` only appears at the boundary
/// (logging, substring invalidation).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    /// Target language code
    language: String,

    /// Stable translation key
    key: String,
}

impl CacheKey {
    /// Create a new cache key
    pub fn new(language: &str, key: &str) -> Self {
        Self {
            language: language.to_string(),
            key: key.to_string(),
        }
    }

    /// String form of the composite key
    pub fn composite(&self) -> String {
        format!("{}:{}", self.language, self.key)
    }
}

/// Translation cache for storing and retrieving translated strings
pub struct TranslationCache {
    /// Internal cache storage
    cache: Arc<RwLock<HashMap<CacheKey, String>>>,

    /// Cache hit counter
    hits: Arc<RwLock<usize>>,

    /// Cache miss counter
    misses: Arc<RwLock<usize>>,
}

impl TranslationCache {
    /// Create a new empty translation cache
    pub fn new() -> Self {
        Self {
            cache: Arc::new(RwLock::new(HashMap::new())),
            hits: Arc::new(RwLock::new(0)),
            misses: Arc::new(RwLock::new(0)),
        }
    }

    /// Get a translation from the cache
    pub fn get(&self, language: &str, key: &str) -> Option<String> {
        let cache_key = CacheKey::new(language, key);
        let cache = self.cache.read();

        match cache.get(&cache_key) {
            Some(translation) => {
                let mut hits = self.hits.write();
                *hits += 1;

                debug!("Cache hit for '{}'", cache_key.composite());

                Some(translation.clone())
            }
            None => {
                let mut misses = self.misses.write();
                *misses += 1;

                debug!("Cache miss for '{}'", cache_key.composite());

                None
            }
        }
    }

    /// Store a translation in the cache
    pub fn store(&self, language: &str, key: &str, translation: &str) {
        let cache_key = CacheKey::new(language, key);
        let mut cache = self.cache.write();

        cache.insert(cache_key, translation.to_string());
    }

    /// Get cache statistics
    pub fn stats(&self) -> (usize, usize, f64) {
        let hits = *self.hits.read();
        let misses = *self.misses.read();
        let total = hits + misses;

        let hit_rate = if total > 0 {
            hits as f64 / total as f64
        } else {
            0.0
        };

        (hits, misses, hit_rate)
    }

    /// Clear the entire cache
    pub fn clear(&self) {
        let mut cache = self.cache.write();
        cache.clear();

        let mut hits = self.hits.write();
        *hits = 0;

        let mut misses = self.misses.write();
        *misses = 0;

        debug!("Translation cache cleared");
    }

    /// Remove every entry whose composite key contains the given substring
    ///
    /// A single logical key covers one cache entry per language, so matching
    /// on the key substring clears all languages in one call.
    pub fn clear_for_key(&self, translation_key: &str) -> usize {
        let mut cache = self.cache.write();
        let before = cache.len();

        cache.retain(|cache_key, _| !cache_key.composite().contains(translation_key));

        let removed = before - cache.len();
        debug!(
            "Cleared {} cache entries matching '{}'",
            removed, translation_key
        );

        removed
    }

    /// Get the number of entries in the cache
    pub fn len(&self) -> usize {
        self.cache.read().len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.cache.read().is_empty()
    }
}

impl Default for TranslationCache {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for TranslationCache {
    fn clone(&self) -> Self {
        Self {
            cache: self.cache.clone(),
            hits: self.hits.clone(),
            misses: self.misses.clone(),
        }
    }
}
