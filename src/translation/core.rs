/*!
 * Core translation service.
 *
 * The service resolves a (target language, translation key) pair through
 * the in-memory cache, the persistent store, and finally the remote
 * provider, writing results back down the chain on every miss. Provider
 * and store failures degrade to the source-language text - callers always
 * get displayable content.
 */

use anyhow::{Context, Result};
use log::{debug, error, info, warn};
use std::sync::Arc;

use crate::app_config::Config;
use crate::database::models::{TranslationRecord, PREFERRED_LANGUAGE_KEY};
use crate::database::Repository;
use crate::providers::{RemoteTranslator, Translator};

use super::cache::TranslationCache;
use super::limiter::RateLimiter;

/// Current cache-format version
///
/// Bumped whenever the shape of cached translation data changes in a way
/// that makes entries from older builds unusable. Checked once at startup.
pub const CACHE_FORMAT_VERSION: &str = "2";

/// Translation type recorded when the caller does not supply one
const DEFAULT_TRANSLATION_TYPE: &str = "dynamic";

/// Options for a single-string translate call
#[derive(Debug, Clone, Default)]
pub struct TranslateOptions {
    /// Classification tag stored on first write ("product", "category", ...)
    pub translation_type: Option<String>,

    /// Skip cache and store reads and force a provider round trip.
    /// The store upsert and cache refresh still happen on success.
    pub force_refresh: bool,
}

impl TranslateOptions {
    /// Options with a translation type tag
    pub fn with_type(translation_type: impl Into<String>) -> Self {
        Self {
            translation_type: Some(translation_type.into()),
            force_refresh: false,
        }
    }

    /// Options forcing a provider round trip
    pub fn refreshing(translation_type: impl Into<String>) -> Self {
        Self {
            translation_type: Some(translation_type.into()),
            force_refresh: true,
        }
    }
}

/// Translation service owning the cache and collaborator handles
pub struct TranslationService {
    /// Configuration
    config: Config,

    /// In-memory cache layer, exclusively owned by this service
    cache: TranslationCache,

    /// Persistent translation store
    repository: Repository,

    /// Remote translation provider
    provider: Arc<dyn Translator>,

    /// Pacing for provider requests
    limiter: Arc<RateLimiter>,
}

impl TranslationService {
    /// Create a service from configuration, with the remote provider and
    /// the store at its configured (or default) location
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;

        let repository = match &config.database_path {
            Some(path) => Repository::new(crate::database::DatabaseConnection::new(path)?),
            None => Repository::new_default()?,
        };

        let provider = Arc::new(RemoteTranslator::new(
            config.provider.endpoint.clone(),
            config.provider.api_key.clone(),
            config.provider.timeout_secs,
        ));

        Ok(Self::with_parts(config, repository, provider))
    }

    /// Create a service from explicit parts (used by tests to inject an
    /// in-memory store and a mock provider)
    pub fn with_parts(config: Config, repository: Repository, provider: Arc<dyn Translator>) -> Self {
        let limiter = Arc::new(RateLimiter::new(&config.limiter));

        Self {
            config,
            cache: TranslationCache::new(),
            repository,
            provider,
            limiter,
        }
    }

    /// The configuration this service was built with
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The persistent store handle
    pub fn repository(&self) -> &Repository {
        &self.repository
    }

    /// Cache statistics: (hits, misses, hit rate)
    pub fn cache_stats(&self) -> (usize, usize, f64) {
        self.cache.stats()
    }

    /// Number of entries currently cached in memory
    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }

    /// Translate a single source-language string
    ///
    /// Resolution order: cache, store, provider; each step back-fills the
    /// layers before it. Never fails - on provider or store trouble the
    /// original source text is returned unchanged.
    pub async fn translate(
        &self,
        source_text: &str,
        target_language: &str,
        translation_key: &str,
        options: &TranslateOptions,
    ) -> String {
        let target = target_language.trim();

        // The source is always authoritative for its own language
        if self.config.is_source_language(target) {
            return source_text.to_string();
        }

        // Nothing to translate
        if source_text.trim().is_empty() {
            return String::new();
        }

        if !options.force_refresh {
            if let Some(cached) = self.cache.get(target, translation_key) {
                return cached;
            }

            // Store read errors are treated as a miss
            match self.repository.get_translation(target, translation_key).await {
                Ok(Some(record)) if !record.translation_value.is_empty() => {
                    self.cache
                        .store(target, translation_key, &record.translation_value);
                    return record.translation_value;
                }
                Ok(_) => {}
                Err(e) => {
                    warn!(
                        "Store lookup failed for '{}:{}', falling through to provider: {:#}",
                        target, translation_key, e
                    );
                }
            }
        }

        self.limiter.acquire().await;

        match self
            .provider
            .translate_one(source_text, &self.config.source_language, target)
            .await
        {
            Ok(translated) => {
                let translation_type = options
                    .translation_type
                    .clone()
                    .unwrap_or_else(|| DEFAULT_TRANSLATION_TYPE.to_string());

                let record = TranslationRecord::auto(
                    target,
                    translation_key,
                    &translated,
                    source_text,
                    translation_type,
                );

                // A failed upsert is non-fatal: the caller still gets the
                // translation, it just will not be stored for next time
                if let Err(e) = self.repository.upsert_translation(&record).await {
                    warn!(
                        "Failed to persist translation for '{}:{}': {:#}",
                        target, translation_key, e
                    );
                }

                self.cache.store(target, translation_key, &translated);
                translated
            }
            Err(e) => {
                error!(
                    "Provider '{}' failed for '{}:{}', returning source text: {}",
                    self.provider.name(),
                    target,
                    translation_key,
                    e
                );
                source_text.to_string()
            }
        }
    }

    /// Persist newly authored source-language content and fan translation
    /// out to the target languages
    ///
    /// The canonical upsert is the one write that must not be dropped, so
    /// its failure is returned as an error. Per-language provider failures
    /// are absorbed by `translate`'s own fallback and never abort the
    /// remaining languages.
    pub async fn save_and_translate(
        &self,
        source_text: &str,
        translation_key: &str,
        translation_type: &str,
        target_languages: &[String],
    ) -> Result<()> {
        // Wide invalidation: one logical key maps to one cache entry per
        // language, drop them all before the content changes underneath
        self.cache.clear_for_key(translation_key);

        let record = TranslationRecord::authored(
            &self.config.source_language,
            translation_key,
            source_text,
            translation_type,
        );

        self.repository
            .upsert_translation(&record)
            .await
            .with_context(|| {
                format!(
                    "Failed to persist canonical text for '{}'",
                    translation_key
                )
            })?;

        debug!(
            "Saved canonical '{}' text for '{}', fanning out",
            self.config.source_language, translation_key
        );

        let targets = self.merged_targets(target_languages);
        let options = TranslateOptions::refreshing(translation_type);

        for language in &targets {
            // Fault-tolerant per language, pacing handled inside translate
            let _ = self
                .translate(source_text, language, translation_key, &options)
                .await;
        }

        Ok(())
    }

    /// Wipe the entire in-memory cache
    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    /// Remove every in-memory entry whose composite key contains the given
    /// translation key, covering all languages in one call
    pub fn clear_cache_for_key(&self, translation_key: &str) -> usize {
        self.cache.clear_for_key(translation_key)
    }

    /// Compare the persisted cache-format version marker against the
    /// current one; on mismatch wipe the in-memory cache and all persisted
    /// preferences except the user's saved language choice, then record
    /// the new marker
    pub async fn run_startup_check(&self) -> Result<()> {
        let stored = self.repository.get_cache_format_version().await?;

        if stored.as_deref() == Some(CACHE_FORMAT_VERSION) {
            debug!("Cache format is current (v{})", CACHE_FORMAT_VERSION);
            return Ok(());
        }

        info!(
            "Cache format changed ({} -> v{}), clearing cached state",
            stored.as_deref().unwrap_or("none"),
            CACHE_FORMAT_VERSION
        );

        self.cache.clear();

        let removed = self
            .repository
            .clear_preferences_except(PREFERRED_LANGUAGE_KEY)
            .await?;
        if removed > 0 {
            info!("Removed {} stale preference entries", removed);
        }

        self.repository
            .set_cache_format_version(CACHE_FORMAT_VERSION)
            .await?;

        Ok(())
    }

    /// Merge the configured default targets with an explicit list,
    /// preserving order, dropping duplicates and the source language
    fn merged_targets(&self, explicit: &[String]) -> Vec<String> {
        let mut targets: Vec<String> = Vec::new();

        for language in self.config.target_languages.iter().chain(explicit.iter()) {
            let language = language.trim();
            if language.is_empty() || self.config.is_source_language(language) {
                continue;
            }
            if !targets.iter().any(|t| t == language) {
                targets.push(language.to_string());
            }
        }

        targets
    }

    /// Provider handle, used by the batch module
    pub(super) fn provider(&self) -> &Arc<dyn Translator> {
        &self.provider
    }

    /// Limiter handle, used by the batch module
    pub(super) fn limiter(&self) -> &Arc<RateLimiter> {
        &self.limiter
    }

    /// Cache handle, used by the batch module
    pub(super) fn cache(&self) -> &TranslationCache {
        &self.cache
    }
}

impl Clone for TranslationService {
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
            cache: self.cache.clone(),
            repository: self.repository.clone(),
            provider: self.provider.clone(),
            limiter: self.limiter.clone(),
        }
    }
}
