/*!
 * Database entity models and DTOs.
 *
 * These structures map directly to database tables and provide
 * type-safe access to persisted data.
 */

use serde::{Deserialize, Serialize};

/// A persisted translation, unique per (language_code, translation_key)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslationRecord {
    /// ISO-like short language code, e.g. "tr", "en", "fr"
    pub language_code: String,
    /// Stable dot-delimited semantic path, e.g. "product.42.name"
    pub translation_key: String,
    /// Translated text, or the canonical text for the source language
    pub translation_value: String,
    /// Source-language text at the time of translation
    pub source_text: String,
    /// Call-site tag: "product", "category", "attribute", "dynamic"
    pub translation_type: String,
    /// True when produced by the remote provider, false when authored
    pub auto_translated: bool,
    /// Creation instant, RFC3339
    pub created_at: String,
    /// Last update instant, RFC3339
    pub updated_at: String,
}

impl TranslationRecord {
    /// Create a record produced by the remote provider
    pub fn auto(
        language_code: impl Into<String>,
        translation_key: impl Into<String>,
        translation_value: impl Into<String>,
        source_text: impl Into<String>,
        translation_type: impl Into<String>,
    ) -> Self {
        let now = chrono::Utc::now().to_rfc3339();
        Self {
            language_code: language_code.into(),
            translation_key: translation_key.into(),
            translation_value: translation_value.into(),
            source_text: source_text.into(),
            translation_type: translation_type.into(),
            auto_translated: true,
            created_at: now.clone(),
            updated_at: now,
        }
    }

    /// Create a record authored directly by an operator
    pub fn authored(
        language_code: impl Into<String>,
        translation_key: impl Into<String>,
        translation_value: impl Into<String>,
        translation_type: impl Into<String>,
    ) -> Self {
        let value: String = translation_value.into();
        let now = chrono::Utc::now().to_rfc3339();
        Self {
            language_code: language_code.into(),
            translation_key: translation_key.into(),
            source_text: value.clone(),
            translation_value: value,
            translation_type: translation_type.into(),
            auto_translated: false,
            created_at: now.clone(),
            updated_at: now,
        }
    }
}

/// A persisted client-side preference entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreferenceRecord {
    /// Preference key, e.g. "preferred_language"
    pub key: String,
    /// Preference value
    pub value: String,
    /// Last update instant, RFC3339
    pub updated_at: String,
}

impl PreferenceRecord {
    /// Create a new preference entry with the current timestamp
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            updated_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Preference key holding the user's explicitly saved language choice.
/// This is the only preference that survives a cache-format version bump.
pub const PREFERRED_LANGUAGE_KEY: &str = "preferred_language";
