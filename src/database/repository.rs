/*!
 * Repository layer for database operations.
 *
 * This module provides a high-level API for all database operations,
 * abstracting away the SQL details and providing type-safe access.
 */

use anyhow::Result;
use log::debug;
use rusqlite::{params, OptionalExtension, Row};

use super::connection::DatabaseConnection;
use super::models::{PreferenceRecord, TranslationRecord};

/// Meta key under which the cache-format version marker is stored
const CACHE_FORMAT_VERSION_KEY: &str = "cache_format_version";

/// Repository for database operations
#[derive(Clone)]
pub struct Repository {
    /// Database connection
    db: DatabaseConnection,
}

impl Repository {
    /// Create a new repository with the given database connection
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Create a repository with the default database location
    pub fn new_default() -> Result<Self> {
        let db = DatabaseConnection::new_default()?;
        Ok(Self::new(db))
    }

    /// Create a repository with an in-memory database (for testing)
    pub fn new_in_memory() -> Result<Self> {
        let db = DatabaseConnection::new_in_memory()?;
        Ok(Self::new(db))
    }

    /// Access the underlying connection
    pub fn connection(&self) -> &DatabaseConnection {
        &self.db
    }

    // =========================================================================
    // Translation Operations
    // =========================================================================

    /// Point lookup of a translation by (language_code, translation_key)
    pub async fn get_translation(
        &self,
        language_code: &str,
        translation_key: &str,
    ) -> Result<Option<TranslationRecord>> {
        let language_code = language_code.to_string();
        let translation_key = translation_key.to_string();

        self.db
            .execute_async(move |conn| {
                let result = conn
                    .query_row(
                        r#"
                        SELECT language_code, translation_key, translation_value, source_text,
                               translation_type, auto_translated, created_at, updated_at
                        FROM translations
                        WHERE language_code = ?1 AND translation_key = ?2
                        "#,
                        params![language_code, translation_key],
                        parse_translation_row,
                    )
                    .optional()?;

                Ok(result)
            })
            .await
    }

    /// Batch lookup of translations for one language and a set of keys
    pub async fn get_translations_batch(
        &self,
        language_code: &str,
        translation_keys: &[String],
    ) -> Result<Vec<TranslationRecord>> {
        if translation_keys.is_empty() {
            return Ok(Vec::new());
        }

        let language_code = language_code.to_string();
        let translation_keys = translation_keys.to_vec();

        self.db
            .execute_async(move |conn| {
                // Build one IN (...) query for the whole key set
                let placeholders = (0..translation_keys.len())
                    .map(|i| format!("?{}", i + 2))
                    .collect::<Vec<_>>()
                    .join(", ");

                let sql = format!(
                    r#"
                    SELECT language_code, translation_key, translation_value, source_text,
                           translation_type, auto_translated, created_at, updated_at
                    FROM translations
                    WHERE language_code = ?1 AND translation_key IN ({})
                    "#,
                    placeholders
                );

                let mut stmt = conn.prepare(&sql)?;

                let mut query_params: Vec<&dyn rusqlite::ToSql> = vec![&language_code];
                for key in &translation_keys {
                    query_params.push(key);
                }

                let records: Vec<TranslationRecord> = stmt
                    .query_map(query_params.as_slice(), parse_translation_row)?
                    .filter_map(|r| r.ok())
                    .collect();

                debug!(
                    "Batch lookup for {} keys in '{}' returned {} records",
                    translation_keys.len(),
                    language_code,
                    records.len()
                );

                Ok(records)
            })
            .await
    }

    /// Upsert a translation, keyed on the (language_code, translation_key) pair
    ///
    /// An existing row keeps its created_at; everything else is replaced.
    pub async fn upsert_translation(&self, record: &TranslationRecord) -> Result<()> {
        let record = record.clone();

        self.db
            .execute_async(move |conn| {
                conn.execute(
                    r#"
                    INSERT INTO translations (
                        language_code, translation_key, translation_value, source_text,
                        translation_type, auto_translated, created_at, updated_at
                    ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
                    ON CONFLICT(language_code, translation_key) DO UPDATE SET
                        translation_value = excluded.translation_value,
                        source_text = excluded.source_text,
                        translation_type = excluded.translation_type,
                        auto_translated = excluded.auto_translated,
                        updated_at = excluded.updated_at
                    "#,
                    params![
                        record.language_code,
                        record.translation_key,
                        record.translation_value,
                        record.source_text,
                        record.translation_type,
                        record.auto_translated,
                        record.created_at,
                        record.updated_at,
                    ],
                )?;
                Ok(())
            })
            .await
    }

    /// Count all persisted translations (diagnostics)
    pub async fn count_translations(&self) -> Result<i64> {
        self.db
            .execute_async(|conn| {
                let count: i64 =
                    conn.query_row("SELECT COUNT(*) FROM translations", [], |row| row.get(0))?;
                Ok(count)
            })
            .await
    }

    // =========================================================================
    // Preference Operations
    // =========================================================================

    /// Set a preference value
    pub async fn set_preference(&self, key: &str, value: &str) -> Result<()> {
        let record = PreferenceRecord::new(key, value);

        self.db
            .execute_async(move |conn| {
                conn.execute(
                    "INSERT OR REPLACE INTO preferences (key, value, updated_at) VALUES (?1, ?2, ?3)",
                    params![record.key, record.value, record.updated_at],
                )?;
                Ok(())
            })
            .await
    }

    /// Get a preference value
    pub async fn get_preference(&self, key: &str) -> Result<Option<String>> {
        let key = key.to_string();

        self.db
            .execute_async(move |conn| {
                let result = conn
                    .query_row(
                        "SELECT value FROM preferences WHERE key = ?1",
                        [key],
                        |row| row.get(0),
                    )
                    .optional()?;

                Ok(result)
            })
            .await
    }

    /// Delete every preference except the named one
    ///
    /// Returns the number of rows removed.
    pub async fn clear_preferences_except(&self, keep_key: &str) -> Result<usize> {
        let keep_key = keep_key.to_string();

        self.db
            .execute_async(move |conn| {
                let removed =
                    conn.execute("DELETE FROM preferences WHERE key != ?1", [keep_key])?;
                Ok(removed)
            })
            .await
    }

    // =========================================================================
    // Cache-Format Version Marker
    // =========================================================================

    /// Read the persisted cache-format version marker
    pub async fn get_cache_format_version(&self) -> Result<Option<String>> {
        self.db
            .execute_async(|conn| {
                let result = conn
                    .query_row(
                        "SELECT value FROM meta WHERE key = ?1",
                        [CACHE_FORMAT_VERSION_KEY],
                        |row| row.get(0),
                    )
                    .optional()?;

                Ok(result)
            })
            .await
    }

    /// Record the cache-format version marker
    pub async fn set_cache_format_version(&self, version: &str) -> Result<()> {
        let version = version.to_string();

        self.db
            .execute_async(move |conn| {
                conn.execute(
                    "INSERT OR REPLACE INTO meta (key, value, updated_at) VALUES (?1, ?2, datetime('now'))",
                    params![CACHE_FORMAT_VERSION_KEY, version],
                )?;
                Ok(())
            })
            .await
    }
}

/// Parse a translations row into a TranslationRecord
fn parse_translation_row(row: &Row<'_>) -> rusqlite::Result<TranslationRecord> {
    Ok(TranslationRecord {
        language_code: row.get(0)?,
        translation_key: row.get(1)?,
        translation_value: row.get(2)?,
        source_text: row.get(3)?,
        translation_type: row.get(4)?,
        auto_translated: row.get(5)?,
        created_at: row.get(6)?,
        updated_at: row.get(7)?,
    })
}
