/*!
 * # Tercuman - on-demand translation caching layer
 *
 * A Rust library that lazily machine-translates canonical-language content
 * into a configured set of target languages, persists the results, and
 * serves them through a layered cache so repeated lookups never touch the
 * remote provider.
 *
 * ## Features
 *
 * - Cache -> store -> provider resolution with write-back on every miss
 * - Batch translation with one store round trip and chunked provider calls
 * - Save-and-propagate for operator-authored canonical content
 * - Graceful degradation: callers always get displayable text, worst case
 *   in the source language
 * - Token-bucket pacing for provider requests
 * - Startup cache-format version check
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `translation`: The translation layer:
 *   - `translation::core`: Core service, single-string translate,
 *     save-and-propagate, cache invalidation
 *   - `translation::batch`: Batch translation
 *   - `translation::cache`: In-memory cache layer
 *   - `translation::limiter`: Token-bucket request pacing
 * - `database`: SQLite persistence (connection, schema, repository, models)
 * - `providers`: Remote provider client and test mock
 * - `errors`: Custom error types for the library
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod database;
pub mod errors;
pub mod providers;
pub mod translation;

// Re-export main types for easier usage
pub use app_config::Config;
pub use database::models::TranslationRecord;
pub use database::Repository;
pub use errors::{AppError, ProviderError, StoreError, TranslationError};
pub use providers::Translator;
pub use translation::{BatchItem, TranslateOptions, TranslationService};
