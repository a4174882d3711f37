/*!
 * On-demand translation layer.
 *
 * This module contains the core functionality for lazily translating
 * source-language strings through a cache, store, provider resolution
 * chain. It is split into several submodules:
 *
 * - `core`: Core translation service definition and single-string operations
 * - `batch`: Batch translation of many keyed strings at once
 * - `cache`: In-memory cache layer
 * - `limiter`: Token-bucket pacing for provider requests
 */

// Re-export main types for easier usage
pub use self::batch::{BatchItem, PROVIDER_BATCH_SIZE};
pub use self::cache::TranslationCache;
pub use self::core::{TranslateOptions, TranslationService, CACHE_FORMAT_VERSION};
pub use self::limiter::RateLimiter;

// Submodules
pub mod batch;
pub mod cache;
pub mod core;
pub mod limiter;
