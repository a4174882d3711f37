/*!
 * Common test utilities for the tercuman test suite
 */

use std::sync::Arc;

use tercuman::app_config::{Config, LimiterConfig};
use tercuman::providers::MockTranslator;
use tercuman::{Repository, TranslationService};

/// Initialize test logging, honoring RUST_LOG; safe to call repeatedly
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Build a test configuration: Turkish source, two targets, an effectively
/// unthrottled limiter so tests never sleep
pub fn test_config() -> Config {
    let mut config = Config::default();
    config.target_languages = vec!["en".to_string(), "fr".to_string()];
    config.limiter = LimiterConfig {
        capacity: 1000,
        refill_per_sec: 100_000.0,
    };
    config
}

/// Build a service with an in-memory store and the given mock provider
pub fn service_with(provider: Arc<MockTranslator>) -> TranslationService {
    let repository = Repository::new_in_memory().expect("Failed to create in-memory repository");
    TranslationService::with_parts(test_config(), repository, provider)
}

/// Build a service over an existing repository, for tests that need two
/// service instances sharing one store
pub fn service_sharing(repository: Repository, provider: Arc<MockTranslator>) -> TranslationService {
    TranslationService::with_parts(test_config(), repository, provider)
}
