/*!
 * Provider implementations for the remote translation service.
 *
 * This module contains the client seam the translation layer talks through:
 * - `remote`: HTTP JSON client for the hosted translation endpoint
 * - `mock`: programmable provider for tests
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::errors::ProviderError;

/// Common trait for translation providers
///
/// This trait defines the interface a provider implementation must follow,
/// allowing the translation service to be tested against a mock without
/// touching the network.
#[async_trait]
pub trait Translator: Send + Sync + Debug {
    /// Translate a single text
    ///
    /// # Arguments
    /// * `text` - The source text to translate
    /// * `source_language` - Source language code
    /// * `target_language` - Target language code
    ///
    /// # Returns
    /// * `Result<String, ProviderError>` - The translated text or an error
    async fn translate_one(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<String, ProviderError>;

    /// Translate a batch of texts in one round trip
    ///
    /// The returned vector is positional: index `i` of the input corresponds
    /// to index `i` of the output. Implementations must reject responses
    /// whose arity differs from the request.
    async fn translate_many(
        &self,
        texts: &[String],
        source_language: &str,
        target_language: &str,
    ) -> Result<Vec<String>, ProviderError>;

    /// Provider name for logging
    fn name(&self) -> &str;
}

pub mod mock;
pub mod remote;

// Re-export main types
pub use mock::{MockBehavior, MockTranslator};
pub use remote::RemoteTranslator;
