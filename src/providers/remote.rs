use anyhow::Result;
use async_trait::async_trait;
use log::error;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

use super::Translator;
use crate::errors::ProviderError;

/// HTTP client for the hosted translation endpoint
#[derive(Debug)]
pub struct RemoteTranslator {
    /// HTTP client for API requests
    client: Client,
    /// API key for authentication
    api_key: String,
    /// Translation endpoint URL
    endpoint: String,
}

/// Translation request body
///
/// `text` is a single string or an array of strings; the response mirrors
/// that shape in `translations`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TranslateRequest<'a> {
    /// Text or texts to translate
    text: TextPayload<'a>,
    /// Source language code
    source_language: &'a str,
    /// Target language code
    target_language: &'a str,
}

/// Single or batch text payload
#[derive(Debug, Serialize)]
#[serde(untagged)]
enum TextPayload<'a> {
    Single(&'a str),
    Batch(&'a [String]),
}

/// Translation response envelope
#[derive(Debug, Deserialize)]
struct TranslateResponse {
    /// Whether the API considers the call successful
    success: bool,
    /// Translated payload, single object or order-preserving array
    #[serde(default)]
    translations: Option<TranslationsPayload>,
    /// Error message on failure
    #[serde(default)]
    message: Option<String>,
}

/// Single or batch translations in the response
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TranslationsPayload {
    Single(TranslatedText),
    Batch(Vec<TranslatedText>),
}

/// One translated text entry
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TranslatedText {
    /// The translated text
    translated_text: String,
}

impl RemoteTranslator {
    /// Create a new remote translator client
    pub fn new(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        timeout_secs: u64,
    ) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(timeout_secs))
                .build()
                .unwrap_or_default(),
            api_key: api_key.into(),
            endpoint: normalize_endpoint(endpoint.into()),
        }
    }

    /// Send a request and decode the response envelope
    async fn send(&self, request: &TranslateRequest<'_>) -> Result<TranslateResponse, ProviderError> {
        let response = self
            .client
            .post(&self.endpoint)
            .header("Content-Type", "application/json")
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("x-api-key", &self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| ProviderError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            error!("Translation API error ({}): {}", status, error_text);
            return Err(ProviderError::ApiError {
                status_code: status.as_u16(),
                message: error_text,
            });
        }

        let body = response
            .json::<TranslateResponse>()
            .await
            .map_err(|e| ProviderError::ParseError(e.to_string()))?;

        if !body.success {
            let message = body
                .message
                .unwrap_or_else(|| "no error message provided".to_string());
            error!("Translation API reported failure: {}", message);
            return Err(ProviderError::Unsuccessful(message));
        }

        Ok(body)
    }
}

#[async_trait]
impl Translator for RemoteTranslator {
    async fn translate_one(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<String, ProviderError> {
        let request = TranslateRequest {
            text: TextPayload::Single(text),
            source_language,
            target_language,
        };

        let body = self.send(&request).await?;

        match body.translations {
            Some(TranslationsPayload::Single(t)) => Ok(t.translated_text),
            // Some deployments answer single-text calls with a one-element array
            Some(TranslationsPayload::Batch(mut ts)) if ts.len() == 1 => {
                Ok(ts.remove(0).translated_text)
            }
            Some(TranslationsPayload::Batch(ts)) => Err(ProviderError::CountMismatch {
                sent: 1,
                received: ts.len(),
            }),
            None => Err(ProviderError::ParseError(
                "missing translations field in response".to_string(),
            )),
        }
    }

    async fn translate_many(
        &self,
        texts: &[String],
        source_language: &str,
        target_language: &str,
    ) -> Result<Vec<String>, ProviderError> {
        let request = TranslateRequest {
            text: TextPayload::Batch(texts),
            source_language,
            target_language,
        };

        let body = self.send(&request).await?;

        let translations = match body.translations {
            Some(TranslationsPayload::Batch(ts)) => ts,
            Some(TranslationsPayload::Single(t)) => vec![t],
            None => {
                return Err(ProviderError::ParseError(
                    "missing translations field in response".to_string(),
                ))
            }
        };

        // Positional correspondence is the only way to map results back to
        // keys, so a mismatched arity is a hard error.
        if translations.len() != texts.len() {
            return Err(ProviderError::CountMismatch {
                sent: texts.len(),
                received: translations.len(),
            });
        }

        Ok(translations.into_iter().map(|t| t.translated_text).collect())
    }

    fn name(&self) -> &str {
        "remote"
    }
}

/// Normalize an endpoint string into an absolute URL
///
/// Accepts bare host[:port] forms and prepends https.
fn normalize_endpoint(endpoint: String) -> String {
    let candidate = if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
        format!("https://{}", endpoint)
    } else {
        endpoint
    };

    match Url::parse(&candidate) {
        Ok(url) => url.to_string(),
        Err(_) => candidate,
    }
}
