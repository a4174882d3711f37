/*!
 * Library configuration module
 *
 * This module handles the tercuman configuration including loading,
 * validating and saving configuration settings.
 */

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Represents the translation layer configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Canonical source language code (ISO), content is authored in this language
    #[serde(default = "default_source_language")]
    pub source_language: String,

    /// Target language codes translations are fanned out to
    #[serde(default = "default_target_languages")]
    pub target_languages: Vec<String>,

    /// Remote provider config
    #[serde(default)]
    pub provider: ProviderConfig,

    /// Rate limiter config for provider pacing
    #[serde(default)]
    pub limiter: LimiterConfig,

    /// Path to the SQLite store, defaults to the user data directory
    #[serde(default)]
    pub database_path: Option<PathBuf>,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Remote translation provider configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ProviderConfig {
    /// Translation endpoint URL
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// API key sent as bearer token and x-api-key header
    #[serde(default = "String::new")]
    pub api_key: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            api_key: String::new(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Token bucket configuration for provider request pacing
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LimiterConfig {
    /// Maximum burst size in requests
    #[serde(default = "default_limiter_capacity")]
    pub capacity: u32,

    /// Sustained request rate in requests per second
    #[serde(default = "default_limiter_refill_per_sec")]
    pub refill_per_sec: f64,
}

impl Default for LimiterConfig {
    fn default() -> Self {
        Self {
            capacity: default_limiter_capacity(),
            refill_per_sec: default_limiter_refill_per_sec(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

fn default_source_language() -> String {
    "tr".to_string()
}

fn default_target_languages() -> Vec<String> {
    ["en", "fr", "de", "ar", "ru"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_endpoint() -> String {
    "https://translate.example.com/api/translate".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_limiter_capacity() -> u32 {
    2
}

fn default_limiter_refill_per_sec() -> f64 {
    // Roughly one provider call per 500ms sustained
    2.0
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_language: default_source_language(),
            target_languages: default_target_languages(),
            provider: ProviderConfig::default(),
            limiter: LimiterConfig::default(),
            database_path: None,
            log_level: LogLevel::default(),
        }
    }
}

impl Config {
    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.source_language.trim().is_empty() {
            return Err(anyhow!("Source language must not be empty"));
        }

        if self.provider.endpoint.trim().is_empty() {
            return Err(anyhow!("Provider endpoint must not be empty"));
        }

        if self.provider.timeout_secs == 0 {
            return Err(anyhow!("Provider timeout must be greater than zero"));
        }

        if self.limiter.refill_per_sec <= 0.0 {
            return Err(anyhow!("Limiter refill rate must be positive"));
        }

        if self.limiter.capacity == 0 {
            return Err(anyhow!("Limiter capacity must be greater than zero"));
        }

        Ok(())
    }

    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content =
            serde_json::to_string_pretty(self).context("Failed to serialize configuration")?;

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {:?}", path))?;

        Ok(())
    }

    /// Check whether a language code is the canonical source language
    pub fn is_source_language(&self, language: &str) -> bool {
        self.source_language.eq_ignore_ascii_case(language.trim())
    }
}
