//! Language model endpoint configuration

use secrecy::Secret;
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use crate::adapters::completion::CompletionClientConfig;
use crate::ports::CompletionOptions;

/// Completion endpoint and default generation options
#[derive(Debug, Clone, Deserialize)]
pub struct CompletionConfig {
    /// Base address; `/api/generate` is appended
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_model")]
    pub model: String,

    /// Per-call timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Optional bearer token
    pub api_key: Option<Secret<String>>,
}

impl CompletionConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Options applied to every skill and pipeline call.
    pub fn options(&self) -> CompletionOptions {
        CompletionOptions::default()
            .with_max_tokens(self.max_tokens)
            .with_temperature(self.temperature)
            .with_timeout(self.timeout())
    }

    pub fn client_config(&self) -> CompletionClientConfig {
        CompletionClientConfig::new(self.base_url.clone())
            .with_model(self.model.clone())
            .with_secret_api_key(self.api_key.clone())
    }

    /// Validate completion configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !is_http_url(&self.base_url) {
            return Err(ValidationError::InvalidUrl("completion.base_url"));
        }
        if self.model.trim().is_empty() {
            return Err(ValidationError::MissingRequired("CAREER_PATH__COMPLETION__MODEL"));
        }
        if self.timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout("completion"));
        }
        if self.max_tokens == 0 {
            return Err(ValidationError::ZeroCapacity("completion.max_tokens"));
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(ValidationError::InvalidTemperature);
        }
        Ok(())
    }
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            model: default_model(),
            timeout_secs: default_timeout(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            api_key: None,
        }
    }
}

pub(super) fn is_http_url(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

fn default_base_url() -> String {
    "http://localhost:11434".to_string()
}

fn default_model() -> String {
    "llama3.1".to_string()
}

fn default_timeout() -> u64 {
    120
}

fn default_max_tokens() -> u32 {
    2048
}

fn default_temperature() -> f32 {
    0.3
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completion_defaults() {
        let config = CompletionConfig::default();
        assert_eq!(config.base_url, "http://localhost:11434");
        assert_eq!(config.model, "llama3.1");
        assert!(config.api_key.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_options_follow_config() {
        let config = CompletionConfig {
            max_tokens: 512,
            temperature: 0.7,
            timeout_secs: 5,
            ..Default::default()
        };
        let options = config.options();
        assert_eq!(options.max_tokens, 512);
        assert_eq!(options.temperature, 0.7);
        assert_eq!(options.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_validation_rejects_non_http_url() {
        let config = CompletionConfig {
            base_url: "localhost:11434".to_string(),
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ValidationError::InvalidUrl("completion.base_url"))
        );
    }

    #[test]
    fn test_validation_rejects_temperature_out_of_range() {
        let config = CompletionConfig {
            temperature: 2.5,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidTemperature));
    }
}
