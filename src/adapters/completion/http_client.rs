//! HTTP completion client for Ollama-compatible `/api/generate` endpoints.
//!
//! # Configuration
//!
//! ```ignore
//! let config = CompletionClientConfig::new("http://localhost:11434")
//!     .with_model("llama3.1")
//!     .with_api_key("token");
//!
//! let client = HttpCompletionClient::new(config)?;
//! ```
//!
//! Each call carries its own timeout from `CompletionOptions`. Failures are
//! returned as-is; retrying is the caller's decision.

use async_trait::async_trait;
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};

use crate::ports::{CompletionError, CompletionOptions, TextCompletion};

const GENERATE_PATH: &str = "/api/generate";

/// Configuration for the HTTP completion client.
#[derive(Debug, Clone)]
pub struct CompletionClientConfig {
    /// Base address of the endpoint (e.g. "http://localhost:11434").
    pub base_url: String,
    /// Model name sent with every request.
    pub model: String,
    /// Optional bearer token.
    api_key: Option<Secret<String>>,
}

impl CompletionClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            model: "llama3.1".to_string(),
            api_key: None,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(Secret::new(api_key.into()));
        self
    }

    pub fn with_secret_api_key(mut self, api_key: Option<Secret<String>>) -> Self {
        self.api_key = api_key;
        self
    }
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    parameters: GenerateParameters,
    stream: bool,
}

#[derive(Debug, Serialize)]
struct GenerateParameters {
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: String,
}

/// Completion client speaking the `/api/generate` JSON contract.
pub struct HttpCompletionClient {
    config: CompletionClientConfig,
    client: Client,
}

impl HttpCompletionClient {
    pub fn new(config: CompletionClientConfig) -> Result<Self, CompletionError> {
        // Pooled connections are bound to the runtime that opened them, and
        // blocking callers drive this client from short-lived runtimes.
        let client = Client::builder()
            .pool_max_idle_per_host(0)
            .build()
            .map_err(|e| CompletionError::Configuration(e.to_string()))?;

        Ok(Self { config, client })
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    fn generate_url(&self) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), GENERATE_PATH)
    }

    async fn send_request(
        &self,
        prompt: &str,
        options: &CompletionOptions,
    ) -> Result<Response, CompletionError> {
        let body = GenerateRequest {
            model: &self.config.model,
            prompt,
            parameters: GenerateParameters {
                max_tokens: options.max_tokens,
                temperature: options.temperature,
            },
            stream: false,
        };

        let mut request = self
            .client
            .post(self.generate_url())
            .timeout(options.timeout)
            .json(&body);
        if let Some(key) = &self.config.api_key {
            request = request.bearer_auth(key.expose_secret());
        }

        request.send().await.map_err(|e| {
            if e.is_timeout() {
                CompletionError::unavailable(format!(
                    "timed out after {}s",
                    options.timeout.as_secs()
                ))
            } else if e.is_connect() {
                CompletionError::unavailable(format!("connection failed: {}", e))
            } else {
                CompletionError::unavailable(e.to_string())
            }
        })
    }

    async fn parse_response(&self, response: Response) -> Result<String, CompletionError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CompletionError::upstream(status.as_u16(), body));
        }

        let parsed: GenerateResponse = response.json().await.map_err(|e| {
            if e.is_timeout() {
                CompletionError::unavailable("timed out reading response body")
            } else {
                CompletionError::upstream(status.as_u16(), format!("invalid response body: {}", e))
            }
        })?;

        Ok(parsed.response)
    }
}

#[async_trait]
impl TextCompletion for HttpCompletionClient {
    async fn complete(
        &self,
        prompt: &str,
        options: &CompletionOptions,
    ) -> Result<String, CompletionError> {
        tracing::debug!(model = %self.config.model, prompt_len = prompt.len(), "requesting completion");
        let response = self.send_request(prompt, options).await?;
        let text = self.parse_response(response).await?;
        tracing::debug!(model = %self.config.model, response_len = text.len(), "completion received");
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_builder_sets_fields() {
        let config = CompletionClientConfig::new("http://llm:11434")
            .with_model("mistral")
            .with_api_key("secret");

        assert_eq!(config.base_url, "http://llm:11434");
        assert_eq!(config.model, "mistral");
        assert_eq!(
            config.api_key.as_ref().map(|k| k.expose_secret().as_str()),
            Some("secret")
        );
    }

    #[test]
    fn generate_url_tolerates_trailing_slash() {
        let client =
            HttpCompletionClient::new(CompletionClientConfig::new("http://llm:11434/")).unwrap();
        assert_eq!(client.generate_url(), "http://llm:11434/api/generate");
    }

    #[test]
    fn request_body_matches_wire_contract() {
        let body = GenerateRequest {
            model: "llama3.1",
            prompt: "olá",
            parameters: GenerateParameters {
                max_tokens: 64,
                temperature: 0.5,
            },
            stream: false,
        };
        let json = serde_json::to_value(&body).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "model": "llama3.1",
                "prompt": "olá",
                "parameters": {"max_tokens": 64, "temperature": 0.5},
                "stream": false
            })
        );
    }
}
