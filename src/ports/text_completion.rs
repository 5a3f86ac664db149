//! Text Completion Port - prompt in, text out.
//!
//! The language model is an opaque, possibly slow, possibly failing
//! service. Implementations hold no per-call mutable state, so one client
//! can serve concurrent tasks and blocking callers alike.
//!
//! No retries happen behind this trait. Callers that want them can use
//! [`CompletionError::is_retryable`].

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// Port for language model completions.
#[async_trait]
pub trait TextCompletion: Send + Sync {
    /// Completes a single prompt.
    async fn complete(
        &self,
        prompt: &str,
        options: &CompletionOptions,
    ) -> Result<String, CompletionError>;
}

/// Per-call generation options.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionOptions {
    pub max_tokens: u32,
    pub temperature: f32,
    /// Upper bound for the whole exchange with the endpoint.
    pub timeout: Duration,
}

impl Default for CompletionOptions {
    fn default() -> Self {
        Self {
            max_tokens: 2048,
            temperature: 0.3,
            timeout: Duration::from_secs(120),
        }
    }
}

impl CompletionOptions {
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Errors from completion calls.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompletionError {
    /// Connection failure or timeout; nothing came back.
    #[error("completion endpoint unavailable: {0}")]
    UpstreamUnavailable(String),

    /// The endpoint answered with a failure.
    #[error("completion endpoint returned {status}: {message}")]
    UpstreamError { status: u16, message: String },

    /// The client could not be constructed.
    #[error("completion client misconfigured: {0}")]
    Configuration(String),
}

impl CompletionError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::UpstreamUnavailable(message.into())
    }

    pub fn upstream(status: u16, message: impl Into<String>) -> Self {
        Self::UpstreamError {
            status,
            message: message.into(),
        }
    }

    /// Returns true if repeating the call might succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            CompletionError::UpstreamUnavailable(_) => true,
            CompletionError::UpstreamError { status, .. } => *status == 429 || *status >= 500,
            CompletionError::Configuration(_) => false,
        }
    }
}
