//! Mock completion client for testing.
//!
//! # Features
//!
//! - Scripted responses, consumed in order
//! - A fallback reply once the script runs out (fixed text or an error)
//! - Simulated latency
//! - Call recording for verification
//!
//! # Example
//!
//! ```ignore
//! let completion = MockCompletion::new()
//!     .with_response(r#"{"name": "Alice"}"#)
//!     .with_error(CompletionError::unavailable("down"));
//!
//! assert_eq!(completion.complete("p", &options).await?, r#"{"name": "Alice"}"#);
//! assert!(completion.complete("p", &options).await.is_err());
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::time::sleep;

use crate::ports::{CompletionError, CompletionOptions, TextCompletion};

#[derive(Debug, Clone)]
enum MockReply {
    Text(String),
    Error(CompletionError),
}

impl MockReply {
    fn into_result(self) -> Result<String, CompletionError> {
        match self {
            MockReply::Text(text) => Ok(text),
            MockReply::Error(err) => Err(err),
        }
    }
}

/// A recorded call.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCompletion {
    pub prompt: String,
    pub options: CompletionOptions,
}

/// Scripted `TextCompletion`. Clones share the script and the call log.
#[derive(Debug, Clone)]
pub struct MockCompletion {
    script: Arc<Mutex<VecDeque<MockReply>>>,
    fallback: MockReply,
    delay: Duration,
    calls: Arc<Mutex<Vec<RecordedCompletion>>>,
}

impl Default for MockCompletion {
    fn default() -> Self {
        Self::new()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl MockCompletion {
    pub fn new() -> Self {
        Self {
            script: Arc::new(Mutex::new(VecDeque::new())),
            fallback: MockReply::Text("Mock response".to_string()),
            delay: Duration::ZERO,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Deterministic stub: every call returns `text`.
    pub fn always(text: impl Into<String>) -> Self {
        Self {
            fallback: MockReply::Text(text.into()),
            ..Self::new()
        }
    }

    /// Every call fails with `error`.
    pub fn always_failing(error: CompletionError) -> Self {
        Self {
            fallback: MockReply::Error(error),
            ..Self::new()
        }
    }

    /// Queues a successful response.
    pub fn with_response(self, text: impl Into<String>) -> Self {
        lock(&self.script).push_back(MockReply::Text(text.into()));
        self
    }

    /// Queues a failure.
    pub fn with_error(self, error: CompletionError) -> Self {
        lock(&self.script).push_back(MockReply::Error(error));
        self
    }

    /// Sets simulated latency per call.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }

    pub fn calls(&self) -> Vec<RecordedCompletion> {
        lock(&self.calls).clone()
    }

    pub fn prompts(&self) -> Vec<String> {
        lock(&self.calls).iter().map(|c| c.prompt.clone()).collect()
    }

    fn next_reply(&self) -> MockReply {
        lock(&self.script)
            .pop_front()
            .unwrap_or_else(|| self.fallback.clone())
    }
}

#[async_trait]
impl TextCompletion for MockCompletion {
    async fn complete(
        &self,
        prompt: &str,
        options: &CompletionOptions,
    ) -> Result<String, CompletionError> {
        lock(&self.calls).push(RecordedCompletion {
            prompt: prompt.to_string(),
            options: options.clone(),
        });

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        self.next_reply().into_result()
    }
}
