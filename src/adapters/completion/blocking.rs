//! Blocking facade over any `TextCompletion`, for callers without a runtime.

use std::sync::Arc;

use crate::adapters::transport::RuntimeBridge;
use crate::ports::{CompletionError, CompletionOptions, TextCompletion};

#[derive(Clone)]
pub struct BlockingCompletion {
    inner: Arc<dyn TextCompletion>,
    bridge: RuntimeBridge,
}

impl BlockingCompletion {
    pub fn new(inner: Arc<dyn TextCompletion>) -> Self {
        Self {
            inner,
            bridge: RuntimeBridge::new(),
        }
    }

    pub fn complete(
        &self,
        prompt: &str,
        options: &CompletionOptions,
    ) -> Result<String, CompletionError> {
        let inner = Arc::clone(&self.inner);
        self.bridge
            .run(move || async move { inner.complete(prompt, options).await })
            .map_err(|e| CompletionError::unavailable(format!("completion runtime failed: {}", e)))?
    }
}
