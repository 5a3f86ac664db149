//! ProfileDiagnosticExtractor - one completion call per profile reference.
//!
//! The returned text is whatever the model produced. Nothing here checks
//! that it is JSON; `ProfileNormalizer` absorbs malformed output later.

use std::sync::Arc;

use tracing::debug;

use crate::domain::diagnostic::{diagnostic_prompt, ProfileReference};
use crate::ports::{CompletionError, CompletionOptions, TextCompletion};

#[derive(Clone)]
pub struct ProfileDiagnosticExtractor {
    completion: Arc<dyn TextCompletion>,
    options: CompletionOptions,
}

impl ProfileDiagnosticExtractor {
    pub fn new(completion: Arc<dyn TextCompletion>, options: CompletionOptions) -> Self {
        Self {
            completion,
            options,
        }
    }

    /// Asks the model for the diagnostic of `reference`.
    pub async fn extract(&self, reference: &ProfileReference) -> Result<String, CompletionError> {
        let prompt = diagnostic_prompt(reference);
        debug!(%reference, "requesting profile diagnostic");

        let raw = self.completion.complete(&prompt, &self.options).await?;

        debug!(%reference, chars = raw.len(), "profile diagnostic received");
        Ok(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::completion::MockCompletion;

    fn reference() -> ProfileReference {
        ProfileReference::new("linkedin.com/in/alice").unwrap()
    }

    #[tokio::test]
    async fn returns_raw_model_output_untouched() {
        let mock = MockCompletion::always("not json at all");
        let extractor =
            ProfileDiagnosticExtractor::new(Arc::new(mock.clone()), CompletionOptions::default());

        let raw = extractor.extract(&reference()).await.unwrap();

        assert_eq!(raw, "not json at all");
        assert_eq!(mock.call_count(), 1);
        assert!(mock.prompts()[0].contains("linkedin.com/in/alice"));
    }

    #[tokio::test]
    async fn same_reference_yields_identical_output() {
        let mock = MockCompletion::always(r#"{"name":"Alice"}"#);
        let extractor =
            ProfileDiagnosticExtractor::new(Arc::new(mock.clone()), CompletionOptions::default());

        let first = extractor.extract(&reference()).await.unwrap();
        let second = extractor.extract(&reference()).await.unwrap();

        assert_eq!(first, second);
        let prompts = mock.prompts();
        assert_eq!(prompts[0], prompts[1]);
    }

    #[tokio::test]
    async fn passes_configured_options() {
        let mock = MockCompletion::always("{}");
        let options = CompletionOptions::default().with_max_tokens(100);
        let extractor = ProfileDiagnosticExtractor::new(Arc::new(mock.clone()), options.clone());

        extractor.extract(&reference()).await.unwrap();

        assert_eq!(mock.calls()[0].options, options);
    }

    #[tokio::test]
    async fn upstream_failure_is_returned() {
        let mock = MockCompletion::always_failing(CompletionError::unavailable("refused"));
        let extractor =
            ProfileDiagnosticExtractor::new(Arc::new(mock), CompletionOptions::default());

        let result = extractor.extract(&reference()).await;

        assert_eq!(result, Err(CompletionError::unavailable("refused")));
    }
}
