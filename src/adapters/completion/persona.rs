//! Conversational wrapper that speaks as a career specialist.
//!
//! Prefixes every prompt with the persona instruction and pins the
//! temperature, whatever the caller asked for.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::agent::prompts::CAREER_PERSONA;
use crate::ports::{CompletionError, CompletionOptions, TextCompletion};

pub const PERSONA_TEMPERATURE: f32 = 0.3;

pub struct PersonaCompletion {
    inner: Arc<dyn TextCompletion>,
    persona: String,
    temperature: f32,
}

impl PersonaCompletion {
    pub fn new(inner: Arc<dyn TextCompletion>) -> Self {
        Self {
            inner,
            persona: CAREER_PERSONA.to_string(),
            temperature: PERSONA_TEMPERATURE,
        }
    }

    pub fn with_persona(mut self, persona: impl Into<String>) -> Self {
        self.persona = persona.into();
        self
    }
}

#[async_trait]
impl TextCompletion for PersonaCompletion {
    async fn complete(
        &self,
        prompt: &str,
        options: &CompletionOptions,
    ) -> Result<String, CompletionError> {
        let prompt = format!("{}\n\n{}", self.persona, prompt);
        let options = options.clone().with_temperature(self.temperature);
        self.inner.complete(&prompt, &options).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::completion::MockCompletion;

    #[tokio::test]
    async fn prefixes_persona_and_pins_temperature() {
        let mock = MockCompletion::always("ok");
        let persona = PersonaCompletion::new(Arc::new(mock.clone())).with_persona("Mentor.");

        let reply = persona
            .complete("Pergunta?", &CompletionOptions::default().with_temperature(0.9))
            .await
            .unwrap();

        assert_eq!(reply, "ok");
        let call = &mock.calls()[0];
        assert_eq!(call.prompt, "Mentor.\n\nPergunta?");
        assert_eq!(call.options.temperature, PERSONA_TEMPERATURE);
    }

    #[tokio::test]
    async fn passes_failures_through() {
        let mock = MockCompletion::always_failing(CompletionError::upstream(502, "bad gateway"));
        let persona = PersonaCompletion::new(Arc::new(mock));

        let result = persona.complete("x", &CompletionOptions::default()).await;

        assert_eq!(result, Err(CompletionError::upstream(502, "bad gateway")));
    }
}
