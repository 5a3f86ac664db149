//! SkillDispatcher - the career agent.
//!
//! Every inbound envelope goes Idle → Classify → Dispatch(skill) → Reply
//! and always produces exactly one correlated reply. Skills that fail are
//! answered with an error text; nothing escapes to the exchange layer.
//!
//! ```ignore
//! let dispatcher = SkillDispatcher::new(completion, options)
//!     .with_delegate(ScoreDelegate::new(decider, transport, "http://localhost:5001"));
//!
//! let reply = dispatcher.handle_message(AgentMessage::user_text("ajuda")).await;
//! ```

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, error, info, warn};

use crate::adapters::transport::AgentTransport;
use crate::domain::agent::prompts::{
    free_text_trail_prompt, profile_analysis_prompt, resource_suggestion_prompt,
    study_trail_prompt, ANALYZE_USAGE_REPLY, GREETING, HELP_TEXT, UNSUPPORTED_CONTENT_REPLY,
};
use crate::domain::agent::{
    career_agent_card, delegation_prompt, extract_json_object, AgentCard, AgentMessage,
    DelegationDecision, FallbackReply, Intent, IntentRouter, ResourceRequest,
};
use crate::domain::profile::{example_profile, PersonProfile, ProfileNormalizer};
use crate::ports::{
    CompletionError, CompletionOptions, MessageHandler, TextCompletion, TransportError,
};

/// Temperature of the delegation decision call.
pub const DECISION_TEMPERATURE: f32 = 0.1;

/// Hand-off to the score-calculator agent for otherwise unrouted messages.
#[derive(Clone)]
pub struct ScoreDelegate {
    decider: Arc<dyn TextCompletion>,
    transport: AgentTransport,
    endpoint: String,
}

impl ScoreDelegate {
    /// `decider` answers the yes/no delegation prompt; it should be the raw
    /// client, not the persona wrapper.
    pub fn new(
        decider: Arc<dyn TextCompletion>,
        transport: AgentTransport,
        endpoint: impl Into<String>,
    ) -> Self {
        Self {
            decider,
            transport,
            endpoint: endpoint.into(),
        }
    }

    async fn decide(&self, text: &str, options: &CompletionOptions) -> DelegationDecision {
        let options = options.clone().with_temperature(DECISION_TEMPERATURE);
        match self.decider.complete(&delegation_prompt(text), &options).await {
            Ok(reply) => DelegationDecision::from_model_reply(&reply).unwrap_or_else(|| {
                warn!("delegation reply had no decision, using keywords");
                DelegationDecision::from_keywords(text)
            }),
            Err(e) => {
                warn!(error = %e, "delegation decision failed, using keywords");
                DelegationDecision::from_keywords(text)
            }
        }
    }

    async fn ask_score_agent(&self, command: String) -> Result<String, TransportError> {
        let transport = self.transport.clone();
        let endpoint = self.endpoint.clone();
        let reply = tokio::task::spawn_blocking(move || {
            transport.send(AgentMessage::user_text(command), &endpoint)
        })
        .await
        .map_err(|e| TransportError::Runtime(format!("transport task failed: {}", e)))??;

        reply
            .text()
            .map(str::to_string)
            .ok_or_else(|| TransportError::protocol("score agent replied without text"))
    }
}

pub struct SkillDispatcher {
    completion: Arc<dyn TextCompletion>,
    options: CompletionOptions,
    normalizer: ProfileNormalizer,
    router: IntentRouter,
    delegate: Option<ScoreDelegate>,
}

impl SkillDispatcher {
    /// `completion` serves the skills: the raw client or the persona wrapper.
    pub fn new(completion: Arc<dyn TextCompletion>, options: CompletionOptions) -> Self {
        Self {
            completion,
            options,
            normalizer: ProfileNormalizer::default(),
            router: IntentRouter,
            delegate: None,
        }
    }

    pub fn with_normalizer(mut self, normalizer: ProfileNormalizer) -> Self {
        self.normalizer = normalizer;
        self
    }

    pub fn with_delegate(mut self, delegate: ScoreDelegate) -> Self {
        self.delegate = Some(delegate);
        self
    }

    /// Produces the reply text for one message.
    pub async fn respond(&self, text: &str) -> String {
        let intent = self.router.classify(text);
        info!(%intent, "dispatching message");

        let outcome = match intent {
            Intent::AnalyzeProfile => self.analyze_profile(text).await,
            Intent::StudyTrail => self.study_trail(text).await,
            Intent::SuggestResources => self.suggest_resources(text).await,
            Intent::Fallback => Ok(self.fallback(text).await),
        };

        outcome.unwrap_or_else(|e| {
            error!(%intent, error = %e, "skill failed");
            format!("Erro ao {}: {}", failure_verb(intent), e)
        })
    }

    /// Profile from the JSON embedded in `text`: structured first, then
    /// diagnostic-shaped through the normalizer.
    fn embedded_profile(&self, text: &str) -> Option<PersonProfile> {
        let json = extract_json_object(text)?;
        Some(
            serde_json::from_str::<PersonProfile>(json)
                .unwrap_or_else(|_| self.normalizer.normalize(json)),
        )
    }

    async fn analyze_profile(&self, text: &str) -> Result<String, CompletionError> {
        let Some(profile) = self.embedded_profile(text) else {
            return Ok(ANALYZE_USAGE_REPLY.to_string());
        };
        let analysis = self
            .completion
            .complete(&profile_analysis_prompt(&profile), &self.options)
            .await?;
        Ok(format!("📊 **Análise do Perfil:**\n\n{}", analysis))
    }

    async fn study_trail(&self, text: &str) -> Result<String, CompletionError> {
        let prompt = match self.embedded_profile(text) {
            Some(profile) => study_trail_prompt(&profile),
            None => free_text_trail_prompt(text),
        };
        let trail = self.completion.complete(&prompt, &self.options).await?;
        Ok(format!("🛤️ **Trilha de Estudos:**\n\n{}", trail))
    }

    async fn suggest_resources(&self, text: &str) -> Result<String, CompletionError> {
        let request = ResourceRequest::from_text(text);
        debug!(area = %request.area, level = %request.level, kind = %request.kind, "resource request");
        let resources = self
            .completion
            .complete(&resource_suggestion_prompt(&request), &self.options)
            .await?;
        Ok(format!(
            "📚 **Recursos para {} (nível {}):**\n\n{}",
            request.area, request.level, resources
        ))
    }

    async fn fallback(&self, text: &str) -> String {
        match self.router.fallback_reply(text) {
            FallbackReply::Example => format!(
                "Aqui está um exemplo de perfil:\n\n```json\n{}\n```",
                example_profile().to_pretty_json()
            ),
            FallbackReply::Help => HELP_TEXT.to_string(),
            FallbackReply::Default => match &self.delegate {
                Some(delegate) => self.delegate_or_greet(delegate, text).await,
                None => GREETING.to_string(),
            },
        }
    }

    async fn delegate_or_greet(&self, delegate: &ScoreDelegate, text: &str) -> String {
        let decision = delegate.decide(text, &self.options).await;
        if !decision.delegates_score() {
            return format!(
                "🤖 **Agente Principal**\n\n**Decisão:** {}\n\n{}",
                or_na(&decision.reason),
                GREETING
            );
        }

        info!(
            area = %decision.parameters.area,
            experience = %decision.parameters.experience,
            "delegating to score agent"
        );
        let result = match delegate
            .ask_score_agent(decision.parameters.to_command())
            .await
        {
            Ok(reply) => reply,
            Err(e) => {
                error!(error = %e, "score agent call failed");
                format!("❌ Erro na comunicação: {}", e)
            }
        };

        format!(
            "🤖 **Agente Principal** - Decisão da IA:\n\n**Motivo:** {}\n\n**Resultado do Agente Auxiliar:**\n{}",
            or_na(&decision.reason),
            result
        )
    }
}

fn failure_verb(intent: Intent) -> &'static str {
    match intent {
        Intent::AnalyzeProfile => "analisar perfil",
        Intent::StudyTrail => "gerar trilha",
        Intent::SuggestResources => "sugerir recursos",
        Intent::Fallback => "processar solicitação",
    }
}

fn or_na(reason: &str) -> &str {
    if reason.trim().is_empty() {
        "N/A"
    } else {
        reason
    }
}

#[async_trait]
impl MessageHandler for SkillDispatcher {
    async fn handle_message(&self, message: AgentMessage) -> AgentMessage {
        debug!(
            message_id = %message.message_id,
            conversation_id = ?message.conversation_id,
            "message received"
        );
        let text = match message.text() {
            Some(text) => self.respond(text).await,
            None => UNSUPPORTED_CONTENT_REPLY.to_string(),
        };
        message.reply_text(text)
    }

    fn card(&self) -> AgentCard {
        career_agent_card()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::completion::MockCompletion;
    use crate::adapters::transport::LocalAgentExchange;
    use crate::application::ScoreAgent;
    use crate::domain::agent::MessageContent;

    fn dispatcher(mock: &MockCompletion) -> SkillDispatcher {
        SkillDispatcher::new(Arc::new(mock.clone()), CompletionOptions::default())
    }

    #[tokio::test]
    async fn trail_request_is_answered_by_trail_skill() {
        let mock = MockCompletion::always("1. Fundamentos\n2. Projetos");
        let message: AgentMessage = serde_json::from_str(
            r#"{"content":{"type":"text","text":"me ajude a montar uma trilha de estudos"}}"#,
        )
        .unwrap();

        let reply = dispatcher(&mock).handle_message(message.clone()).await;

        let text = reply.text().unwrap();
        assert!(text.starts_with("🛤️ **Trilha de Estudos:**"));
        assert!(text.contains("1. Fundamentos"));
        assert_eq!(reply.parent_message_id, Some(message.message_id));
        assert!(reply.verify_reply_to(&message).is_ok());
        assert!(mock.prompts()[0].contains("me ajude a montar uma trilha de estudos"));
    }

    #[tokio::test]
    async fn analyze_without_json_returns_usage() {
        let mock = MockCompletion::always("nunca");

        let reply = dispatcher(&mock).respond("analisar perfil por favor").await;

        assert_eq!(reply, ANALYZE_USAGE_REPLY);
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn analyze_accepts_portuguese_profile_json() {
        let mock = MockCompletion::always("Pontos fortes: Python");
        let text = r#"analisar perfil {"nome":"Ana","escolaridade":"Superior","competencias_atuais":[]}"#;

        let reply = dispatcher(&mock).respond(text).await;

        assert!(reply.starts_with("📊 **Análise do Perfil:**"));
        assert!(mock.prompts()[0].contains("Ana"));
    }

    #[tokio::test]
    async fn analyze_normalizes_diagnostic_shaped_json() {
        let mock = MockCompletion::always("ok");
        let text = r#"analisar {"name":"Alice","industry":"Tech","top_skills":[{"skill":"Go","endorsements":5}]}"#;

        dispatcher(&mock).respond(text).await;

        let prompt = &mock.prompts()[0];
        assert!(prompt.contains("Alice"));
        assert!(prompt.contains("Go"));
    }

    #[tokio::test]
    async fn analyze_keyword_in_payload_outranks_trail_request() {
        let mock = MockCompletion::always("Pontos fortes: Go");
        let text = r#"Gerar trilha: {"name":"Alice","summary":"perfil completo"}"#;

        let reply = dispatcher(&mock).respond(text).await;

        assert!(reply.starts_with("📊 **Análise do Perfil:**"));
        assert!(mock.prompts()[0].contains("Alice"));
    }

    #[tokio::test]
    async fn resources_use_extracted_markers() {
        let mock = MockCompletion::always("Curso X");

        let reply = dispatcher(&mock)
            .respond("sugerir recursos área: dados nível: avançado")
            .await;

        assert!(reply.starts_with("📚 **Recursos para dados (nível avançado):**"));
        assert!(reply.ends_with("Curso X"));
    }

    #[tokio::test]
    async fn skill_failure_becomes_error_text() {
        let mock = MockCompletion::always_failing(CompletionError::unavailable("timeout"));
        let message = AgentMessage::user_text("quero uma trilha");

        let reply = dispatcher(&mock).handle_message(message.clone()).await;

        assert_eq!(
            reply.text(),
            Some("Erro ao gerar trilha: completion endpoint unavailable: timeout")
        );
        assert!(reply.verify_reply_to(&message).is_ok());
    }

    #[tokio::test]
    async fn fallback_variants() {
        let mock = MockCompletion::new();
        let dispatcher = dispatcher(&mock);

        assert!(dispatcher.respond("exemplo").await.contains("João Silva"));
        assert_eq!(dispatcher.respond("ajuda").await, HELP_TEXT);
        assert_eq!(dispatcher.respond("olá").await, GREETING);
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn non_text_content_is_rejected_with_reply() {
        let mock = MockCompletion::new();
        let message = AgentMessage {
            content: MessageContent::Unsupported,
            ..AgentMessage::user_text("")
        };

        let reply = dispatcher(&mock).handle_message(message.clone()).await;

        assert_eq!(reply.text(), Some(UNSUPPORTED_CONTENT_REPLY));
        assert_eq!(reply.conversation_id, message.conversation_id);
    }

    fn delegating(decider: MockCompletion, exchange: LocalAgentExchange) -> SkillDispatcher {
        let delegate = ScoreDelegate::new(
            Arc::new(decider),
            AgentTransport::new(Arc::new(exchange)),
            "score",
        );
        SkillDispatcher::new(Arc::new(MockCompletion::new()), CompletionOptions::default())
            .with_delegate(delegate)
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn delegates_score_questions_to_score_agent() {
        let decider = MockCompletion::always(
            r#"{"precisa_agente_auxiliar": true, "motivo": "pediu score", "acao": "calcular_score", "parametros": {"area": "dados", "experiencia": "avançado"}}"#,
        );
        let exchange = LocalAgentExchange::new().with_agent("score", Arc::new(ScoreAgent::new()));

        let reply = delegating(decider.clone(), exchange)
            .respond("qual meu score em dados?")
            .await;

        assert!(reply.contains("**Motivo:** pediu score"));
        assert!(reply.contains(r#""score": 9"#));
        assert_eq!(decider.calls()[0].options.temperature, DECISION_TEMPERATURE);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn failed_decision_falls_back_to_keywords() {
        let decider = MockCompletion::always_failing(CompletionError::unavailable("down"));
        let exchange = LocalAgentExchange::new().with_agent("score", Arc::new(ScoreAgent::new()));

        let reply = delegating(decider, exchange).respond("me avalia").await;

        assert!(reply.contains("Resultado do Agente Auxiliar"));
        assert!(reply.contains(r#""score": 8"#));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn unreachable_score_agent_is_reported_in_text() {
        let decider = MockCompletion::always(r#"{"needs_helper": true}"#);

        let reply = delegating(decider, LocalAgentExchange::new())
            .respond("score")
            .await;

        assert!(reply.contains("❌ Erro na comunicação"));
    }

    #[tokio::test]
    async fn no_delegation_greets() {
        let decider = MockCompletion::always(r#"{"needs_helper": false, "reason": "conversa"}"#);

        let reply = delegating(decider, LocalAgentExchange::new())
            .respond("bom dia")
            .await;

        assert!(reply.contains("**Decisão:** conversa"));
        assert!(reply.ends_with(GREETING));
    }
}
