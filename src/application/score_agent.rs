//! ScoreAgent - the score-calculator sub-agent.
//!
//! Deterministic: no model call. Understands
//! `calcular score área: X experiência: Y` and answers everything else
//! with usage instructions.

use async_trait::async_trait;
use tracing::info;

use crate::domain::agent::prompts::{SCORE_USAGE_REPLY, UNSUPPORTED_CONTENT_REPLY};
use crate::domain::agent::{score_agent_card, AgentCard, AgentMessage, CareerScore, ScoreRequest};
use crate::ports::MessageHandler;

#[derive(Debug, Clone, Copy, Default)]
pub struct ScoreAgent;

impl ScoreAgent {
    pub fn new() -> Self {
        Self
    }

    pub fn respond(&self, text: &str) -> String {
        let lower = text.to_lowercase();
        if !(lower.contains("calcular") && lower.contains("score")) {
            return SCORE_USAGE_REPLY.to_string();
        }

        let score = CareerScore::compute(&ScoreRequest::from_text(&lower));
        info!(area = %score.area, experience = %score.experience, score = score.score, "score computed");

        let json = serde_json::to_string_pretty(&score).unwrap_or_else(|_| format!("{:?}", score));
        format!("📊 **Score de Carreira:**\n\n```json\n{}\n```", json)
    }
}

#[async_trait]
impl MessageHandler for ScoreAgent {
    async fn handle_message(&self, message: AgentMessage) -> AgentMessage {
        let text = match message.text() {
            Some(text) => self.respond(text),
            None => UNSUPPORTED_CONTENT_REPLY.to_string(),
        };
        message.reply_text(text)
    }

    fn card(&self) -> AgentCard {
        score_agent_card()
    }
}
