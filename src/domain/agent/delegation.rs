//! Decision on whether the career agent should hand a message to the
//! score-calculator agent.

use serde::Deserialize;

use super::intent::extract_json_object;
use super::params::ScoreRequest;

pub const SCORE_ACTION: &str = "calcular_score";

const DELEGATION_KEYWORDS: &[&str] = &["score", "avalia"];

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DelegationDecision {
    #[serde(alias = "precisa_agente_auxiliar")]
    pub needs_helper: bool,
    #[serde(default, alias = "motivo")]
    pub reason: String,
    #[serde(default, alias = "acao")]
    pub action: String,
    #[serde(default, alias = "parametros")]
    pub parameters: ScoreRequest,
}

impl DelegationDecision {
    /// Reads the decision JSON out of a model reply.
    pub fn from_model_reply(reply: &str) -> Option<Self> {
        let json = extract_json_object(reply)?;
        serde_json::from_str(json).ok()
    }

    /// Decision made without the model.
    pub fn from_keywords(text: &str) -> Self {
        let lower = text.to_lowercase();
        Self {
            needs_helper: DELEGATION_KEYWORDS.iter().any(|k| lower.contains(k)),
            reason: "Decisão baseada em palavras-chave".to_string(),
            action: SCORE_ACTION.to_string(),
            parameters: ScoreRequest::default(),
        }
    }

    /// Whether the decision asks for a score the helper can compute.
    pub fn delegates_score(&self) -> bool {
        self.needs_helper && (self.action.is_empty() || self.action == SCORE_ACTION)
    }
}

pub fn delegation_prompt(text: &str) -> String {
    format!(
        r#"Analise esta mensagem do usuário e decida se precisa chamar um agente auxiliar:

Mensagem: "{text}"

O agente auxiliar pode:
- Calcular scores de carreira para diferentes áreas

Responda APENAS com um JSON no formato:
{{
    "precisa_agente_auxiliar": true/false,
    "motivo": "explicação da decisão",
    "acao": "{SCORE_ACTION}",
    "parametros": {{"area": "área", "experiencia": "nível"}}
}}

Se a mensagem menciona score, avaliação, pontuação de carreira, ou perguntas sobre adequação para uma área, responda true.
"#
    )
}
