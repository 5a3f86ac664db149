//! Study trail module - learning plans returned by the career agent.

use serde::{Deserialize, Serialize};

use super::foundation::{Timestamp, UserId};

/// Title given to every trail produced by the pipeline.
pub const TRAIL_TITLE: &str = "Trilha de Estudos Personalizada";

/// Description given to every trail produced by the pipeline.
pub const TRAIL_DESCRIPTION: &str = "Gerada a partir do diagnóstico de perfil mais recente";

/// A stored study trail. `content` is whatever the agent returned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudyTrail {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub content: String,
    pub owner_id: UserId,
    pub created_at: Timestamp,
}

/// A trail waiting to be persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewStudyTrail {
    pub title: String,
    pub description: Option<String>,
    pub content: String,
    pub owner_id: UserId,
}

impl NewStudyTrail {
    /// Wraps agent output using the pipeline's title and description.
    pub fn from_agent_reply(content: impl Into<String>, owner_id: UserId) -> Self {
        Self {
            title: TRAIL_TITLE.to_string(),
            description: Some(TRAIL_DESCRIPTION.to_string()),
            content: content.into(),
            owner_id,
        }
    }
}

/// The message sent to the career agent for a stored diagnostic.
///
/// The diagnostic is embedded verbatim after the keyword-bearing header so
/// the agent routes it to its trail skill.
pub fn trail_request_message(diagnostic_text: &str) -> String {
    format!(
        "Gerar trilha de estudos personalizada com base no diagnóstico abaixo:\n\n{}",
        diagnostic_text
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_embeds_diagnostic_verbatim() {
        let diagnostic = r#"{"name": "Alice", "summary": ["perfil técnico"]}"#;
        let message = trail_request_message(diagnostic);

        assert!(message.starts_with("Gerar trilha de estudos"));
        assert!(message.ends_with(diagnostic));
    }

    #[test]
    fn agent_reply_keeps_content_opaque() {
        let trail = NewStudyTrail::from_agent_reply("not json at all", UserId::new(9));

        assert_eq!(trail.title, TRAIL_TITLE);
        assert_eq!(trail.content, "not json at all");
        assert_eq!(trail.owner_id, UserId::new(9));
    }
}
