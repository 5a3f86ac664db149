//! Agent-to-agent message envelope.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::foundation::{ConversationId, MessageId};

/// Payload of an envelope. Only text is acted on; anything else is kept
/// as `Unsupported` so the receiver can still reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MessageContent {
    Text { text: String },
    Error { message: String },
    #[serde(other)]
    Unsupported,
}

impl MessageContent {
    pub fn text(text: impl Into<String>) -> Self {
        MessageContent::Text { text: text.into() }
    }
}

/// Who produced a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    #[default]
    User,
    Agent,
}

/// The envelope exchanged between agents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentMessage {
    pub content: MessageContent,
    #[serde(default)]
    pub role: MessageRole,
    #[serde(default)]
    pub message_id: MessageId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_message_id: Option<MessageId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<ConversationId>,
}

/// A reply that does not answer the request it came back for.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CorrelationError {
    #[error("reply has role {0:?}, expected agent")]
    UnexpectedRole(MessageRole),

    #[error("reply answers {actual:?}, expected {expected}")]
    WrongParent {
        expected: MessageId,
        actual: Option<MessageId>,
    },

    #[error("reply belongs to conversation {actual:?}, expected {expected:?}")]
    WrongConversation {
        expected: Option<ConversationId>,
        actual: Option<ConversationId>,
    },
}

impl AgentMessage {
    /// A fresh user message in its own conversation.
    pub fn user_text(text: impl Into<String>) -> Self {
        Self {
            content: MessageContent::text(text),
            role: MessageRole::User,
            message_id: MessageId::new(),
            parent_message_id: None,
            conversation_id: Some(ConversationId::new()),
        }
    }

    pub fn with_conversation(mut self, conversation_id: Option<ConversationId>) -> Self {
        self.conversation_id = conversation_id;
        self
    }

    /// The text payload, if this is a text message.
    pub fn text(&self) -> Option<&str> {
        match &self.content {
            MessageContent::Text { text } => Some(text),
            _ => None,
        }
    }

    /// Builds the agent reply to this message.
    pub fn reply(&self, content: MessageContent) -> AgentMessage {
        AgentMessage {
            content,
            role: MessageRole::Agent,
            message_id: MessageId::new(),
            parent_message_id: Some(self.message_id),
            conversation_id: self.conversation_id,
        }
    }

    pub fn reply_text(&self, text: impl Into<String>) -> AgentMessage {
        self.reply(MessageContent::text(text))
    }

    /// Checks that `self` is a well-formed reply to `request`.
    pub fn verify_reply_to(&self, request: &AgentMessage) -> Result<(), CorrelationError> {
        if self.role != MessageRole::Agent {
            return Err(CorrelationError::UnexpectedRole(self.role));
        }
        if self.parent_message_id != Some(request.message_id) {
            return Err(CorrelationError::WrongParent {
                expected: request.message_id,
                actual: self.parent_message_id,
            });
        }
        if self.conversation_id != request.conversation_id {
            return Err(CorrelationError::WrongConversation {
                expected: request.conversation_id,
                actual: self.conversation_id,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minimal_text_envelope() {
        let message: AgentMessage = serde_json::from_str(
            r#"{"content":{"type":"text","text":"me ajude a montar uma trilha de estudos"}}"#,
        )
        .unwrap();

        assert_eq!(message.role, MessageRole::User);
        assert_eq!(message.text(), Some("me ajude a montar uma trilha de estudos"));
        assert!(message.conversation_id.is_none());
    }

    #[test]
    fn unknown_content_type_is_unsupported() {
        let message: AgentMessage = serde_json::from_str(
            r#"{"content":{"type":"function_call","name":"x"},"role":"user"}"#,
        )
        .unwrap();

        assert_eq!(message.content, MessageContent::Unsupported);
        assert!(message.text().is_none());
    }

    #[test]
    fn serializes_wire_shape() {
        let message = AgentMessage::user_text("olá");
        let json = serde_json::to_value(&message).unwrap();

        assert_eq!(json["content"]["type"], "text");
        assert_eq!(json["content"]["text"], "olá");
        assert_eq!(json["role"], "user");
        assert!(json.get("parent_message_id").is_none());
    }

    #[test]
    fn reply_mirrors_correlation_fields() {
        let request = AgentMessage::user_text("oi");
        let reply = request.reply_text("olá");

        assert_eq!(reply.role, MessageRole::Agent);
        assert_eq!(reply.parent_message_id, Some(request.message_id));
        assert_eq!(reply.conversation_id, request.conversation_id);
        assert_ne!(reply.message_id, request.message_id);
        assert_eq!(reply.verify_reply_to(&request), Ok(()));
    }

    #[test]
    fn verify_rejects_reply_to_other_message() {
        let request = AgentMessage::user_text("oi");
        let other = AgentMessage::user_text("outra");
        let reply = other.reply_text("olá");

        assert!(matches!(
            reply.verify_reply_to(&request),
            Err(CorrelationError::WrongParent { .. })
        ));
    }

    #[test]
    fn verify_rejects_conversation_change() {
        let request = AgentMessage::user_text("oi");
        let reply = request
            .reply_text("olá")
            .with_conversation(Some(ConversationId::new()));

        assert!(matches!(
            reply.verify_reply_to(&request),
            Err(CorrelationError::WrongConversation { .. })
        ));
    }

    #[test]
    fn verify_rejects_user_role() {
        let request = AgentMessage::user_text("oi");
        let mut reply = request.reply_text("olá");
        reply.role = MessageRole::User;

        assert_eq!(
            reply.verify_reply_to(&request),
            Err(CorrelationError::UnexpectedRole(MessageRole::User))
        );
    }
}
