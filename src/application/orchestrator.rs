//! StudyTrailOrchestrator - turns a diagnostic into a stored study trail.
//!
//! The diagnostic text is forwarded verbatim to the career agent and the
//! agent's reply is stored as-is. The reply format is prompt-driven, so no
//! schema is enforced on it.

use std::sync::Arc;

use tracing::{debug, info};

use super::error::PipelineError;
use crate::adapters::transport::AgentTransport;
use crate::domain::agent::AgentMessage;
use crate::domain::foundation::UserId;
use crate::domain::trail::{trail_request_message, NewStudyTrail, StudyTrail};
use crate::ports::{TransportError, UserStore};

#[derive(Clone)]
pub struct StudyTrailOrchestrator {
    transport: AgentTransport,
    store: Arc<dyn UserStore>,
    endpoint: String,
}

impl StudyTrailOrchestrator {
    pub fn new(
        transport: AgentTransport,
        store: Arc<dyn UserStore>,
        endpoint: impl Into<String>,
    ) -> Self {
        Self {
            transport,
            store,
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Requests a trail for `diagnostic_text` and stores it under `owner_id`.
    pub async fn request_trail(
        &self,
        diagnostic_text: &str,
        owner_id: UserId,
    ) -> Result<StudyTrail, PipelineError> {
        let request = AgentMessage::user_text(trail_request_message(diagnostic_text));
        debug!(
            %owner_id,
            message_id = %request.message_id,
            endpoint = %self.endpoint,
            "requesting study trail"
        );

        let reply = self.send_blocking(request).await?;
        let content = reply.text().ok_or(PipelineError::NonTextReply)?;

        let trail = self
            .store
            .create_study_trail(NewStudyTrail::from_agent_reply(content, owner_id))
            .await?;

        info!(%owner_id, trail_id = trail.id, "study trail stored");
        Ok(trail)
    }

    // `AgentTransport::send` blocks on its own runtime, which must not run
    // on a worker thread of the caller's runtime.
    async fn send_blocking(&self, request: AgentMessage) -> Result<AgentMessage, PipelineError> {
        let transport = self.transport.clone();
        let endpoint = self.endpoint.clone();

        let reply = tokio::task::spawn_blocking(move || transport.send(request, &endpoint))
            .await
            .map_err(|e| TransportError::Runtime(format!("transport task failed: {}", e)))??;
        Ok(reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::store::InMemoryUserStore;
    use crate::adapters::transport::LocalAgentExchange;
    use crate::domain::agent::{career_agent_card, AgentCard, MessageContent};
    use crate::domain::trail::TRAIL_TITLE;
    use crate::ports::MessageHandler;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Agent that records what it received and answers with fixed content.
    struct CannedAgent {
        reply: MessageContent,
        received: Mutex<Vec<String>>,
    }

    impl CannedAgent {
        fn text(reply: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: MessageContent::text(reply),
                received: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl MessageHandler for CannedAgent {
        async fn handle_message(&self, message: AgentMessage) -> AgentMessage {
            self.received
                .lock()
                .unwrap()
                .push(message.text().unwrap_or_default().to_string());
            message.reply(self.reply.clone())
        }

        fn card(&self) -> AgentCard {
            career_agent_card()
        }
    }

    fn orchestrator(agent: Arc<CannedAgent>, store: &InMemoryUserStore) -> StudyTrailOrchestrator {
        let exchange = LocalAgentExchange::new().with_agent("career", agent);
        StudyTrailOrchestrator::new(
            AgentTransport::new(Arc::new(exchange)),
            Arc::new(store.clone()),
            "career",
        )
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn stores_agent_reply_as_trail_content() {
        let store = InMemoryUserStore::new();
        let alice = store.insert_user("alice", "linkedin.com/in/alice");
        let agent = CannedAgent::text(r#"{"etapas":[]}"#);
        let orchestrator = orchestrator(agent.clone(), &store);

        let trail = orchestrator
            .request_trail(r#"{"name":"Alice"}"#, alice.id)
            .await
            .unwrap();

        assert_eq!(trail.content, r#"{"etapas":[]}"#);
        assert_eq!(trail.title, TRAIL_TITLE);
        assert_eq!(trail.owner_id, alice.id);
        assert_eq!(store.trail_count(), 1);

        let received = agent.received.lock().unwrap();
        assert!(received[0].ends_with(r#"{"name":"Alice"}"#));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn unreachable_agent_stores_nothing() {
        let store = InMemoryUserStore::new();
        let alice = store.insert_user("alice", "a");
        let orchestrator = StudyTrailOrchestrator::new(
            AgentTransport::new(Arc::new(LocalAgentExchange::new())),
            Arc::new(store.clone()),
            "career",
        );

        let result = orchestrator.request_trail("diag", alice.id).await;

        assert!(matches!(
            result,
            Err(PipelineError::Transport(TransportError::Unreachable(_)))
        ));
        assert_eq!(store.trail_count(), 0);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn non_text_reply_is_rejected() {
        let store = InMemoryUserStore::new();
        let alice = store.insert_user("alice", "a");
        let agent = Arc::new(CannedAgent {
            reply: MessageContent::Error {
                message: "falhou".to_string(),
            },
            received: Mutex::new(Vec::new()),
        });

        let result = orchestrator(agent, &store).request_trail("diag", alice.id).await;

        assert_eq!(result, Err(PipelineError::NonTextReply));
        assert_eq!(store.trail_count(), 0);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn persistence_failure_propagates() {
        let store = InMemoryUserStore::new();
        let alice = store.insert_user("alice", "a");
        store.fail_writes();

        let result = orchestrator(CannedAgent::text("trilha"), &store)
            .request_trail("diag", alice.id)
            .await;

        assert!(matches!(result, Err(PipelineError::Persistence(_))));
    }
}
