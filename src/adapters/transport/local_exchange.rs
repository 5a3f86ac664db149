//! In-process agent exchange.
//!
//! Routes envelopes straight to registered handlers by endpoint name.
//! Used to wire agents together without a network hop, and in tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::agent::AgentMessage;
use crate::ports::{AgentExchange, MessageHandler, TransportError};

#[derive(Default, Clone)]
pub struct LocalAgentExchange {
    agents: HashMap<String, Arc<dyn MessageHandler>>,
}

impl LocalAgentExchange {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_agent(mut self, endpoint: impl Into<String>, handler: Arc<dyn MessageHandler>) -> Self {
        self.agents.insert(endpoint.into(), handler);
        self
    }
}

#[async_trait]
impl AgentExchange for LocalAgentExchange {
    async fn exchange(
        &self,
        message: AgentMessage,
        endpoint: &str,
    ) -> Result<AgentMessage, TransportError> {
        let handler = self
            .agents
            .get(endpoint)
            .ok_or_else(|| TransportError::unreachable(format!("no agent registered at {}", endpoint)))?;
        Ok(handler.handle_message(message).await)
    }
}
