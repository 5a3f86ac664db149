//! Agent Exchange Port - request/response between agent processes.
//!
//! `AgentExchange` is the asynchronous half of the transport: it moves one
//! envelope to an endpoint and returns whatever came back. `MessageHandler`
//! is the receiving side, implemented by each agent.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::agent::{AgentCard, AgentMessage};

#[async_trait]
pub trait AgentExchange: Send + Sync {
    /// Sends `message` to the agent at `endpoint` and awaits its reply.
    async fn exchange(
        &self,
        message: AgentMessage,
        endpoint: &str,
    ) -> Result<AgentMessage, TransportError>;
}

/// An agent able to answer envelopes. Must always produce a reply.
#[async_trait]
pub trait MessageHandler: Send + Sync {
    async fn handle_message(&self, message: AgentMessage) -> AgentMessage;

    fn card(&self) -> AgentCard;
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("agent endpoint unreachable: {0}")]
    Unreachable(String),

    #[error("agent did not reply within {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    /// The reply envelope was malformed or uncorrelated.
    #[error("agent protocol violation: {0}")]
    Protocol(String),

    /// The private runtime for the exchange could not run.
    #[error("transport runtime failure: {0}")]
    Runtime(String),
}

impl TransportError {
    pub fn unreachable(message: impl Into<String>) -> Self {
        Self::Unreachable(message.into())
    }

    pub fn protocol(message: impl Into<String>) -> Self {
        Self::Protocol(message.into())
    }
}
