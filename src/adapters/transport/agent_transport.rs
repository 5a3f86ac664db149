//! AgentTransport - blocking request/response with a remote agent.
//!
//! # Example
//!
//! ```ignore
//! let transport = AgentTransport::new(Arc::new(HttpAgentExchange::new()?))
//!     .with_timeout(Duration::from_secs(180));
//!
//! let reply = transport.send(AgentMessage::user_text("exemplo"), "http://localhost:5000")?;
//! ```
//!
//! `send` blocks. Async callers go through `tokio::task::spawn_blocking`.
//! Replies are checked against the request before being returned, so a
//! caller never sees an answer to someone else's message.

use std::sync::Arc;
use std::time::Duration;

use super::bridge::RuntimeBridge;
use crate::domain::agent::AgentMessage;
use crate::ports::{AgentExchange, TransportError};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(180);

#[derive(Clone)]
pub struct AgentTransport {
    exchange: Arc<dyn AgentExchange>,
    bridge: RuntimeBridge,
    timeout: Duration,
}

impl AgentTransport {
    pub fn new(exchange: Arc<dyn AgentExchange>) -> Self {
        Self {
            exchange,
            bridge: RuntimeBridge::new(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Upper bound for one exchange, reply included.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn bridge(&self) -> &RuntimeBridge {
        &self.bridge
    }

    /// Sends `message` to `endpoint` and waits for the correlated reply.
    pub fn send(
        &self,
        message: AgentMessage,
        endpoint: &str,
    ) -> Result<AgentMessage, TransportError> {
        let message_id = message.message_id;
        tracing::debug!(%message_id, endpoint, "sending agent message");

        let request = message.clone();
        let exchange = Arc::clone(&self.exchange);
        let timeout = self.timeout;

        let outcome = self
            .bridge
            .run(move || async move {
                tokio::time::timeout(timeout, exchange.exchange(message, endpoint)).await
            })
            .map_err(|e| TransportError::Runtime(e.to_string()))?;

        let reply = match outcome {
            Ok(reply) => reply?,
            Err(_) => {
                return Err(TransportError::Timeout {
                    timeout_ms: u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
                })
            }
        };

        reply
            .verify_reply_to(&request)
            .map_err(|e| TransportError::protocol(e.to_string()))?;

        tracing::debug!(%message_id, reply_id = %reply.message_id, "agent replied");
        Ok(reply)
    }
}
