//! Agent exchange over HTTP: POST the envelope to `{endpoint}/a2a`.

use async_trait::async_trait;
use reqwest::Client;

use crate::domain::agent::AgentMessage;
use crate::ports::{AgentExchange, TransportError};

/// Path the agent servers accept envelopes on.
pub const A2A_PATH: &str = "/a2a";

pub struct HttpAgentExchange {
    client: Client,
}

impl HttpAgentExchange {
    pub fn new() -> Result<Self, TransportError> {
        // Each exchange runs on its own short-lived runtime; a pooled
        // connection would outlive the runtime that owns its I/O.
        let client = Client::builder()
            .pool_max_idle_per_host(0)
            .build()
            .map_err(|e| TransportError::Runtime(e.to_string()))?;
        Ok(Self { client })
    }

    fn a2a_url(endpoint: &str) -> String {
        format!("{}{}", endpoint.trim_end_matches('/'), A2A_PATH)
    }
}

#[async_trait]
impl AgentExchange for HttpAgentExchange {
    async fn exchange(
        &self,
        message: AgentMessage,
        endpoint: &str,
    ) -> Result<AgentMessage, TransportError> {
        let response = self
            .client
            .post(Self::a2a_url(endpoint))
            .json(&message)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    TransportError::unreachable(format!("request timed out: {}", e))
                } else if e.is_connect() {
                    TransportError::unreachable(format!("connection failed: {}", e))
                } else {
                    TransportError::unreachable(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TransportError::protocol(format!(
                "agent answered {}: {}",
                status, body
            )));
        }

        response
            .json::<AgentMessage>()
            .await
            .map_err(|e| TransportError::protocol(format!("malformed reply envelope: {}", e)))
    }
}
