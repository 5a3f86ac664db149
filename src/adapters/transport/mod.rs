//! Agent transport adapters.
//!
//! - `AgentTransport` - blocking send-and-await over any `AgentExchange`
//! - `RuntimeBridge` - one private runtime per blocking call
//! - `HttpAgentExchange` - envelopes over HTTP
//! - `LocalAgentExchange` - in-process handlers

mod agent_transport;
mod bridge;
mod http_exchange;
mod local_exchange;

pub use agent_transport::AgentTransport;
pub use bridge::{BridgeError, RuntimeBridge};
pub use http_exchange::{HttpAgentExchange, A2A_PATH};
pub use local_exchange::LocalAgentExchange;
