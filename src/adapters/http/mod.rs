//! HTTP adapters - REST API implementations.
//!
//! Both agent processes expose the same surface, parameterized by the
//! `MessageHandler` behind it.

pub mod agent;

pub use agent::{agent_routes, AgentHandlers};
