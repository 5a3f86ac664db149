//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `completion` - Language model clients (HTTP, persona wrapper, mock)
//! - `transport` - Agent-to-agent exchange (blocking transport, HTTP, in-process)
//! - `store` - UserStore implementations (in-memory, PostgreSQL)
//! - `http` - Agent HTTP servers

pub mod completion;
pub mod http;
pub mod store;
pub mod transport;
