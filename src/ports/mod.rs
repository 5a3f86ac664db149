//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `TextCompletion` - language model completions
//! - `UserStore` - users, diagnostics and study trails
//! - `AgentExchange` - envelope exchange with a remote agent
//! - `MessageHandler` - the receiving side of an agent

mod agent_exchange;
mod text_completion;
mod user_store;

pub use agent_exchange::{AgentExchange, MessageHandler, TransportError};
pub use text_completion::{CompletionError, CompletionOptions, TextCompletion};
pub use user_store::{PersistenceError, User, UserStore};
