//! Text completion adapters.
//!
//! - `HttpCompletionClient` - `/api/generate` over HTTP
//! - `PersonaCompletion` - career-specialist wrapper around another client
//! - `BlockingCompletion` - blocking facade for callers without a runtime
//! - `MockCompletion` - scripted stub for tests

mod blocking;
mod http_client;
mod mock;
mod persona;

pub use blocking::BlockingCompletion;
pub use http_client::{CompletionClientConfig, HttpCompletionClient};
pub use mock::{MockCompletion, RecordedCompletion};
pub use persona::{PersonaCompletion, PERSONA_TEMPERATURE};
