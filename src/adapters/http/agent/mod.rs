//! HTTP surface of an agent process: envelope exchange, card and health.

mod dto;
mod handlers;
mod routes;

pub use dto::{ErrorResponse, HealthResponse};
pub use handlers::AgentHandlers;
pub use routes::agent_routes;
