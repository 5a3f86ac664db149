//! HTTP handlers for the agent endpoints.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::domain::agent::AgentMessage;
use crate::ports::MessageHandler;

use super::dto::{ErrorResponse, HealthResponse};

#[derive(Clone)]
pub struct AgentHandlers {
    agent: Arc<dyn MessageHandler>,
}

impl AgentHandlers {
    pub fn new(agent: Arc<dyn MessageHandler>) -> Self {
        Self { agent }
    }
}

/// POST /a2a - answer one envelope
pub async fn exchange_message(
    State(handlers): State<AgentHandlers>,
    payload: Result<Json<AgentMessage>, JsonRejection>,
) -> Response {
    let message = match payload {
        Ok(Json(message)) => message,
        Err(rejection) => {
            tracing::warn!(error = %rejection, "rejected malformed envelope");
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::bad_request(rejection.body_text())),
            )
                .into_response();
        }
    };

    tracing::info!(
        message_id = %message.message_id,
        conversation_id = ?message.conversation_id,
        "envelope received"
    );
    let reply = handlers.agent.handle_message(message).await;
    (StatusCode::OK, Json(reply)).into_response()
}

/// GET /.well-known/agent.json - agent card
pub async fn agent_card(State(handlers): State<AgentHandlers>) -> Response {
    (StatusCode::OK, Json(handlers.agent.card())).into_response()
}

/// GET /health
pub async fn health(State(handlers): State<AgentHandlers>) -> Response {
    let body = HealthResponse {
        status: "ok".to_string(),
        agent: handlers.agent.card().name,
    };
    (StatusCode::OK, Json(body)).into_response()
}
