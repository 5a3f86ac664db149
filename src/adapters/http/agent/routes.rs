//! HTTP routes for an agent process.

use std::time::Duration;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use super::handlers::{agent_card, exchange_message, health, AgentHandlers};
use crate::adapters::transport::A2A_PATH;

/// Creates the agent router with all endpoints.
pub fn agent_routes(handlers: AgentHandlers, request_timeout: Duration) -> Router {
    Router::new()
        .route(A2A_PATH, post(exchange_message))
        .route("/.well-known/agent.json", get(agent_card))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(request_timeout))
        .with_state(handlers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use std::sync::Arc;
    use tower::ServiceExt;

    use crate::domain::agent::{score_agent_card, AgentCard, AgentMessage};
    use crate::ports::MessageHandler;

    struct Upper;

    #[async_trait]
    impl MessageHandler for Upper {
        async fn handle_message(&self, message: AgentMessage) -> AgentMessage {
            let text = message.text().unwrap_or_default().to_uppercase();
            message.reply_text(text)
        }

        fn card(&self) -> AgentCard {
            score_agent_card()
        }
    }

    fn router() -> Router {
        agent_routes(AgentHandlers::new(Arc::new(Upper)), Duration::from_secs(5))
    }

    async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn a2a_replies_with_correlated_envelope() {
        let request = AgentMessage::user_text("oi");
        let response = router()
            .oneshot(
                Request::post("/a2a")
                    .header("content-type", "application/json")
                    .body(Body::from(serde_json::to_vec(&request).unwrap()))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let reply: AgentMessage = body_json(response).await;
        assert_eq!(reply.text(), Some("OI"));
        assert_eq!(reply.verify_reply_to(&request), Ok(()));
    }

    #[tokio::test]
    async fn malformed_envelope_is_bad_request() {
        let response = router()
            .oneshot(
                Request::post("/a2a")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"role": "user"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn serves_agent_card() {
        let response = router()
            .oneshot(Request::get("/.well-known/agent.json").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let card: AgentCard = body_json(response).await;
        assert_eq!(card, score_agent_card());
    }

    #[tokio::test]
    async fn health_names_the_agent() {
        let response = router()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }
}
