//! Remote agent addresses

use serde::Deserialize;
use std::time::Duration;

use super::completion::is_http_url;
use super::error::ValidationError;

#[derive(Debug, Clone, Deserialize)]
pub struct AgentConfig {
    /// Career agent that answers chat and trail requests
    #[serde(default = "default_career_agent_url")]
    pub career_agent_url: String,

    /// Score calculator; delegation is disabled when unset
    pub score_agent_url: Option<String>,

    /// Upper bound for one agent exchange, in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Route skill prompts through the career persona wrapper
    #[serde(default = "default_use_persona")]
    pub use_persona: bool,
}

impl AgentConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if !is_http_url(&self.career_agent_url) {
            return Err(ValidationError::InvalidUrl("agent.career_agent_url"));
        }
        if let Some(url) = &self.score_agent_url {
            if !is_http_url(url) {
                return Err(ValidationError::InvalidUrl("agent.score_agent_url"));
            }
        }
        if self.request_timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout("agent"));
        }
        Ok(())
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            career_agent_url: default_career_agent_url(),
            score_agent_url: None,
            request_timeout_secs: default_request_timeout(),
            use_persona: default_use_persona(),
        }
    }
}

fn default_career_agent_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_request_timeout() -> u64 {
    180
}

fn default_use_persona() -> bool {
    true
}
