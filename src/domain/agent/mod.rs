//! Agent module - envelope, routing and skill vocabulary of the agents.
//!
//! - `message` - `AgentMessage` envelope and reply correlation
//! - `intent` - ordered keyword routing table
//! - `params` - marker-based parameter extraction
//! - `prompts` - skill prompt templates and canned replies
//! - `delegation` - hand-off decision for the score agent
//! - `score` - the career score table
//! - `card` - agent self-description

mod card;
mod delegation;
mod intent;
mod message;
mod params;
pub mod prompts;
mod score;

pub use card::{career_agent_card, score_agent_card, AgentCard, SkillCard};
pub use delegation::{delegation_prompt, DelegationDecision, SCORE_ACTION};
pub use intent::{extract_json_object, FallbackReply, Intent, IntentRoute, IntentRouter, ROUTES};
pub use message::{AgentMessage, CorrelationError, MessageContent, MessageRole};
pub use params::{extract_marker, ResourceRequest, ScoreRequest};
pub use score::CareerScore;
