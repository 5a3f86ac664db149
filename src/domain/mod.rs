//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, errors)
//! - `profile` - Person profile and the diagnostic normalizer
//! - `diagnostic` - Diagnostic records and the diagnostic prompt
//! - `trail` - Study trails
//! - `agent` - Agent envelope, intent routing and skill prompts

pub mod agent;
pub mod diagnostic;
pub mod foundation;
pub mod profile;
pub mod trail;
