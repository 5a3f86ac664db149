//! Career Path - profile diagnostics, study trails and a career agent
//!
//! A detached two-stage pipeline turns a user's profile reference into a
//! stored diagnostic and then into a study trail requested from the career
//! agent. The career agent itself routes free-text messages by keyword to
//! language-model-backed skills and can delegate to a score-calculator
//! agent.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
