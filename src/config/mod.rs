//! Application configuration module
//!
//! Type-safe configuration loading from environment variables using the
//! `config` and `dotenvy` crates. Variables carry the `CAREER_PATH` prefix
//! and nested values are separated by double underscores.
//!
//! # Example
//!
//! ```no_run
//! use career_path::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Completions from {}", config.completion.base_url);
//! ```

mod agent;
mod completion;
mod database;
mod error;
mod pipeline;
mod server;

pub use agent::AgentConfig;
pub use completion::CompletionConfig;
pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use pipeline::PipelineConfig;
pub use server::ServerConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Every section has defaults, so an empty environment yields a config
/// pointing at a local model endpoint and a local career agent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Language model endpoint
    #[serde(default)]
    pub completion: CompletionConfig,

    /// Remote agent addresses
    #[serde(default)]
    pub agent: AgentConfig,

    /// Agent HTTP server
    #[serde(default)]
    pub server: ServerConfig,

    /// PostgreSQL, needed only by persistence commands
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Background stage queue
    #[serde(default)]
    pub pipeline: PipelineConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `CAREER_PATH` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    ///
    /// # Environment Variable Format
    ///
    /// - `CAREER_PATH__COMPLETION__MODEL=llama3.1` -> `completion.model`
    /// - `CAREER_PATH__AGENT__SCORE_AGENT_URL=...` -> `agent.score_agent_url`
    /// - `CAREER_PATH__DATABASE__URL=...` -> `database.url`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("CAREER_PATH")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate everything except the database section.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.completion.validate()?;
        self.agent.validate()?;
        self.server.validate()?;
        self.pipeline.validate()?;
        Ok(())
    }

    /// Validate for commands that read or write the user store.
    pub fn validate_with_database(&self) -> Result<(), ValidationError> {
        self.validate()?;
        self.database.validate()
    }
}
