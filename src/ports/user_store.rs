//! User Store Port - the persistence collaborator of the pipeline.
//!
//! Users are managed elsewhere; the pipeline looks them up and appends
//! diagnostics and study trails under their id. Every write is a single
//! record insert.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::diagnostic::DiagnosticRecord;
use crate::domain::foundation::UserId;
use crate::domain::trail::{NewStudyTrail, StudyTrail};

/// A registered user as seen by the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub full_name: Option<String>,
    pub email: Option<String>,
    /// Profile URL given at registration.
    pub profile_reference: String,
    pub disabled: bool,
}

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_user(&self, username: &str) -> Result<Option<User>, PersistenceError>;

    async fn create_diagnostic(
        &self,
        raw_text: &str,
        source_reference: &str,
        owner_id: UserId,
    ) -> Result<DiagnosticRecord, PersistenceError>;

    /// Most recently created diagnostic of a user.
    async fn latest_diagnostic(
        &self,
        owner_id: UserId,
    ) -> Result<Option<DiagnosticRecord>, PersistenceError>;

    async fn create_study_trail(
        &self,
        trail: NewStudyTrail,
    ) -> Result<StudyTrail, PersistenceError>;

    /// Trails of a user, oldest first.
    async fn list_study_trails(&self, owner_id: UserId)
        -> Result<Vec<StudyTrail>, PersistenceError>;
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PersistenceError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("database error: {0}")]
    Database(String),
}

impl PersistenceError {
    pub fn database(message: impl Into<String>) -> Self {
        Self::Database(message.into())
    }
}
