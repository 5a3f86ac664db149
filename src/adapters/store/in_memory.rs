//! In-memory implementation of UserStore.
//!
//! Backs tests and local runs without a database. Ids are assigned from
//! per-table counters starting at 1, mirroring serial keys.

use async_trait::async_trait;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::domain::diagnostic::DiagnosticRecord;
use crate::domain::foundation::{Timestamp, UserId};
use crate::domain::trail::{NewStudyTrail, StudyTrail};
use crate::ports::{PersistenceError, User, UserStore};

#[derive(Debug, Default)]
struct Tables {
    users: Vec<User>,
    diagnostics: Vec<DiagnosticRecord>,
    trails: Vec<StudyTrail>,
    fail_writes: bool,
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryUserStore {
    tables: Arc<Mutex<Tables>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn tables(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Registers a user, returning the stored record.
    pub fn insert_user(&self, username: &str, profile_reference: &str) -> User {
        let mut tables = self.tables();
        let user = User {
            id: UserId::new(tables.users.len() as i64 + 1),
            username: username.to_string(),
            full_name: None,
            email: None,
            profile_reference: profile_reference.to_string(),
            disabled: false,
        };
        tables.users.push(user.clone());
        user
    }

    /// Makes every subsequent write fail with a database error.
    pub fn fail_writes(&self) {
        self.tables().fail_writes = true;
    }

    pub fn diagnostics_for(&self, owner_id: UserId) -> Vec<DiagnosticRecord> {
        self.tables()
            .diagnostics
            .iter()
            .filter(|d| d.owner_id == owner_id)
            .cloned()
            .collect()
    }

    pub fn diagnostic_count(&self) -> usize {
        self.tables().diagnostics.len()
    }

    pub fn trail_count(&self) -> usize {
        self.tables().trails.len()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn find_user(&self, username: &str) -> Result<Option<User>, PersistenceError> {
        Ok(self
            .tables()
            .users
            .iter()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn create_diagnostic(
        &self,
        raw_text: &str,
        source_reference: &str,
        owner_id: UserId,
    ) -> Result<DiagnosticRecord, PersistenceError> {
        let mut tables = self.tables();
        if tables.fail_writes {
            return Err(PersistenceError::database("writes disabled"));
        }
        let record = DiagnosticRecord {
            id: tables.diagnostics.len() as i64 + 1,
            raw_text: raw_text.to_string(),
            source_reference: source_reference.to_string(),
            owner_id,
            created_at: Timestamp::now(),
        };
        tables.diagnostics.push(record.clone());
        Ok(record)
    }

    async fn latest_diagnostic(
        &self,
        owner_id: UserId,
    ) -> Result<Option<DiagnosticRecord>, PersistenceError> {
        // Insertion order is creation order.
        Ok(self
            .tables()
            .diagnostics
            .iter()
            .rev()
            .find(|d| d.owner_id == owner_id)
            .cloned())
    }

    async fn create_study_trail(
        &self,
        trail: NewStudyTrail,
    ) -> Result<StudyTrail, PersistenceError> {
        let mut tables = self.tables();
        if tables.fail_writes {
            return Err(PersistenceError::database("writes disabled"));
        }
        let stored = StudyTrail {
            id: tables.trails.len() as i64 + 1,
            title: trail.title,
            description: trail.description,
            content: trail.content,
            owner_id: trail.owner_id,
            created_at: Timestamp::now(),
        };
        tables.trails.push(stored.clone());
        Ok(stored)
    }

    async fn list_study_trails(
        &self,
        owner_id: UserId,
    ) -> Result<Vec<StudyTrail>, PersistenceError> {
        Ok(self
            .tables()
            .trails
            .iter()
            .filter(|t| t.owner_id == owner_id)
            .cloned()
            .collect())
    }
}
