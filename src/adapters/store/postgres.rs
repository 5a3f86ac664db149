//! PostgreSQL implementation of UserStore.
//!
//! Tables come from `migrations/`. Every write is a single-row insert.

use async_trait::async_trait;
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};

use crate::config::DatabaseConfig;
use crate::domain::diagnostic::DiagnosticRecord;
use crate::domain::foundation::{Timestamp, UserId};
use crate::domain::trail::{NewStudyTrail, StudyTrail};
use crate::ports::{PersistenceError, User, UserStore};

#[derive(Clone)]
pub struct PostgresUserStore {
    pool: PgPool,
}

impl PostgresUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Opens a pool sized by `config`, running migrations when asked to.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, PersistenceError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.acquire_timeout())
            .connect(&config.url)
            .await
            .map_err(|e| PersistenceError::database(format!("Failed to connect: {}", e)))?;

        if config.run_migrations {
            sqlx::migrate!("./migrations")
                .run(&pool)
                .await
                .map_err(|e| PersistenceError::database(format!("Failed to migrate: {}", e)))?;
        }

        Ok(Self::new(pool))
    }
}

#[async_trait]
impl UserStore for PostgresUserStore {
    async fn find_user(&self, username: &str) -> Result<Option<User>, PersistenceError> {
        let row = sqlx::query(
            r#"
            SELECT id, username, full_name, email, profile_reference, disabled
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| PersistenceError::database(format!("Failed to fetch user: {}", e)))?;

        row.map(row_to_user).transpose()
    }

    async fn create_diagnostic(
        &self,
        raw_text: &str,
        source_reference: &str,
        owner_id: UserId,
    ) -> Result<DiagnosticRecord, PersistenceError> {
        let row = sqlx::query(
            r#"
            INSERT INTO diagnostics (diagnostic, profile_reference, user_id)
            VALUES ($1, $2, $3)
            RETURNING id, diagnostic, profile_reference, user_id, created_at
            "#,
        )
        .bind(raw_text)
        .bind(source_reference)
        .bind(owner_id.value())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| PersistenceError::database(format!("Failed to insert diagnostic: {}", e)))?;

        row_to_diagnostic(row)
    }

    async fn latest_diagnostic(
        &self,
        owner_id: UserId,
    ) -> Result<Option<DiagnosticRecord>, PersistenceError> {
        let row = sqlx::query(
            r#"
            SELECT id, diagnostic, profile_reference, user_id, created_at
            FROM diagnostics
            WHERE user_id = $1
            ORDER BY created_at DESC, id DESC
            LIMIT 1
            "#,
        )
        .bind(owner_id.value())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| PersistenceError::database(format!("Failed to fetch diagnostic: {}", e)))?;

        row.map(row_to_diagnostic).transpose()
    }

    async fn create_study_trail(
        &self,
        trail: NewStudyTrail,
    ) -> Result<StudyTrail, PersistenceError> {
        let row = sqlx::query(
            r#"
            INSERT INTO study_trails (title, description, content, user_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id, title, description, content, user_id, created_at
            "#,
        )
        .bind(&trail.title)
        .bind(&trail.description)
        .bind(&trail.content)
        .bind(trail.owner_id.value())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| PersistenceError::database(format!("Failed to insert study trail: {}", e)))?;

        row_to_trail(row)
    }

    async fn list_study_trails(
        &self,
        owner_id: UserId,
    ) -> Result<Vec<StudyTrail>, PersistenceError> {
        let rows = sqlx::query(
            r#"
            SELECT id, title, description, content, user_id, created_at
            FROM study_trails
            WHERE user_id = $1
            ORDER BY created_at, id
            "#,
        )
        .bind(owner_id.value())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| PersistenceError::database(format!("Failed to list study trails: {}", e)))?;

        rows.into_iter().map(row_to_trail).collect()
    }
}

fn column<'r, T>(row: &'r PgRow, name: &str) -> Result<T, PersistenceError>
where
    T: sqlx::Decode<'r, sqlx::Postgres> + sqlx::Type<sqlx::Postgres>,
{
    row.try_get(name)
        .map_err(|e| PersistenceError::database(format!("Failed to get {}: {}", name, e)))
}

fn row_to_user(row: PgRow) -> Result<User, PersistenceError> {
    Ok(User {
        id: UserId::new(column(&row, "id")?),
        username: column(&row, "username")?,
        full_name: column(&row, "full_name")?,
        email: column(&row, "email")?,
        profile_reference: column(&row, "profile_reference")?,
        disabled: column(&row, "disabled")?,
    })
}

fn row_to_diagnostic(row: PgRow) -> Result<DiagnosticRecord, PersistenceError> {
    let created_at: chrono::DateTime<chrono::Utc> = column(&row, "created_at")?;
    Ok(DiagnosticRecord {
        id: column(&row, "id")?,
        raw_text: column(&row, "diagnostic")?,
        source_reference: column(&row, "profile_reference")?,
        owner_id: UserId::new(column(&row, "user_id")?),
        created_at: Timestamp::from_datetime(created_at),
    })
}

fn row_to_trail(row: PgRow) -> Result<StudyTrail, PersistenceError> {
    let created_at: chrono::DateTime<chrono::Utc> = column(&row, "created_at")?;
    Ok(StudyTrail {
        id: column(&row, "id")?,
        title: column(&row, "title")?,
        description: column(&row, "description")?,
        content: column(&row, "content")?,
        owner_id: UserId::new(column(&row, "user_id")?),
        created_at: Timestamp::from_datetime(created_at),
    })
}
