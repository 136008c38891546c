use async_trait::async_trait;
use sqlx::PgPool;

use crate::db;
use crate::models::Project;

/// Failure talking to the backing service.
#[derive(Debug)]
pub struct SourceError {
    pub message: String,
}

impl std::fmt::Display for SourceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl From<sqlx::Error> for SourceError {
    fn from(err: sqlx::Error) -> Self {
        SourceError {
            message: err.to_string(),
        }
    }
}

impl From<&str> for SourceError {
    fn from(s: &str) -> Self {
        SourceError {
            message: s.to_string(),
        }
    }
}

/// Where the archive's projects persist.
#[async_trait]
pub trait ProjectSource: Send + Sync {
    /// Every project, ordered by launch date.
    async fn fetch_all(&self) -> Result<Vec<Project>, SourceError>;
    /// Create `project`, or replace every mutable field if its id exists.
    async fn upsert(&self, project: &Project) -> Result<(), SourceError>;
    /// Returns whether a record was removed.
    async fn delete(&self, id: &str) -> Result<bool, SourceError>;
}

pub struct PgProjectSource {
    pool: PgPool,
}

impl PgProjectSource {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProjectSource for PgProjectSource {
    async fn fetch_all(&self) -> Result<Vec<Project>, SourceError> {
        Ok(db::projects::list(&self.pool).await?)
    }

    async fn upsert(&self, project: &Project) -> Result<(), SourceError> {
        db::projects::upsert(&self.pool, project).await?;
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<bool, SourceError> {
        Ok(db::projects::delete(&self.pool, id).await?)
    }
}
