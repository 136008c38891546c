use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::{RwLock, RwLockReadGuard};

use crate::archive::draft::{new_project_id, validate_project, ProjectDraft, ValidationError};
use crate::archive::source::{ProjectSource, SourceError};
use crate::archive::store::{ProjectStore, StoreError, UpsertOutcome};
use crate::auth::gate::AdminSession;
use crate::models::Project;

#[derive(Debug)]
pub enum ArchiveError {
    Validation(ValidationError),
    Store(StoreError),
    Source(SourceError),
}

impl std::fmt::Display for ArchiveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ArchiveError::Validation(err) => write!(f, "{err}"),
            ArchiveError::Store(err) => write!(f, "{err}"),
            ArchiveError::Source(err) => write!(f, "Backing store error: {err}"),
        }
    }
}

impl From<ValidationError> for ArchiveError {
    fn from(err: ValidationError) -> Self {
        ArchiveError::Validation(err)
    }
}

impl From<StoreError> for ArchiveError {
    fn from(err: StoreError) -> Self {
        ArchiveError::Store(err)
    }
}

impl From<SourceError> for ArchiveError {
    fn from(err: SourceError) -> Self {
        ArchiveError::Source(err)
    }
}

/// The in-memory project store kept in step with its backing source.
///
/// Mutations hold the write lock while persisting, and touch the store only
/// after the source accepted the change. A failed write leaves the store at
/// its last-known-good state.
pub struct ArchiveService {
    source: Arc<dyn ProjectSource>,
    store: RwLock<ProjectStore>,
}

impl ArchiveService {
    pub fn new(source: Arc<dyn ProjectSource>, store: ProjectStore) -> Self {
        Self {
            source,
            store: RwLock::new(store),
        }
    }

    /// Fetch everything from `source`. Starts empty if the fetch fails.
    pub async fn load(source: Arc<dyn ProjectSource>) -> Self {
        let store = match source.fetch_all().await {
            Ok(projects) => {
                tracing::info!(count = projects.len(), "Loaded projects");
                ProjectStore::from_projects(projects)
            }
            Err(e) => {
                tracing::error!("Failed to load projects, starting empty: {e}");
                ProjectStore::new()
            }
        };
        Self::new(source, store)
    }

    /// Refetch from the source. On failure the current store is kept.
    pub async fn reload(&self) -> Result<usize, SourceError> {
        let projects = self.source.fetch_all().await.inspect_err(|e| {
            tracing::error!("Failed to reload projects: {e}");
        })?;
        let mut store = self.store.write().await;
        store.replace_all(projects);
        tracing::info!(count = store.len(), "Reloaded projects");
        Ok(store.len())
    }

    pub async fn read(&self) -> RwLockReadGuard<'_, ProjectStore> {
        self.store.read().await
    }

    pub async fn get(&self, id: &str) -> Option<Project> {
        self.store.read().await.get(id).cloned()
    }

    pub async fn len(&self) -> usize {
        self.store.read().await.len()
    }

    /// Save the admin form. With `editing` set the named project is replaced
    /// in place; otherwise a new project is added at the front.
    pub async fn commit(
        &self,
        session: &AdminSession,
        draft: ProjectDraft,
        editing: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<(Project, UpsertOutcome), ArchiveError> {
        draft.validate()?;

        let mut store = self.store.write().await;
        let (project, outcome) = match editing {
            Some(id) => {
                let previous = store
                    .get(id)
                    .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
                let project = draft.into_project(id.to_string(), Some(previous), now)?;
                (project, UpsertOutcome::Updated)
            }
            None => {
                let id = new_project_id(now);
                if store.contains(&id) {
                    return Err(StoreError::DuplicateId(id).into());
                }
                (draft.into_project(id, None, now)?, UpsertOutcome::Created)
            }
        };

        self.source.upsert(&project).await?;

        match outcome {
            UpsertOutcome::Updated => {
                store.replace(session, &project.id, project.clone())?;
            }
            UpsertOutcome::Created => store.insert(session, project.clone())?,
        }
        tracing::info!(project_id = %project.id, ?outcome, "Committed project");
        Ok((project, outcome))
    }

    /// Create or fully replace a complete record.
    pub async fn upsert(
        &self,
        session: &AdminSession,
        project: Project,
    ) -> Result<UpsertOutcome, ArchiveError> {
        validate_project(&project)?;

        let mut store = self.store.write().await;
        self.source.upsert(&project).await?;
        let id = project.id.clone();
        let outcome = store.upsert(session, project);
        tracing::info!(project_id = %id, ?outcome, "Upserted project");
        Ok(outcome)
    }

    pub async fn delete(&self, session: &AdminSession, id: &str) -> Result<Project, ArchiveError> {
        let mut store = self.store.write().await;
        if !store.contains(id) {
            return Err(StoreError::NotFound(id.to_string()).into());
        }

        if !self.source.delete(id).await? {
            tracing::warn!(project_id = %id, "Project was already gone from the source");
        }
        let removed = store.remove(session, id)?;
        tracing::info!(project_id = %id, "Deleted project");
        Ok(removed)
    }
}
