use crate::auth::gate::AdminSession;
use crate::models::Project;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    DuplicateId(String),
    NotFound(String),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::DuplicateId(id) => write!(f, "A project with id '{id}' already exists"),
            StoreError::NotFound(id) => write!(f, "Project '{id}' not found"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Created,
    Updated,
}

/// Ordered in-memory collection of projects, unique by id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectStore {
    projects: Vec<Project>,
}

impl ProjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a fetched collection. Later duplicates of an id are dropped.
    pub fn from_projects(projects: Vec<Project>) -> Self {
        let mut store = Self::new();
        store.replace_all(projects);
        store
    }

    /// Swap in a freshly fetched collection, keeping its order.
    pub fn replace_all(&mut self, projects: Vec<Project>) {
        let mut kept: Vec<Project> = Vec::with_capacity(projects.len());
        for project in projects {
            if kept.iter().any(|p| p.id == project.id) {
                tracing::warn!(project_id = %project.id, "Duplicate project id in source, ignoring");
                continue;
            }
            kept.push(project);
        }
        self.projects = kept;
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.projects.iter().position(|p| p.id == id)
    }

    /// Add a new project at the front.
    pub fn insert(&mut self, _session: &AdminSession, project: Project) -> Result<(), StoreError> {
        if self.contains(&project.id) {
            return Err(StoreError::DuplicateId(project.id));
        }
        self.projects.insert(0, project);
        Ok(())
    }

    /// Replace every field of project `id` in place. The stored id never
    /// changes. Returns the previous record.
    pub fn replace(
        &mut self,
        _session: &AdminSession,
        id: &str,
        mut project: Project,
    ) -> Result<Project, StoreError> {
        let idx = self
            .position(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        project.id = id.to_string();
        Ok(std::mem::replace(&mut self.projects[idx], project))
    }

    /// Replace in place when the id exists; otherwise insert at the position
    /// a launch-date ordered fetch would give it.
    pub fn upsert(&mut self, _session: &AdminSession, project: Project) -> UpsertOutcome {
        if let Some(idx) = self.position(&project.id) {
            self.projects[idx] = project;
            return UpsertOutcome::Updated;
        }
        let at = project.launch_at();
        let idx = match at {
            Some(at) => self
                .projects
                .iter()
                .position(|p| p.launch_at().is_none_or(|other| other > at))
                .unwrap_or(self.projects.len()),
            None => self.projects.len(),
        };
        self.projects.insert(idx, project);
        UpsertOutcome::Created
    }

    pub fn remove(&mut self, _session: &AdminSession, id: &str) -> Result<Project, StoreError> {
        let idx = self
            .position(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        Ok(self.projects.remove(idx))
    }
}
