use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use crate::archive::filter::filter;
use crate::archive::UpsertOutcome;
use crate::auth::extractor::AdminUser;
use crate::error::AppError;
use crate::models::Project;
use crate::state::SharedState;

#[derive(Deserialize)]
pub struct ListParams {
    pub q: Option<String>,
}

pub async fn list(
    State(state): State<SharedState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<Project>>, AppError> {
    let store = state.archive.read().await;
    let query = params.q.unwrap_or_default();
    let projects = filter(store.projects(), &query)
        .into_iter()
        .cloned()
        .collect();
    Ok(Json(projects))
}

pub async fn get(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<Project>, AppError> {
    let project = state
        .archive
        .get(&id)
        .await
        .ok_or_else(|| AppError::NotFound("Project not found".to_string()))?;
    Ok(Json(project))
}

pub async fn upsert(
    admin: AdminUser,
    State(state): State<SharedState>,
    Json(project): Json<Project>,
) -> Result<Json<serde_json::Value>, AppError> {
    let id = project.id.clone();
    let outcome = state.archive.upsert(&admin.session, project).await?;
    let created = outcome == UpsertOutcome::Created;

    Ok(Json(json!({
        "status": "success",
        "message": "Project created/updated successfully!",
        "id": id,
        "created": created,
    })))
}

pub async fn delete(
    admin: AdminUser,
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    state.archive.delete(&admin.session, &id).await?;
    Ok(Json(json!({ "message": "Deleted" })))
}
