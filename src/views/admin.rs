use std::net::SocketAddr;

use askama::Template;
use axum::extract::{ConnectInfo, Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use axum::Form;
use axum_extra::extract::CookieJar;
use chrono::Utc;
use serde::Deserialize;

use crate::archive::{ArchiveError, ProjectDraft, StoreError, UpsertOutcome};
use crate::auth::extractor::{clear_session_cookie, session_cookie, session_from_jar, AdminUser};
use crate::error::AppError;
use crate::models::ProjectStatus;
use crate::routes::admin::attempt_unlock;
use crate::state::SharedState;
use crate::views::archive::LedgerRow;
use crate::views::render;

struct StatusOption {
    value: &'static str,
    selected: bool,
}

#[derive(Template)]
#[template(path = "admin/login.html")]
struct LoginTemplate {
    notice: Option<String>,
    error: Option<String>,
}

#[derive(Template)]
#[template(path = "admin/index.html")]
struct AdminTemplate {
    notice: Option<String>,
    error: Option<String>,
    editing_id: Option<String>,
    draft: ProjectDraft,
    status_options: Vec<StatusOption>,
    rows: Vec<LedgerRow>,
}

#[derive(Deserialize)]
pub struct AdminParams {
    pub edit: Option<String>,
    pub notice: Option<String>,
}

#[derive(Deserialize)]
pub struct UnlockForm {
    #[serde(default)]
    pub password: String,
}

#[derive(Deserialize)]
pub struct CommitForm {
    #[serde(default)]
    pub editing_id: String,
    #[serde(flatten)]
    pub draft: ProjectDraft,
}

fn notice_text(code: &str) -> Option<String> {
    let text = match code {
        "added" => "Entry Added to Archive",
        "updated" => "Entry Updated Successfully",
        "deleted" => "Entry deleted",
        "locked" => "Admin area locked",
        "reloaded" => "Archive reloaded from the database",
        "delete-failed" => "Delete failed, the archive was not changed",
        "reload-failed" => "Reload failed, showing the last loaded archive",
        _ => return None,
    };
    Some(text.to_string())
}

fn status_options(selected: &str) -> Vec<StatusOption> {
    let selected = ProjectStatus::parse(selected).unwrap_or_default();
    ProjectStatus::ALL
        .into_iter()
        .map(|status| StatusOption {
            value: status.as_str(),
            selected: status == selected,
        })
        .collect()
}

async fn editor(
    state: &SharedState,
    editing_id: Option<String>,
    draft: ProjectDraft,
    notice: Option<String>,
    error: Option<String>,
) -> AdminTemplate {
    let rows = {
        let store = state.archive.read().await;
        store.projects().iter().map(LedgerRow::of).collect()
    };
    AdminTemplate {
        notice,
        error,
        editing_id,
        status_options: status_options(&draft.status),
        draft,
        rows,
    }
}

pub async fn page(
    State(state): State<SharedState>,
    Query(params): Query<AdminParams>,
    jar: CookieJar,
) -> Result<Response, AppError> {
    let notice = params.notice.as_deref().and_then(notice_text);

    if session_from_jar(&jar, &state).is_none() {
        return Ok(render(&LoginTemplate {
            notice,
            error: None,
        })?
        .into_response());
    }

    let (editing_id, draft) = match params.edit.filter(|id| !id.is_empty()) {
        Some(id) => {
            let project = state
                .archive
                .get(&id)
                .await
                .ok_or_else(|| AppError::NotFound("Project not found".to_string()))?;
            (Some(id), ProjectDraft::from_project(&project))
        }
        None => (None, ProjectDraft::default()),
    };

    let template = editor(&state, editing_id, draft, notice, None).await;
    Ok(render(&template)?.into_response())
}

pub async fn unlock(
    State(state): State<SharedState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    Form(form): Form<UnlockForm>,
) -> Result<Response, AppError> {
    match attempt_unlock(&state, addr.ip(), &form.password) {
        Ok(_) => {
            let jar = session_cookie(&state)?;
            Ok((jar, Redirect::to("/admin")).into_response())
        }
        Err(e) => {
            let (status, message) = match e {
                AppError::RateLimited(msg) => (StatusCode::TOO_MANY_REQUESTS, msg),
                _ => (StatusCode::OK, "Incorrect Password".to_string()),
            };
            let page = render(&LoginTemplate {
                notice: None,
                error: Some(message),
            })?;
            Ok((status, page).into_response())
        }
    }
}

pub async fn lock(State(state): State<SharedState>, jar: CookieJar) -> Response {
    if session_from_jar(&jar, &state).is_some() {
        state.revoke_sessions();
    }
    (clear_session_cookie(), Redirect::to("/admin?notice=locked")).into_response()
}

pub async fn commit(
    admin: AdminUser,
    State(state): State<SharedState>,
    Form(form): Form<CommitForm>,
) -> Result<Response, AppError> {
    let editing = Some(form.editing_id.trim()).filter(|id| !id.is_empty());

    match state
        .archive
        .commit(&admin.session, form.draft.clone(), editing, Utc::now())
        .await
    {
        Ok((_, UpsertOutcome::Created)) => Ok(Redirect::to("/admin?notice=added").into_response()),
        Ok((_, UpsertOutcome::Updated)) => {
            Ok(Redirect::to("/admin?notice=updated").into_response())
        }
        Err(e) => {
            let status = match &e {
                ArchiveError::Validation(_) => StatusCode::BAD_REQUEST,
                ArchiveError::Store(StoreError::NotFound(_)) => StatusCode::NOT_FOUND,
                ArchiveError::Store(StoreError::DuplicateId(_)) => StatusCode::CONFLICT,
                ArchiveError::Source(_) => {
                    tracing::error!("Failed to save project: {e}");
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            };
            let template = editor(
                &state,
                editing.map(str::to_string),
                form.draft,
                None,
                Some(e.to_string()),
            )
            .await;
            Ok((status, render(&template)?).into_response())
        }
    }
}

pub async fn delete(
    admin: AdminUser,
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Response {
    match state.archive.delete(&admin.session, &id).await {
        Ok(_) => Redirect::to("/admin?notice=deleted").into_response(),
        Err(e) => {
            tracing::warn!(project_id = %id, "Delete failed: {e}");
            Redirect::to("/admin?notice=delete-failed").into_response()
        }
    }
}

pub async fn reload(_admin: AdminUser, State(state): State<SharedState>) -> Response {
    match state.archive.reload().await {
        Ok(_) => Redirect::to("/admin?notice=reloaded").into_response(),
        Err(_) => Redirect::to("/admin?notice=reload-failed").into_response(),
    }
}
