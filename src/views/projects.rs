use askama::Template;
use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};

use crate::error::AppError;
use crate::state::SharedState;
use crate::views::archive::date_label;
use crate::views::render;

struct SocialLink {
    label: &'static str,
    url: String,
}

#[derive(Template)]
#[template(path = "archive/project.html")]
struct ProjectTemplate {
    id: String,
    name: String,
    logo: String,
    network: String,
    category: String,
    status: &'static str,
    notes: String,
    token: Option<String>,
    launch_type: Option<&'static str>,
    verification: Option<&'static str>,
    date_label: String,
    time_label: Option<String>,
    tags: Vec<String>,
    socials: Vec<SocialLink>,
}

pub async fn show(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let project = state
        .archive
        .get(&id)
        .await
        .ok_or_else(|| AppError::NotFound("Project not found".to_string()))?;

    let template = ProjectTemplate {
        date_label: date_label(&project),
        time_label: project
            .launch_at()
            .map(|at| format!("{} UTC", at.format("%H:%M"))),
        status: project.status_or_default().as_str(),
        launch_type: project.launch_type.map(|t| t.as_str()),
        verification: project.verification_status.map(|v| v.as_str()),
        socials: project
            .socials()
            .into_iter()
            .map(|(label, url)| SocialLink {
                label,
                url: url.to_string(),
            })
            .collect(),
        tags: project.narrative_tags.clone().unwrap_or_default(),
        id: project.id,
        name: project.name,
        logo: project.logo,
        network: project.network,
        category: project.category,
        notes: project.notes,
        token: project.token,
    };
    Ok(render(&template)?.into_response())
}
