pub mod admin;
pub mod archive;
pub mod projects;

use askama::Template;
use axum::response::Html;
use axum::routing::{get, post};
use axum::Router;

use crate::error::AppError;
use crate::middleware::auth_redirect::redirect_unauthorized;
use crate::state::SharedState;

pub fn view_routes() -> Router<SharedState> {
    // Admin form posts bounce back to the login page when locked
    let admin_posts = Router::new()
        .route("/admin/projects", post(admin::commit))
        .route("/admin/projects/{id}/delete", post(admin::delete))
        .route("/admin/reload", post(admin::reload))
        .layer(axum::middleware::from_fn(redirect_unauthorized));

    Router::new()
        // Archive
        .route("/", get(archive::index))
        .route("/projects/{id}", get(projects::show))
        // Admin
        .route("/admin", get(admin::page))
        .route("/admin/unlock", post(admin::unlock))
        .route("/admin/lock", post(admin::lock))
        .merge(admin_posts)
}

pub(crate) fn render(template: &impl Template) -> Result<Html<String>, AppError> {
    template
        .render()
        .map(Html)
        .map_err(|e| AppError::Internal(format!("Template render failed: {e}")))
}
