pub mod admin;
pub mod archive;
pub mod projects;

use axum::routing::{get, post};
use axum::Router;

use crate::state::SharedState;

pub fn api_routes() -> Router<SharedState> {
    Router::new()
        // Projects
        .route("/api/v1/projects", get(projects::list).post(projects::upsert))
        .route(
            "/api/v1/projects/{id}",
            get(projects::get).delete(projects::delete),
        )
        // Archive views
        .route("/api/v1/archive/calendar", get(archive::calendar))
        .route("/api/v1/archive/timeline", get(archive::timeline))
        .route("/api/v1/archive/list", get(archive::list))
        // Admin
        .route("/api/v1/admin/unlock", post(admin::unlock))
        .route("/api/v1/admin/lock", post(admin::lock))
        .route("/api/v1/admin/reload", post(admin::reload))
}
