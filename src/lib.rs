pub mod archive;
pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod rate_limit;
pub mod routes;
pub mod state;
pub mod views;

use std::sync::atomic::AtomicU64;
use std::sync::Arc;

use axum::http::{HeaderName, HeaderValue};
use axum::Router;
use chrono::Utc;
use sqlx::PgPool;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::archive::{ArchiveService, PgProjectSource};
use crate::config::Config;
use crate::rate_limit::UnlockRateLimiter;
use crate::state::{AppState, SharedState};

/// Load the archive from `pool` and assemble the router.
pub async fn build_app(pool: PgPool, config: Config) -> (Router, SharedState) {
    let source = Arc::new(PgProjectSource::new(pool.clone()));
    let archive = ArchiveService::load(source).await;

    let state: SharedState = Arc::new(AppState {
        pool,
        config,
        archive,
        unlock_limiter: UnlockRateLimiter::new(),
        session_epoch: AtomicU64::new(Utc::now().timestamp_millis().unsigned_abs()),
    });

    let app = Router::new()
        .merge(routes::api_routes())
        .merge(views::view_routes())
        .nest_service("/static", ServeDir::new("static"))
        .route("/health", axum::routing::get(health))
        .layer(RequestBodyLimitLayer::new(state.config.max_body_size))
        .layer(TraceLayer::new_for_http())
        // Security headers
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("x-content-type-options"),
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("x-frame-options"),
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("referrer-policy"),
            HeaderValue::from_static("strict-origin-when-cross-origin"),
        ))
        .with_state(state.clone());

    (app, state)
}

async fn health() -> &'static str {
    "ok"
}
