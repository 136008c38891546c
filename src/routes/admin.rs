use std::net::{IpAddr, SocketAddr};

use axum::extract::{ConnectInfo, State};
use axum::Json;
use axum_extra::extract::CookieJar;
use serde::Deserialize;
use serde_json::json;

use crate::auth::extractor::{clear_session_cookie, session_cookie, session_from_jar, AdminUser};
use crate::auth::gate::{AdminGate, AdminSession};
use crate::error::AppError;
use crate::state::SharedState;

#[derive(Deserialize)]
pub struct UnlockRequest {
    pub password: String,
}

/// Run one unlock attempt from `ip`, applying the brute force limiter.
pub fn attempt_unlock(
    state: &SharedState,
    ip: IpAddr,
    password: &str,
) -> Result<AdminSession, AppError> {
    if let Err(retry_after) = state.unlock_limiter.check(ip) {
        return Err(AppError::RateLimited(format!(
            "Too many failed attempts. Try again in {retry_after} seconds."
        )));
    }

    let mut gate = AdminGate::new(state.config.admin_password.as_str());
    match gate.unlock(password) {
        Ok(session) => {
            state.unlock_limiter.reset(ip);
            tracing::debug!(%ip, "Admin gate unlocked");
            Ok(session)
        }
        Err(e) => {
            state.unlock_limiter.record_failure(ip);
            tracing::warn!(%ip, "Admin unlock rejected");
            Err(e.into())
        }
    }
}

pub async fn unlock(
    State(state): State<SharedState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    Json(req): Json<UnlockRequest>,
) -> Result<(CookieJar, Json<serde_json::Value>), AppError> {
    attempt_unlock(&state, addr.ip(), &req.password)?;
    let jar = session_cookie(&state)?;
    Ok((jar, Json(json!({ "status": "unlocked" }))))
}

/// Clear the caller's cookie. A caller holding a live session also revokes
/// every other cookie issued before now.
pub async fn lock(
    State(state): State<SharedState>,
    jar: CookieJar,
) -> (CookieJar, Json<serde_json::Value>) {
    if session_from_jar(&jar, &state).is_some() {
        state.revoke_sessions();
    }
    (clear_session_cookie(), Json(json!({ "status": "locked" })))
}

pub async fn reload(
    _admin: AdminUser,
    State(state): State<SharedState>,
) -> Result<Json<serde_json::Value>, AppError> {
    let count = state.archive.reload().await?;
    Ok(Json(json!({ "count": count })))
}
