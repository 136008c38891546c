use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use axum::extract::{ConnectInfo, FromRequestParts};
use axum::http::request::Parts;
use axum_extra::extract::CookieJar;
use axum_extra::extract::cookie::{Cookie, SameSite};

use crate::auth::gate::AdminSession;
use crate::auth::jwt::{self, Claims, SESSION_COOKIE, SESSION_HOURS};
use crate::error::AppError;
use crate::routes::admin::attempt_unlock;
use crate::state::SharedState;

pub const PASSWORD_HEADER: &str = "x-admin-password";

/// An unlocked admin, via the `x-admin-password` header or a session cookie.
#[derive(Debug, Clone, Copy)]
pub struct AdminUser {
    pub session: AdminSession,
}

impl FromRequestParts<SharedState> for AdminUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &SharedState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(header) = parts.headers.get(PASSWORD_HEADER) {
            let attempt = header
                .to_str()
                .map_err(|_| AppError::Unauthorized("Invalid admin password header".to_string()))?;
            let session = attempt_unlock(state, client_ip(parts), attempt)?;
            return Ok(AdminUser { session });
        }

        let jar = CookieJar::from_headers(&parts.headers);
        if let Some(session) = session_from_jar(&jar, state) {
            return Ok(AdminUser { session });
        }

        Err(AppError::Unauthorized(
            "Invalid or missing admin password".to_string(),
        ))
    }
}

/// Peer address of the connection. Without connect info every caller shares
/// one limiter bucket.
fn client_ip(parts: &Parts) -> IpAddr {
    parts
        .extensions
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip())
        .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED))
}

/// The admin session carried by `jar`, if its cookie is valid and was issued
/// since the last lock.
pub fn session_from_jar(jar: &CookieJar, state: &SharedState) -> Option<AdminSession> {
    let cookie = jar.get(SESSION_COOKIE)?;
    let claims = jwt::decode_token(cookie.value(), &state.config.session_secret).ok()?;
    (claims.epoch == state.session_epoch()).then(AdminSession::verified)
}

pub fn session_cookie(state: &SharedState) -> Result<CookieJar, AppError> {
    let claims = Claims::admin(state.session_epoch());
    let token =
        jwt::encode_token(&claims, &state.config.session_secret).map_err(AppError::Internal)?;
    let cookie = Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .secure(state.config.secure_cookies)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::hours(SESSION_HOURS))
        .build();
    Ok(CookieJar::new().add(cookie))
}

pub fn clear_session_cookie() -> CookieJar {
    let cookie = Cookie::build((SESSION_COOKIE, ""))
        .path("/")
        .max_age(time::Duration::ZERO)
        .build();
    CookieJar::new().add(cookie)
}
