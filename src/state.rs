use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use sqlx::PgPool;

use crate::archive::ArchiveService;
use crate::config::Config;
use crate::rate_limit::UnlockRateLimiter;

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub pool: PgPool,
    pub config: Config,
    pub archive: ArchiveService,
    pub unlock_limiter: UnlockRateLimiter,
    /// Generation stamped into admin session cookies. Seeded from the start
    /// time so cookies from an earlier process never match.
    pub session_epoch: AtomicU64,
}

impl AppState {
    pub fn session_epoch(&self) -> u64 {
        self.session_epoch.load(Ordering::SeqCst)
    }

    /// Invalidate every admin session cookie issued so far.
    pub fn revoke_sessions(&self) {
        self.session_epoch.fetch_add(1, Ordering::SeqCst);
        tracing::info!("Admin sessions revoked");
    }
}
