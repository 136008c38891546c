use std::net::IpAddr;
use std::time::{Duration, Instant};

use dashmap::DashMap;

const MAX_FAILURES: u32 = 5;
const WINDOW_SECS: u64 = 15 * 60;

/// Per-IP brute force limiter for the admin unlock.
pub struct UnlockRateLimiter {
    /// ip -> (failed_count, window_start)
    entries: DashMap<IpAddr, (u32, Instant)>,
}

impl Default for UnlockRateLimiter {
    fn default() -> Self {
        Self::new()
    }
}

impl UnlockRateLimiter {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    /// Check if an unlock attempt is allowed. 5 failures per 15 minutes.
    /// Does NOT increment the counter. Call `record_failure()` on a wrong password.
    pub fn check(&self, ip: IpAddr) -> Result<(), u64> {
        let window = Duration::from_secs(WINDOW_SECS);
        let now = Instant::now();

        let Some(entry) = self.entries.get(&ip) else {
            return Ok(());
        };

        let (count, start) = entry.value();

        if now.duration_since(*start) > window {
            return Ok(());
        }

        if *count >= MAX_FAILURES {
            let elapsed = now.duration_since(*start).as_secs();
            return Err(WINDOW_SECS.saturating_sub(elapsed));
        }

        Ok(())
    }

    pub fn record_failure(&self, ip: IpAddr) {
        let window = Duration::from_secs(WINDOW_SECS);
        let now = Instant::now();

        let mut entry = self.entries.entry(ip).or_insert((0, now));
        let (count, start) = entry.value_mut();

        if now.duration_since(*start) > window {
            *count = 1;
            *start = now;
        } else {
            *count += 1;
        }
    }

    /// Forget an IP after a successful unlock.
    pub fn reset(&self, ip: IpAddr) {
        self.entries.remove(&ip);
    }

    pub fn cleanup(&self, max_age: Duration) {
        let now = Instant::now();
        self.entries.retain(|_, (_, start)| now.duration_since(*start) < max_age);
    }
}
