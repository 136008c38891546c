use std::net::IpAddr;

use chrono::NaiveDate;

use crate::archive::ledger::LEDGER_PAGE_SIZE;
use crate::archive::timeline::TIMELINE_PAGE_SIZE;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub admin_password: String,
    pub session_secret: String,
    pub host: IpAddr,
    pub port: u16,
    pub max_body_size: usize,
    pub log_level: String,
    /// Month the calendar opens on when no month is requested.
    pub start_date: NaiveDate,
    pub timeline_page_size: usize,
    pub ledger_page_size: usize,
    pub secure_cookies: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        let database_url = env_required("DATABASE_URL")?;
        let admin_password = env_required("ADMIN_PASSWORD")?;
        if admin_password.is_empty() {
            return Err("ADMIN_PASSWORD must not be empty".to_string());
        }
        let session_secret = env_required("SESSION_SECRET")?;

        let host: IpAddr = env_or("ARCHIVE_HOST", "0.0.0.0")
            .parse()
            .map_err(|e| format!("Invalid ARCHIVE_HOST: {e}"))?;

        let port: u16 = env_or("ARCHIVE_PORT", "3000")
            .parse()
            .map_err(|e| format!("Invalid ARCHIVE_PORT: {e}"))?;

        let max_body_size: usize = env_or("ARCHIVE_MAX_BODY_SIZE", "1048576")
            .parse()
            .map_err(|e| format!("Invalid ARCHIVE_MAX_BODY_SIZE: {e}"))?;

        let log_level = env_or("ARCHIVE_LOG_LEVEL", "info");

        let start_date = NaiveDate::parse_from_str(&env_or("ARCHIVE_START_DATE", "2026-01-01"), "%Y-%m-%d")
            .map_err(|e| format!("Invalid ARCHIVE_START_DATE: {e}"))?;

        let timeline_page_size = page_size("ARCHIVE_TIMELINE_PAGE_SIZE", TIMELINE_PAGE_SIZE)?;
        let ledger_page_size = page_size("ARCHIVE_LEDGER_PAGE_SIZE", LEDGER_PAGE_SIZE)?;

        let secure_cookies = match env_or("ARCHIVE_SECURE_COOKIES", "true").as_str() {
            "false" | "0" => false,
            _ => true,
        };

        Ok(Config {
            database_url,
            admin_password,
            session_secret,
            host,
            port,
            max_body_size,
            log_level,
            start_date,
            timeline_page_size,
            ledger_page_size,
            secure_cookies,
        })
    }
}

fn page_size(key: &str, default: usize) -> Result<usize, String> {
    let size: usize = env_or(key, &default.to_string())
        .parse()
        .map_err(|e| format!("Invalid {key}: {e}"))?;
    if size == 0 {
        return Err(format!("{key} must be at least 1"));
    }
    Ok(size)
}

fn env_required(key: &str) -> Result<String, String> {
    std::env::var(key).map_err(|_| format!("Missing required environment variable: {key}"))
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
