use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;

use crate::models::project::{format_launch_date, parse_launch_date};
use crate::models::{Project, ProjectStatus, VerificationStatus};

pub const DEFAULT_NETWORK: &str = "Ethereum";
pub const DEFAULT_CATEGORY: &str = "Infrastructure";
pub const DEFAULT_NOTES: &str = "Manual Entry";
/// Stored for social links left blank in the admin form.
pub const LINK_PLACEHOLDER: &str = "#";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    MissingFields(Vec<&'static str>),
    InvalidLaunchDate(String),
    InvalidStatus(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::MissingFields(fields) => {
                write!(f, "Missing required fields: {}", fields.join(", "))
            }
            ValidationError::InvalidLaunchDate(raw) => write!(f, "Invalid launch date: '{raw}'"),
            ValidationError::InvalidStatus(raw) => write!(f, "Invalid status: '{raw}'"),
        }
    }
}

/// Admin form contents. Every field is free text as typed.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ProjectDraft {
    pub name: String,
    pub symbol: String,
    pub token: String,
    pub network: String,
    pub category: String,
    pub status: String,
    /// `YYYY-MM-DD` or a full RFC 3339 timestamp; blank means now.
    pub date: String,
    pub notes: String,
    pub github: String,
    pub medium: String,
    pub farcaster: String,
    pub base: String,
    pub twitter: String,
    pub telegram: String,
    pub website: String,
}

impl ProjectDraft {
    /// Pre-fill the form from an existing record for editing.
    pub fn from_project(project: &Project) -> Self {
        let link = |value: &Option<String>| {
            value
                .as_deref()
                .filter(|v| *v != LINK_PLACEHOLDER)
                .unwrap_or_default()
                .to_string()
        };
        Self {
            name: project.name.clone(),
            symbol: project.logo.clone(),
            token: project.token.clone().unwrap_or_default(),
            network: project.network.clone(),
            category: project.category.clone(),
            status: project.status_or_default().as_str().to_string(),
            date: project
                .launch_day()
                .map(|day| day.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            notes: project.notes.clone(),
            github: link(&project.github_url),
            medium: link(&project.medium_url),
            farcaster: link(&project.farcaster_url),
            base: link(&project.base_url),
            twitter: link(&project.twitter_url),
            telegram: link(&project.telegram_url),
            website: link(&project.website_url),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut missing = Vec::new();
        if self.name.trim().is_empty() {
            missing.push("name");
        }
        if self.symbol.trim().is_empty() {
            missing.push("symbol");
        }
        if missing.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::MissingFields(missing))
        }
    }

    /// Build the record to store under `id`. Blank fields take their
    /// defaults. When editing, `previous` supplies the fields the form does
    /// not carry, and its exact launch time is kept if the day is unchanged.
    pub fn into_project(
        self,
        id: String,
        previous: Option<&Project>,
        now: DateTime<Utc>,
    ) -> Result<Project, ValidationError> {
        self.validate()?;

        let status = match self.status.trim() {
            "" => ProjectStatus::default(),
            raw => ProjectStatus::parse(raw)
                .ok_or_else(|| ValidationError::InvalidStatus(raw.to_string()))?,
        };

        let launch_date = match self.date.trim() {
            "" => format_launch_date(now),
            raw => {
                let at = parse_launch_date(raw)
                    .ok_or_else(|| ValidationError::InvalidLaunchDate(raw.to_string()))?;
                let date_only = NaiveDate::parse_from_str(raw, "%Y-%m-%d").is_ok();
                match previous {
                    Some(prev) if date_only && prev.launch_day() == Some(at.date_naive()) => {
                        prev.launch_date.clone()
                    }
                    _ => format_launch_date(at),
                }
            }
        };

        let or_default = |value: String, default: &str| {
            let value = value.trim();
            if value.is_empty() {
                default.to_string()
            } else {
                value.to_string()
            }
        };
        let link = |value: String| Some(or_default(value, LINK_PLACEHOLDER));
        let token = match self.token.trim() {
            "" => None,
            t => Some(t.to_string()),
        };

        Ok(Project {
            id,
            name: self.name.trim().to_string(),
            logo: self.symbol.trim().to_string(),
            launch_date,
            network: or_default(self.network, DEFAULT_NETWORK),
            token,
            category: or_default(self.category, DEFAULT_CATEGORY),
            notes: or_default(self.notes, DEFAULT_NOTES),
            launch_type: previous.and_then(|p| p.launch_type),
            verification_status: previous
                .and_then(|p| p.verification_status)
                .or(Some(VerificationStatus::Verified)),
            status: Some(status),
            narrative_tags: previous.and_then(|p| p.narrative_tags.clone()),
            github_url: link(self.github),
            medium_url: link(self.medium),
            farcaster_url: link(self.farcaster),
            base_url: link(self.base),
            twitter_url: link(self.twitter),
            telegram_url: link(self.telegram),
            website_url: link(self.website),
        })
    }
}

/// Identifier for a project added through the admin form.
pub fn new_project_id(now: DateTime<Utc>) -> String {
    format!("manual-{}", now.timestamp_millis())
}

/// Checks applied to a complete record before it is upserted.
pub fn validate_project(project: &Project) -> Result<(), ValidationError> {
    let mut missing = Vec::new();
    if project.id.trim().is_empty() {
        missing.push("id");
    }
    if project.name.trim().is_empty() {
        missing.push("name");
    }
    if project.logo.trim().is_empty() {
        missing.push("logo");
    }
    if !missing.is_empty() {
        return Err(ValidationError::MissingFields(missing));
    }
    if project.launch_at().is_none() {
        return Err(ValidationError::InvalidLaunchDate(project.launch_date.clone()));
    }
    Ok(())
}
