use chrono::{DateTime, NaiveDate, NaiveTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ProjectStatus {
    #[default]
    Active,
    Rugged,
    Hacked,
    Scam,
    Inactive,
}

impl ProjectStatus {
    pub const ALL: [ProjectStatus; 5] = [
        ProjectStatus::Active,
        ProjectStatus::Rugged,
        ProjectStatus::Hacked,
        ProjectStatus::Scam,
        ProjectStatus::Inactive,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectStatus::Active => "Active",
            ProjectStatus::Rugged => "Rugged",
            ProjectStatus::Hacked => "Hacked",
            ProjectStatus::Scam => "Scam",
            ProjectStatus::Inactive => "Inactive",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LaunchType {
    Mainnet,
    Testnet,
    #[serde(rename = "App Launch")]
    AppLaunch,
}

impl LaunchType {
    pub fn as_str(&self) -> &'static str {
        match self {
            LaunchType::Mainnet => "Mainnet",
            LaunchType::Testnet => "Testnet",
            LaunchType::AppLaunch => "App Launch",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Mainnet" => Some(LaunchType::Mainnet),
            "Testnet" => Some(LaunchType::Testnet),
            "App Launch" => Some(LaunchType::AppLaunch),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VerificationStatus {
    Verified,
    Unverified,
}

impl VerificationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VerificationStatus::Verified => "Verified",
            VerificationStatus::Unverified => "Unverified",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Verified" => Some(VerificationStatus::Verified),
            "Unverified" => Some(VerificationStatus::Unverified),
            _ => None,
        }
    }
}

/// A tracked launch. `launch_date` is kept as its wire string so records with
/// an unparseable date can still be listed; see [`Project::launch_at`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// Display symbol, e.g. `NX`.
    #[serde(default)]
    pub logo: String,
    #[serde(default)]
    pub launch_date: String,
    #[serde(default)]
    pub network: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub launch_type: Option<LaunchType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verification_status: Option<VerificationStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ProjectStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub narrative_tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub medium_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub farcaster_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitter_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub telegram_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website_url: Option<String>,
}

impl Project {
    /// Minimal record with the required fields set and everything else empty.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        logo: impl Into<String>,
        launch_date: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            logo: logo.into(),
            launch_date: launch_date.into(),
            network: String::new(),
            token: None,
            category: String::new(),
            notes: String::new(),
            launch_type: None,
            verification_status: None,
            status: None,
            narrative_tags: None,
            github_url: None,
            medium_url: None,
            farcaster_url: None,
            base_url: None,
            twitter_url: None,
            telegram_url: None,
            website_url: None,
        }
    }

    pub fn launch_at(&self) -> Option<DateTime<Utc>> {
        parse_launch_date(&self.launch_date)
    }

    /// UTC calendar day of the launch.
    pub fn launch_day(&self) -> Option<NaiveDate> {
        self.launch_at().map(|at| at.date_naive())
    }

    pub fn status_or_default(&self) -> ProjectStatus {
        self.status.unwrap_or_default()
    }

    /// Social links that are set, as `(label, value)` pairs.
    pub fn socials(&self) -> Vec<(&'static str, &str)> {
        [
            ("GitHub", &self.github_url),
            ("Medium", &self.medium_url),
            ("Farcaster", &self.farcaster_url),
            ("Base", &self.base_url),
            ("Twitter", &self.twitter_url),
            ("Telegram", &self.telegram_url),
            ("Website", &self.website_url),
        ]
        .into_iter()
        .filter_map(|(label, link)| {
            link.as_deref()
                .filter(|l| !l.is_empty() && *l != "#")
                .map(|l| (label, l))
        })
        .collect()
    }
}

/// Parse a launch date. Accepts RFC 3339 timestamps (converted to UTC) and
/// bare `YYYY-MM-DD` dates, which mean midnight UTC.
pub fn parse_launch_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(at) = DateTime::parse_from_rfc3339(raw) {
        return Some(at.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .map(|day| day.and_time(NaiveTime::MIN).and_utc())
}

/// Canonical wire form of a launch timestamp, e.g. `2026-01-14T02:00:00Z`.
pub fn format_launch_date(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}
