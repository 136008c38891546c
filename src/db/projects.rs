use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::models::project::{format_launch_date, parse_launch_date};
use crate::models::{LaunchType, Project, ProjectStatus, VerificationStatus};

const COLUMNS: &str = "id, name, logo, launch_date, network, token, category, notes, \
     launch_type, verification_status, status, narrative_tags, github_url, medium_url, \
     farcaster_url, base_url, twitter_url, telegram_url, website_url";

#[derive(Debug, Clone, sqlx::FromRow)]
struct ProjectRow {
    id: String,
    name: String,
    logo: String,
    launch_date: Option<DateTime<Utc>>,
    network: String,
    token: Option<String>,
    category: String,
    notes: Option<String>,
    launch_type: Option<String>,
    verification_status: Option<String>,
    status: Option<String>,
    narrative_tags: Option<Vec<String>>,
    github_url: Option<String>,
    medium_url: Option<String>,
    farcaster_url: Option<String>,
    base_url: Option<String>,
    twitter_url: Option<String>,
    telegram_url: Option<String>,
    website_url: Option<String>,
}

impl From<ProjectRow> for Project {
    fn from(row: ProjectRow) -> Self {
        let status = row.status.as_deref().and_then(|raw| {
            let parsed = ProjectStatus::parse(raw);
            if parsed.is_none() {
                tracing::warn!(project_id = %row.id, status = raw, "Unknown project status");
            }
            parsed
        });
        Project {
            launch_date: row.launch_date.map(format_launch_date).unwrap_or_default(),
            launch_type: row.launch_type.as_deref().and_then(LaunchType::parse),
            verification_status: row
                .verification_status
                .as_deref()
                .and_then(VerificationStatus::parse),
            status,
            id: row.id,
            name: row.name,
            logo: row.logo,
            network: row.network,
            token: row.token,
            category: row.category,
            notes: row.notes.unwrap_or_default(),
            narrative_tags: row.narrative_tags,
            github_url: row.github_url,
            medium_url: row.medium_url,
            farcaster_url: row.farcaster_url,
            base_url: row.base_url,
            twitter_url: row.twitter_url,
            telegram_url: row.telegram_url,
            website_url: row.website_url,
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

pub async fn list(pool: &PgPool) -> Result<Vec<Project>, sqlx::Error> {
    let rows = sqlx::query_as::<_, ProjectRow>(&format!(
        "SELECT {COLUMNS} FROM projects ORDER BY launch_date ASC NULLS LAST, created_at ASC"
    ))
    .fetch_all(pool)
    .await?;
    Ok(rows.into_iter().map(Project::from).collect())
}

/// Insert, or overwrite every column but `id` when the id already exists.
pub async fn upsert(pool: &PgPool, project: &Project) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO projects (
            id, name, logo, launch_date, network, token, category, notes,
            launch_type, verification_status, status, narrative_tags,
            github_url, medium_url, farcaster_url, base_url,
            twitter_url, telegram_url, website_url
         ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18, $19)
         ON CONFLICT (id) DO UPDATE SET
            name = EXCLUDED.name,
            logo = EXCLUDED.logo,
            launch_date = EXCLUDED.launch_date,
            network = EXCLUDED.network,
            token = EXCLUDED.token,
            category = EXCLUDED.category,
            notes = EXCLUDED.notes,
            launch_type = EXCLUDED.launch_type,
            verification_status = EXCLUDED.verification_status,
            status = EXCLUDED.status,
            narrative_tags = EXCLUDED.narrative_tags,
            github_url = EXCLUDED.github_url,
            medium_url = EXCLUDED.medium_url,
            farcaster_url = EXCLUDED.farcaster_url,
            base_url = EXCLUDED.base_url,
            twitter_url = EXCLUDED.twitter_url,
            telegram_url = EXCLUDED.telegram_url,
            website_url = EXCLUDED.website_url,
            updated_at = now()",
    )
    .bind(&project.id)
    .bind(&project.name)
    .bind(&project.logo)
    .bind(parse_launch_date(&project.launch_date))
    .bind(&project.network)
    .bind(non_empty(&project.token))
    .bind(&project.category)
    .bind(Some(project.notes.as_str()).filter(|n| !n.is_empty()))
    .bind(project.launch_type.map(|t| t.as_str()))
    .bind(project.verification_status.map(|v| v.as_str()))
    .bind(project.status.map(|s| s.as_str()))
    .bind(project.narrative_tags.as_deref())
    .bind(non_empty(&project.github_url))
    .bind(non_empty(&project.medium_url))
    .bind(non_empty(&project.farcaster_url))
    .bind(non_empty(&project.base_url))
    .bind(non_empty(&project.twitter_url))
    .bind(non_empty(&project.telegram_url))
    .bind(non_empty(&project.website_url))
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn delete(pool: &PgPool, id: &str) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM projects WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
