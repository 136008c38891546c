use std::net::SocketAddr;

use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use uuid::Uuid;

use launch_archive::config::Config;

pub const ADMIN_PASSWORD: &str = "test-admin-password";

/// A running test server instance with a dedicated test database.
pub struct TestApp {
    pub addr: SocketAddr,
    pub pool: PgPool,
    pub client: Client,
    pub db_name: String,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Create or replace a project through the API with the admin header.
    pub async fn upsert_project(&self, project: &Value) -> (Value, StatusCode) {
        let resp = self
            .client
            .post(self.url("/api/v1/projects"))
            .header("x-admin-password", ADMIN_PASSWORD)
            .json(project)
            .send()
            .await
            .expect("upsert request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    /// Seed a project and assert it was accepted.
    pub async fn seed(&self, id: &str, name: &str, launch_date: &str) {
        let (body, status) = self
            .upsert_project(&json!({
                "id": id,
                "name": name,
                "logo": name.chars().take(2).collect::<String>().to_uppercase(),
                "launchDate": launch_date,
                "network": "Base",
                "category": "DeFi",
                "notes": format!("{name} launch"),
            }))
            .await;
        assert_eq!(status, StatusCode::OK, "seed failed: {body}");
    }

    /// Unlock through the JSON API, return the session cookie value.
    pub async fn unlock(&self, password: &str) -> (Option<String>, StatusCode) {
        let resp = self
            .client
            .post(self.url("/api/v1/admin/unlock"))
            .json(&json!({ "password": password }))
            .send()
            .await
            .expect("unlock request failed");
        let status = resp.status();
        let cookie = resp
            .headers()
            .get_all("set-cookie")
            .iter()
            .filter_map(|v| v.to_str().ok())
            .find(|v| v.starts_with("admin_session="))
            .and_then(|v| v.split(';').next())
            .map(str::to_string);
        (cookie, status)
    }

    pub async fn get(&self, path: &str) -> (Value, StatusCode) {
        let resp = self
            .client
            .get(self.url(path))
            .send()
            .await
            .expect("get request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    /// GET an HTML page, return its text.
    pub async fn page(&self, path: &str, cookie: Option<&str>) -> (String, StatusCode) {
        let mut req = self.client.get(self.url(path));
        if let Some(cookie) = cookie {
            req = req.header("cookie", cookie);
        }
        let resp = req.send().await.expect("page request failed");
        let status = resp.status();
        (resp.text().await.unwrap_or_default(), status)
    }

    pub async fn delete_admin(&self, path: &str) -> (Value, StatusCode) {
        let resp = self
            .client
            .delete(self.url(path))
            .header("x-admin-password", ADMIN_PASSWORD)
            .send()
            .await
            .expect("delete request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }
}

/// Spawn a test app with a fresh temporary database.
pub async fn spawn_app() -> TestApp {
    let _ = dotenvy::dotenv();

    let base_url = std::env::var("DATABASE_URL")
        .expect("DATABASE_URL must be set for tests");

    // Create a unique test database
    let db_name = format!("archive_test_{}", Uuid::now_v7().to_string().replace('-', ""));

    let admin_url = base_url
        .rsplit_once('/')
        .map(|(base, _)| format!("{base}/postgres"))
        .unwrap_or_else(|| base_url.clone());

    let admin_pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&admin_url)
        .await
        .expect("Failed to connect to postgres for test DB creation");

    sqlx::query(&format!("CREATE DATABASE \"{db_name}\""))
        .execute(&admin_pool)
        .await
        .expect("Failed to create test database");

    admin_pool.close().await;

    let test_url = base_url
        .rsplit_once('/')
        .map(|(base, _)| format!("{base}/{db_name}"))
        .unwrap_or_else(|| base_url.clone());

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&test_url)
        .await
        .expect("Failed to connect to test database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations on test database");

    let config = Config {
        database_url: test_url,
        admin_password: ADMIN_PASSWORD.to_string(),
        session_secret: "test-session-secret-that-is-long-enough".to_string(),
        host: "127.0.0.1".parse().unwrap(),
        port: 0, // unused, we bind to random port
        max_body_size: 1_048_576,
        log_level: "warn".to_string(),
        start_date: chrono::NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
        timeline_page_size: 4,
        ledger_page_size: 8,
        secure_cookies: false,
    };

    let (app, _state) = launch_archive::build_app(pool.clone(), config).await;

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind to random port");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .await
        .expect("Server failed");
    });

    let client = Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap();

    TestApp {
        addr,
        pool,
        client,
        db_name,
    }
}

/// Drop the test database after tests complete.
pub async fn cleanup(app: TestApp) {
    let db_name = app.db_name.clone();
    app.pool.close().await;

    let base_url = std::env::var("DATABASE_URL")
        .expect("DATABASE_URL must be set for tests");
    let admin_url = base_url
        .rsplit_once('/')
        .map(|(base, _)| format!("{base}/postgres"))
        .unwrap_or_else(|| base_url.clone());

    let admin_pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&admin_url)
        .await
        .expect("Failed to connect for cleanup");

    let _ = sqlx::query(&format!("DROP DATABASE IF EXISTS \"{db_name}\" WITH (FORCE)"))
        .execute(&admin_pool)
        .await;

    admin_pool.close().await;
}
