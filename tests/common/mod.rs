#![allow(dead_code)]

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::StatusCode;
use serde_json::{json, Value};
use uuid::Uuid;

use transfer_portal_api::app::{app, AppState};
use transfer_portal_api::config::AppConfig;
use transfer_portal_api::database::models::{NewSchool, NewUser, Ratings, Review, School};
use transfer_portal_api::database::{MemoryStore, Store};

pub const PASSWORD: &str = "Secret123";

pub struct TestServer {
    pub base_url: String,
    pub client: reqwest::Client,
    pub store: Arc<dyn Store>,
    reviewer_id: Uuid,
}

impl TestServer {
    /// Serve the router over a fresh in-memory store on an unused port.
    ///
    /// Each `#[tokio::test]` owns its runtime, so every test gets its own server.
    pub async fn spawn() -> Result<Self> {
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        let store: Arc<dyn Store> = Arc::new(MemoryStore::new());
        let router = app(AppState::new(AppConfig::development(), store.clone()));

        let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
            .await
            .context("failed to bind test listener")?;
        tokio::spawn(async move {
            let _ = axum::serve(listener, router).await;
        });

        let reviewer = store
            .create_user(NewUser {
                email: format!("reviewer-{}@example.com", port),
                first_name: "Rev".to_string(),
                last_name: "Iewer".to_string(),
                password_hash: "unused".to_string(),
                transfer_type: None,
            })
            .await?;

        let server = Self {
            base_url,
            client: reqwest::Client::new(),
            store,
            reviewer_id: reviewer.id,
        };
        server.wait_ready(Duration::from_secs(5)).await?;
        Ok(server)
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let deadline = Instant::now() + timeout;
        while Instant::now() < deadline {
            if let Ok(resp) = self.client.get(self.url("/test")).send().await {
                if resp.status() == StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn seed_school(&self, name: &str) -> Result<School> {
        Ok(self
            .store
            .create_school(NewSchool {
                school_name: name.to_string(),
                conference: "Test Conference".to_string(),
                location: "Testville".to_string(),
                mbb: true,
                wbb: false,
                fb: true,
            })
            .await?)
    }

    pub async fn seed_review(&self, school: &School, coach: &str, ratings: Ratings) -> Result<Review> {
        Ok(self
            .store
            .create_review(Review {
                id: Uuid::new_v4(),
                school_id: school.id,
                user_id: self.reviewer_id,
                sport: "fb".to_string(),
                head_coach_name: coach.to_string(),
                review_message: String::new(),
                ratings,
                created_at: chrono::Utc::now(),
            })
            .await?)
    }

    pub async fn signup(&self, email: &str) -> Result<reqwest::Response> {
        Ok(self
            .client
            .post(self.url("/signup"))
            .json(&json!({
                "first_name": "Test",
                "last_name": "User",
                "email": email,
                "password": PASSWORD,
                "transfer_type": "graduate"
            }))
            .send()
            .await?)
    }

    /// Signup then login; returns the login body (`access`, `refresh`, names)
    pub async fn signup_and_login(&self, email: &str) -> Result<Value> {
        let res = self.signup(email).await?;
        anyhow::ensure!(res.status() == StatusCode::CREATED, "signup failed: {}", res.status());

        let res = self
            .client
            .post(self.url("/login"))
            .json(&json!({ "email": email, "password": PASSWORD }))
            .send()
            .await?;
        anyhow::ensure!(res.status() == StatusCode::OK, "login failed: {}", res.status());
        Ok(res.json().await?)
    }

    /// Names of schools returned by `/filter-schools` for a raw query string
    pub async fn filter_names(&self, query: &str) -> Result<Vec<String>> {
        let res = self
            .client
            .get(self.url(&format!("/filter-schools{}", query)))
            .send()
            .await?;
        anyhow::ensure!(res.status() == StatusCode::OK, "filter failed: {}", res.status());

        let body: Vec<Value> = res.json().await?;
        Ok(body
            .iter()
            .filter_map(|s| s["school_name"].as_str().map(str::to_string))
            .collect())
    }
}

pub fn rated(head_coach: i32) -> Ratings {
    Ratings {
        head_coach,
        ..Ratings::default()
    }
}
