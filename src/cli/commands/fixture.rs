use clap::Subcommand;
use serde::Deserialize;
use serde_json::json;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use uuid::Uuid;

use crate::auth::password::hash_password;
use crate::cli::utils::{connect_pool, output_success};
use crate::cli::OutputFormat;
use crate::database::models::{NewReview, NewSchool, NewUser, Ratings};
use crate::database::{PgStore, Store};
use crate::middleware::AuthUser;
use crate::services::SchoolService;

const DEFAULT_REVIEWER_EMAIL: &str = "fixtures@transfer-portal.local";

#[derive(Subcommand)]
pub enum FixtureCommands {
    #[command(about = "Insert schools and their reviews from a JSON file")]
    Load {
        #[arg(help = "Path to fixture JSON")]
        file: PathBuf,
        #[arg(long, help = "Database URL override")]
        database_url: Option<String>,
    },
}

/// Fixture file layout:
///
/// ```json
/// { "reviewer": { "email": "...", "first_name": "...", "last_name": "..." },
///   "schools": [ { "school_name": "...", "conference": "...", "location": "...",
///                  "fb": true, "reviews": [ { "sport": "fb", "head_coach_name": "...",
///                                              "head_coach": 8, ... } ] } ] }
/// ```
#[derive(Debug, Deserialize)]
pub struct Fixture {
    #[serde(default)]
    pub reviewer: Option<FixtureReviewer>,
    pub schools: Vec<FixtureSchool>,
}

#[derive(Debug, Deserialize)]
pub struct FixtureReviewer {
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

#[derive(Debug, Deserialize)]
pub struct FixtureSchool {
    #[serde(flatten)]
    pub school: NewSchool,
    #[serde(default)]
    pub reviews: Vec<FixtureReview>,
}

#[derive(Debug, Deserialize)]
pub struct FixtureReview {
    pub sport: String,
    pub head_coach_name: String,
    #[serde(default)]
    pub review_message: String,
    #[serde(flatten)]
    pub ratings: Ratings,
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct FixtureSummary {
    pub schools: usize,
    pub reviews: usize,
}

pub async fn handle(cmd: FixtureCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        FixtureCommands::Load { file, database_url } => {
            let fixture = read_fixture(&file)?;
            let pool = connect_pool(database_url).await?;
            let store: Arc<dyn Store> = Arc::new(PgStore::new(pool));

            let summary = load_fixture(store, fixture).await?;
            output_success(
                &output_format,
                &format!(
                    "Loaded {} schools and {} reviews from {}",
                    summary.schools,
                    summary.reviews,
                    file.display()
                ),
                Some(json!({ "schools": summary.schools, "reviews": summary.reviews })),
            )
        }
    }
}

pub fn read_fixture(path: &Path) -> anyhow::Result<Fixture> {
    let content = fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read fixture {}: {}", path.display(), e))?;
    let fixture = serde_json::from_str(&content)
        .map_err(|e| anyhow::anyhow!("Invalid fixture {}: {}", path.display(), e))?;
    Ok(fixture)
}

/// Insert every school, then its reviews through [`SchoolService`] so
/// rating bounds and required fields are enforced the same as over HTTP.
pub async fn load_fixture(store: Arc<dyn Store>, fixture: Fixture) -> anyhow::Result<FixtureSummary> {
    let has_reviews = fixture.schools.iter().any(|s| !s.reviews.is_empty());
    let reviewer = if has_reviews {
        Some(ensure_reviewer(store.as_ref(), fixture.reviewer).await?)
    } else {
        None
    };

    let schools = SchoolService::new(store.clone());
    let mut summary = FixtureSummary::default();

    for entry in fixture.schools {
        let school = store.create_school(entry.school).await?;
        summary.schools += 1;
        tracing::debug!("Fixture school {} ({})", school.school_name, school.id);

        for review in entry.reviews {
            let Some(author) = reviewer else { break };
            let review = NewReview {
                school_id: school.id,
                sport: review.sport,
                head_coach_name: review.head_coach_name,
                review_message: review.review_message,
                ratings: review.ratings,
            };
            schools
                .create_review(&author, review)
                .await
                .map_err(|e| anyhow::anyhow!("Review for {}: {}", school.school_name, e))?;
            summary.reviews += 1;
        }
    }

    tracing::info!("Fixture load complete: {:?}", summary);
    Ok(summary)
}

/// Reuse the reviewer account if present, otherwise create it with an
/// unguessable password.
async fn ensure_reviewer(
    store: &dyn Store,
    reviewer: Option<FixtureReviewer>,
) -> anyhow::Result<AuthUser> {
    let reviewer = reviewer.unwrap_or_else(|| FixtureReviewer {
        email: DEFAULT_REVIEWER_EMAIL.to_string(),
        first_name: "Fixture".to_string(),
        last_name: "Reviewer".to_string(),
    });

    if let Some(existing) = store.find_user_by_email(&reviewer.email).await? {
        return Ok(AuthUser { user_id: existing.id });
    }

    let password_hash = hash_password(&Uuid::new_v4().to_string())?;
    let user = store
        .create_user(NewUser {
            email: reviewer.email,
            first_name: reviewer.first_name,
            last_name: reviewer.last_name,
            password_hash,
            transfer_type: None,
        })
        .await?;

    Ok(AuthUser { user_id: user.id })
}
