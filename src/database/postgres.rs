use async_trait::async_trait;
use serde_json::Value;
use sqlx::{postgres::PgArguments, FromRow, PgPool};
use uuid::Uuid;

use crate::database::manager::{DatabaseError, DatabaseManager};
use crate::database::models::{NewSchool, NewUser, Review, School, User};
use crate::database::repository::Store;
use crate::filter::SchoolFilter;

const USER_COLUMNS: &str =
    "id, email, first_name, last_name, password_hash, transfer_type, is_active, created_at, updated_at";

const REVIEW_COLUMNS: &str = "id, school_id, user_id, sport, head_coach_name, review_message, \
     head_coach, assistant_coaches, team_culture, campus_life, athletic_facilities, \
     athletic_department, player_development, nil_opportunity, created_at";

/// [`Store`] backed by Postgres through sqlx
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Map constraint violations onto the store's error kinds
fn classify(err: sqlx::Error, what: &str) -> DatabaseError {
    if let sqlx::Error::Database(db) = &err {
        if db.is_unique_violation() {
            return DatabaseError::Conflict(format!("{} already exists", what));
        }
        if db.is_foreign_key_violation() {
            return DatabaseError::NotFound(format!("{} references a missing record", what));
        }
    }
    DatabaseError::Sqlx(err)
}

#[async_trait]
impl Store for PgStore {
    async fn create_user(&self, user: NewUser) -> Result<User, DatabaseError> {
        let query = format!(
            "INSERT INTO users (id, email, first_name, last_name, password_hash, transfer_type) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING {}",
            USER_COLUMNS
        );
        sqlx::query_as::<_, User>(&query)
            .bind(Uuid::new_v4())
            .bind(&user.email)
            .bind(&user.first_name)
            .bind(&user.last_name)
            .bind(&user.password_hash)
            .bind(&user.transfer_type)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| classify(e, "User with this email"))
    }

    async fn find_user(&self, id: Uuid) -> Result<Option<User>, DatabaseError> {
        let query = format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS);
        let user = sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError> {
        let query = format!("SELECT {} FROM users WHERE LOWER(email) = LOWER($1)", USER_COLUMNS);
        let user = sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn update_user(&self, user: &User) -> Result<User, DatabaseError> {
        let query = format!(
            "UPDATE users SET email = $2, first_name = $3, last_name = $4, transfer_type = $5, updated_at = NOW() \
             WHERE id = $1 RETURNING {}",
            USER_COLUMNS
        );
        sqlx::query_as::<_, User>(&query)
            .bind(user.id)
            .bind(&user.email)
            .bind(&user.first_name)
            .bind(&user.last_name)
            .bind(&user.transfer_type)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| classify(e, "User with this email"))?
            .ok_or_else(|| DatabaseError::NotFound(format!("User {}", user.id)))
    }

    async fn set_password(&self, id: Uuid, password_hash: &str) -> Result<(), DatabaseError> {
        let result = sqlx::query("UPDATE users SET password_hash = $2, updated_at = NOW() WHERE id = $1")
            .bind(id)
            .bind(password_hash)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(DatabaseError::NotFound(format!("User {}", id)));
        }
        Ok(())
    }

    async fn create_school(&self, school: NewSchool) -> Result<School, DatabaseError> {
        let school = sqlx::query_as::<_, School>(
            "INSERT INTO schools (id, school_name, conference, location, mbb, wbb, fb) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING id, school_name, conference, location, mbb, wbb, fb",
        )
        .bind(Uuid::new_v4())
        .bind(&school.school_name)
        .bind(&school.conference)
        .bind(&school.location)
        .bind(school.mbb)
        .bind(school.wbb)
        .bind(school.fb)
        .fetch_one(&self.pool)
        .await?;
        Ok(school)
    }

    async fn find_school(&self, id: Uuid) -> Result<Option<School>, DatabaseError> {
        let school = sqlx::query_as::<_, School>(
            "SELECT id, school_name, conference, location, mbb, wbb, fb FROM schools WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(school)
    }

    async fn filter_schools(&self, filter: &SchoolFilter) -> Result<Vec<School>, DatabaseError> {
        let sql_result = filter.to_sql();
        tracing::debug!("filter-schools query: {}", sql_result.query);

        let mut q = sqlx::query_as::<_, School>(&sql_result.query);
        for p in sql_result.params.iter() {
            q = bind_param_query_as(q, p);
        }
        let rows = q.fetch_all(&self.pool).await?;
        Ok(rows)
    }

    async fn create_review(&self, review: Review) -> Result<Review, DatabaseError> {
        let query = format!(
            "INSERT INTO reviews ({}) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15) \
             RETURNING {}",
            REVIEW_COLUMNS, REVIEW_COLUMNS
        );
        let r = &review.ratings;
        sqlx::query_as::<_, Review>(&query)
            .bind(review.id)
            .bind(review.school_id)
            .bind(review.user_id)
            .bind(&review.sport)
            .bind(&review.head_coach_name)
            .bind(&review.review_message)
            .bind(r.head_coach)
            .bind(r.assistant_coaches)
            .bind(r.team_culture)
            .bind(r.campus_life)
            .bind(r.athletic_facilities)
            .bind(r.athletic_department)
            .bind(r.player_development)
            .bind(r.nil_opportunity)
            .bind(review.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| classify(e, "Review"))
    }

    async fn reviews_for_school(&self, school_id: Uuid) -> Result<Vec<Review>, DatabaseError> {
        let query = format!(
            "SELECT {} FROM reviews WHERE school_id = $1 ORDER BY created_at DESC",
            REVIEW_COLUMNS
        );
        let reviews = sqlx::query_as::<_, Review>(&query)
            .bind(school_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(reviews)
    }

    async fn health_check(&self) -> Result<(), DatabaseError> {
        DatabaseManager::health_check(&self.pool).await
    }
}

fn bind_param_query_as<'q, O>(
    q: sqlx::query::QueryAs<'q, sqlx::Postgres, O, PgArguments>,
    v: &'q Value,
) -> sqlx::query::QueryAs<'q, sqlx::Postgres, O, PgArguments>
where
    O: for<'r> FromRow<'r, sqlx::postgres::PgRow>,
{
    match v {
        Value::Null => {
            let none: Option<String> = None;
            q.bind(none)
        }
        Value::Bool(b) => q.bind(*b),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                q.bind(i)
            } else if let Some(f) = n.as_f64() {
                q.bind(f)
            } else {
                q.bind(n.to_string())
            }
        }
        Value::String(s) => q.bind(s),
        Value::Array(_) | Value::Object(_) => q.bind(v.clone()),
    }
}
