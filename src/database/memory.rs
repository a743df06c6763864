use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::{NewSchool, NewUser, Review, School, User};
use crate::database::repository::Store;
use crate::filter::SchoolFilter;

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    schools: Vec<School>,
    reviews: Vec<Review>,
}

/// Process-local [`Store`] for tests and `--memory` development runs
#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Same folding as the `LOWER(email)` index
fn same_email(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

fn email_taken(users: &[User], email: &str, except: Option<Uuid>) -> bool {
    users
        .iter()
        .any(|u| Some(u.id) != except && same_email(&u.email, email))
}

#[async_trait]
impl Store for MemoryStore {
    async fn create_user(&self, user: NewUser) -> Result<User, DatabaseError> {
        let mut tables = self.tables.write().await;
        if email_taken(&tables.users, &user.email, None) {
            return Err(DatabaseError::Conflict("User with this email already exists".to_string()));
        }

        let now = Utc::now();
        let created = User {
            id: Uuid::new_v4(),
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            password_hash: user.password_hash,
            transfer_type: user.transfer_type,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        tables.users.push(created.clone());
        Ok(created)
    }

    async fn find_user(&self, id: Uuid) -> Result<Option<User>, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .iter()
            .find(|u| same_email(&u.email, email))
            .cloned())
    }

    async fn update_user(&self, user: &User) -> Result<User, DatabaseError> {
        let mut tables = self.tables.write().await;
        if email_taken(&tables.users, &user.email, Some(user.id)) {
            return Err(DatabaseError::Conflict("User with this email already exists".to_string()));
        }

        let stored = tables
            .users
            .iter_mut()
            .find(|u| u.id == user.id)
            .ok_or_else(|| DatabaseError::NotFound(format!("User {}", user.id)))?;
        stored.email = user.email.clone();
        stored.first_name = user.first_name.clone();
        stored.last_name = user.last_name.clone();
        stored.transfer_type = user.transfer_type.clone();
        stored.updated_at = Utc::now();
        Ok(stored.clone())
    }

    async fn set_password(&self, id: Uuid, password_hash: &str) -> Result<(), DatabaseError> {
        let mut tables = self.tables.write().await;
        let stored = tables
            .users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or_else(|| DatabaseError::NotFound(format!("User {}", id)))?;
        stored.password_hash = password_hash.to_string();
        stored.updated_at = Utc::now();
        Ok(())
    }

    async fn create_school(&self, school: NewSchool) -> Result<School, DatabaseError> {
        let mut tables = self.tables.write().await;
        let created = school.into_school(Uuid::new_v4());
        tables.schools.push(created.clone());
        Ok(created)
    }

    async fn find_school(&self, id: Uuid) -> Result<Option<School>, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(tables.schools.iter().find(|s| s.id == id).cloned())
    }

    async fn filter_schools(&self, filter: &SchoolFilter) -> Result<Vec<School>, DatabaseError> {
        let tables = self.tables.read().await;
        let mut selected: Vec<School> = filter
            .select(&tables.schools, &tables.reviews)
            .into_iter()
            .cloned()
            .collect();
        // Byte order, matching COLLATE "C" in the SQL rendering
        selected.sort_by(|a, b| a.school_name.cmp(&b.school_name).then(a.id.cmp(&b.id)));
        Ok(selected)
    }

    async fn create_review(&self, review: Review) -> Result<Review, DatabaseError> {
        let mut tables = self.tables.write().await;
        if !tables.schools.iter().any(|s| s.id == review.school_id) {
            return Err(DatabaseError::NotFound(format!("School {}", review.school_id)));
        }
        if !tables.users.iter().any(|u| u.id == review.user_id) {
            return Err(DatabaseError::NotFound(format!("User {}", review.user_id)));
        }
        tables.reviews.push(review.clone());
        Ok(review)
    }

    async fn reviews_for_school(&self, school_id: Uuid) -> Result<Vec<Review>, DatabaseError> {
        let tables = self.tables.read().await;
        let mut reviews: Vec<Review> = tables
            .reviews
            .iter()
            .filter(|r| r.school_id == school_id)
            .cloned()
            .collect();
        reviews.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(reviews)
    }

    async fn health_check(&self) -> Result<(), DatabaseError> {
        Ok(())
    }
}
