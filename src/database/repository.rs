use async_trait::async_trait;
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::{NewSchool, NewUser, Review, School, User};
use crate::filter::SchoolFilter;

/// Persistence operations used by the services.
///
/// Emails are unique case-insensitively; a clash yields
/// [`DatabaseError::Conflict`]. Reviews must reference an existing school,
/// otherwise [`DatabaseError::NotFound`].
#[async_trait]
pub trait Store: Send + Sync {
    async fn create_user(&self, user: NewUser) -> Result<User, DatabaseError>;

    async fn find_user(&self, id: Uuid) -> Result<Option<User>, DatabaseError>;

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError>;

    /// Persist profile fields of an existing user
    async fn update_user(&self, user: &User) -> Result<User, DatabaseError>;

    async fn set_password(&self, id: Uuid, password_hash: &str) -> Result<(), DatabaseError>;

    async fn create_school(&self, school: NewSchool) -> Result<School, DatabaseError>;

    async fn find_school(&self, id: Uuid) -> Result<Option<School>, DatabaseError>;

    /// Schools matching `filter`, ordered by name (byte order) then id
    async fn filter_schools(&self, filter: &SchoolFilter) -> Result<Vec<School>, DatabaseError>;

    async fn create_review(&self, review: Review) -> Result<Review, DatabaseError>;

    /// Reviews of one school, newest first
    async fn reviews_for_school(&self, school_id: Uuid) -> Result<Vec<Review>, DatabaseError>;

    async fn health_check(&self) -> Result<(), DatabaseError>;
}
