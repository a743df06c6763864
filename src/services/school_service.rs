use std::sync::Arc;
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::{NewReview, Review, School, MAX_RATING};
use crate::database::repository::Store;
use crate::filter::SchoolFilter;
use crate::middleware::AuthUser;

#[derive(Debug, thiserror::Error)]
pub enum SchoolError {
    #[error("School {0} not found")]
    SchoolNotFound(Uuid),

    #[error("{message}")]
    InvalidField { field: String, message: String },

    #[error(transparent)]
    Database(#[from] DatabaseError),
}

#[derive(Clone)]
pub struct SchoolService {
    store: Arc<dyn Store>,
}

impl SchoolService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    pub async fn filter_schools(&self, filter: &SchoolFilter) -> Result<Vec<School>, SchoolError> {
        let schools = self.store.filter_schools(filter).await?;
        tracing::debug!("filter-schools matched {} schools", schools.len());
        Ok(schools)
    }

    pub async fn reviews_for_school(&self, school_id: Uuid) -> Result<Vec<Review>, SchoolError> {
        self.store
            .find_school(school_id)
            .await?
            .ok_or(SchoolError::SchoolNotFound(school_id))?;
        Ok(self.store.reviews_for_school(school_id).await?)
    }

    /// Record a review authored by the authenticated user
    pub async fn create_review(&self, auth: &AuthUser, review: NewReview) -> Result<Review, SchoolError> {
        for (field, value) in [("sport", &review.sport), ("head_coach_name", &review.head_coach_name)] {
            if value.trim().is_empty() {
                return Err(SchoolError::InvalidField {
                    field: field.to_string(),
                    message: crate::validation::required_message(field),
                });
            }
        }
        if let Some(category) = review.ratings.out_of_range() {
            return Err(SchoolError::InvalidField {
                field: category.column().to_string(),
                message: format!("{} must be between 0 and {}.", category.column(), MAX_RATING),
            });
        }

        let school_id = review.school_id;
        self.store
            .find_school(school_id)
            .await?
            .ok_or(SchoolError::SchoolNotFound(school_id))?;

        let created = self
            .store
            .create_review(review.into_review(Uuid::new_v4(), auth.user_id))
            .await
            .map_err(|e| match e {
                DatabaseError::NotFound(_) => SchoolError::SchoolNotFound(school_id),
                other => SchoolError::Database(other),
            })?;
        tracing::info!("User {} reviewed school {}", auth.user_id, school_id);
        Ok(created)
    }
}
