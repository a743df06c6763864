use axum::{
    extract::{rejection::JsonRejection, State},
    Extension, Json,
};

use crate::app::AppState;
use crate::database::models::{NewReview, Review};
use crate::middleware::{ApiResponse, ApiResult, AuthUser};

/// POST /reviews - review a school as the current user
pub async fn review_post(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    payload: Result<Json<NewReview>, JsonRejection>,
) -> ApiResult<Review> {
    let Json(payload) = payload?;
    let review = state.schools.create_review(&auth, payload).await?;
    Ok(ApiResponse::created(review))
}
