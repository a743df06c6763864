// handlers/public/schools.rs - School browsing endpoints

use axum::extract::{Path, Query, State};
use uuid::Uuid;

use crate::app::AppState;
use crate::database::models::{Review, School};
use crate::filter::SchoolFilter;
use crate::middleware::{ApiResponse, ApiResult};

/// GET /filter-schools?coach=&school_name=&<rating>=<int>
///
/// Returns schools with at least one review matching every supplied
/// criterion. Non-integer rating values are dropped rather than rejected,
/// so this endpoint never answers 4xx for filter content.
pub async fn filter_schools(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> ApiResult<Vec<School>> {
    let filter = SchoolFilter::from_query(params);
    let schools = state.schools.filter_schools(&filter).await?;
    Ok(ApiResponse::success(schools))
}

/// GET /schools/:id/reviews - newest first
pub async fn school_reviews(
    State(state): State<AppState>,
    Path(school_id): Path<Uuid>,
) -> ApiResult<Vec<Review>> {
    let reviews = state.schools.reviews_for_school(school_id).await?;
    Ok(ApiResponse::success(reviews))
}
