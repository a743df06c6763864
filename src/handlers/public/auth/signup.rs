// handlers/public/auth/signup.rs - POST /signup handler

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};

use crate::app::AppState;
use crate::database::models::User;
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::SignupRequest;

/// POST /signup - Create an account
///
/// Expected Input:
/// ```json
/// {
///   "first_name": "string",
///   "last_name": "string",
///   "email": "string",
///   "password": "string",
///   "transfer_type": "string"   // optional
/// }
/// ```
///
/// 201 with the serialized user, or 400 `{"error": "..."}` naming the first
/// failed check (missing field, email format, password strength, duplicate).
pub async fn signup_post(
    State(state): State<AppState>,
    payload: Result<Json<SignupRequest>, JsonRejection>,
) -> ApiResult<User> {
    let Json(payload) = payload?;
    let user = state.accounts.signup(payload).await?;
    Ok(ApiResponse::created(user))
}
