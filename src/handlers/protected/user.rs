// handlers/protected/user.rs - Current-user profile and password endpoints

use axum::{
    extract::{rejection::JsonRejection, State},
    Extension, Json,
};
use serde::Serialize;

use crate::app::AppState;
use crate::database::models::{User, UserPatch};
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::services::ChangePasswordRequest;

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

/// GET /user - serialized current user
pub async fn user_get(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> ApiResult<User> {
    let user = state.accounts.current_user(&auth).await?;
    Ok(ApiResponse::success(user))
}

/// PATCH /user - partial profile update
///
/// Absent fields keep their stored value. Only `email` is validated.
pub async fn user_patch(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    patch: Result<Json<UserPatch>, JsonRejection>,
) -> ApiResult<User> {
    let Json(patch) = patch?;
    let user = state.accounts.update_profile(&auth, patch).await?;
    Ok(ApiResponse::success(user))
}

/// POST /change-password - `{current_password, new_password}`
pub async fn change_password_post(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    payload: Result<Json<ChangePasswordRequest>, JsonRejection>,
) -> ApiResult<MessageResponse> {
    let Json(payload) = payload?;
    state.accounts.change_password(&auth, payload).await?;
    Ok(ApiResponse::success(MessageResponse {
        message: "Password updated successfully.",
    }))
}
