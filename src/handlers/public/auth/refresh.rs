// handlers/public/auth/refresh.rs - POST /token/refresh handler

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::app::AppState;
use crate::auth::{generate_jwt, validate_jwt, Claims, TokenType};
use crate::middleware::{ApiResponse, ApiResult, AuthUser};

#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh: String,
}

#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    pub access: String,
}

/// POST /token/refresh - Mint a new access token from a valid refresh token
pub async fn refresh_post(
    State(state): State<AppState>,
    payload: Result<Json<RefreshRequest>, JsonRejection>,
) -> ApiResult<RefreshResponse> {
    let Json(payload) = payload?;
    let security = &state.config.security;
    let claims = validate_jwt(&payload.refresh, TokenType::Refresh, security)?;

    // The account may have been deactivated since the refresh token was issued
    let user = state.accounts.current_user(&AuthUser::from(claims)).await?;

    let access = generate_jwt(&Claims::new(user.id, TokenType::Access, security), security)?;
    Ok(ApiResponse::success(RefreshResponse { access }))
}
