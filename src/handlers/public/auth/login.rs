// handlers/public/auth/login.rs - POST /login handler

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::app::AppState;
use crate::auth::issue_token_pair;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Token pair plus the names the client shows after login
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub refresh: String,
    pub access: String,
    pub first_name: String,
    pub last_name: String,
}

/// POST /login - Exchange email and password for an access/refresh pair
///
/// Expected Output (Success):
/// ```json
/// {
///   "refresh": "eyJhbGciOiJIUzI1NiI...",
///   "access": "eyJhbGciOiJIUzI1NiI...",
///   "first_name": "Ada",
///   "last_name": "Lovelace"
/// }
/// ```
pub async fn login_post(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<LoginResponse> {
    let Json(payload) = payload?;
    for (field, value) in [("email", &payload.email), ("password", &payload.password)] {
        if value.is_empty() {
            return Err(ApiError::validation_error(
                crate::validation::required_message(field),
                Some(field.to_string()),
            ));
        }
    }

    let user = state.accounts.authenticate(&payload.email, &payload.password).await?;
    let tokens = issue_token_pair(user.id, &state.config.security)?;

    tracing::info!("User {} logged in", user.id);

    Ok(ApiResponse::success(LoginResponse {
        refresh: tokens.refresh,
        access: tokens.access,
        first_name: user.first_name,
        last_name: user.last_name,
    }))
}
