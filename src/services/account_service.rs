use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, warn};

use crate::auth::password::{hash_password, verify_password};
use crate::database::manager::DatabaseError;
use crate::database::models::{NewUser, User, UserPatch};
use crate::database::repository::Store;
use crate::middleware::AuthUser;
use crate::validation;

pub const DUPLICATE_EMAIL_MESSAGE: &str = "A user with this email already exists.";
pub const INVALID_CREDENTIALS_MESSAGE: &str = "No active account found with the given credentials";
pub const WRONG_CURRENT_PASSWORD_MESSAGE: &str = "Current password is incorrect.";

/// Account failures. Each request reports exactly one.
#[derive(Debug, thiserror::Error)]
pub enum AccountError {
    #[error("{}", DUPLICATE_EMAIL_MESSAGE)]
    DuplicateEmail,

    #[error("{message}")]
    InvalidField { field: &'static str, message: String },

    #[error("{}", INVALID_CREDENTIALS_MESSAGE)]
    InvalidCredentials,

    #[error("Storage failure: {0}")]
    StorageFailure(String),
}

impl AccountError {
    fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        AccountError::InvalidField { field, message: message.into() }
    }
}

impl From<DatabaseError> for AccountError {
    fn from(err: DatabaseError) -> Self {
        match err {
            DatabaseError::Conflict(_) => AccountError::DuplicateEmail,
            other => AccountError::StorageFailure(other.to_string()),
        }
    }
}

impl From<crate::auth::password::PasswordError> for AccountError {
    fn from(err: crate::auth::password::PasswordError) -> Self {
        AccountError::StorageFailure(err.to_string())
    }
}

/// Signup payload. Fields are optional so absence is reported by name.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SignupRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub transfer_type: Option<String>,
}

impl SignupRequest {
    fn field(&self, name: &str) -> Option<&str> {
        match name {
            "first_name" => self.first_name.as_deref(),
            "last_name" => self.last_name.as_deref(),
            "email" => self.email.as_deref(),
            "password" => self.password.as_deref(),
            "transfer_type" => self.transfer_type.as_deref(),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChangePasswordRequest {
    #[serde(default)]
    pub current_password: String,
    #[serde(default)]
    pub new_password: String,
}

#[derive(Clone)]
pub struct AccountService {
    store: Arc<dyn Store>,
}

impl AccountService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Checks run in a fixed order: required fields, email format,
    /// password strength, then creation (which catches duplicates).
    pub async fn signup(&self, request: SignupRequest) -> Result<User, AccountError> {
        if let Some(field) = validation::first_missing_field(|f| request.field(f)) {
            return Err(AccountError::invalid(field, validation::required_message(field)));
        }

        let SignupRequest { first_name, last_name, email, password, transfer_type } = request;
        // Presence was checked above
        let (first_name, last_name, email, password) = (
            first_name.unwrap_or_default(),
            last_name.unwrap_or_default(),
            email.unwrap_or_default().trim().to_string(),
            password.unwrap_or_default(),
        );

        if !validation::is_valid_email(&email) {
            return Err(AccountError::invalid("email", validation::INVALID_EMAIL_MESSAGE));
        }
        if !validation::is_strong_password(&password) {
            return Err(AccountError::invalid("password", validation::WEAK_PASSWORD_MESSAGE));
        }

        let password_hash = hash_password(&password)?;
        let user = self
            .store
            .create_user(NewUser {
                email,
                first_name,
                last_name,
                password_hash,
                transfer_type: transfer_type.filter(|t| !t.trim().is_empty()),
            })
            .await?;

        info!("Created user {} ({})", user.id, user.email);
        Ok(user)
    }

    /// Credential check used by login
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<User, AccountError> {
        let user = self
            .store
            .find_user_by_email(email.trim())
            .await?
            .filter(|u| u.is_active)
            .ok_or(AccountError::InvalidCredentials)?;

        if !verify_password(password, &user.password_hash)? {
            warn!("Rejected login for {}", user.email);
            return Err(AccountError::InvalidCredentials);
        }
        Ok(user)
    }

    /// The account behind an authenticated request
    pub async fn current_user(&self, auth: &AuthUser) -> Result<User, AccountError> {
        self.store
            .find_user(auth.user_id)
            .await?
            .filter(|u| u.is_active)
            .ok_or(AccountError::InvalidCredentials)
    }

    /// Only `email` is validated; other fields overwrite when supplied
    pub async fn update_profile(&self, auth: &AuthUser, mut patch: UserPatch) -> Result<User, AccountError> {
        if let Some(email) = patch.email.take() {
            let email = email.trim().to_string();
            if !validation::is_valid_email(&email) {
                return Err(AccountError::invalid("email", validation::INVALID_EMAIL_MESSAGE));
            }
            patch.email = Some(email);
        }

        let mut user = self.current_user(auth).await?;
        user.apply_patch(patch);
        let saved = self.store.update_user(&user).await?;
        info!("Updated profile for user {}", saved.id);
        Ok(saved)
    }

    /// Current password is verified before the new one is checked
    pub async fn change_password(&self, auth: &AuthUser, request: ChangePasswordRequest) -> Result<(), AccountError> {
        let user = self.current_user(auth).await?;

        if !verify_password(&request.current_password, &user.password_hash)? {
            warn!("Password change for user {} rejected: wrong current password", user.id);
            return Err(AccountError::invalid("current_password", WRONG_CURRENT_PASSWORD_MESSAGE));
        }
        if !validation::is_strong_password(&request.new_password) {
            return Err(AccountError::invalid("new_password", validation::WEAK_PASSWORD_MESSAGE));
        }

        let password_hash = hash_password(&request.new_password)?;
        self.store.set_password(user.id, &password_hash).await?;
        info!("Changed password for user {}", user.id);
        Ok(())
    }
}
