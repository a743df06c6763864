use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub transfer_type: Option<String>,
    #[serde(skip_serializing)]
    pub is_active: bool,
    #[serde(skip_serializing)]
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing)]
    pub updated_at: DateTime<Utc>,
}

/// Values needed to insert a user; the password is already hashed
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password_hash: String,
    pub transfer_type: Option<String>,
}

/// Profile fields that overwrite the stored value only when present
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserPatch {
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub transfer_type: Option<String>,
}

impl User {
    pub fn apply_patch(&mut self, patch: UserPatch) {
        if let Some(email) = patch.email {
            self.email = email;
        }
        if let Some(first_name) = patch.first_name {
            self.first_name = first_name;
        }
        if let Some(last_name) = patch.last_name {
            self.last_name = last_name;
        }
        if let Some(transfer_type) = patch.transfer_type {
            self.transfer_type = Some(transfer_type);
        }
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        let now = Utc::now();
        User {
            id: Uuid::new_v4(),
            email: "old@example.com".to_string(),
            first_name: "Old".to_string(),
            last_name: "Name".to_string(),
            password_hash: "hash".to_string(),
            transfer_type: Some("grad".to_string()),
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn patch_keeps_absent_fields() {
        let mut u = user();
        u.apply_patch(UserPatch { first_name: Some("New".to_string()), ..Default::default() });
        assert_eq!(u.first_name, "New");
        assert_eq!(u.last_name, "Name");
        assert_eq!(u.email, "old@example.com");
        assert_eq!(u.transfer_type.as_deref(), Some("grad"));
    }

    #[test]
    fn serialized_user_hides_password_hash() {
        let value = serde_json::to_value(user()).unwrap();
        assert!(value.get("password_hash").is_none());
        assert_eq!(value["email"], "old@example.com");
        assert_eq!(value["transfer_type"], "grad");
    }
}
