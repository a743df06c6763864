pub mod password;

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::SecurityConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenType {
    Access,
    Refresh,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id
    pub sub: Uuid,
    pub token_type: TokenType,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    pub fn new(user_id: Uuid, token_type: TokenType, security: &SecurityConfig) -> Self {
        let now = Utc::now();
        let lifetime = match token_type {
            TokenType::Access => Duration::minutes(security.access_token_minutes),
            TokenType::Refresh => Duration::days(security.refresh_token_days),
        };

        Self {
            sub: user_id,
            token_type,
            exp: (now + lifetime).timestamp(),
            iat: now.timestamp(),
        }
    }
}

/// Access/refresh pair handed out on login
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

#[derive(Debug, thiserror::Error)]
pub enum JwtError {
    #[error("JWT generation error: {0}")]
    TokenGeneration(String),
    #[error("Invalid JWT secret")]
    InvalidSecret,
    #[error("Invalid token: {0}")]
    InvalidToken(String),
    #[error("Token has wrong type")]
    WrongTokenType,
}

pub fn generate_jwt(claims: &Claims, security: &SecurityConfig) -> Result<String, JwtError> {
    if security.jwt_secret.is_empty() {
        return Err(JwtError::InvalidSecret);
    }

    let encoding_key = EncodingKey::from_secret(security.jwt_secret.as_bytes());
    encode(&Header::default(), claims, &encoding_key).map_err(|e| JwtError::TokenGeneration(e.to_string()))
}

pub fn issue_token_pair(user_id: Uuid, security: &SecurityConfig) -> Result<TokenPair, JwtError> {
    Ok(TokenPair {
        access: generate_jwt(&Claims::new(user_id, TokenType::Access, security), security)?,
        refresh: generate_jwt(&Claims::new(user_id, TokenType::Refresh, security), security)?,
    })
}

/// Verify signature and expiry, and require the given token type
pub fn validate_jwt(token: &str, expected: TokenType, security: &SecurityConfig) -> Result<Claims, JwtError> {
    if security.jwt_secret.is_empty() {
        return Err(JwtError::InvalidSecret);
    }

    let decoding_key = DecodingKey::from_secret(security.jwt_secret.as_bytes());
    let token_data = decode::<Claims>(token, &decoding_key, &Validation::default())
        .map_err(|e| JwtError::InvalidToken(e.to_string()))?;

    if token_data.claims.token_type != expected {
        return Err(JwtError::WrongTokenType);
    }
    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;

    #[test]
    fn pair_round_trips_with_types() {
        let security = AppConfig::development().security;
        let user_id = Uuid::new_v4();
        let pair = issue_token_pair(user_id, &security).unwrap();

        let access = validate_jwt(&pair.access, TokenType::Access, &security).unwrap();
        assert_eq!(access.sub, user_id);

        let refresh = validate_jwt(&pair.refresh, TokenType::Refresh, &security).unwrap();
        assert!(refresh.exp > access.exp);
    }

    #[test]
    fn refresh_token_is_not_an_access_token() {
        let security = AppConfig::development().security;
        let pair = issue_token_pair(Uuid::new_v4(), &security).unwrap();
        assert!(matches!(
            validate_jwt(&pair.refresh, TokenType::Access, &security),
            Err(JwtError::WrongTokenType)
        ));
    }

    #[test]
    fn other_secret_is_rejected() {
        let security = AppConfig::development().security;
        let pair = issue_token_pair(Uuid::new_v4(), &security).unwrap();

        let mut other = security.clone();
        other.jwt_secret = "another-secret".to_string();
        assert!(matches!(
            validate_jwt(&pair.access, TokenType::Access, &other),
            Err(JwtError::InvalidToken(_))
        ));
    }

    #[test]
    fn empty_secret_refuses_to_sign() {
        let mut security = AppConfig::development().security;
        security.jwt_secret.clear();
        assert!(matches!(issue_token_pair(Uuid::new_v4(), &security), Err(JwtError::InvalidSecret)));
    }

    #[test]
    fn expired_token_is_rejected() {
        let security = AppConfig::development().security;
        let mut claims = Claims::new(Uuid::new_v4(), TokenType::Access, &security);
        claims.exp = Utc::now().timestamp() - 3600;
        let token = generate_jwt(&claims, &security).unwrap();
        assert!(validate_jwt(&token, TokenType::Access, &security).is_err());
    }
}
