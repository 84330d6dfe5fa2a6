use crate::error::{ApiError, ApiResult};
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use shared_types::UserInfo;

/// JWT claims for authentication tokens
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // Subject (user uid)
    pub exp: i64,    // Expiration time (Unix timestamp)
    pub iat: i64,    // Issued at (Unix timestamp)
}

impl Claims {
    /// Create new claims with default expiration (24 hours)
    pub fn new(uid: impl Into<String>) -> Self {
        Self::new_with_duration(uid, 24 * 60 * 60)
    }

    /// Create claims with custom expiration duration (in seconds)
    pub fn new_with_duration(uid: impl Into<String>, duration_seconds: i64) -> Self {
        let now = Utc::now().timestamp();

        Self {
            sub: uid.into(),
            exp: now + duration_seconds,
            iat: now,
        }
    }

    pub fn user(&self) -> UserInfo {
        UserInfo::new(self.sub.clone())
    }
}

/// Generate a JWT token from claims
pub fn generate_token(claims: &Claims, secret: &str) -> ApiResult<String> {
    let token = encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| ApiError::Internal(format!("Failed to generate JWT token: {}", e)))?;

    Ok(token)
}

/// Validate and decode a JWT token
pub fn validate_token(token: &str, secret: &str) -> ApiResult<Claims> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|e| ApiError::Unauthorized(format!("Invalid token: {}", e)))?;

    Ok(token_data.claims)
}
