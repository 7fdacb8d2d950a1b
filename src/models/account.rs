//! Account domain models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Login account
///
/// `password_hash` is an argon2 PHC string and is never serialized.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Account {
    pub id: i64,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Login request
#[derive(Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, max = 16, message = "must be between 1 and 16 characters"))]
    pub uname: String,
    #[validate(length(min = 8, max = 255, message = "must be between 8 and 255 characters"))]
    pub paswd: String,
}

// 手写 Debug，避免密码进入日志
impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("uname", &self.uname)
            .field("paswd", &"<redacted>")
            .finish()
    }
}

/// Change password request
#[derive(Deserialize, Validate)]
pub struct ChangePasswordRequest {
    #[validate(length(min = 8, max = 255, message = "must be between 8 and 255 characters"))]
    pub paswd: String,
}

impl std::fmt::Debug for ChangePasswordRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChangePasswordRequest")
            .field("paswd", &"<redacted>")
            .finish()
    }
}

/// Login / refresh response
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub refresh_token: String,
}

impl From<crate::auth::TokenPair> for LoginResponse {
    fn from(pair: crate::auth::TokenPair) -> Self {
        Self {
            access_token: pair.access_token,
            refresh_token: pair.refresh_token,
        }
    }
}
