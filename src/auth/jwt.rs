//! JWT token generation and validation
//! Implements access token + refresh token pattern, separated by audience

use crate::{config::AppConfig, error::AppError};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};

/// Fixed issuer for every token this service signs
pub const TOKEN_ISSUER: &str = "base-api";

/// Which kind of token; determines audience and lifetime
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Access,
    Refresh,
}

impl TokenKind {
    pub fn audience(self) -> &'static str {
        match self {
            TokenKind::Access => "access",
            TokenKind::Refresh => "refresh",
        }
    }
}

/// JWT claims
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (username)
    pub sub: String,

    /// Issuer
    pub iss: String,

    /// Audience ("access" or "refresh")
    pub aud: String,

    /// Issued at
    pub iat: i64,

    /// Expiration
    pub exp: i64,
}

/// Token pair response
#[derive(Debug, Clone, Serialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// JWT service
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    access_token_exp_secs: u64,
    refresh_token_exp_secs: u64,
}

impl JwtService {
    /// Create JWT service from config
    pub fn from_config(config: &AppConfig) -> Result<Self, AppError> {
        Self::new(
            config.security.jwt_secret.expose_secret(),
            config.security.access_token_exp_secs,
            config.security.refresh_token_exp_secs,
        )
    }

    pub fn new(
        secret: &str,
        access_token_exp_secs: u64,
        refresh_token_exp_secs: u64,
    ) -> Result<Self, AppError> {
        // Ensure secret is at least 32 bytes for HS256
        if secret.len() < 32 {
            return Err(AppError::Config("JWT secret too short (min 32 chars)".to_string()));
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            access_token_exp_secs,
            refresh_token_exp_secs,
        })
    }

    fn ttl(&self, kind: TokenKind) -> Duration {
        let secs = match kind {
            TokenKind::Access => self.access_token_exp_secs,
            TokenKind::Refresh => self.refresh_token_exp_secs,
        };
        Duration::seconds(secs as i64)
    }

    /// Issue a token of the given kind for `subject`
    pub fn issue(&self, subject: &str, kind: TokenKind) -> Result<String, AppError> {
        let now = Utc::now();
        self.sign(subject, kind, now, now + self.ttl(kind))
    }

    fn sign(
        &self,
        subject: &str,
        kind: TokenKind,
        issued_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> Result<String, AppError> {
        let claims = Claims {
            sub: subject.to_string(),
            iss: TOKEN_ISSUER.to_string(),
            aud: kind.audience().to_string(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key).map_err(|e| {
            tracing::error!(audience = kind.audience(), "Failed to encode token: {:?}", e);
            AppError::TokenIssuance(e.to_string())
        })
    }

    /// Issue an access token
    pub fn issue_access(&self, subject: &str) -> Result<String, AppError> {
        self.issue(subject, TokenKind::Access)
    }

    /// Issue a refresh token
    pub fn issue_refresh(&self, subject: &str) -> Result<String, AppError> {
        self.issue(subject, TokenKind::Refresh)
    }

    /// Issue access + refresh tokens for the same subject
    pub fn issue_pair(&self, subject: &str) -> Result<TokenPair, AppError> {
        Ok(TokenPair {
            access_token: self.issue_access(subject)?,
            refresh_token: self.issue_refresh(subject)?,
        })
    }

    /// Verify signature, issuer, audience and expiry
    pub fn verify(&self, token: &str, expected: TokenKind) -> Result<Claims, AppError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_issuer(&[TOKEN_ISSUER]);
        validation.set_audience(&[expected.audience()]);
        validation.set_required_spec_claims(&["exp", "iss", "aud", "sub"]);

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!(audience = expected.audience(), "Token validation failed: {:?}", e);
                match e.kind() {
                    ErrorKind::ExpiredSignature => AppError::TokenExpired,
                    _ => AppError::TokenInvalid,
                }
            })
    }
}
