//! Password hashing and verification using Argon2id

use crate::error::AppError;
use argon2::{
    password_hash::{
        rand_core::OsRng, PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString,
    },
    Argon2,
};

/// Password hasher
///
/// Uses Argon2id v0x13 with the crate's default cost parameters
/// (m=19MiB, t=2, p=1). Every hash carries its own random salt, so hashing
/// the same password twice yields different PHC strings.
pub struct PasswordHasher {
    argon2: Argon2<'static>,
    /// Hash with the same parameters, verified against when there is no stored hash
    dummy_hash: Option<String>,
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl PasswordHasher {
    pub fn new() -> Self {
        let argon2 = Argon2::default();
        let salt = SaltString::generate(&mut OsRng);
        let dummy_hash = argon2
            .hash_password(b"dummy-password-never-matches", &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| tracing::warn!("Failed to prepare dummy password hash: {}", e))
            .ok();

        Self { argon2, dummy_hash }
    }

    /// Hash a password into a PHC string
    pub fn hash(&self, password: &str) -> Result<String, AppError> {
        let salt = SaltString::generate(&mut OsRng);

        let password_hash = self
            .argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| {
                tracing::error!("Failed to hash password: {:?}", e);
                AppError::Hashing(e.to_string())
            })?
            .to_string();

        Ok(password_hash)
    }

    /// Verify a password against a stored hash
    ///
    /// Returns false on mismatch and on malformed hashes; never errors.
    pub fn verify(&self, password: &str, hash: &str) -> bool {
        let parsed_hash = match PasswordHash::new(hash) {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!("Stored password hash is malformed: {}", e);
                return false;
            }
        };

        self.argon2
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok()
    }

    /// Spend the same work as `verify` when the account does not exist
    ///
    /// Always returns false.
    pub fn verify_dummy(&self, password: &str) -> bool {
        if let Some(hash) = &self.dummy_hash {
            let _ = self.verify(password, hash);
        }
        false
    }
}
