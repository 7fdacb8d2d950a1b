//! Authentication module: password hashing, tokens, request authentication

pub mod crypto;
pub mod jwt;
pub mod middleware;
pub mod password;
pub mod random;

pub use crypto::SecretCipher;
pub use jwt::{Claims, JwtService, TokenKind, TokenPair};
pub use middleware::{extract_bearer_token, jwt_auth_middleware, AuthContext};
pub use password::PasswordHasher;
