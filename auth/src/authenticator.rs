use std::collections::HashMap;

use crate::jwt::Claims;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::password::Argon2PasswordEncoder;
use crate::password::PasswordEncoder;
use crate::password::PasswordError;

/// Authentication coordinator combining password checks and token issuance.
///
/// Owns the configured token lifetime so callers never pick their own.
pub struct Authenticator {
    password_encoder: Box<dyn PasswordEncoder>,
    jwt_handler: JwtHandler,
    token_ttl_ms: i64,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),
}

impl Authenticator {
    /// Create an authenticator from explicit parts.
    ///
    /// # Arguments
    /// * `password_encoder` - Password hashing implementation
    /// * `jwt_handler` - Token signer/verifier
    /// * `token_ttl_ms` - Lifetime of issued tokens in milliseconds
    pub fn new(
        password_encoder: Box<dyn PasswordEncoder>,
        jwt_handler: JwtHandler,
        token_ttl_ms: i64,
    ) -> Self {
        Self {
            password_encoder,
            jwt_handler,
            token_ttl_ms,
        }
    }

    /// Argon2id-backed authenticator signing with a base64-encoded secret.
    ///
    /// # Errors
    /// * `InvalidKey` - The secret is not valid base64
    pub fn with_base64_secret(secret: &str, token_ttl_ms: i64) -> Result<Self, JwtError> {
        Ok(Self::new(
            Box::new(Argon2PasswordEncoder::new()),
            JwtHandler::from_base64_secret(secret)?,
            token_ttl_ms,
        ))
    }

    pub fn token_ttl_ms(&self) -> i64 {
        self.token_ttl_ms
    }

    /// Hash a password for storage.
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_encoder.encode(password)
    }

    /// Compare a plaintext password against a stored hash.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `PasswordError` - Stored hash is unusable
    pub fn check_password(
        &self,
        password: &str,
        stored_hash: &str,
    ) -> Result<(), AuthenticationError> {
        if self.password_encoder.matches(password, stored_hash)? {
            Ok(())
        } else {
            Err(AuthenticationError::InvalidCredentials)
        }
    }

    /// Issue an access token for `subject` with the configured lifetime.
    pub fn issue_token(
        &self,
        subject: &str,
        claims: HashMap<String, serde_json::Value>,
    ) -> Result<String, JwtError> {
        self.jwt_handler.issue(subject, claims, self.token_ttl_ms)
    }

    /// Verify a token and return its claims.
    pub fn verify_token(&self, token: &str) -> Result<Claims, JwtError> {
        self.jwt_handler.verify(token)
    }

    /// See [`JwtHandler::is_valid_for`].
    pub fn is_token_valid_for(&self, token: &str, subject: &str) -> bool {
        self.jwt_handler.is_valid_for(token, subject)
    }
}
