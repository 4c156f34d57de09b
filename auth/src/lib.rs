//! Authentication utilities library
//!
//! - Password hashing behind the [`PasswordEncoder`] trait (Argon2id)
//! - HS256 token issuing and verification with base64-encoded keys
//! - An [`Authenticator`] tying both together with a fixed token lifetime
//!
//! # Examples
//!
//! ```
//! use std::collections::HashMap;
//!
//! use auth::Authenticator;
//!
//! // "a-very-secret-signing-key-of-32-bytes!!"
//! let key = "YS12ZXJ5LXNlY3JldC1zaWduaW5nLWtleS1vZi0zMi1ieXRlcyEh";
//! let auth = Authenticator::with_base64_secret(key, 86_400_000).unwrap();
//!
//! let hash = auth.hash_password("password123").unwrap();
//! auth.check_password("password123", &hash).unwrap();
//!
//! let token = auth.issue_token("luke@rebellion.org", HashMap::new()).unwrap();
//! assert!(auth.is_token_valid_for(&token, "luke@rebellion.org"));
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;

pub use authenticator::AuthenticationError;
pub use authenticator::Authenticator;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use password::Argon2PasswordEncoder;
pub use password::PasswordEncoder;
pub use password::PasswordError;
