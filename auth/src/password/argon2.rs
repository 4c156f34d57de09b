use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::PasswordHash;
use argon2::password_hash::PasswordHasher;
use argon2::password_hash::PasswordVerifier;
use argon2::password_hash::SaltString;
use argon2::Argon2;

use super::errors::PasswordError;
use super::PasswordEncoder;

/// Argon2id password encoder producing PHC strings with a random salt.
#[derive(Debug, Clone, Copy, Default)]
pub struct Argon2PasswordEncoder;

impl Argon2PasswordEncoder {
    pub fn new() -> Self {
        Self
    }
}

impl PasswordEncoder for Argon2PasswordEncoder {
    fn encode(&self, raw_password: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);

        Argon2::default()
            .hash_password(raw_password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    fn matches(&self, raw_password: &str, encoded: &str) -> Result<bool, PasswordError> {
        let parsed_hash =
            PasswordHash::new(encoded).map_err(|e| PasswordError::MalformedHash(e.to_string()))?;

        Ok(Argon2::default()
            .verify_password(raw_password.as_bytes(), &parsed_hash)
            .is_ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_and_match() {
        let encoder = Argon2PasswordEncoder::new();

        let encoded = encoder.encode("may-the-force").expect("Failed to encode");
        assert!(encoded.starts_with("$argon2id$"));

        assert!(encoder.matches("may-the-force", &encoded).unwrap());
        assert!(!encoder.matches("its-a-trap", &encoded).unwrap());
    }

    #[test]
    fn test_same_password_gets_distinct_salts() {
        let encoder = Argon2PasswordEncoder::new();
        let first = encoder.encode("secret").unwrap();
        let second = encoder.encode("secret").unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_match_against_malformed_hash() {
        let encoder = Argon2PasswordEncoder::new();
        let result = encoder.matches("password", "invalid_hash");
        assert!(matches!(result, Err(PasswordError::MalformedHash(_))));
    }
}
