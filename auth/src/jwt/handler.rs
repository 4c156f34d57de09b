use std::collections::HashMap;

use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::errors::JwtError;

/// Issues and verifies HS256 access tokens.
///
/// The signing key is symmetric; the same handler both signs and checks.
pub struct JwtHandler {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
}

impl JwtHandler {
    /// Create a handler from raw key bytes.
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
        }
    }

    /// Create a handler from a base64-encoded key, as supplied by configuration.
    ///
    /// # Errors
    /// * `InvalidKey` - The secret is not valid base64
    pub fn from_base64_secret(secret: &str) -> Result<Self, JwtError> {
        let encoding_key = EncodingKey::from_base64_secret(secret)
            .map_err(|e| JwtError::InvalidKey(e.to_string()))?;
        let decoding_key = DecodingKey::from_base64_secret(secret)
            .map_err(|e| JwtError::InvalidKey(e.to_string()))?;

        Ok(Self {
            encoding_key,
            decoding_key,
            algorithm: Algorithm::HS256,
        })
    }

    /// Issue a token for `subject`, valid for `expires_in_ms` from now.
    pub fn issue(
        &self,
        subject: &str,
        claims: HashMap<String, serde_json::Value>,
        expires_in_ms: i64,
    ) -> Result<String, JwtError> {
        self.issue_at(subject, claims, expires_in_ms, Utc::now().timestamp_millis())
    }

    /// Issue a token as if the current instant were `now_ms`.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token signing failed
    pub fn issue_at(
        &self,
        subject: &str,
        claims: HashMap<String, serde_json::Value>,
        expires_in_ms: i64,
        now_ms: i64,
    ) -> Result<String, JwtError> {
        let claims = Claims::issued_to(subject, claims, now_ms, expires_in_ms);

        encode(&Header::new(self.algorithm), &claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }

    /// Verify signature, structure and expiry and return the embedded claims.
    ///
    /// # Errors
    /// * `TokenExpired` - The current time is at or past `exp`
    /// * `MissingClaim` - `sub` or `exp` is absent
    /// * `DecodingFailed` - Signature mismatch or malformed token
    pub fn verify(&self, token: &str) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(self.algorithm);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        let claims = decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => JwtError::TokenExpired,
                ErrorKind::MissingRequiredClaim(claim) => JwtError::MissingClaim(claim.clone()),
                _ => JwtError::DecodingFailed(e.to_string()),
            })?;

        // the library accepts exp == now; tokens are dead from that second on
        if claims.is_expired(Utc::now().timestamp()) {
            return Err(JwtError::TokenExpired);
        }

        Ok(claims)
    }

    /// Check that `token` verifies, names `expected_subject` exactly and is
    /// still unexpired.
    pub fn is_valid_for(&self, token: &str, expected_subject: &str) -> bool {
        match self.verify(token) {
            Ok(claims) => {
                claims.sub.as_deref() == Some(expected_subject)
                    && !claims.is_expired(Utc::now().timestamp())
            }
            Err(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // "a-very-secret-signing-key-of-32-bytes!!" in base64
    const KEY: &str = "YS12ZXJ5LXNlY3JldC1zaWduaW5nLWtleS1vZi0zMi1ieXRlcyEh";

    fn role_claims() -> HashMap<String, serde_json::Value> {
        let mut claims = HashMap::new();
        claims.insert("role".to_string(), serde_json::json!("USER"));
        claims
    }

    #[test]
    fn test_issue_and_verify() {
        let handler = JwtHandler::from_base64_secret(KEY).expect("valid key");

        let token = handler
            .issue("luke@rebellion.org", role_claims(), 60_000)
            .expect("Failed to issue token");
        assert!(!token.is_empty());

        let claims = handler.verify(&token).expect("Failed to verify token");
        assert_eq!(claims.sub.as_deref(), Some("luke@rebellion.org"));
        assert_eq!(claims.role(), Some("USER"));
        assert_eq!(claims.exp.unwrap() - claims.iat.unwrap(), 60);
    }

    #[test]
    fn test_issue_at_is_deterministic() {
        let handler = JwtHandler::from_base64_secret(KEY).unwrap();
        let now = Utc::now().timestamp_millis();

        let first = handler.issue_at("leia", role_claims(), 60_000, now).unwrap();
        let second = handler.issue_at("leia", role_claims(), 60_000, now).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_invalid_base64_key() {
        let result = JwtHandler::from_base64_secret("not base64 at all!");
        assert!(matches!(result, Err(JwtError::InvalidKey(_))));
    }

    #[test]
    fn test_verify_malformed_token() {
        let handler = JwtHandler::from_base64_secret(KEY).unwrap();
        let result = handler.verify("invalid.token.here");
        assert!(matches!(result, Err(JwtError::DecodingFailed(_))));
    }

    #[test]
    fn test_verify_with_wrong_key() {
        let issuer = JwtHandler::new(b"secret1_at_least_32_bytes_long_key!");
        let verifier = JwtHandler::new(b"secret2_at_least_32_bytes_long_key!");

        let token = issuer.issue("han", role_claims(), 60_000).unwrap();

        assert!(matches!(
            verifier.verify(&token),
            Err(JwtError::DecodingFailed(_))
        ));
    }

    #[test]
    fn test_verify_expired_token() {
        let handler = JwtHandler::from_base64_secret(KEY).unwrap();
        let two_hours_ago = Utc::now().timestamp_millis() - 7_200_000;

        let token = handler
            .issue_at("han", role_claims(), 3_600_000, two_hours_ago)
            .unwrap();

        assert_eq!(handler.verify(&token), Err(JwtError::TokenExpired));
    }

    #[test]
    fn test_is_valid_for_matches_subject_exactly() {
        let handler = JwtHandler::from_base64_secret(KEY).unwrap();
        let token = handler
            .issue("luke@rebellion.org", role_claims(), 60_000)
            .unwrap();

        assert!(handler.is_valid_for(&token, "luke@rebellion.org"));
        assert!(!handler.is_valid_for(&token, "Luke@rebellion.org"));
        assert!(!handler.is_valid_for(&token, "vader@empire.gov"));
    }

    #[test]
    fn test_is_valid_for_rejects_expired_and_garbage() {
        let handler = JwtHandler::from_base64_secret(KEY).unwrap();
        let two_hours_ago = Utc::now().timestamp_millis() - 7_200_000;
        let expired = handler
            .issue_at("han", role_claims(), 3_600_000, two_hours_ago)
            .unwrap();

        assert!(!handler.is_valid_for(&expired, "han"));
        assert!(!handler.is_valid_for("garbage", "han"));
    }
}
