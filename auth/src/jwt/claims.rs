use std::collections::HashMap;

use serde::Deserialize;
use serde::Serialize;

/// Claims carried by an access token.
///
/// Registered claims (`sub`, `iat`, `exp`) are typed fields; everything the
/// issuer adds on top (for example the user's `role`) lives in `extra` and is
/// flattened into the token payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    /// Subject (the username the token was issued to)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,

    /// Issued at (Unix timestamp, seconds)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,

    /// Expiration time (Unix timestamp, seconds)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,

    /// Custom claims
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl Claims {
    /// Build claims for a subject with a lifetime expressed in milliseconds.
    ///
    /// # Arguments
    /// * `subject` - Token subject
    /// * `extra` - Custom claims to embed
    /// * `now_ms` - Issue instant (Unix epoch, milliseconds)
    /// * `expires_in_ms` - Token lifetime in milliseconds
    ///
    /// # Returns
    /// Claims with `sub`, `iat` and `exp` populated
    pub fn issued_to(
        subject: impl ToString,
        extra: HashMap<String, serde_json::Value>,
        now_ms: i64,
        expires_in_ms: i64,
    ) -> Self {
        Self {
            sub: Some(subject.to_string()),
            iat: Some(now_ms.div_euclid(1000)),
            exp: Some(now_ms.saturating_add(expires_in_ms).div_euclid(1000)),
            extra,
        }
    }

    /// Role claim, if present and a string.
    pub fn role(&self) -> Option<&str> {
        self.extra.get("role").and_then(|v| v.as_str())
    }

    /// A token is expired once the clock reaches `exp`.
    ///
    /// Claims without `exp` never expire.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp.map_or(false, |exp| exp <= current_timestamp)
    }
}
