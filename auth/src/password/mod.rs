pub mod argon2;
pub mod errors;

pub use argon2::Argon2PasswordEncoder;
pub use errors::PasswordError;

/// One-way password encoding with a matching compare function.
pub trait PasswordEncoder: Send + Sync + 'static {
    /// Encode a plaintext password for storage.
    ///
    /// # Errors
    /// * `HashingFailed` - The hashing primitive failed
    fn encode(&self, raw_password: &str) -> Result<String, PasswordError>;

    /// Compare a plaintext password against a stored encoding.
    ///
    /// # Returns
    /// `true` when the password matches
    ///
    /// # Errors
    /// * `MalformedHash` - The stored encoding cannot be parsed
    fn matches(&self, raw_password: &str, encoded: &str) -> Result<bool, PasswordError>;
}
