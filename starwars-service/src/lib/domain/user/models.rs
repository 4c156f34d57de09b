use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::user::errors::PasswordPolicyError;
use crate::domain::user::errors::RoleError;
use crate::domain::user::errors::UsernameError;

/// Registered account.
///
/// Created once at registration and read on every login and authenticated
/// request; never updated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub username: Username,
    pub password_hash: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

/// User unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(pub Uuid);

impl UserId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Login name. Always non-empty; registration additionally requires it to be
/// an email address.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Username(String);

impl Username {
    /// Accept any non-empty username (login path).
    ///
    /// # Errors
    /// * `Empty` - Username is the empty string
    pub fn new(username: String) -> Result<Self, UsernameError> {
        if username.is_empty() {
            return Err(UsernameError::Empty);
        }
        Ok(Self(username))
    }

    /// Accept a non-empty, email-shaped username (registration path).
    ///
    /// # Errors
    /// * `Empty` - Username is the empty string
    /// * `NotAnEmail` - Username is not a valid email address
    pub fn email(username: String) -> Result<Self, UsernameError> {
        let username = Self::new(username)?;
        if email_address::EmailAddress::is_valid(username.as_str()) {
            Ok(username)
        } else {
            Err(UsernameError::NotAnEmail)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Plaintext password chosen at registration.
///
/// Must be 5 to 30 characters long. Never logged or persisted as is.
#[derive(Clone, PartialEq, Eq)]
pub struct NewPassword(String);

impl NewPassword {
    const MIN_LENGTH: usize = 5;
    const MAX_LENGTH: usize = 30;

    /// # Errors
    /// * `Empty` - Password is the empty string
    /// * `Length` - Password is shorter than 5 or longer than 30 characters
    pub fn new(password: String) -> Result<Self, PasswordPolicyError> {
        if password.is_empty() {
            return Err(PasswordPolicyError::Empty);
        }

        let length = password.chars().count();
        if !(Self::MIN_LENGTH..=Self::MAX_LENGTH).contains(&length) {
            return Err(PasswordPolicyError::Length {
                min: Self::MIN_LENGTH,
                max: Self::MAX_LENGTH,
            });
        }

        Ok(Self(password))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for NewPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("NewPassword(***)")
    }
}

/// Authorization role embedded in issued tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Role {
    #[default]
    User,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "USER",
            Role::Admin => "ADMIN",
        }
    }
}

impl FromStr for Role {
    type Err = RoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "USER" => Ok(Role::User),
            "ADMIN" => Ok(Role::Admin),
            other => Err(RoleError::Unknown(other.to_string())),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Command to register a new account
#[derive(Debug)]
pub struct RegisterCommand {
    pub username: Username,
    pub password: NewPassword,
}

/// Command to exchange credentials for an access token
#[derive(Debug)]
pub struct LoginCommand {
    pub username: Username,
    pub password: String,
}

/// Signed access token handed back on login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthToken(pub String);

/// Caller identity established from a valid bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub username: Username,
    pub role: Role,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_username_rejects_empty() {
        assert_eq!(Username::new(String::new()), Err(UsernameError::Empty));
        assert_eq!(Username::email(String::new()), Err(UsernameError::Empty));
    }

    #[test]
    fn test_username_email_shape() {
        assert!(Username::email("luke@rebellion.org".to_string()).is_ok());
        assert_eq!(
            Username::email("luke".to_string()),
            Err(UsernameError::NotAnEmail)
        );
        // login accepts whatever was registered
        assert!(Username::new("luke".to_string()).is_ok());
    }

    #[test]
    fn test_new_password_bounds() {
        assert_eq!(NewPassword::new(String::new()), Err(PasswordPolicyError::Empty));
        assert!(matches!(
            NewPassword::new("abcd".to_string()),
            Err(PasswordPolicyError::Length { .. })
        ));
        assert!(NewPassword::new("abcde".to_string()).is_ok());
        assert!(NewPassword::new("a".repeat(30)).is_ok());
        assert!(NewPassword::new("a".repeat(31)).is_err());
    }

    #[test]
    fn test_new_password_counts_characters_not_bytes() {
        // five characters, ten bytes
        assert!(NewPassword::new("ñññññ".to_string()).is_ok());
    }

    #[test]
    fn test_new_password_debug_is_redacted() {
        let password = NewPassword::new("hunter22".to_string()).unwrap();
        assert!(!format!("{:?}", password).contains("hunter22"));
    }

    #[test]
    fn test_role_round_trips_through_text() {
        assert_eq!("USER".parse::<Role>(), Ok(Role::User));
        assert_eq!("ADMIN".parse::<Role>(), Ok(Role::Admin));
        assert_eq!(Role::default().as_str(), "USER");
        assert!("user".parse::<Role>().is_err());
    }
}
