use thiserror::Error;

/// Error for Username validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UsernameError {
    #[error("username is required")]
    Empty,

    #[error("invalid email format")]
    NotAnEmail,
}

/// Error for registration password rules
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordPolicyError {
    #[error("password is required")]
    Empty,

    #[error("password must be between {min} and {max} characters")]
    Length { min: usize, max: usize },
}

/// Error for stored role values
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RoleError {
    #[error("Unknown role: {0}")]
    Unknown(String),
}

/// Top-level error for registration, login and token authentication
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    #[error("{0}")]
    InvalidUsername(#[from] UsernameError),

    #[error("{0}")]
    InvalidPassword(#[from] PasswordPolicyError),

    #[error("{0}")]
    Validation(String),

    // Domain-level errors
    #[error("Username already exists: {0}")]
    DuplicateUser(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    // Infrastructure errors
    #[error("Password hashing failed: {0}")]
    PasswordHashing(String),

    #[error("Token signing failed: {0}")]
    TokenSigning(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl From<RoleError> for AuthError {
    fn from(err: RoleError) -> Self {
        AuthError::DatabaseError(err.to_string())
    }
}
