use async_trait::async_trait;

use crate::domain::user::errors::AuthError;
use crate::domain::user::models::AuthToken;
use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::Principal;
use crate::domain::user::models::RegisterCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::Username;

/// Port for authentication use cases.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Register a new account with role `USER`.
    ///
    /// # Errors
    /// * `DuplicateUser` - Username is already taken
    /// * `PasswordHashing` - Password could not be hashed
    /// * `DatabaseError` - Database operation failed
    async fn register(&self, command: RegisterCommand) -> Result<(), AuthError>;

    /// Check credentials and issue an access token.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown username or wrong password
    /// * `UserNotFound` - User vanished between verification and token issue
    /// * `TokenSigning` - Token could not be signed
    /// * `DatabaseError` - Database operation failed
    async fn login(&self, command: LoginCommand) -> Result<AuthToken, AuthError>;

    /// Resolve a bearer token to the caller it was issued to.
    ///
    /// # Errors
    /// * `InvalidToken` - Token is malformed, forged, expired or names another user
    /// * `UserNotFound` - Token subject no longer exists
    /// * `DatabaseError` - Database operation failed
    async fn authenticate_token(&self, token: &str) -> Result<Principal, AuthError>;
}

/// Persistence operations for user accounts.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Retrieve user by username.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, AuthError>;

    /// Persist a new user.
    ///
    /// # Errors
    /// * `DuplicateUser` - Username is already taken
    /// * `DatabaseError` - Database operation failed
    async fn save(&self, user: User) -> Result<(), AuthError>;
}
