use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;
use chrono::Utc;

use crate::domain::user::errors::AuthError;
use crate::domain::user::models::AuthToken;
use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::Principal;
use crate::domain::user::models::RegisterCommand;
use crate::domain::user::models::Role;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;
use crate::domain::user::ports::AuthServicePort;
use crate::domain::user::ports::UserRepository;

/// Registration, login and bearer-token resolution over a user store.
pub struct AuthService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
}

impl<UR> AuthService<UR>
where
    UR: UserRepository,
{
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `authenticator` - Password hasher and token issuer
    pub fn new(repository: Arc<UR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }

    /// Username/password check, the same way for unknown users and wrong
    /// passwords.
    async fn verify_credentials(&self, command: &LoginCommand) -> Result<(), AuthError> {
        let user = self
            .repository
            .find_by_username(&command.username)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        self.authenticator
            .check_password(&command.password, &user.password_hash)
            .map_err(|e| match e {
                AuthenticationError::InvalidCredentials => AuthError::InvalidCredentials,
                other => {
                    tracing::error!(username = %command.username, error = %other, "Stored password hash unusable");
                    AuthError::InvalidCredentials
                }
            })
    }
}

#[async_trait]
impl<UR> AuthServicePort for AuthService<UR>
where
    UR: UserRepository,
{
    async fn register(&self, command: RegisterCommand) -> Result<(), AuthError> {
        if self
            .repository
            .find_by_username(&command.username)
            .await?
            .is_some()
        {
            return Err(AuthError::DuplicateUser(command.username.to_string()));
        }

        let password_hash = self
            .authenticator
            .hash_password(command.password.expose())
            .map_err(|e| AuthError::PasswordHashing(e.to_string()))?;

        let user = User {
            id: UserId::new(),
            username: command.username,
            password_hash,
            role: Role::User,
            created_at: Utc::now(),
        };

        let username = user.username.clone();
        self.repository.save(user).await?;
        tracing::info!(username = %username, "User registered");

        Ok(())
    }

    async fn login(&self, command: LoginCommand) -> Result<AuthToken, AuthError> {
        self.verify_credentials(&command).await?;

        let user = self
            .repository
            .find_by_username(&command.username)
            .await?
            .ok_or_else(|| AuthError::UserNotFound(command.username.to_string()))?;

        let mut claims = HashMap::new();
        claims.insert("role".to_string(), serde_json::json!(user.role.as_str()));

        let token = self
            .authenticator
            .issue_token(user.username.as_str(), claims)
            .map_err(|e| AuthError::TokenSigning(e.to_string()))?;

        tracing::info!(
            username = %user.username,
            expires_in_ms = self.authenticator.token_ttl_ms(),
            "Access token issued"
        );

        Ok(AuthToken(token))
    }

    async fn authenticate_token(&self, token: &str) -> Result<Principal, AuthError> {
        let claims = self
            .authenticator
            .verify_token(token)
            .map_err(|e| AuthError::InvalidToken(e.to_string()))?;

        let subject = claims
            .sub
            .ok_or_else(|| AuthError::InvalidToken("missing subject".to_string()))?;
        let username =
            Username::new(subject).map_err(|e| AuthError::InvalidToken(e.to_string()))?;

        let user = self
            .repository
            .find_by_username(&username)
            .await?
            .ok_or_else(|| AuthError::UserNotFound(username.to_string()))?;

        if !self
            .authenticator
            .is_token_valid_for(token, user.username.as_str())
        {
            return Err(AuthError::InvalidToken(
                "token is not valid for this user".to_string(),
            ));
        }

        Ok(Principal {
            username: user.username,
            role: user.role,
        })
    }
}
