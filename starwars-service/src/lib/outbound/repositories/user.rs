use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;
use sqlx::Row;
use uuid::Uuid;

use crate::domain::user::errors::AuthError;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;
use crate::domain::user::ports::UserRepository;

pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, AuthError> {
        let row = sqlx::query(
            r#"
            SELECT id, username, password_hash, role, created_at
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AuthError::DatabaseError(e.to_string()))?;

        match row {
            Some(r) => {
                let id: Uuid = r.try_get("id").map_err(database_error)?;
                let username: String = r.try_get("username").map_err(database_error)?;
                let password_hash: String = r.try_get("password_hash").map_err(database_error)?;
                let role: String = r.try_get("role").map_err(database_error)?;
                let created_at: DateTime<Utc> = r.try_get("created_at").map_err(database_error)?;

                Ok(Some(User {
                    id: UserId(id),
                    username: stored_username(username)?,
                    password_hash,
                    role: role.parse()?,
                    created_at,
                }))
            }
            None => Ok(None),
        }
    }

    async fn save(&self, user: User) -> Result<(), AuthError> {
        sqlx::query(
            r#"
            INSERT INTO users (id, username, password_hash, role, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(user.id.0)
        .bind(user.username.as_str())
        .bind(&user.password_hash)
        .bind(user.role.as_str())
        .bind(user.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation()
                    && db_err.constraint() == Some("users_username_key")
                {
                    return AuthError::DuplicateUser(user.username.to_string());
                }
            }
            AuthError::DatabaseError(e.to_string())
        })?;

        Ok(())
    }
}

fn database_error(e: sqlx::Error) -> AuthError {
    AuthError::DatabaseError(e.to_string())
}

/// A stored username that fails validation is corrupt data, not caller input.
fn stored_username(raw: String) -> Result<Username, AuthError> {
    Username::new(raw).map_err(|e| AuthError::DatabaseError(format!("stored username: {}", e)))
}
