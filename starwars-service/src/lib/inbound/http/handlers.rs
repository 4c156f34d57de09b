use axum::extract::rejection::JsonRejection;
use axum::extract::rejection::QueryRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use chrono::Utc;
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::people::errors::PeopleError;
use crate::domain::user::errors::AuthError;

pub mod get_person;
pub mod health;
pub mod index;
pub mod list_people;
pub mod login;
pub mod register;

const INTERNAL_ERROR_MESSAGE: &str = "internal server error, please try again later";

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<T>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(data))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    BadGateway(String),
    BadRequest(String),
    NotFound(String),
    Unauthorized(String),
}

impl ApiError {
    pub fn internal() -> Self {
        ApiError::InternalServerError(INTERNAL_ERROR_MESSAGE.to_string())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::BadGateway(_) => StatusCode::BAD_GATEWAY,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            ApiError::InternalServerError(msg)
            | ApiError::BadGateway(msg)
            | ApiError::BadRequest(msg)
            | ApiError::NotFound(msg)
            | ApiError::Unauthorized(msg) => msg,
        };

        (status, Json(ApiErrorBody::new(status, message))).into_response()
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidUsername(_)
            | AuthError::InvalidPassword(_)
            | AuthError::Validation(_) => ApiError::BadRequest(err.to_string()),
            AuthError::DuplicateUser(_) => {
                ApiError::BadRequest("username is already taken".to_string())
            }
            AuthError::InvalidCredentials => {
                ApiError::Unauthorized("invalid username or password".to_string())
            }
            AuthError::InvalidToken(_) => {
                ApiError::Unauthorized("invalid or expired token".to_string())
            }
            AuthError::UserNotFound(_) => ApiError::NotFound("user not found".to_string()),
            AuthError::PasswordHashing(_)
            | AuthError::TokenSigning(_)
            | AuthError::DatabaseError(_) => {
                tracing::error!(error = %err, "Authentication request failed");
                ApiError::internal()
            }
        }
    }
}

impl From<PeopleError> for ApiError {
    fn from(err: PeopleError) -> Self {
        match err {
            PeopleError::NotFound(msg) => ApiError::NotFound(msg),
            PeopleError::UpstreamUnavailable => {
                ApiError::BadGateway("the Star Wars service is unavailable".to_string())
            }
            PeopleError::UpstreamError(msg) => ApiError::InternalServerError(msg),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(error = %rejection, "Rejected request body");
        ApiError::BadRequest("malformed request body".to_string())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        tracing::debug!(error = %rejection, "Rejected query string");
        ApiError::BadRequest("invalid query parameters".to_string())
    }
}

/// Body of every error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ApiErrorBody {
    #[schema(example = 404)]
    pub status: u16,
    #[schema(example = "No character found for id 999")]
    pub message: String,
    /// Unix epoch, milliseconds
    #[schema(example = 1700000000000_i64)]
    pub timestamp: i64,
}

impl ApiErrorBody {
    pub fn new(status: StatusCode, message: String) -> Self {
        Self {
            status: status.as_u16(),
            message,
            timestamp: Utc::now().timestamp_millis(),
        }
    }
}
