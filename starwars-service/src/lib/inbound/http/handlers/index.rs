use axum::http::header;
use axum::http::StatusCode;
use axum::response::IntoResponse;

pub const SWAGGER_UI_INDEX: &str = "/swagger-ui/index.html";

/// Send browsers hitting the root to the API documentation.
pub async fn index() -> impl IntoResponse {
    (StatusCode::FOUND, [(header::LOCATION, SWAGGER_UI_INDEX)])
}
