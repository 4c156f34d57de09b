#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use auth::Authenticator;
use auth::JwtHandler;
use axum::extract::Path;
use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use axum::http::Uri;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::routing::get;
use axum::Json;
use axum::Router;
use serde::Deserialize;
use serde_json::json;
use starwars_service::domain::people::service::PeopleService;
use starwars_service::domain::user::errors::AuthError;
use starwars_service::domain::user::models::User;
use starwars_service::domain::user::models::Username;
use starwars_service::domain::user::ports::UserRepository;
use starwars_service::domain::user::service::AuthService;
use starwars_service::inbound::http::router::create_router;
use starwars_service::outbound::swapi::SwapiHttpClient;

/// base64 of "test-secret-key-for-jwt-signing-at-least-32-bytes"
pub const JWT_SECRET: &str = "dGVzdC1zZWNyZXQta2V5LWZvci1qd3Qtc2lnbmluZy1hdC1sZWFzdC0zMi1ieXRlcw==";
pub const JWT_EXPIRATION_MS: i64 = 3_600_000;

/// Test application that spawns a real server in front of a stub catalog
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub jwt_handler: JwtHandler,
    pub users: Arc<InMemoryUserRepository>,
    pub catalog: Option<StubCatalog>,
}

impl TestApp {
    /// Spawn the application wired to a fresh stub catalog
    pub async fn spawn() -> Self {
        let catalog = StubCatalog::spawn().await;
        let mut app = Self::spawn_with_catalog_url(&catalog.base_url).await;
        app.catalog = Some(catalog);
        app
    }

    /// Spawn the application against an arbitrary catalog base URL
    pub async fn spawn_with_catalog_url(catalog_url: &str) -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let users = Arc::new(InMemoryUserRepository::default());
        let authenticator = Arc::new(
            Authenticator::with_base64_secret(JWT_SECRET, JWT_EXPIRATION_MS)
                .expect("Failed to build authenticator"),
        );
        let catalog_client = Arc::new(
            SwapiHttpClient::new(
                reqwest::Url::parse(catalog_url).expect("Invalid catalog URL"),
                Duration::from_secs(5),
            )
            .expect("Failed to build catalog client"),
        );

        let auth_service = Arc::new(AuthService::new(Arc::clone(&users), authenticator));
        let people_service = Arc::new(PeopleService::new(catalog_client));
        let router = create_router(auth_service, people_service);

        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: reqwest::Client::new(),
            jwt_handler: JwtHandler::from_base64_secret(JWT_SECRET).unwrap(),
            users,
            catalog: None,
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(&format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(&format!("{}{}", self.address, path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    pub async fn register(&self, username: &str, password: &str) -> reqwest::Response {
        self.post("/api/auth/register")
            .json(&json!({ "username": username, "password": password }))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn login(&self, username: &str, password: &str) -> reqwest::Response {
        self.post("/api/auth/login")
            .json(&json!({ "username": username, "password": password }))
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Register a fresh user and return a token issued for it
    pub async fn authenticated_token(&self) -> String {
        let username = format!("{}@rebellion.org", uuid::Uuid::new_v4().simple());
        let response = self.register(&username, "password123").await;
        assert_eq!(response.status(), StatusCode::CREATED);

        let body: serde_json::Value = self
            .login(&username, "password123")
            .await
            .json()
            .await
            .expect("Failed to parse login response");
        body["token"].as_str().unwrap().to_string()
    }

    /// Catalog request URIs seen so far, in order
    pub fn catalog_requests(&self) -> Vec<String> {
        self.catalog
            .as_ref()
            .map(|catalog| catalog.requests.lock().unwrap().clone())
            .unwrap_or_default()
    }
}

/// User store kept in memory
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<HashMap<String, User>>,
}

impl InMemoryUserRepository {
    pub fn remove(&self, username: &str) {
        self.users.lock().unwrap().remove(username);
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, AuthError> {
        Ok(self.users.lock().unwrap().get(username.as_str()).cloned())
    }

    async fn save(&self, user: User) -> Result<(), AuthError> {
        let mut users = self.users.lock().unwrap();
        if users.contains_key(user.username.as_str()) {
            return Err(AuthError::DuplicateUser(user.username.to_string()));
        }
        users.insert(user.username.to_string(), user);
        Ok(())
    }
}

/// Axum server impersonating the Star Wars catalog
pub struct StubCatalog {
    pub base_url: String,
    pub requests: Arc<Mutex<Vec<String>>>,
}

type Recorded = Arc<Mutex<Vec<String>>>;

impl StubCatalog {
    pub async fn spawn() -> Self {
        let requests: Recorded = Arc::new(Mutex::new(Vec::new()));

        let router = Router::new()
            .route("/people", get(stub_page))
            .route("/people/", get(stub_search))
            .route("/people/:id", get(stub_detail))
            .with_state(Arc::clone(&requests));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind stub catalog port");
        let port = listener.local_addr().unwrap().port();

        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Stub catalog error");
        });

        Self {
            base_url: format!("http://127.0.0.1:{}", port),
            requests,
        }
    }
}

async fn stub_detail(State(requests): State<Recorded>, uri: Uri, Path(id): Path<String>) -> Response {
    requests.lock().unwrap().push(uri.to_string());

    match id.as_str() {
        "1" => Json(json!({
            "message": "ok",
            "result": {
                "uid": "1",
                "properties": {
                    "name": "Luke Skywalker",
                    "height": "172",
                    "mass": "77",
                    "gender": "male",
                    "url": "https://www.swapi.tech/api/people/1"
                }
            }
        }))
        .into_response(),
        "500" => (StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response(),
        "empty" => (StatusCode::OK, "").into_response(),
        _ => (StatusCode::NOT_FOUND, Json(json!({ "message": "not found" }))).into_response(),
    }
}

#[derive(Debug, Deserialize)]
struct StubPageParams {
    page: Option<i64>,
    limit: Option<i64>,
}

async fn stub_page(
    State(requests): State<Recorded>,
    uri: Uri,
    Query(params): Query<StubPageParams>,
) -> Response {
    requests.lock().unwrap().push(uri.to_string());

    if params.page == Some(500) {
        return (StatusCode::SERVICE_UNAVAILABLE, "").into_response();
    }
    if params.page == Some(99) {
        return Json(json!({ "message": "ok", "total_records": 82, "total_pages": 9 })).into_response();
    }

    Json(json!({
        "message": "ok",
        "total_records": 82,
        "total_pages": 82 / params.limit.unwrap_or(10).max(1) + 1,
        "previous": null,
        "next": "https://www.swapi.tech/api/people?page=2&limit=10",
        "results": [
            { "uid": "1", "name": "Luke Skywalker", "url": "https://www.swapi.tech/api/people/1" },
            { "uid": "2", "name": "C-3PO", "url": "https://www.swapi.tech/api/people/2" }
        ]
    }))
    .into_response()
}

#[derive(Debug, Deserialize)]
struct StubSearchParams {
    name: Option<String>,
}

async fn stub_search(
    State(requests): State<Recorded>,
    uri: Uri,
    Query(params): Query<StubSearchParams>,
) -> Response {
    requests.lock().unwrap().push(uri.to_string());

    match params.name.as_deref() {
        Some("luke") => Json(json!({
            "message": "ok",
            "result": [
                { "uid": "1", "properties": { "name": "Luke Skywalker", "height": "172" } }
            ]
        }))
        .into_response(),
        Some("nameless") => Json(json!({
            "message": "ok",
            "result": [ { "uid": "77", "properties": { "height": "66" } } ]
        }))
        .into_response(),
        Some("boom") => (StatusCode::INTERNAL_SERVER_ERROR, "").into_response(),
        _ => Json(json!({ "message": "ok", "result": [] })).into_response(),
    }
}
