use std::sync::Arc;

use auth::Authenticator;
use reqwest::Url;
use sqlx::postgres::PgPoolOptions;
use starwars_service::config::Config;
use starwars_service::domain::people::service::PeopleService;
use starwars_service::domain::user::service::AuthService;
use starwars_service::inbound::http::router::create_router;
use starwars_service::outbound::repositories::PostgresUserRepository;
use starwars_service::outbound::swapi::SwapiHttpClient;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "starwars_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "starwars-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        swapi_base_url = %config.swapi.base_url,
        swapi_timeout_secs = config.swapi.timeout_secs,
        jwt_expiration_ms = config.jwt.expiration_ms,
        "Configuration loaded"
    );

    let pg_pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = config.database.max_connections,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let authenticator = Arc::new(Authenticator::with_base64_secret(
        &config.jwt.secret,
        config.jwt.expiration_ms,
    )?);
    let user_repository = Arc::new(PostgresUserRepository::new(pg_pool));
    let catalog_url = Url::parse(&config.swapi.base_url)?;
    let catalog_client = Arc::new(SwapiHttpClient::new(catalog_url, config.swapi.timeout())?);

    let auth_service = Arc::new(AuthService::new(user_repository, authenticator));
    let people_service = Arc::new(PeopleService::new(catalog_client));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(auth_service, people_service);

    if let Err(e) = axum::serve(http_listener, http_application).await {
        tracing::error!(error = %e, "Server error");
        return Err(e.into());
    }

    tracing::info!("Server exited successfully");
    Ok(())
}
