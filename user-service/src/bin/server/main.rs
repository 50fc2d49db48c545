use std::sync::Arc;

use anyhow::Context;
use auth::Authenticator;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use user_service::config::Config;
use user_service::config::StorageBackend;
use user_service::domain::authentication::ports::AuthServicePort;
use user_service::domain::authentication::service::AuthService;
use user_service::domain::user::ports::UserRepository;
use user_service::domain::user::ports::UserServicePort;
use user_service::domain::user::service::UserService;
use user_service::inbound::http::router::create_router;
use user_service::outbound::repositories::InMemoryUserRepository;
use user_service::outbound::repositories::PostgresUserRepository;

const MAX_DB_CONNECTIONS: u32 = 5;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "user_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "user-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        request_timeout_secs = config.server.request_timeout_secs,
        storage = ?config.storage.backend,
        session_hours = config.jwt.expiration_hours,
        "Configuration loaded"
    );

    let authenticator = Arc::new(
        Authenticator::new(config.jwt.secret.as_bytes())
            .context("jwt.secret must be set to a non-empty signing key")?,
    );

    let (user_service, auth_service) = match config.storage.backend {
        StorageBackend::Postgres => {
            let database_url = config
                .database
                .url
                .as_deref()
                .context("database.url is required for postgres storage")?;

            let pg_pool = PgPoolOptions::new()
                .max_connections(MAX_DB_CONNECTIONS)
                .connect(database_url)
                .await?;
            tracing::info!(
                max_connections = MAX_DB_CONNECTIONS,
                database = "postgresql",
                "Database connection pool created"
            );

            sqlx::migrate!("./migrations").run(&pg_pool).await?;
            tracing::info!(database = "postgresql", "Database migrations completed");

            build_services(
                Arc::new(PostgresUserRepository::new(pg_pool)),
                &authenticator,
                config.jwt.expiration_hours,
            )
        }
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage; users are lost on shutdown");
            build_services(
                Arc::new(InMemoryUserRepository::new()),
                &authenticator,
                config.jwt.expiration_hours,
            )
        }
    };

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(
        user_service,
        auth_service,
        authenticator,
        config.server.request_timeout(),
    );
    axum::serve(http_listener, http_application)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Server exited");
    Ok(())
}

/// Resolves on Ctrl+C, or SIGTERM on unix, letting in-flight requests finish.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, draining connections");
}

fn build_services<UR>(
    repository: Arc<UR>,
    authenticator: &Arc<Authenticator>,
    session_duration_hours: u32,
) -> (Arc<dyn UserServicePort>, Arc<dyn AuthServicePort>)
where
    UR: UserRepository,
{
    let user_service: Arc<dyn UserServicePort> =
        Arc::new(UserService::new(Arc::clone(&repository)));
    let auth_service: Arc<dyn AuthServicePort> = Arc::new(AuthService::new(
        repository,
        Arc::clone(authenticator),
        session_duration_hours,
    ));
    (user_service, auth_service)
}
