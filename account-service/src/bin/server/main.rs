use std::sync::Arc;

use account_service::auth::service::AuthService;
use account_service::config::Config;
use account_service::file::service::FileService;
use account_service::inbound::http::router::create_router;
use account_service::outbound::mail::SmtpMailer;
use account_service::outbound::repositories::PostgresUserRepository;
use account_service::outbound::storage::LocalFileStorage;
use account_service::user::service::UserService;
use auth::Authenticator;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "account_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "account-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        mail_host = %config.mail.host,
        mail_port = config.mail.port,
        template_dir = %config.mail.template_dir,
        storage_root = %config.storage.root,
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

    let authenticator = Arc::new(Authenticator::new(config.jwt.secret.as_bytes()));
    let user_repository = Arc::new(PostgresUserRepository::new(pg_pool));
    let mailer = Arc::new(SmtpMailer::new(&config.mail)?);
    let storage = Arc::new(LocalFileStorage::new(&config.storage.root));

    let user_service = Arc::new(UserService::new(user_repository));
    let auth_service = Arc::new(AuthService::new(
        Arc::clone(&user_service),
        mailer,
        authenticator,
        config.jwt.token_policy(),
    ));
    let file_service = Arc::new(FileService::new(storage));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(user_service, auth_service, file_service);

    if let Err(e) = axum::serve(http_listener, http_application).await {
        tracing::error!(error = %e, "Server error");
        return Err(e.into());
    }

    Ok(())
}
