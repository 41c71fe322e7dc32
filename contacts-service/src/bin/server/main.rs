use std::sync::Arc;

use auth::Authenticator;
use contacts_service::config::Config;
use contacts_service::domain::auth::service::AuthService;
use contacts_service::domain::contact::service::ContactService;
use contacts_service::inbound::http::router::create_router;
use contacts_service::outbound::email::KafkaEmailDispatcher;
use contacts_service::outbound::repositories::PostgresContactRepository;
use contacts_service::outbound::repositories::PostgresUserRepository;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "contacts_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "contacts-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        jwt_algorithm = %config.jwt.algorithm,
        kafka_brokers = %config.kafka.brokers,
        kafka_topic = %config.kafka.topic,
        "Configuration loaded"
    );

    let pg_pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = 5,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let authenticator = Arc::new(Authenticator::new(config.jwt.auth_config()?)?);
    let user_repository = Arc::new(PostgresUserRepository::new(pg_pool.clone()));
    let contact_repository = Arc::new(PostgresContactRepository::new(pg_pool));
    let email_dispatcher = Arc::new(KafkaEmailDispatcher::new(&config)?);

    let auth_service = Arc::new(AuthService::new(
        user_repository,
        email_dispatcher,
        authenticator,
    ));
    let contact_service = Arc::new(ContactService::new(contact_repository));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(auth_service, contact_service);
    axum::serve(http_listener, http_application).await?;

    tracing::info!("Server exited successfully");

    Ok(())
}
