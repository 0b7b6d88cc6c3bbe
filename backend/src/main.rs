use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use backoffice_backend::{
    build_router,
    config::Config,
    db::connection::{create_pool, DbPool},
    state::AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "backoffice_backend=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load()?;
    tracing::info!(
        bind_addr = %config.bind_addr,
        time_zone = %config.time_zone,
        kss_pass_threshold = config.kss_pass_threshold,
        cors_origins = ?config.cors_allow_origins,
        db_max_connections = config.db_max_connections,
        "Loaded configuration from environment/.env"
    );

    let pool: DbPool = create_pool(&config.database_url, config.db_max_connections).await?;
    sqlx::migrate!("./migrations").run(&pool).await?;
    tracing::info!("Database migrations applied");

    let addr = config.bind_addr;
    let app = build_router(AppState::new(pool, config));

    tracing::info!("Server listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
