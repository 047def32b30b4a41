use anyhow::Context;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use voyra_api::{
    app,
    state::{AppState, AuthConfig, RateLimiter},
};
use voyra_core::calendar::service_offset;
use voyra_core::Repositories;
use voyra_store::app_config::{Config, StorageBackend};
use voyra_store::{pg_repositories, DbClient, InMemoryStore, RedisClient};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "voyra_api=debug,voyra_core=debug,tower_http=debug,axum::rejection=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load().context("Failed to load config")?;
    tracing::info!("Starting Voyra API on port {}", config.server.port);

    let repos = match config.storage.backend {
        StorageBackend::Postgres => {
            let url = config
                .storage
                .database_url
                .as_deref()
                .context("storage.database_url is required for the postgres backend")?;
            let db = DbClient::new(url, config.storage.max_connections)
                .await
                .context("Failed to connect to Postgres")?;
            db.migrate().await.context("Failed to run migrations")?;
            pg_repositories(db.pool)
        }
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage; data is lost on restart");
            Repositories::from_single(Arc::new(InMemoryStore::new()))
        }
    };

    let offset = service_offset(config.calendar.utc_offset_minutes)?;
    let auth = AuthConfig {
        secret: config.auth.jwt_secret.clone(),
    };
    let mut state = AppState::new(repos, auth, offset, &config.booking);

    match config.redis.url.as_deref() {
        Some(url) => {
            let redis = RedisClient::new(url).context("Invalid Redis URL")?;
            state = state.with_rate_limiter(RateLimiter::new(redis, &config.rate_limit));
        }
        None => tracing::info!("No Redis configured; rate limiting disabled"),
    }

    let app = app(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>()).await?;
    Ok(())
}
