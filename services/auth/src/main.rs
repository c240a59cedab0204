use std::sync::Arc;

use anyhow::Context as _;
use sea_orm::Database;
use tracing::info;

use rentwise_auth::config::AuthConfig;
use rentwise_auth::router::build_router;
use rentwise_auth::state::AppState;
use rentwise_core::config::Config as _;
use rentwise_core::tracing::init_tracing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = AuthConfig::from_env().context("failed to load config from environment")?;
    let otp_ttl = config.otp_ttl()?;

    let db = Database::connect(&config.database_url)
        .await
        .context("failed to connect to database")?;

    let state = AppState {
        db: Arc::new(db),
        otp_ttl,
    };

    let router = build_router(state);
    let addr = format!("0.0.0.0:{}", config.auth_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    info!(otp_ttl_secs = config.otp_ttl_secs, "auth service listening on {addr}");
    axum::serve(listener, router).await.context("server error")?;
    Ok(())
}
