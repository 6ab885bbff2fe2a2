//! costfinders-api server entry point.
//!
//! Loads configuration, opens the marketplace store and serves the REST
//! and SEO endpoints with Axum.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use costfinders_api::api;
use costfinders_api::app_state::AppState;
use costfinders_api::config::{AppConfig, StoreBackend};
use costfinders_api::persistence::{MarketplaceStore, MemoryStore, PostgresStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = AppConfig::from_env().context("invalid LISTEN_ADDR")?;

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if config.log_json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    tracing::info!(
        addr = %config.listen_addr,
        env = %config.site.deploy_env,
        base_url = %config.site.base_url,
        "starting costfinders-api"
    );

    // Build persistence layer
    let store: Arc<dyn MarketplaceStore> = match config.store_backend {
        StoreBackend::Memory => {
            tracing::warn!("using in-memory demo store");
            Arc::new(MemoryStore::seeded().await)
        }
        StoreBackend::Postgres => {
            let store = PostgresStore::connect(&config)
                .await
                .context("connecting to database")?;
            if config.database_run_migrations {
                store.migrate().await.context("running migrations")?;
                tracing::info!("migrations applied");
            }
            Arc::new(store)
        }
    };

    // Build application state
    let app_state = AppState::new(store, config.site.clone());

    // Build router
    let app = api::build_app(app_state, Duration::from_secs(config.request_timeout_secs)).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive()),
    );

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("binding {}", config.listen_addr))?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
