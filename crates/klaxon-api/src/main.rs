//! Klaxon alarm service entry point.

use std::error::Error;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use klaxon_api::config::{AppConfig, StoreDriver};
use klaxon_api::{routes, state::AppState, sweep};
use klaxon_core::clock::{Clock, SystemClock};
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Initialize tracing subscriber. Projection failures surface here.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    tracing::info!("Starting Klaxon alarm service");

    let config = AppConfig::from_env()?;
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    // Compose the store adapters once, from the configured driver.
    let app_state = match config.driver {
        StoreDriver::Relational => {
            let write_pool = PgPoolOptions::new()
                .max_connections(10)
                .connect(config.write_database_url()?)
                .await?;
            let read_pool = PgPoolOptions::new()
                .max_connections(10)
                .connect(config.read_database_url()?)
                .await?;
            AppState::relational(write_pool, read_pool, clock)
        }
        StoreDriver::InMemory => AppState::in_memory(clock),
    };

    sweep::spawn_health_sweep(
        app_state.service.clone(),
        Duration::from_secs(config.sweep_interval_secs),
    );

    // Build router.
    // TODO: Replace CorsLayer::permissive() with restricted origins for production.
    let app = Router::new()
        .merge(routes::health::router())
        .nest("/api/v1/alarms", routes::alarms::router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .map_err(|e| format!("invalid HOST:PORT combination: {e}"))?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app).await?;

    Ok(())
}
