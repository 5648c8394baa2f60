// API Server Binary Entry Point
//
// Purpose: start the intake API server over the session engine
// Usage: cargo run --features api --bin api_server

use relief_intake_rust::{create_router, AppState, Config};
use std::net::SocketAddr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing (structured logging)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| {
                    // Default log level: info for our crate, warn for others
                    "relief_intake_rust=info,tower_http=debug,axum=debug,warn".into()
                }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting intake API server...");

    // Configuration from environment variables (production sheet by default)
    let config = Config::from_env();

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(3000);

    tracing::info!("Configuration:");
    tracing::info!("  ADMIN_CSV_URL: {}", config.admin_csv_url);
    tracing::info!("  LOGS_CSV_URL: {}", config.logs_csv_url);
    tracing::info!("  SCRIPT_URL: {}", config.script_url);
    tracing::info!(
        "  REGION_ALLOW_LIST: {}",
        config
            .region_allow_list
            .as_ref()
            .map(|l| l.len().to_string())
            .unwrap_or_else(|| "unset".to_string())
    );
    tracing::info!("  PORT: {}", port);

    // Initialize application state
    let state = AppState::new(config)?;

    // Load both feeds up front so the first request sees data; a failed feed
    // degrades to an empty set and the server still starts.
    tracing::info!("Loading sheet feeds...");
    let outcome = state.refresh().await;
    tracing::info!(
        "Initial load: {} admin rows, {} reports",
        outcome.admin.rows,
        outcome.reports.rows
    );
    if let Some(error) = &outcome.admin.error {
        tracing::warn!("Administrative feed unavailable: {}", error);
    }
    if let Some(error) = &outcome.reports.error {
        tracing::warn!("Submission log unavailable: {}", error);
    }

    // Create router with all endpoints and middleware
    let app = create_router(state);

    // Bind to address
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
