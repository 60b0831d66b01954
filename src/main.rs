//! Tollgate: a minimal bearer-token authenticated request-processing API.
//!
//! This is the application entry point. It loads configuration from the
//! process environment, initializes tracing, sets up the axum router with
//! both routes, and starts the HTTP server.

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tollgate::config::{AppConfig, LogFormat};
use tollgate::http;
use tollgate::routes::create_router;
use tollgate::state::AppState;

/// Tollgate: a minimal authenticated request-processing API
#[derive(Parser, Debug)]
#[command(name = "tollgate", version, about)]
struct Args {
    /// Listen port (overrides the PORT environment variable)
    #[arg(short, long)]
    port: Option<u16>,

    /// Log level filter (e.g., "tollgate=debug,tower_http=info")
    #[arg(short, long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command line arguments
    let args = Args::parse();

    // Load configuration from the environment
    let mut config = AppConfig::from_env()?;
    if let Some(port) = args.port {
        config.port = port;
    }

    // Initialize tracing with priority: CLI > env > default
    let log_filter = args
        .log_level
        .or_else(|| std::env::var("RUST_LOG").ok())
        .unwrap_or_else(|| config.default_log_filter().to_string());

    let registry = tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&log_filter));
    match config.log_format {
        LogFormat::Text => registry.with(tracing_subscriber::fmt::layer()).init(),
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json())
            .init(),
    }

    tracing::info!(
        port = config.port,
        environment = %config.environment,
        debug = config.debug,
        "Loaded configuration"
    );

    // Create application state and router
    let state = AppState::new(config.clone());
    let app = create_router(state);

    // Start server; blocks until SIGTERM/SIGINT
    http::start_server(app, &config).await?;

    Ok(())
}
