//! CarHub Server: vehicle rental booking reservations
//!
//! Main entry point that loads configuration, wires the crates together, and
//! starts the HTTP server.

use std::future::IntoFuture;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use tokio::sync::watch;
use tracing_subscriber::{EnvFilter, fmt};

use carhub_core::config::AppConfig;
use carhub_core::error::AppError;

/// Command-line arguments.
#[derive(Debug, Parser)]
#[command(name = "carhub-server", version, about = "CarHub booking reservation server")]
struct Args {
    /// Directory holding `default.toml` and per-environment overlays.
    #[arg(long, env = "CARHUB_CONFIG_DIR", default_value = "config")]
    config_dir: PathBuf,

    /// Environment overlay to apply (`{config_dir}/{env}.toml`).
    #[arg(long, env = "CARHUB_ENV", default_value = "development")]
    env: String,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let config = match AppConfig::load(&args.config_dir, &args.env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);
    tracing::info!(
        config_dir = %args.config_dir.display(),
        env = %args.env,
        "Configuration loaded"
    );

    if let Err(e) = run(config).await {
        tracing::error!(error = %e, "Server error");
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Starting CarHub");

    let addr = config.server.bind_address();
    let grace = Duration::from_secs(config.server.shutdown_grace_seconds);

    let state = carhub_api::build_state(config).await?;
    let app = carhub_api::build_app(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!(addr = %addr, "CarHub server listening");

    let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
    let server = axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown_signal().await;
            tracing::info!("Shutdown signal received, starting graceful shutdown...");
            let _ = shutdown_tx.send(true);
        })
        .into_future();
    tokio::pin!(server);

    tokio::select! {
        result = &mut server => {
            return result.map_err(|e| AppError::internal(format!("Server error: {e}")));
        }
        _ = shutdown_rx.changed() => {}
    }

    // In-flight requests get the grace period; pending hold timers are
    // dropped with the runtime.
    match tokio::time::timeout(grace, server).await {
        Ok(result) => result.map_err(|e| AppError::internal(format!("Server error: {e}")))?,
        Err(_) => tracing::warn!(
            grace_seconds = grace.as_secs(),
            "Graceful shutdown timed out, closing remaining connections"
        ),
    }

    tracing::info!("CarHub server shut down");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
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
}
