mod app;
mod cache;
mod config;
mod handlers;
mod picker;
mod state;
mod storage;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use listenfd::ListenFd;
use tokio::{net::TcpListener, signal};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use novamuse_core::storage::QuoteRepository;

use crate::{app::create_app, config::Config, state::AppState};

/// NovaMuse - Browse, search and curate a collection of quotes
#[derive(Parser, Debug)]
#[command(name = "novamuse")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Host address to bind the server to
    #[arg(long, short = 'H', default_value = "0.0.0.0", env = "HOST")]
    host: String,

    /// Port to listen on
    #[arg(long, short, default_value = "3000", env = "PORT")]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "novamuse=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!(
        table = %config.table_name,
        browse_order = ?config.browse_order,
        "Loaded configuration"
    );

    let repo = init_repository(&config).await;
    let state = AppState::new(repo, config);

    let app = create_app(state);

    // Auto-reload support via listenfd
    let mut listenfd = ListenFd::from_env();
    let listener = match listenfd.take_tcp_listener(0)? {
        // If we are given a tcp listener on listen fd 0, use that one
        Some(listener) => {
            listener.set_nonblocking(true)?;
            TcpListener::from_std(listener)?
        }
        // Otherwise fall back to CLI-specified host:port
        None => {
            let addr = format!("{}:{}", cli.host, cli.port);
            TcpListener::bind(&addr).await?
        }
    };

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// In-memory backend, pre-loaded with the sample quotes.
#[cfg(feature = "inmemory")]
async fn init_repository(config: &Config) -> Arc<dyn QuoteRepository> {
    use novamuse_core::quote::generate_sample_quotes;

    let quotes = generate_sample_quotes(chrono::Utc::now());
    tracing::info!(
        table = %config.table_name,
        quotes = quotes.len(),
        "Using in-memory storage with sample quotes"
    );
    Arc::new(storage::InMemoryRepository::with_quotes(quotes))
}

#[cfg(feature = "dynamodb")]
async fn init_repository(config: &Config) -> Arc<dyn QuoteRepository> {
    let repo = storage::DynamoDbRepository::from_env(&config.table_name).await;
    tracing::info!(table = %repo.table_name(), "Using DynamoDB storage");
    Arc::new(repo)
}

/// Wait for shutdown signals (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
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
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, shutting down...");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, shutting down...");
        }
    }
}
