mod app;
mod config;
mod handlers;
mod lambda;
mod state;
mod storage;

use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use listenfd::ListenFd;
use tokio::{net::TcpListener, signal};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use posts_core::storage::PostRepository;
use posts_core::Operation;

use crate::{
    app::create_app,
    config::Config,
    state::AppState,
    storage::{DynamoDbRepository, InMemoryRepository},
};

/// Posts - CRUD functions over a single DynamoDB table
#[derive(Parser, Debug)]
#[command(name = "posts")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve every operation over HTTP for local development
    Serve {
        /// Host address to bind the server to
        #[arg(long, short = 'H', default_value = "0.0.0.0", env = "HOST")]
        host: String,

        /// Port to listen on
        #[arg(long, short, default_value = "3000", env = "PORT")]
        port: u16,

        /// Storage backend
        #[arg(long, value_enum, default_value_t = Storage::Dynamodb, env = "POSTS_STORAGE")]
        storage: Storage,
    },
    /// Run as a serverless function handling one operation
    Lambda {
        /// Operation this deployment handles: get, create, update, delete or list
        #[arg(long, short, env = "POSTS_OPERATION")]
        operation: Operation,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Storage {
    Dynamodb,
    Memory,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Serve {
            host,
            port,
            storage,
        } => {
            init_tracing(LogFormat::Pretty);
            let repo = match storage {
                Storage::Dynamodb => dynamodb_repository()?,
                Storage::Memory => {
                    tracing::warn!("Using in-memory storage; data is lost on exit");
                    Arc::new(InMemoryRepository::new())
                }
            };
            serve(&host, port, repo).await
        }
        Command::Lambda { operation } => {
            init_tracing(LogFormat::Json);
            let repo = dynamodb_repository()?;
            lambda::run(repo, operation)
                .await
                .map_err(|err| anyhow::anyhow!(err))
        }
    }
}

fn dynamodb_repository() -> Result<Arc<dyn PostRepository>> {
    let config = Config::from_env()?;
    tracing::info!(table = %config.table_name, "Using DynamoDB storage");
    Ok(Arc::new(DynamoDbRepository::new(config)))
}

enum LogFormat {
    Pretty,
    Json,
}

fn init_tracing(format: LogFormat) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "posts=debug,tower_http=debug".into());

    match format {
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init(),
        // The platform timestamps every log line itself.
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_ansi(false)
                    .without_time(),
            )
            .init(),
    }
}

async fn serve(host: &str, port: u16, repo: Arc<dyn PostRepository>) -> Result<()> {
    let app = create_app(AppState::new(repo));

    // Auto-reload support via listenfd
    let mut listenfd = ListenFd::from_env();
    let listener = match listenfd.take_tcp_listener(0)? {
        // If we are given a tcp listener on listen fd 0, use that one
        Some(listener) => {
            listener.set_nonblocking(true)?;
            TcpListener::from_std(listener)?
        }
        // Otherwise fall back to CLI-specified host:port
        None => TcpListener::bind(format!("{host}:{port}")).await?,
    };

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Wait for shutdown signals (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::error!(error = %err, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "Failed to install SIGTERM handler");
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
