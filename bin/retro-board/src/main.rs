//! # Retro-Board Binary
//!
//! The entry point that assembles the application based on compile-time features.

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use rb_api::AppState;
use rb_config::{LogFormat, Settings};
use rb_core::{BoardRepo, BoardService};
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[cfg(feature = "db-sqlite")]
use rb_db_sqlite::SqliteBoardRepo;

#[cfg(all(feature = "store-memory", not(feature = "db-sqlite")))]
use rb_store_memory::MemoryBoardRepo;

#[cfg(not(any(feature = "db-sqlite", feature = "store-memory")))]
compile_error!("enable a storage backend: `db-sqlite` or `store-memory`");

#[tokio::main]
async fn main() -> ExitCode {
    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("retro-board: {e}");
            return ExitCode::FAILURE;
        }
    };

    init_tracing(&settings);

    match run(settings).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %format!("{e:#}"), "retro-board stopped");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(settings: &Settings) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&settings.log.filter));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match settings.log.format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.init(),
    }
}

async fn run(settings: Settings) -> anyhow::Result<()> {
    // 1. Storage. Failing to reach it here is fatal.
    let repo = open_store(&settings).await?;

    // 2. Service + HTTP
    let state = Arc::new(AppState {
        boards: BoardService::new(repo),
    });
    let app = rb_api::router(state, &settings.server.path_prefix);

    let address = settings.server.bind_address();
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind {address}"))?;

    info!(%address, prefix = %settings.server.path_prefix, "retro-board listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("retro-board shut down");
    Ok(())
}

#[cfg(feature = "db-sqlite")]
async fn open_store(settings: &Settings) -> anyhow::Result<Arc<dyn BoardRepo>> {
    use secrecy::ExposeSecret;

    let repo = SqliteBoardRepo::connect(
        settings.database.url.expose_secret(),
        settings.database.max_connections,
    )
    .await
    .context("failed to connect to the board store")?;
    Ok(Arc::new(repo))
}

#[cfg(all(feature = "store-memory", not(feature = "db-sqlite")))]
async fn open_store(_settings: &Settings) -> anyhow::Result<Arc<dyn BoardRepo>> {
    warn!("using the in-memory board store; boards are lost on exit");
    Ok(Arc::new(MemoryBoardRepo::new()))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
        info!("received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
                info!("received terminate signal, shutting down");
            }
            Err(e) => {
                warn!(error = %e, "failed to install SIGTERM handler");
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
