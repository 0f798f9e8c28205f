//! Runs the HTTP server.
//!
//! Opens (and migrates) the database, mounts the REST routes and serves until
//! Ctrl-C or SIGTERM. Command-line options win over the environment, which
//! wins over `config.json`.

use crate::{
    api::{router, AppState},
    db::db::Db,
    libs::{
        config::{Config, DatabaseConfig, ServerConfig},
        messages::Message,
    },
    msg_warning,
};
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;
use tokio::net::TcpListener;
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_LOG_FILTER: &str = "tasklane=info,tower_http=info";

#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Address to listen on
    #[arg(long)]
    host: Option<String>,
    /// Port to listen on
    #[arg(short, long)]
    port: Option<u16>,
    /// SQLite database file
    #[arg(long)]
    db: Option<PathBuf>,
}

pub async fn cmd(args: ServeArgs) -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut config = Config::load()?;
    if let Some(host) = args.host {
        config.server.get_or_insert_with(ServerConfig::default).host = host;
    }
    if let Some(port) = args.port {
        config.server.get_or_insert_with(ServerConfig::default).port = port;
    }
    if let Some(path) = args.db {
        config.database.get_or_insert_with(DatabaseConfig::default).path = Some(path);
    }

    let db_path = config.db_path()?;
    let db = Db::open(&db_path)?;
    tracing::info!(path = %db_path.display(), "database ready");

    let address = config.server_address();
    let listener = TcpListener::bind(&address).await?;
    tracing::info!("{}", Message::ServerStarting(address));

    axum::serve(listener, router(AppState::new(db)))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("{}", Message::ServerStopped);
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            msg_warning!(Message::ShutdownSignalFailed(error.to_string()));
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(error) => {
                msg_warning!(Message::ShutdownSignalFailed(error.to_string()));
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
