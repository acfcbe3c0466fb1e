//! Dify admin gateway
//!
//! Connects to the database, runs migrations and serves the apps REST API.

mod config;
mod logging;

use anyhow::{Context, Result};
use apps_service::AppsServiceModule;
use axum::Router;
use clap::{Parser, Subcommand};
use config::AppConfig;
use sea_orm::{ConnectOptions, Database};
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

#[derive(Debug, Parser)]
#[command(name = "dify-gateway", version, about = "Dify admin gateway")]
struct Cli {
    /// YAML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Listen address, overrides `server.bind_addr`
    #[arg(long)]
    bind: Option<String>,

    /// Database URL, overrides `database.url`
    #[arg(long)]
    database_url: Option<String>,

    /// Raise the configured log level one step per flag
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Print the effective configuration as YAML and exit
    #[arg(long)]
    print_config: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Serve the REST API (default)
    Serve,
    /// Run database migrations and exit
    Migrate,
}

impl Cli {
    fn resolve_config(&self) -> Result<AppConfig> {
        let mut cfg = AppConfig::load(self.config.as_deref())?;
        if let Some(bind) = &self.bind {
            cfg.server.bind_addr = bind.clone();
        }
        if let Some(url) = &self.database_url {
            cfg.database.url = url.clone();
        }
        Ok(cfg)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let cfg = cli.resolve_config()?;

    if cli.print_config {
        print!("{}", cfg.to_yaml()?);
        return Ok(());
    }

    logging::init(&cfg.logging, cli.verbose)?;

    let mut opts = ConnectOptions::new(cfg.database.url.clone());
    opts.sqlx_logging(false);
    let db = Database::connect(opts)
        .await
        .with_context(|| format!("failed to connect to {}", cfg.database.url))?;

    let module = AppsServiceModule::new();
    module.migrate(&db).await?;
    if matches!(cli.command, Some(Command::Migrate)) {
        return Ok(());
    }

    module.init(cfg.apps.clone(), Arc::new(db))?;
    let router = module
        .register_rest(Router::new())?
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let listener = tokio::net::TcpListener::bind(&cfg.server.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", cfg.server.bind_addr))?;
    tracing::info!(
        addr = %cfg.server.bind_addr,
        base_path = %cfg.apps.base_path,
        "Dify admin gateway listening"
    );

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("Gateway stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => tracing::error!(error = %e, "failed to install SIGTERM handler"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("Shutdown signal received");
}
