//! `employee-service` entry-point.
//!
//! Available sub-commands:
//! - `serve`: apply migrations, then start the HTTP API.
//! - `migrate`: run pending database migrations and exit.

mod config;

use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use db::{DbSettings, PgDepartmentRepository, PgEmployeeRepository};
use tracing::info;
use tracing_subscriber::EnvFilter;

use config::{DbArgs, ServerArgs};

#[derive(Parser)]
#[command(
    name = "employee-service",
    about = "HTTP CRUD service for employees and departments",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Start the REST API server.
    Serve {
        #[command(flatten)]
        server: ServerArgs,
        #[command(flatten)]
        database: DbArgs,
    },
    /// Run pending database migrations.
    Migrate {
        #[command(flatten)]
        database: DbArgs,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "employee_service=info,api=info,db=info,tower_http=info".into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Serve { server, database } => serve(server, database).await,
        Command::Migrate { database } => {
            let pool = db::pool::create_pool(&DbSettings::from(&database))
                .await
                .context("failed to connect to database")?;
            db::pool::run_migrations(&pool)
                .await
                .context("migration failed")?;
            info!("Migrations applied successfully");
            pool.close().await;
            Ok(())
        }
    }
}

async fn serve(server: ServerArgs, database: DbArgs) -> anyhow::Result<()> {
    let pool = db::pool::create_pool(&DbSettings::from(&database))
        .await
        .context("failed to connect to database")?;

    if server.skip_migrations {
        info!("Skipping database migrations");
    } else {
        db::pool::run_migrations(&pool)
            .await
            .context("migration failed")?;
    }

    let state = api::AppState::new(
        Arc::new(PgEmployeeRepository::new(pool.clone())),
        Arc::new(PgDepartmentRepository::new(pool.clone())),
    );
    let settings = server.settings();
    let app = api::app(state, &settings);

    api::serve(&server.bind_addr(), app, &settings, shutdown_signal())
        .await
        .context("server error")?;

    pool.close().await;
    info!("Database pool closed");
    Ok(())
}

/// Resolves on Ctrl-C, or SIGTERM on Unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to listen for Ctrl-C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to listen for SIGTERM: {e}");
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
