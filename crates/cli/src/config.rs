//! Command-line and environment configuration.
//!
//! Every option can be given as a flag or through the environment variable
//! named next to it; flags win.

use std::time::Duration;

use api::ServerSettings;
use clap::Args;
use db::DbSettings;

/// Database connection and pool options.
#[derive(Debug, Clone, Args)]
pub struct DbArgs {
    #[arg(long, env = "DB_HOST", default_value = "localhost")]
    pub db_host: String,

    #[arg(long, env = "DB_PORT", default_value_t = 5432)]
    pub db_port: u16,

    #[arg(long, env = "DB_USER", default_value = "postgres")]
    pub db_user: String,

    #[arg(long, env = "DB_PASSWORD", default_value = "postgres", hide_env_values = true)]
    pub db_password: String,

    #[arg(long, env = "DB_NAME", default_value = "employees")]
    pub db_name: String,

    #[arg(long, env = "DB_MAX_CONNECTIONS", default_value_t = 25)]
    pub db_max_connections: u32,

    #[arg(long, env = "DB_MIN_CONNECTIONS", default_value_t = 5)]
    pub db_min_connections: u32,

    #[arg(long, env = "DB_CONN_MAX_LIFETIME_SECS", default_value_t = 300)]
    pub db_conn_max_lifetime_secs: u64,

    #[arg(long, env = "DB_CONNECT_TIMEOUT_SECS", default_value_t = 5)]
    pub db_connect_timeout_secs: u64,
}

impl From<&DbArgs> for DbSettings {
    fn from(args: &DbArgs) -> Self {
        Self {
            host: args.db_host.clone(),
            port: args.db_port,
            user: args.db_user.clone(),
            password: args.db_password.clone(),
            name: args.db_name.clone(),
            max_connections: args.db_max_connections,
            min_connections: args.db_min_connections,
            max_lifetime: Duration::from_secs(args.db_conn_max_lifetime_secs),
            connect_timeout: Duration::from_secs(args.db_connect_timeout_secs),
        }
    }
}

/// HTTP server options.
#[derive(Debug, Clone, Args)]
pub struct ServerArgs {
    #[arg(long, env = "APP_HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(long, env = "APP_PORT", default_value_t = 8080)]
    pub port: u16,

    #[arg(long, env = "APP_REQUEST_TIMEOUT_SECS", default_value_t = 10)]
    pub request_timeout_secs: u64,

    #[arg(long, env = "APP_SHUTDOWN_TIMEOUT_SECS", default_value_t = 15)]
    pub shutdown_timeout_secs: u64,

    /// Start without applying pending migrations.
    #[arg(long)]
    pub skip_migrations: bool,
}

impl ServerArgs {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn settings(&self) -> ServerSettings {
        ServerSettings {
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            shutdown_timeout: Duration::from_secs(self.shutdown_timeout_secs),
        }
    }
}
