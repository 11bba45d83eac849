//! Server configuration from command-line flags and environment variables.

use std::path::PathBuf;

use clap::Parser;

/// Messaging and notification server for LinkUp.
#[derive(Debug, Clone, Parser)]
#[command(name = "linkup-server", version, about)]
pub struct ServerConfig {
    /// Address to bind
    #[arg(long, env = "LINKUP_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = 5001)]
    pub port: u16,

    /// SQLite database file (`:memory:` for a private in-memory database)
    #[arg(long, env = "LINKUP_DATABASE", default_value = "linkup.db")]
    pub database: PathBuf,

    /// Default log level; RUST_LOG takes precedence
    #[arg(long, env = "LINKUP_LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Keep everything in process memory instead of SQLite
    #[arg(long, env = "LINKUP_EPHEMERAL")]
    pub ephemeral: bool,
}

impl ServerConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
