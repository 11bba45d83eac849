//! LinkUp messaging and notification server.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin linkup-server -- --port 5001 --database linkup.db
//! ```

use clap::Parser;
use linkup_server::ServerConfig;
use linkup_shared::logger::setup_logger;

#[tokio::main]
async fn main() {
    let config = ServerConfig::parse();

    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), &config.log_level);

    if let Err(e) = linkup_server::run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
