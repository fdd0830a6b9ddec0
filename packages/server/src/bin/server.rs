//! WebSocket chat relay server.
//!
//! Broadcasts every message received from a client to all connected clients.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin hiroba-server -- --history data/chat.db
//! ```

use clap::Parser;
use hiroba_server::ServerConfig;
use hiroba_shared::logger::setup_logger;

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "debug");

    let config = ServerConfig::parse();

    // Run the server
    if let Err(e) = hiroba_server::run_server(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
