//! Terminal chat client.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin hiroba-client -- --username alice
//! ```

use clap::Parser;
use hiroba_shared::logger::setup_logger;

#[derive(Debug, Parser)]
#[command(name = "hiroba-client", version, about = "Terminal client for the Hiroba chat relay")]
struct Args {
    /// WebSocket endpoint of the server
    #[arg(long, env = "HIROBA_URL", default_value = "ws://127.0.0.1:4040/websocket")]
    url: String,

    /// Name shown next to your messages
    #[arg(short, long)]
    username: String,
}

#[tokio::main]
async fn main() {
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();

    if let Err(e) = hiroba_client::run_client(&args.url, args.username).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}
