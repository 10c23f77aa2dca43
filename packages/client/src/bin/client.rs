//! Terminal client for the Utage shared playlist.
//!
//! Connects to a queue server, shows the shared queue and what is playing, and turns
//! typed commands (`add`, `play`, `remove`, `move`, `shuffle`, `clear`, ...) into
//! wire messages.
//! Automatically reconnects on disconnection (max 5 attempts with 5 second interval).
//!
//! Run with:
//! ```not_rust
//! cargo run --bin utage-client -- --name Alice
//! cargo run --bin utage-client -- -u ws://192.168.0.10:3001/ws -n Bob
//! ```

use clap::Parser;

use utage_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "utage-client")]
#[command(about = "Terminal client for a shared video playlist", long_about = None)]
struct Args {
    /// Display name attached to the links you add
    #[arg(short = 'n', long)]
    name: Option<String>,

    /// WebSocket server URL
    #[arg(short = 'u', long, default_value = "ws://127.0.0.1:3001/ws")]
    url: String,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_PKG_NAME"), env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();

    // Run the client
    if let Err(e) = utage_client::run_client(args.url, args.name).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}
