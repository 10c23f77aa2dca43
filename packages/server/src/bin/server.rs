//! Queue synchronization server for a shared video playlist.
//!
//! Keeps one shared queue and one "now playing" pointer and rebroadcasts every change
//! to all connected clients.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin utage-server
//! cargo run --bin utage-server -- --host 0.0.0.0 --port 3001 --protocol current-video
//! ```

use clap::{Parser, ValueEnum};

use utage_server::{bootstrap::build_server, domain::ProtocolVariant};
use utage_shared::logger::setup_logger;

/// Wire protocol flavour
#[derive(Debug, Clone, Copy, ValueEnum)]
enum Protocol {
    /// Accepts add/queue/play/clear, announces playback as `{"type":"play"}`
    Play,
    /// Accepts add/play/clear, announces playback as `{"type":"currentVideo"}`
    CurrentVideo,
}

impl From<Protocol> for ProtocolVariant {
    fn from(protocol: Protocol) -> Self {
        match protocol {
            Protocol::Play => ProtocolVariant::Play,
            Protocol::CurrentVideo => ProtocolVariant::CurrentVideo,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "utage-server")]
#[command(about = "WebSocket queue sync server for a shared video playlist", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, env = "PORT", default_value = "3001")]
    port: u16,

    /// Protocol variant spoken by this deployment
    #[arg(long, value_enum, default_value_t = Protocol::Play)]
    protocol: Protocol,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_PKG_NAME"), env!("CARGO_BIN_NAME"), "debug");

    let args = Args::parse();
    let variant = ProtocolVariant::from(args.protocol);
    tracing::info!("Using {:?} protocol variant", variant);

    let server = build_server(variant);
    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
