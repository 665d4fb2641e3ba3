//! Janken document store server.
//!
//! Holds match documents in memory, applies partial-field updates and pushes
//! the full document to every WebSocket subscriber after each write.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin janken-store
//! cargo run --bin janken-store -- --host 0.0.0.0 --port 3000
//! ```

use std::sync::Arc;

use clap::Parser;
use janken_shared::{logger::setup_logger, time::SystemClock};
use janken_store::{ui::Server, usecase::StoreUseCases};

#[derive(Parser, Debug)]
#[command(name = "janken-store")]
#[command(about = "In-memory document store with live snapshot subscriptions", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value = "8080")]
    port: u16,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "debug");

    let args = Args::parse();

    let usecases = StoreUseCases::in_memory(Arc::new(SystemClock));
    let server = Server::new(usecases);
    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
