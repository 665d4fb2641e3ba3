//! Janken CLI client.
//!
//! Creates a room (and prints its code) or joins an existing one, then plays
//! rock-paper-scissors against the other player in that room.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin janken-client -- --name Ann
//! cargo run --bin janken-client -- --name Bob --room AB12
//! ```

use std::time::Duration;

use clap::Parser;

use janken_client::{
    controller::DEFAULT_RESET_DELAY,
    runner::{ClientOptions, run_client},
};
use janken_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "janken-client")]
#[command(about = "Rock-paper-scissors client synchronized through the Janken store", long_about = None)]
struct Args {
    /// Display name
    #[arg(short = 'n', long)]
    name: String,

    /// Room code to join; a new room is created when omitted
    #[arg(short = 'r', long)]
    room: Option<String>,

    /// Base URL of the Janken store
    #[arg(short = 'u', long, default_value = "http://127.0.0.1:8080")]
    store_url: String,

    /// Seconds between a result and the next round
    #[arg(long, default_value_t = DEFAULT_RESET_DELAY.as_secs())]
    reset_delay: u64,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();
    let options = ClientOptions {
        store_url: args.store_url,
        name: args.name,
        room: args.room,
        reset_delay: Duration::from_secs(args.reset_delay),
    };

    if let Err(e) = run_client(options).await {
        if e.already_shown() {
            tracing::debug!("Session ended: {}", e);
        } else if e.is_user_facing() {
            eprintln!("{}", e);
        } else {
            tracing::error!("Client error: {}", e);
        }
        std::process::exit(1);
    }
}
