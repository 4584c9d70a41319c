//! Burvon CLI - drive the cart engine from the command line.
//!
//! # Usage
//!
//! ```bash
//! # Add two units of size M (product-level stock 5)
//! burvon cart add --product-id P1 --name "Lumière Ring" --price "₱1,299.00" \
//!     --category "Rings Collection" --stock 5 --quantity 2 --size M
//!
//! # Change the size, with size-specific stock 3
//! burvon cart size P1_M L --stock 3
//!
//! # Select a line and check it out
//! burvon select toggle P1_L
//! burvon checkout
//! ```
//!
//! # Commands
//!
//! - `cart` - Add, remove, update and list cart lines
//! - `select` - Manage the checkout selection
//! - `checkout` - Print the selected lines as JSON and remove them
//! - `wishlist` - Save and remove products
//!
//! State lives under `BURVON_STORAGE_DIR` (default `.burvon`). Logs go to
//! stderr; set `BURVON_LOG_FORMAT=json` for structured output.

#![cfg_attr(not(test), forbid(unsafe_code))]

use burvon_cart::{CartConfig, CartEngine};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

use commands::{CartAction, CliError, SelectAction, WishlistAction};

#[derive(Parser)]
#[command(name = "burvon")]
#[command(author, version, about = "Burvon cart engine CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage cart lines
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Manage the checkout selection
    Select {
        #[command(subcommand)]
        action: SelectAction,
    },
    /// Hand the selected lines to checkout and remove them from the cart
    Checkout,
    /// Manage the wishlist
    Wishlist {
        #[command(subcommand)]
        action: WishlistAction,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "burvon_cart=info,burvon_cli=info".into());

    // JSON lines when BURVON_LOG_FORMAT=json, human-readable text otherwise
    let json = std::env::var("BURVON_LOG_FORMAT").is_ok_and(|format| format == "json");
    let json_layer = json.then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_writer(std::io::stderr)
    });
    let text_layer = (!json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let config = CartConfig::from_env()?;
    let mut engine = CartEngine::open(config);
    engine.init();

    let result = match cli.command {
        Commands::Cart { action } => commands::cart::run(engine.cart_mut(), action),
        Commands::Select { action } => commands::selection::run(engine.cart_mut(), action),
        Commands::Checkout => commands::selection::checkout(engine.cart_mut()),
        Commands::Wishlist { action } => commands::wishlist::run(engine.wishlist_mut(), action),
    };

    engine.dispose();
    result
}
