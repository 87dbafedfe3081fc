//! bookcart - book cart and commercial offers from the command line.
//!
//! # Usage
//!
//! ```bash
//! # Add a book (URL-encoded JSON, as sent by the storefront buttons)
//! bookcart add '%7B%22isbn%22%3A%22c8fabf68%22%2C%22price%22%3A35%7D'
//!
//! # Inspect the cart
//! bookcart list
//! bookcart count
//!
//! # Remove one line, or everything
//! bookcart remove 5d4c3b2a-...
//! bookcart clear
//!
//! # Ask the catalogue for offers and show the best discount
//! bookcart offers
//!
//! # Show the effective configuration
//! bookcart --config ./bookcart.toml config
//! ```
//!
//! ## Log Levels
//! Logs go to stderr. `RUST_LOG` overrides the default `info,bookcart=debug`.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use bookcart_offers::OfferService;
use bookcart_store::{CartManager, FileStore};
use clap::{Parser, Subcommand};
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod error;

use config::AppConfig;
use error::CliResult;

#[derive(Parser)]
#[command(name = "bookcart")]
#[command(author, version, about = "Book cart and commercial offers")]
struct Cli {
    /// Path to the config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add an item from a URL-encoded JSON payload
    Add {
        /// e.g. %7B%22isbn%22%3A%22...%22%7D
        payload: String,
    },
    /// Remove the item with the given keyid
    Remove { keyid: String },
    /// List the items in the cart
    List,
    /// Print the number of items in the cart
    Count,
    /// Empty the cart
    Clear,
    /// Fetch commercial offers and show the best discount
    Offers,
    /// Print the effective configuration
    Config,
}

#[tokio::main]
async fn main() {
    init_tracing();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        error!("Command failed: {e}");
        std::process::exit(e.exit_code());
    }
}

async fn run(cli: Cli) -> CliResult<()> {
    let config = AppConfig::load(cli.config)?;
    let store_dir = config.store_dir();
    debug!(store = %store_dir.display(), key = %config.cart.key, "Opening cart");

    let cart = CartManager::new(FileStore::new(store_dir))
        .with_key(config.cart.key.clone())
        .with_ttl_days(config.cart.ttl_days);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Add { payload } => commands::cart::add(&cart, &payload, &mut out),
        Commands::Remove { keyid } => commands::cart::remove(&cart, &keyid, &mut out),
        Commands::List => commands::cart::list(&cart, &mut out),
        Commands::Count => commands::cart::count(&cart, &mut out),
        Commands::Clear => commands::cart::clear(&cart, &mut out),
        Commands::Offers => {
            let service = OfferService::http(config.offers.clone())?;
            commands::offers::show(&cart, &service, &mut out).await
        }
        Commands::Config => commands::config::show(&config, &mut out),
    }
}

/// Initializes the tracing subscriber on stderr.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=bookcart=trace` - Show trace for bookcart crates only
/// - Default: INFO, DEBUG for bookcart crates
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,bookcart=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
