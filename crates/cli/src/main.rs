//! Go Marketplace CLI - Inspect and edit the persisted cart.
//!
//! # Usage
//!
//! ```bash
//! # Show the cart
//! gm-cli show
//!
//! # Add a product (or one more unit of it)
//! gm-cli add --id a --title Shoe --image-url https://img.example/a.png --price 10
//!
//! # Change quantities
//! gm-cli increment a
//! gm-cli decrement a
//!
//! # Empty the cart
//! gm-cli clear
//! ```
//!
//! # Commands
//!
//! - `show` - List cart lines, item count and subtotal
//! - `add` - Add one unit of a product
//! - `increment` / `decrement` - Change a line's quantity by one
//! - `clear` - Empty the cart and delete the stored blob
//!
//! Storage location, key and decrement policy come from the environment;
//! see `go_marketplace_cart::config`.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "gm-cli")]
#[command(author, version, about = "Go Marketplace cart tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the cart contents
    Show,
    /// Add one unit of a product
    Add {
        /// Product ID
        #[arg(long)]
        id: String,

        /// Product display name
        #[arg(short, long)]
        title: String,

        /// Product image URL
        #[arg(short, long)]
        image_url: String,

        /// Unit price (e.g. 19.99)
        #[arg(short, long)]
        price: Decimal,
    },
    /// Add one unit to an existing line
    Increment {
        /// Product ID
        id: String,
    },
    /// Remove one unit from an existing line
    Decrement {
        /// Product ID
        id: String,
    },
    /// Empty the cart
    Clear,
}

#[tokio::main]
async fn main() {
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "gm_cli=info,go_marketplace_cart=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let store = commands::cart::open_store().await?;

    match cli.command {
        Commands::Show => commands::cart::show(&store),
        Commands::Add {
            id,
            title,
            image_url,
            price,
        } => {
            commands::cart::add(&store, id, title, image_url, price).await?;
        }
        Commands::Increment { id } => {
            commands::cart::increment(&store, &id).await?;
        }
        Commands::Decrement { id } => {
            commands::cart::decrement(&store, &id).await?;
        }
        Commands::Clear => {
            commands::cart::clear(&store).await?;
        }
    }
    Ok(())
}
