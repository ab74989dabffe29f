//! QuickGrub CLI - Browse a menu, price a configured item, place a scripted order.
//!
//! # Usage
//!
//! ```bash
//! # List every product, or one category, or search results
//! quickgrub menu --catalog menu.json
//! quickgrub menu --catalog menu.json --category pizza --search basil
//! quickgrub menu --catalog menu.json --restaurant burger-barn
//!
//! # Price a configured product
//! quickgrub quote --catalog menu.json --product classic-burger \
//!     --select Size=large --select Add-ons=cheese --quantity 2
//!
//! # Run a scripted order through cart and checkout
//! quickgrub order --catalog menu.json --script order.yaml
//! ```
//!
//! # Commands
//!
//! - `menu` - List restaurants and products, optionally filtered
//! - `quote` - Configure one product and print its price
//! - `order` - Fill a cart from a YAML script and check out

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "quickgrub")]
#[command(author, version, about = "QuickGrub ordering tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List products from a catalog file
    Menu {
        /// Catalog JSON file
        #[arg(short, long)]
        catalog: PathBuf,

        /// Only show this restaurant's products
        #[arg(short, long)]
        restaurant: Option<String>,

        /// Only show this category (`all` shows everything)
        #[arg(long)]
        category: Option<String>,

        /// Case-insensitive search on name and description
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Configure a product and print its price
    Quote {
        /// Catalog JSON file
        #[arg(short, long)]
        catalog: PathBuf,

        /// Product id
        #[arg(short, long)]
        product: String,

        /// Option selection as `Option=choice` (repeatable)
        #[arg(short, long = "select", value_name = "OPTION=CHOICE")]
        selections: Vec<String>,

        /// Number of units
        #[arg(short, long, default_value_t = 1, allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Place a scripted order
    Order {
        /// Catalog JSON file
        #[arg(short, long)]
        catalog: PathBuf,

        /// YAML order script
        #[arg(short, long)]
        script: PathBuf,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Menu {
            catalog,
            restaurant,
            category,
            search,
        } => {
            commands::menu::list(
                &catalog,
                restaurant.as_deref(),
                category.as_deref(),
                search.as_deref(),
            )
            .await?;
        }
        Commands::Quote {
            catalog,
            product,
            selections,
            quantity,
        } => {
            commands::quote::price(&catalog, &product, &selections, quantity).await?;
        }
        Commands::Order { catalog, script } => {
            commands::order::place(&catalog, &script).await?;
        }
    }
    Ok(())
}
