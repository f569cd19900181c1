//! cartwire CLI - drive the cart page controllers against a live backend.
//!
//! # Usage
//!
//! ```bash
//! # Add two units of product 17 to the cart
//! cartwire add --product-id 17 --quantity 2
//!
//! # Show the cart
//! cartwire show
//!
//! # Step a cart item's quantity up or down
//! cartwire plus --item 42
//! cartwire minus --item 42
//!
//! # Type a quantity into a cart item's input
//! cartwire set --item 42 --quantity 5
//!
//! # Remove a cart item
//! cartwire remove --item 42
//! ```
//!
//! # Environment Variables
//!
//! - `CARTWIRE_BASE_URL` - Backend base URL (default `http://127.0.0.1:8000`)
//! - `CARTWIRE_SESSION_COOKIE` - `Cookie` header sent with every request
//! - `CARTWIRE_CURRENCY` - Currency code for rendered amounts (default `USD`)
//! - `RUST_LOG` - Log filter

#![cfg_attr(not(test), forbid(unsafe_code))]

use cartwire_core::{CartItemId, ProductId};
use cartwire_storefront::{CartEvent, ClientConfig};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

use commands::AppError;

#[derive(Parser)]
#[command(name = "cartwire")]
#[command(author, version, about = "Cart page controllers from the terminal")]
struct Cli {
    /// Emit logs as JSON
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a product to the cart, as the product page button does
    Add {
        /// Product id (the button's `data-product-id`)
        #[arg(short, long)]
        product_id: ProductId,

        /// Text of the quantity input; blank or non-numeric means 1
        #[arg(short, long, default_value = "")]
        quantity: String,
    },
    /// Show the cart rows and subtotal
    Show,
    /// Click the plus stepper of a cart item
    Plus {
        #[arg(short, long)]
        item: CartItemId,
    },
    /// Click the minus stepper of a cart item
    Minus {
        #[arg(short, long)]
        item: CartItemId,
    },
    /// Enter a quantity into a cart item's input
    Set {
        #[arg(short, long)]
        item: CartItemId,

        /// Text entered; blank, non-numeric or below 1 means 1
        #[arg(short, long)]
        quantity: String,
    },
    /// Click the remove button of a cart item
    Remove {
        #[arg(short, long)]
        item: CartItemId,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.log_json);

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn init_tracing(json: bool) {
    // Logs go to stderr so stdout carries only the rendered cart
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "cartwire_cli=info,cartwire_storefront=info".into());

    let registry = tracing_subscriber::registry().with(env_filter);
    if json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

async fn run(cli: Cli) -> Result<(), AppError> {
    let config = ClientConfig::from_env()?;
    tracing::debug!(base_url = %config.base_url, "Loaded client config");

    match cli.command {
        Commands::Add {
            product_id,
            quantity,
        } => commands::add::run(&config, product_id, &quantity).await,
        Commands::Show => commands::cart::show(&config).await,
        Commands::Plus { item } => {
            commands::cart::dispatch(&config, CartEvent::click(Some(item), "qty-btn plus")).await
        }
        Commands::Minus { item } => {
            commands::cart::dispatch(&config, CartEvent::click(Some(item), "qty-btn minus")).await
        }
        Commands::Set { item, quantity } => {
            commands::cart::dispatch(&config, CartEvent::quantity_change(item, quantity)).await
        }
        Commands::Remove { item } => {
            commands::cart::dispatch(&config, CartEvent::click(Some(item), "btn-remove-item"))
                .await
        }
    }
}
