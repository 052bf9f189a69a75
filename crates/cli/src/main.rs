//! RocketShoes CLI - Cart operations from the command line.
//!
//! # Usage
//!
//! ```bash
//! # Show the current cart
//! rocket-shoes show
//!
//! # Add one unit of product 1
//! rocket-shoes add 1
//!
//! # Set product 1 to exactly 4 units
//! rocket-shoes update 1 4
//!
//! # Remove product 1 from the cart
//! rocket-shoes remove 1
//! ```
//!
//! # Environment Variables
//!
//! - `ROCKETSHOES_API_URL` - Base URL of the stock/product catalog API
//! - `ROCKETSHOES_CART_PATH` - Path of the persisted cart file
//!   (default: `rocketshoes-cart.json`)

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

use rocket_shoes_cart::{CartConfig, CartError, CartStore, HttpCatalog, JsonFileStorage};
use rocket_shoes_core::{Cart, ProductId};

#[derive(Parser)]
#[command(name = "rocket-shoes")]
#[command(author, version, about = "RocketShoes cart CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the current cart
    Show,
    /// Add one unit of a product to the cart
    Add {
        /// Product id
        product_id: i32,
    },
    /// Remove a product from the cart
    Remove {
        /// Product id
        product_id: i32,
    },
    /// Set a product to an exact amount
    Update {
        /// Product id
        product_id: i32,
        /// Desired amount (zero or less is a no-op)
        amount: i64,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing with EnvFilter, defaulting to warnings only so
    // command output stays readable
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = CartConfig::from_env()?;
    let store = CartStore::new(
        HttpCatalog::new(&config.api_base_url),
        JsonFileStorage::new(config.storage_path),
    );

    let result = match cli.command {
        Commands::Show => Ok(()),
        Commands::Add { product_id } => store.add_product(ProductId::new(product_id)).await,
        Commands::Remove { product_id } => store.remove_product(ProductId::new(product_id)),
        Commands::Update { product_id, amount } => {
            store
                .update_product_amount(ProductId::new(product_id), amount)
                .await
        }
    };

    match result {
        Ok(()) => {
            print_cart(&store.cart());
            Ok(())
        }
        // The store reports error kinds; user-facing wording lives here
        Err(e) => Err(user_message(&e).into()),
    }
}

/// Map a cart error kind to the message shown to the user.
fn user_message(err: &CartError) -> String {
    match err {
        CartError::OutOfStock => "Requested quantity is out of stock".to_string(),
        CartError::NotInCart(id) => format!("Product {id} is not in the cart"),
        CartError::Catalog(_) => format!("Could not reach the catalog service ({err})"),
    }
}

#[allow(clippy::print_stdout)]
fn print_cart(cart: &Cart) {
    if cart.is_empty() {
        println!("Cart is empty");
        return;
    }

    println!(
        "{:>5}  {:<30} {:>7} {:>10} {:>10}",
        "id", "product", "qty", "price", "total"
    );
    for item in cart {
        println!(
            "{:>5}  {:<30} {:>7} {:>10.2} {:>10.2}",
            item.id,
            item.name,
            item.amount,
            item.price,
            item.line_total()
        );
    }
    println!(
        "{} items, subtotal {:.2}",
        cart.item_count(),
        cart.subtotal()
    );
}
