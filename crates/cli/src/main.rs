//! Greenleaf CLI - Drive the nursery cart from the command line.
//!
//! # Usage
//!
//! ```bash
//! # Add a product to the cart
//! greenleaf add --id 5 --name "Boston Fern" --price 1490
//!
//! # Change a quantity (0 removes the line)
//! greenleaf update --id 5 --quantity 2
//!
//! # Show the cart, or just its total
//! greenleaf show
//! greenleaf total
//!
//! # Quote a checkout, then clear the cart once the order is placed
//! greenleaf quote --city Barnaul --address "Lenina 1" --payment card
//! greenleaf clear
//! ```
//!
//! # Commands
//!
//! - `add` / `update` / `clear` - Cart mutations
//! - `show` / `total` - Inspect the cart
//! - `quote` - Compute the checkout amounts for the current cart
//!
//! The cart is kept in the storage file named by `GREENLEAF_STORAGE_PATH`
//! (see [`config`]). Logs go to stderr; set `RUST_LOG` to change the level.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand, ValueEnum};
use greenleaf_cart::checkout::PaymentMethod;
use rust_decimal::Decimal;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;

use commands::cart::NewProduct;
use config::CliConfig;

#[derive(Parser)]
#[command(name = "greenleaf")]
#[command(author, version, about = "Greenleaf nursery cart tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add one unit of a product to the cart
    Add {
        /// Product ID
        #[arg(long)]
        id: i32,

        /// Product name
        #[arg(short, long)]
        name: String,

        /// Unit price in the shop currency
        #[arg(short, long)]
        price: Decimal,

        /// Size variant
        #[arg(short, long)]
        size: Option<String>,

        /// Product image URL
        #[arg(long)]
        image_url: Option<String>,

        /// Units in stock
        #[arg(long)]
        stock: Option<i32>,
    },
    /// Set the quantity of a cart line (0 or less removes it)
    Update {
        /// Product ID
        #[arg(long)]
        id: i32,

        /// New quantity
        #[arg(short, long, allow_hyphen_values = true)]
        quantity: i64,

        /// Only touch this size variant
        #[arg(short, long)]
        size: Option<String>,
    },
    /// Print the cart
    Show,
    /// Print the cart total
    Total,
    /// Empty the cart
    Clear,
    /// Compute checkout amounts for the current cart
    Quote {
        /// Customer city
        #[arg(long)]
        city: String,

        /// Delivery address (omit for pickup)
        #[arg(long, requires = "city")]
        address: Option<String>,

        /// Payment method
        #[arg(long, value_enum, default_value_t = PaymentArg::Card)]
        payment: PaymentArg,

        /// Account balance, for balance payments
        #[arg(long)]
        balance: Option<Decimal>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum PaymentArg {
    Balance,
    Card,
    Cash,
}

impl From<PaymentArg> for PaymentMethod {
    fn from(arg: PaymentArg) -> Self {
        match arg {
            PaymentArg::Balance => Self::Balance,
            PaymentArg::Card => Self::Card,
            PaymentArg::Cash => Self::Cash,
        }
    }
}

fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("greenleaf=info,greenleaf_cart=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli);

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::from_env()?;

    match cli.command {
        Commands::Add {
            id,
            name,
            price,
            size,
            image_url,
            stock,
        } => commands::cart::add(
            &config,
            NewProduct {
                id,
                name,
                price,
                size,
                image_url,
                stock,
            },
        )?,
        Commands::Update { id, quantity, size } => {
            commands::cart::update(&config, id, quantity, size.as_deref())?;
        }
        Commands::Show => commands::cart::show(&config)?,
        Commands::Total => commands::cart::total(&config)?,
        Commands::Clear => commands::cart::clear(&config)?,
        Commands::Quote {
            city,
            address,
            payment,
            balance,
        } => commands::checkout::quote(&config, city, address, payment.into(), balance)?,
    }
    Ok(())
}
