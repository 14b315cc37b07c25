//! Cart commands.
//!
//! # Usage
//!
//! ```bash
//! # Add a product (repeat to increase quantity)
//! greenleaf add --id 5 --name "Boston Fern" --price 1490
//!
//! # Add a sized product
//! greenleaf add --id 7 --name "Clay Pot" --price 350 --size M
//!
//! # Set a quantity (0 or less removes the line)
//! greenleaf update --id 7 --quantity 3 --size M
//!
//! # Inspect and reset
//! greenleaf show
//! greenleaf total
//! greenleaf clear
//! ```

use greenleaf_core::{Price, Product, ProductId};
use rust_decimal::Decimal;

use super::{CommandError, open_cart};
use crate::config::CliConfig;

/// Product fields accepted by `add`.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub id: i32,
    pub name: String,
    pub price: Decimal,
    pub size: Option<String>,
    pub image_url: Option<String>,
    pub stock: Option<i32>,
}

impl From<NewProduct> for Product {
    fn from(input: NewProduct) -> Self {
        let mut product = Self::new(ProductId::new(input.id), input.name, input.price);
        if let Some(size) = input.size {
            product = product.with_size(size);
        }
        if let Some(url) = input.image_url {
            product = product.with_image_url(url);
        }
        if let Some(stock) = input.stock {
            product = product.with_stock(stock);
        }
        product
    }
}

/// Add one unit of a product.
///
/// # Errors
///
/// Returns `CommandError::Storage` if the cart cannot be saved.
pub fn add(config: &CliConfig, input: NewProduct) -> Result<(), CommandError> {
    let mut cart = open_cart(config)?;
    let product = Product::from(input);
    let name = product.name.clone();

    cart.add_to_cart(product)?;
    tracing::info!("Added {name} to cart ({} lines)", cart.line_count());
    print_cart(config, cart.items(), cart.get_total_price());
    Ok(())
}

/// Set the quantity of a product line.
///
/// # Errors
///
/// Returns `CommandError::Storage` if the cart cannot be saved.
pub fn update(
    config: &CliConfig,
    product_id: i32,
    quantity: i64,
    size: Option<&str>,
) -> Result<(), CommandError> {
    let mut cart = open_cart(config)?;
    cart.update_cart_quantity(ProductId::new(product_id), quantity, size)?;
    print_cart(config, cart.items(), cart.get_total_price());
    Ok(())
}

/// Print every line and the total.
///
/// # Errors
///
/// Returns `CommandError::Storage` if the storage file cannot be opened.
pub fn show(config: &CliConfig) -> Result<(), CommandError> {
    let cart = open_cart(config)?;
    print_cart(config, cart.items(), cart.get_total_price());
    Ok(())
}

/// Print the cart total.
///
/// # Errors
///
/// Returns `CommandError::Storage` if the storage file cannot be opened.
#[allow(clippy::print_stdout)]
pub fn total(config: &CliConfig) -> Result<(), CommandError> {
    let cart = open_cart(config)?;
    println!("{}", Price::new(cart.get_total_price(), config.currency));
    Ok(())
}

/// Empty the cart.
///
/// # Errors
///
/// Returns `CommandError::Storage` if the saved cart cannot be deleted.
pub fn clear(config: &CliConfig) -> Result<(), CommandError> {
    let mut cart = open_cart(config)?;
    let lines = cart.line_count();
    cart.clear_cart()?;
    tracing::info!("Cleared {lines} lines from cart");
    Ok(())
}

#[allow(clippy::print_stdout)]
fn print_cart(config: &CliConfig, items: &[greenleaf_cart::CartItem], total: Decimal) {
    if items.is_empty() {
        println!("Cart is empty");
        return;
    }

    for item in items {
        let size = item
            .product
            .size()
            .map(|s| format!(" (size {s})"))
            .unwrap_or_default();
        println!(
            "{:>6}  {}{}  x{}  {}",
            item.product.id,
            item.product.name,
            size,
            item.quantity.get(),
            Price::new(item.line_total(), config.currency)
        );
    }
    println!("Total: {}", Price::new(total, config.currency));
}
