//! Checkout quote command.
//!
//! # Usage
//!
//! ```bash
//! # Pickup, paid by card
//! greenleaf quote --city Barnaul
//!
//! # Delivery, paid from account balance
//! greenleaf quote --city Barnaul --address "Lenina 1" --payment balance --balance 5000
//! ```

use greenleaf_cart::checkout::{self, CheckoutRequest, FulfillmentMethod, PaymentMethod};
use rust_decimal::Decimal;

use super::{CommandError, open_cart};
use crate::config::CliConfig;

/// Print the amounts the order endpoint would be sent, as JSON.
///
/// Delivery is requested when an address is given; otherwise the order is
/// a pickup in `city`.
///
/// # Errors
///
/// Returns `CommandError::Checkout` if the request fails validation.
#[allow(clippy::print_stdout)]
pub fn quote(
    config: &CliConfig,
    city: String,
    address: Option<String>,
    payment: PaymentMethod,
    balance: Option<Decimal>,
) -> Result<(), CommandError> {
    let cart = open_cart(config)?;

    let fulfillment = match address {
        Some(address) => FulfillmentMethod::Delivery { address },
        None => FulfillmentMethod::Pickup,
    };
    let request = CheckoutRequest {
        city,
        fulfillment,
        payment,
        balance,
    };

    let quote = checkout::quote(cart.items(), &config.delivery, &request)?;
    tracing::info!(
        amount_due = %quote.amount_due,
        is_preorder = quote.is_preorder,
        "Checkout quote ready"
    );
    println!("{}", serde_json::to_string_pretty(&quote)?);
    Ok(())
}
