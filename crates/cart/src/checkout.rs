//! Checkout hand-off.
//!
//! The order endpoint receives the cart as a list of [`OrderLine`]s plus
//! the amounts computed here. No network I/O happens in this module; the
//! host merges the serialized [`CheckoutQuote`] (`items`, `total_amount`,
//! `full_order_amount`, `is_preorder`) into the order body and, once the
//! order is confirmed, calls
//! [`CartManager::clear_cart`](crate::CartManager::clear_cart).
//!
//! # Validation order
//!
//! 1. The cart must not be empty.
//! 2. A city is required, for pickup as well as delivery.
//! 3. Cash is only accepted in the configured cash city.
//! 4. Delivery needs an address.
//! 5. Balance payments must be covered by the balance.
//!
//! # Pricing rules
//!
//! - Pickup orders pay no delivery.
//! - Delivery is free once the subtotal reaches `free_delivery_min`
//!   (a zero threshold disables free delivery); otherwise it costs
//!   `delivery_price + courier_delivery_price`.
//! - With preorders enabled, only half of the subtotal is due now and
//!   delivery is paid separately on arrival.

use greenleaf_core::ProductId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::item::CartItem;

/// One item as the order endpoint expects it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    pub product_id: ProductId,
    pub quantity: u32,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
}

/// Convert cart lines into order lines, preserving cart order.
#[must_use]
pub fn order_lines(items: &[CartItem]) -> Vec<OrderLine> {
    items
        .iter()
        .map(|item| OrderLine {
            product_id: item.product.id,
            quantity: item.quantity.get(),
            price: item.product.price,
        })
        .collect()
}

/// How the order reaches the customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FulfillmentMethod {
    Pickup,
    Delivery { address: String },
}

/// How the customer pays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Deducted from the customer's account balance.
    Balance,
    #[default]
    Card,
    /// Cash on receipt.
    Cash,
}

/// Shop-wide delivery and payment settings.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DeliverySettings {
    /// Subtotal at or above which delivery is free. Zero disables.
    pub free_delivery_min: Decimal,
    pub delivery_price: Decimal,
    pub courier_delivery_price: Decimal,
    /// Take a 50% deposit instead of full payment.
    pub preorder_enabled: bool,
    /// If set, cash is only accepted for orders in this city.
    pub cash_city: Option<String>,
}

/// What the customer chose at checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutRequest {
    /// Customer's city, required for every order.
    pub city: String,
    pub fulfillment: FulfillmentMethod,
    pub payment: PaymentMethod,
    /// Account balance, needed for [`PaymentMethod::Balance`].
    pub balance: Option<Decimal>,
}

/// Reasons checkout cannot proceed.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CheckoutError {
    #[error("cart is empty")]
    EmptyCart,

    #[error("city is required")]
    MissingCity,

    #[error("delivery address is required")]
    MissingAddress,

    #[error("cash payment is not available in {city}")]
    CashUnavailable { city: String },

    #[error("insufficient balance: {available} available, {required} required")]
    InsufficientBalance {
        required: Decimal,
        available: Decimal,
    },
}

/// Amounts for an order, ready to hand to the order endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckoutQuote {
    /// Sum of line totals.
    #[serde(with = "rust_decimal::serde::float")]
    pub subtotal: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub delivery: Decimal,
    /// `subtotal + delivery`.
    #[serde(rename = "full_order_amount", with = "rust_decimal::serde::float")]
    pub full_total: Decimal,
    /// What is charged now.
    #[serde(rename = "total_amount", with = "rust_decimal::serde::float")]
    pub amount_due: Decimal,
    pub is_preorder: bool,
    #[serde(rename = "items")]
    pub lines: Vec<OrderLine>,
}

/// Validate a checkout request and compute the amounts due.
///
/// # Errors
///
/// Returns `CheckoutError` if the cart is empty, the city or delivery
/// address is missing, cash is not accepted in the city, or the balance
/// does not cover the amount due.
pub fn quote(
    items: &[CartItem],
    settings: &DeliverySettings,
    request: &CheckoutRequest,
) -> Result<CheckoutQuote, CheckoutError> {
    if items.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }

    if request.city.trim().is_empty() {
        return Err(CheckoutError::MissingCity);
    }

    if request.payment == PaymentMethod::Cash {
        check_cash_allowed(settings, &request.city)?;
    }

    if let FulfillmentMethod::Delivery { address } = &request.fulfillment
        && address.trim().is_empty()
    {
        return Err(CheckoutError::MissingAddress);
    }

    let subtotal: Decimal = items.iter().map(CartItem::line_total).sum();
    let delivery = delivery_cost(settings, &request.fulfillment, subtotal);
    let full_total = subtotal + delivery;
    let amount_due = if settings.preorder_enabled {
        subtotal * Decimal::new(5, 1)
    } else {
        full_total
    };

    if request.payment == PaymentMethod::Balance {
        let available = request.balance.unwrap_or(Decimal::ZERO);
        if available < amount_due {
            return Err(CheckoutError::InsufficientBalance {
                required: amount_due,
                available,
            });
        }
    }

    Ok(CheckoutQuote {
        subtotal,
        delivery,
        full_total,
        amount_due,
        is_preorder: settings.preorder_enabled,
        lines: order_lines(items),
    })
}

fn check_cash_allowed(settings: &DeliverySettings, city: &str) -> Result<(), CheckoutError> {
    let Some(cash_city) = settings.cash_city.as_deref() else {
        return Ok(());
    };

    if city.trim().eq_ignore_ascii_case(cash_city.trim()) {
        Ok(())
    } else {
        Err(CheckoutError::CashUnavailable {
            city: city.trim().to_string(),
        })
    }
}

fn delivery_cost(
    settings: &DeliverySettings,
    fulfillment: &FulfillmentMethod,
    subtotal: Decimal,
) -> Decimal {
    if matches!(fulfillment, FulfillmentMethod::Pickup) {
        return Decimal::ZERO;
    }

    let free = settings.free_delivery_min > Decimal::ZERO && subtotal >= settings.free_delivery_min;
    if free {
        Decimal::ZERO
    } else {
        settings.delivery_price + settings.courier_delivery_price
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use greenleaf_core::Product;

    use super::*;
    use crate::item::Quantity;

    fn items() -> Vec<CartItem> {
        let mut fern = CartItem::new(Product::new(
            ProductId::new(1),
            "Fern",
            Decimal::new(1000, 0),
        ));
        fern.quantity = Quantity::from_requested(2).unwrap();
        let pot = CartItem::new(Product::new(ProductId::new(2), "Pot", Decimal::new(500, 0)));
        vec![fern, pot]
    }

    fn settings() -> DeliverySettings {
        DeliverySettings {
            free_delivery_min: Decimal::new(5000, 0),
            delivery_price: Decimal::new(200, 0),
            courier_delivery_price: Decimal::new(150, 0),
            preorder_enabled: false,
            cash_city: Some("Barnaul".to_string()),
        }
    }

    fn delivery(address: &str) -> FulfillmentMethod {
        FulfillmentMethod::Delivery {
            address: address.to_string(),
        }
    }

    fn request(
        city: &str,
        fulfillment: FulfillmentMethod,
        payment: PaymentMethod,
    ) -> CheckoutRequest {
        CheckoutRequest {
            city: city.to_string(),
            fulfillment,
            payment,
            balance: None,
        }
    }

    #[test]
    fn test_order_lines_follow_cart_order() {
        let lines = order_lines(&items());
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].product_id, ProductId::new(1));
        assert_eq!(lines[0].quantity, 2);
        assert_eq!(lines[1].price, Decimal::new(500, 0));
    }

    #[test]
    fn test_pickup_has_no_delivery() {
        let quote = quote(&items(), &settings(), &request("Barnaul", FulfillmentMethod::Pickup, PaymentMethod::Card))
            .unwrap();
        assert_eq!(quote.subtotal, Decimal::new(2500, 0));
        assert_eq!(quote.delivery, Decimal::ZERO);
        assert_eq!(quote.amount_due, Decimal::new(2500, 0));
    }

    #[test]
    fn test_delivery_below_threshold_is_charged() {
        let quote = quote(
            &items(),
            &settings(),
            &request("Biysk", delivery("Lenina 1"), PaymentMethod::Card),
        )
        .unwrap();
        assert_eq!(quote.delivery, Decimal::new(350, 0));
        assert_eq!(quote.full_total, Decimal::new(2850, 0));
        assert_eq!(quote.amount_due, quote.full_total);
    }

    #[test]
    fn test_delivery_free_at_threshold() {
        let settings = DeliverySettings {
            free_delivery_min: Decimal::new(2500, 0),
            ..settings()
        };
        let quote = quote(
            &items(),
            &settings,
            &request("Biysk", delivery("Lenina 1"), PaymentMethod::Card),
        )
        .unwrap();
        assert_eq!(quote.delivery, Decimal::ZERO);
    }

    #[test]
    fn test_zero_threshold_never_frees_delivery() {
        let settings = DeliverySettings {
            free_delivery_min: Decimal::ZERO,
            ..settings()
        };
        let quote = quote(
            &items(),
            &settings,
            &request("Biysk", delivery("Lenina 1"), PaymentMethod::Card),
        )
        .unwrap();
        assert_eq!(quote.delivery, Decimal::new(350, 0));
    }

    #[test]
    fn test_preorder_takes_half_of_subtotal() {
        let settings = DeliverySettings {
            preorder_enabled: true,
            ..settings()
        };
        let quote = quote(
            &items(),
            &settings,
            &request("Biysk", delivery("Lenina 1"), PaymentMethod::Card),
        )
        .unwrap();
        assert!(quote.is_preorder);
        assert_eq!(quote.amount_due, Decimal::new(1250, 0));
        assert_eq!(quote.full_total, Decimal::new(2850, 0));
    }

    #[test]
    fn test_empty_cart_rejected() {
        let err = quote(&[], &settings(), &request("Barnaul", FulfillmentMethod::Pickup, PaymentMethod::Card))
            .unwrap_err();
        assert_eq!(err, CheckoutError::EmptyCart);
    }

    #[test]
    fn test_city_required_for_every_order() {
        for fulfillment in [FulfillmentMethod::Pickup, delivery("Lenina 1")] {
            let err = quote(&items(), &settings(), &request(" ", fulfillment, PaymentMethod::Card))
                .unwrap_err();
            assert_eq!(err, CheckoutError::MissingCity);
        }
    }

    #[test]
    fn test_delivery_requires_address() {
        let err = quote(&items(), &settings(), &request("Biysk", delivery(""), PaymentMethod::Card))
            .unwrap_err();
        assert_eq!(err, CheckoutError::MissingAddress);
    }

    #[test]
    fn test_cash_only_in_cash_city() {
        let err = quote(
            &items(),
            &settings(),
            &request("Biysk", delivery("Lenina 1"), PaymentMethod::Cash),
        )
        .unwrap_err();
        assert_eq!(
            err,
            CheckoutError::CashUnavailable {
                city: "Biysk".to_string()
            }
        );

        assert!(
            quote(
                &items(),
                &settings(),
                &request("barnaul", delivery("Lenina 1"), PaymentMethod::Cash),
            )
            .is_ok()
        );
        assert!(
            quote(
                &items(),
                &settings(),
                &request("Barnaul", FulfillmentMethod::Pickup, PaymentMethod::Cash),
            )
            .is_ok()
        );
    }

    #[test]
    fn test_cash_pickup_outside_cash_city_rejected() {
        let err = quote(
            &items(),
            &settings(),
            &request("Biysk", FulfillmentMethod::Pickup, PaymentMethod::Cash),
        )
        .unwrap_err();
        assert!(matches!(err, CheckoutError::CashUnavailable { .. }));
    }

    #[test]
    fn test_cash_city_checked_before_address() {
        let err = quote(&items(), &settings(), &request("Biysk", delivery(""), PaymentMethod::Cash))
            .unwrap_err();
        assert!(matches!(err, CheckoutError::CashUnavailable { .. }));
    }

    #[test]
    fn test_quote_uses_order_endpoint_field_names() {
        let quote = quote(
            &items(),
            &settings(),
            &request("Biysk", delivery("Lenina 1"), PaymentMethod::Card),
        )
        .unwrap();
        let value = serde_json::to_value(&quote).unwrap();

        assert_eq!(value["total_amount"], serde_json::json!(2850.0));
        assert_eq!(value["full_order_amount"], serde_json::json!(2850.0));
        assert_eq!(value["is_preorder"], serde_json::json!(false));
        assert_eq!(value["items"][0]["product_id"], serde_json::json!(1));
        assert!(value.get("amount_due").is_none());
        assert!(value.get("lines").is_none());
    }

    #[test]
    fn test_balance_must_cover_amount_due() {
        let mut req = request("Barnaul", FulfillmentMethod::Pickup, PaymentMethod::Balance);
        req.balance = Some(Decimal::new(1000, 0));
        let err = quote(&items(), &settings(), &req).unwrap_err();
        assert_eq!(
            err,
            CheckoutError::InsufficientBalance {
                required: Decimal::new(2500, 0),
                available: Decimal::new(1000, 0),
            }
        );

        req.balance = Some(Decimal::new(2500, 0));
        assert!(quote(&items(), &settings(), &req).is_ok());
    }
}
