#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

//! Integration tests for the checkout hand-off.

use greenleaf_cart::checkout::{
    self, CheckoutError, CheckoutRequest, DeliverySettings, FulfillmentMethod, PaymentMethod,
};
use greenleaf_core::ProductId;
use greenleaf_integration_tests::{StorageFixture, plant};
use rust_decimal::Decimal;

fn shop_settings() -> DeliverySettings {
    DeliverySettings {
        free_delivery_min: Decimal::new(3000, 0),
        delivery_price: Decimal::new(250, 0),
        courier_delivery_price: Decimal::new(100, 0),
        preorder_enabled: false,
        cash_city: Some("Barnaul".to_owned()),
    }
}

fn delivery() -> FulfillmentMethod {
    FulfillmentMethod::Delivery {
        address: "Lenina 1".to_owned(),
    }
}

#[test]
fn test_quote_then_clear_after_order() {
    let fixture = StorageFixture::new();
    let mut cart = fixture.open_cart();
    cart.add_to_cart(plant(1, "Boston Fern", 1000)).unwrap();
    cart.add_to_cart(plant(1, "Boston Fern", 1000)).unwrap();
    cart.add_to_cart(plant(2, "Clay Pot", 350).with_size("M"))
        .unwrap();

    let request = CheckoutRequest {
        city: "Barnaul".to_owned(),
        fulfillment: delivery(),
        payment: PaymentMethod::Card,
        balance: None,
    };
    let quote = checkout::quote(cart.items(), &shop_settings(), &request).unwrap();

    assert_eq!(quote.subtotal, Decimal::new(2350, 0));
    assert_eq!(quote.delivery, Decimal::new(350, 0));
    assert_eq!(quote.amount_due, Decimal::new(2700, 0));
    assert_eq!(quote.lines, cart.order_lines());
    assert_eq!(quote.lines[0].product_id, ProductId::new(1));
    assert_eq!(quote.lines[0].quantity, 2);

    // Order accepted by the remote endpoint
    cart.clear_cart().unwrap();
    assert!(fixture.open_cart().is_empty());
}

#[test]
fn test_free_delivery_and_preorder_deposit() {
    let fixture = StorageFixture::new();
    let mut cart = fixture.open_cart();
    cart.add_to_cart(plant(3, "Monstera", 4000)).unwrap();

    let settings = DeliverySettings {
        preorder_enabled: true,
        ..shop_settings()
    };
    let request = CheckoutRequest {
        city: "Biysk".to_owned(),
        fulfillment: delivery(),
        payment: PaymentMethod::Balance,
        balance: Some(Decimal::new(2000, 0)),
    };
    let quote = checkout::quote(cart.items(), &settings, &request).unwrap();

    assert_eq!(quote.delivery, Decimal::ZERO);
    assert!(quote.is_preorder);
    assert_eq!(quote.amount_due, Decimal::new(2000, 0));
}

#[test]
fn test_checkout_rejections_leave_cart_intact() {
    let fixture = StorageFixture::new();
    let mut cart = fixture.open_cart();

    let pickup_card = CheckoutRequest {
        city: "Barnaul".to_owned(),
        fulfillment: FulfillmentMethod::Pickup,
        payment: PaymentMethod::Card,
        balance: None,
    };
    assert_eq!(
        checkout::quote(cart.items(), &shop_settings(), &pickup_card).unwrap_err(),
        CheckoutError::EmptyCart
    );

    cart.add_to_cart(plant(1, "Boston Fern", 1000)).unwrap();
    let cash_elsewhere = CheckoutRequest {
        city: "Biysk".to_owned(),
        fulfillment: delivery(),
        payment: PaymentMethod::Cash,
        balance: None,
    };
    assert!(matches!(
        checkout::quote(cart.items(), &shop_settings(), &cash_elsewhere),
        Err(CheckoutError::CashUnavailable { .. })
    ));

    let cash_pickup_elsewhere = CheckoutRequest {
        city: "Biysk".to_owned(),
        fulfillment: FulfillmentMethod::Pickup,
        payment: PaymentMethod::Cash,
        balance: None,
    };
    assert!(matches!(
        checkout::quote(cart.items(), &shop_settings(), &cash_pickup_elsewhere),
        Err(CheckoutError::CashUnavailable { .. })
    ));

    assert_eq!(fixture.open_cart().line_count(), 1);
}

#[test]
fn test_quote_serializes_for_order_endpoint() {
    let fixture = StorageFixture::new();
    let mut cart = fixture.open_cart();
    cart.add_to_cart(plant(1, "Boston Fern", 1000)).unwrap();

    let request = CheckoutRequest {
        city: "Barnaul".to_owned(),
        fulfillment: FulfillmentMethod::Pickup,
        payment: PaymentMethod::Card,
        balance: None,
    };
    let quote = checkout::quote(cart.items(), &shop_settings(), &request).unwrap();
    let value = serde_json::to_value(&quote).unwrap();

    assert_eq!(value["items"][0]["product_id"], serde_json::json!(1));
    assert_eq!(value["items"][0]["quantity"], serde_json::json!(1));
    assert!(value["total_amount"].is_number());
    assert!(value["full_order_amount"].is_number());
    assert_eq!(value["is_preorder"], serde_json::json!(false));
}
