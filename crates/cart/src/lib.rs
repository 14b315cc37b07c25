//! Greenleaf Cart - Client-side shopping cart state.
//!
//! The cart lives entirely on the client: a list of line items persisted in
//! a key/value store under a single key. The remote order endpoint only sees
//! the cart at checkout, as the list of [`checkout::OrderLine`]s.
//!
//! # Modules
//!
//! - [`manager`] - [`CartManager`], the add/update/remove/clear operations
//! - [`key`] - [`CartLineKey`], the composite identity of a line
//! - [`item`] - [`CartItem`] and the bounded [`Quantity`]
//! - [`storage`] - The [`CartStorage`] capability and its implementations
//! - [`checkout`] - Order payload and amount-due quote for the checkout flow
//!
//! # Example
//!
//! ```rust
//! use greenleaf_cart::{CartManager, MemoryStorage};
//! use greenleaf_core::{Product, ProductId};
//! use rust_decimal::Decimal;
//!
//! let mut cart = CartManager::new(MemoryStorage::default());
//! let fern = Product::new(ProductId::new(5), "Boston Fern", Decimal::new(100, 0));
//!
//! cart.add_to_cart(fern.clone()).unwrap();
//! cart.add_to_cart(fern).unwrap();
//!
//! assert_eq!(cart.line_count(), 1);
//! assert_eq!(cart.get_total_price(), Decimal::new(200, 0));
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod checkout;
pub mod error;
pub mod item;
pub mod key;
pub mod manager;
mod snapshot;
pub mod storage;

pub use error::StorageError;
pub use item::{CartItem, MAX_QUANTITY, Quantity, QuantityError};
pub use key::CartLineKey;
pub use manager::{CART_STORAGE_KEY, CartManager, RemovalListener};
pub use storage::{CartStorage, FileStorage, MemoryStorage};
