//! Cart line items.

use greenleaf_core::Product;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::key::CartLineKey;

/// Largest quantity a single cart line may hold.
pub const MAX_QUANTITY: u32 = 99;

/// Errors that can occur when constructing a [`Quantity`] directly.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("quantity must be between 1 and {MAX_QUANTITY} (got {0})")]
pub struct QuantityError(pub i64);

/// A line quantity, always within `1..=MAX_QUANTITY`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u32")]
pub struct Quantity(u32);

impl Quantity {
    /// A single unit.
    pub const ONE: Self = Self(1);
    /// The per-line cap.
    pub const MAX: Self = Self(MAX_QUANTITY);

    /// Interpret a requested quantity from the host.
    ///
    /// Returns `None` for zero or negative requests (the line should be
    /// removed) and clamps anything above the cap.
    #[must_use]
    pub fn from_requested(requested: i64) -> Option<Self> {
        if requested <= 0 {
            return None;
        }
        let clamped = requested.min(i64::from(MAX_QUANTITY));
        u32::try_from(clamped).ok().map(Self)
    }

    /// The quantity as a plain integer.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }

    /// Whether this line is at the cap.
    #[must_use]
    pub const fn is_max(self) -> bool {
        self.0 >= MAX_QUANTITY
    }

    /// Add `n` units, stopping at the cap.
    #[must_use]
    pub fn saturating_add(self, n: u32) -> Self {
        Self(self.0.saturating_add(n).min(MAX_QUANTITY))
    }
}

impl TryFrom<i64> for Quantity {
    type Error = QuantityError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u32::try_from(value)
            .ok()
            .filter(|v| (1..=MAX_QUANTITY).contains(v))
            .map(Self)
            .ok_or(QuantityError(value))
    }
}

impl From<Quantity> for u32 {
    fn from(quantity: Quantity) -> Self {
        quantity.0
    }
}

/// One entry in the cart: a product and how many of it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub product: Product,
    pub quantity: Quantity,
}

impl CartItem {
    /// A fresh line holding one unit of `product`.
    #[must_use]
    pub const fn new(product: Product) -> Self {
        Self {
            product,
            quantity: Quantity::ONE,
        }
    }

    /// Composite identity of this line.
    #[must_use]
    pub fn key(&self) -> CartLineKey {
        CartLineKey::for_product(&self.product)
    }

    /// `price * quantity` for this line.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.product.price * Decimal::from(self.quantity.get())
    }
}
