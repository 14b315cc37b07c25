//! Persisted cart snapshot format.
//!
//! The snapshot is a JSON array of `{ "product": {..}, "quantity": n }`
//! objects in cart order. Quantities are read as raw integers so that a
//! snapshot written by an older client with out-of-range values can be
//! repaired instead of thrown away.

use std::collections::HashMap;

use greenleaf_core::Product;
use serde::Deserialize;

use crate::item::{CartItem, Quantity};
use crate::key::CartLineKey;

#[derive(Debug, Deserialize)]
struct StoredLine {
    product: Product,
    quantity: i64,
}

/// Result of decoding a snapshot.
#[derive(Debug)]
pub(crate) struct Decoded {
    pub items: Vec<CartItem>,
    /// Whether normalization changed anything relative to the stored value.
    pub repaired: bool,
}

pub(crate) fn encode(items: &[CartItem]) -> Result<String, serde_json::Error> {
    serde_json::to_string(items)
}

/// Decode a stored snapshot.
///
/// Fails if the value is not JSON or not an array of line objects. Lines
/// with a non-positive quantity are dropped, oversized quantities are
/// clamped, and duplicate keys are merged into the first occurrence.
pub(crate) fn decode(raw: &str) -> Result<Decoded, serde_json::Error> {
    let stored: Vec<StoredLine> = serde_json::from_str(raw)?;
    let stored_len = stored.len();

    let mut items: Vec<CartItem> = Vec::with_capacity(stored_len);
    let mut positions: HashMap<CartLineKey, usize> = HashMap::new();
    let mut repaired = false;

    for line in stored {
        let Some(quantity) = Quantity::from_requested(line.quantity) else {
            repaired = true;
            continue;
        };
        if i64::from(quantity.get()) != line.quantity {
            repaired = true;
        }

        let key = CartLineKey::for_product(&line.product);
        if let Some(existing) = positions.get(&key).and_then(|&i| items.get_mut(i)) {
            existing.quantity = existing.quantity.saturating_add(quantity.get());
            repaired = true;
            continue;
        }

        positions.insert(key, items.len());
        items.push(CartItem {
            product: line.product,
            quantity,
        });
    }

    Ok(Decoded { items, repaired })
}
