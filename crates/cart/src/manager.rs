//! Cart state manager.
//!
//! [`CartManager`] owns the in-memory cart and is the only writer of the
//! cart's storage slot. Every mutation that changes the cart is followed,
//! in the same call, by a write of the full snapshot; an empty cart deletes
//! the key instead of writing `[]`, so "never used" and "emptied" are the
//! same state on disk.

use core::fmt;

use greenleaf_core::{Product, ProductId};
use rust_decimal::Decimal;
use tracing::instrument;

use crate::checkout::{self, OrderLine};
use crate::error::StorageError;
use crate::item::{CartItem, Quantity};
use crate::key::CartLineKey;
use crate::snapshot;
use crate::storage::CartStorage;

/// Storage key holding the cart snapshot.
pub const CART_STORAGE_KEY: &str = "cart";

/// Callback invoked with `(product_id, product_name)` for every line that a
/// quantity update removes.
pub type RemovalListener = Box<dyn FnMut(ProductId, &str)>;

/// The shopping cart for one client session.
pub struct CartManager<S: CartStorage> {
    storage: S,
    items: Vec<CartItem>,
    on_remove: Option<RemovalListener>,
}

impl<S: CartStorage + fmt::Debug> fmt::Debug for CartManager<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartManager")
            .field("storage", &self.storage)
            .field("items", &self.items)
            .field("on_remove", &self.on_remove.as_ref().map(|_| "<listener>"))
            .finish()
    }
}

impl<S: CartStorage> CartManager<S> {
    /// Create a manager over `storage`, hydrating from any saved snapshot.
    ///
    /// A snapshot that cannot be decoded is deleted and the cart starts
    /// empty. This never fails.
    pub fn new(storage: S) -> Self {
        let mut manager = Self {
            storage,
            items: Vec::new(),
            on_remove: None,
        };
        manager.hydrate();
        manager
    }

    /// Register the callback fired when a quantity update removes a line.
    #[must_use]
    pub fn with_removal_listener(
        mut self,
        listener: impl FnMut(ProductId, &str) + 'static,
    ) -> Self {
        self.on_remove = Some(Box::new(listener));
        self
    }

    /// Current lines, in the order they were first added.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.items.len()
    }

    /// Sum of quantities across all lines.
    #[must_use]
    pub fn total_quantity(&self) -> u32 {
        self.items.iter().map(|item| item.quantity.get()).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Read-only access to the backing storage.
    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    /// Consume the manager, returning the backing storage.
    #[must_use]
    pub fn into_storage(self) -> S {
        self.storage
    }

    /// Re-read the saved snapshot, discarding in-memory state.
    pub fn reload(&mut self) {
        self.hydrate();
    }

    /// Add one unit of `product`.
    ///
    /// A product already in the cart under the same key (id plus selected
    /// size) gains one unit; a line already at [`Quantity::MAX`] is left
    /// alone. Anything else is appended as a new line.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the snapshot cannot be written. The
    /// in-memory cart has already been updated.
    #[instrument(skip(self, product), fields(product_id = %product.id, size = ?product.size()))]
    pub fn add_to_cart(&mut self, product: Product) -> Result<(), StorageError> {
        let key = CartLineKey::for_product(&product);

        if let Some(item) = self.items.iter_mut().find(|item| item.key() == key) {
            if item.quantity.is_max() {
                tracing::debug!("Line {key} already at maximum quantity");
                return Ok(());
            }
            item.quantity = item.quantity.saturating_add(1);
            tracing::debug!("Line {key} quantity now {}", item.quantity.get());
        } else {
            tracing::debug!("Adding new line {key}");
            self.items.push(CartItem::new(product));
        }

        self.persist()
    }

    /// Set the quantity of the lines matching `product_id` (and
    /// `selected_size`, when given).
    ///
    /// A `quantity` of zero or less removes the matching lines, notifying
    /// the removal listener once per removed line. Positive quantities are
    /// clamped to [`Quantity::MAX`]. Unknown products are ignored.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the snapshot cannot be written. The
    /// in-memory cart has already been updated.
    #[instrument(skip(self))]
    pub fn update_cart_quantity(
        &mut self,
        product_id: ProductId,
        quantity: i64,
        selected_size: Option<&str>,
    ) -> Result<(), StorageError> {
        let changed = match Quantity::from_requested(quantity) {
            None => self.remove_matching(product_id, selected_size),
            Some(quantity) => {
                let mut changed = false;
                for item in self
                    .items
                    .iter_mut()
                    .filter(|item| item.key().matches(product_id, selected_size))
                {
                    if item.quantity != quantity {
                        item.quantity = quantity;
                        changed = true;
                    }
                }
                changed
            }
        };

        if !changed {
            tracing::debug!("Quantity update matched nothing to change");
            return Ok(());
        }
        self.persist()
    }

    /// Sum of `price * quantity` over all lines.
    #[must_use]
    pub fn get_total_price(&self) -> Decimal {
        self.items.iter().map(CartItem::line_total).sum()
    }

    /// Empty the cart and delete the saved snapshot.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the snapshot cannot be deleted.
    #[instrument(skip(self))]
    pub fn clear_cart(&mut self) -> Result<(), StorageError> {
        self.items.clear();
        self.persist()
    }

    /// The cart as the order endpoint expects it.
    #[must_use]
    pub fn order_lines(&self) -> Vec<OrderLine> {
        checkout::order_lines(&self.items)
    }

    fn remove_matching(&mut self, product_id: ProductId, selected_size: Option<&str>) -> bool {
        let before = self.items.len();
        let on_remove = &mut self.on_remove;

        self.items.retain(|item| {
            if !item.key().matches(product_id, selected_size) {
                return true;
            }
            tracing::debug!("Removing line {}", item.key());
            if let Some(listener) = on_remove.as_mut() {
                listener(item.product.id, &item.product.name);
            }
            false
        });

        self.items.len() != before
    }

    fn hydrate(&mut self) {
        self.items.clear();

        let raw = match self.storage.get(CART_STORAGE_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return,
            Err(e) => {
                tracing::warn!("Failed to read saved cart, starting empty: {e}");
                return;
            }
        };

        match snapshot::decode(&raw) {
            Ok(decoded) => {
                if decoded.repaired {
                    tracing::warn!("Saved cart contained invalid lines; normalized on load");
                }
                tracing::debug!("Hydrated {} cart lines", decoded.items.len());
                self.items = decoded.items;
            }
            Err(e) => {
                tracing::warn!("Discarding corrupt saved cart: {e}");
                if let Err(e) = self.storage.remove(CART_STORAGE_KEY) {
                    tracing::warn!("Failed to remove corrupt saved cart: {e}");
                }
            }
        }
    }

    fn persist(&mut self) -> Result<(), StorageError> {
        if self.items.is_empty() {
            tracing::debug!("Cart empty, removing saved snapshot");
            return self.storage.remove(CART_STORAGE_KEY);
        }

        let encoded = snapshot::encode(&self.items)?;
        self.storage.set(CART_STORAGE_KEY, &encoded)?;
        tracing::debug!("Saved {} cart lines", self.items.len());
        Ok(())
    }
}
