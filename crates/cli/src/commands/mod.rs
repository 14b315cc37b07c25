//! CLI subcommand implementations.

pub mod cart;
pub mod checkout;

use greenleaf_cart::checkout::CheckoutError;
use greenleaf_cart::{CartManager, FileStorage, StorageError};
use thiserror::Error;

use crate::config::CliConfig;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Cart storage could not be read or written.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Checkout validation failed.
    #[error("Checkout error: {0}")]
    Checkout(#[from] CheckoutError),

    /// Output could not be encoded.
    #[error("Encoding error: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Activity type logged when a line is removed from the cart.
const ACTIVITY_REMOVE_FROM_CART: &str = "product_remove_from_cart";

/// Open the cart stored at the configured path.
///
/// Removals are reported as activity events through `tracing`.
fn open_cart(config: &CliConfig) -> Result<CartManager<FileStorage>, CommandError> {
    let storage = FileStorage::open(&config.storage_path)?;
    tracing::debug!("Opened cart storage at {:?}", storage.path());

    Ok(CartManager::new(storage).with_removal_listener(|product_id, name| {
        tracing::info!(
            action_type = ACTIVITY_REMOVE_FROM_CART,
            target_entity_type = "product",
            target_entity_id = product_id.as_i32(),
            "Removed {name} from cart"
        );
    }))
}
