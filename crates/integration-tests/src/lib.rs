//! Integration tests for Greenleaf.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p greenleaf-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_persistence` - Cart state surviving restarts on file storage
//! - `checkout_flow` - Building a cart and quoting it for checkout
//!
//! This crate only holds shared fixtures; the tests live in `tests/`.

use std::path::PathBuf;

use greenleaf_cart::{CartManager, FileStorage};
use greenleaf_core::{Product, ProductId};
use rust_decimal::Decimal;
use tempfile::TempDir;

/// A catalog product with a whole-number price.
#[must_use]
pub fn plant(id: i32, name: &str, price: i64) -> Product {
    Product::new(ProductId::new(id), name, Decimal::new(price, 0))
        .with_image_url(format!("https://cdn.greenleaf.test/{id}.jpg"))
        .with_stock(10)
}

/// A scratch directory holding one storage file.
pub struct StorageFixture {
    dir: TempDir,
}

impl StorageFixture {
    /// Create a fresh, empty fixture.
    ///
    /// # Panics
    ///
    /// Panics if the temporary directory cannot be created.
    #[must_use]
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("failed to create temp dir"),
        }
    }

    /// Path of the storage file inside the fixture.
    #[must_use]
    pub fn path(&self) -> PathBuf {
        self.dir.path().join("state/storage.json")
    }

    /// Open a cart over the fixture's storage file, as a new process would.
    ///
    /// # Panics
    ///
    /// Panics if the storage file exists but cannot be opened.
    #[must_use]
    pub fn open_cart(&self) -> CartManager<FileStorage> {
        CartManager::new(FileStorage::open(self.path()).expect("failed to open storage"))
    }
}

impl Default for StorageFixture {
    fn default() -> Self {
        Self::new()
    }
}
