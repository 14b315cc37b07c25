//! Product descriptor as carried by the cart.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use super::id::ProductId;

/// A catalog product, optionally narrowed to a size variant.
///
/// This is the shape persisted inside each cart line. Display fields the
/// catalog sends that this type does not model are kept in [`Product::extra`]
/// so they survive a persist/hydrate round trip.
///
/// ## Wire format
///
/// ```json
/// {
///   "id": 5,
///   "name": "Monstera Deliciosa",
///   "price": 1490,
///   "image_url": "https://cdn.example/monstera.jpg",
///   "stock": 12,
///   "selectedSize": "M"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub slug: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    /// Unit price in the shop currency.
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(default, deserialize_with = "null_as_default")]
    pub image_url: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub category_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub stock: i32,
    /// Size variant chosen on the product page, if the product has sizes.
    #[serde(
        rename = "selectedSize",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub selected_size: Option<String>,
    /// Unmodelled display fields, preserved verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Product {
    /// Create a product with only the fields the cart needs.
    #[must_use]
    pub fn new(id: ProductId, name: impl Into<String>, price: Decimal) -> Self {
        Self {
            id,
            name: name.into(),
            slug: String::new(),
            description: String::new(),
            price,
            image_url: String::new(),
            category_name: String::new(),
            stock: 0,
            selected_size: None,
            extra: Map::new(),
        }
    }

    /// Narrow this product to a size variant.
    #[must_use]
    pub fn with_size(mut self, size: impl Into<String>) -> Self {
        self.selected_size = Some(size.into());
        self
    }

    /// Set the image URL.
    #[must_use]
    pub fn with_image_url(mut self, url: impl Into<String>) -> Self {
        self.image_url = url.into();
        self
    }

    /// Set the available stock.
    #[must_use]
    pub const fn with_stock(mut self, stock: i32) -> Self {
        self.stock = stock;
        self
    }

    /// The selected size, ignoring an empty label.
    #[must_use]
    pub fn size(&self) -> Option<&str> {
        self.selected_size.as_deref().filter(|s| !s.is_empty())
    }
}

/// Read an explicit `null` as the field's default.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}
