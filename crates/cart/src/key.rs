//! Composite identity of a cart line.

use core::fmt;

use greenleaf_core::{Product, ProductId};

/// Identity of a cart line: the product plus its size variant, if any.
///
/// Two lines with the same key are the same line; the cart never holds
/// both. An empty size label is treated as no variant.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CartLineKey {
    pub product_id: ProductId,
    pub variant: Option<String>,
}

impl CartLineKey {
    /// Create a key from its parts.
    #[must_use]
    pub fn new(product_id: ProductId, variant: Option<&str>) -> Self {
        Self {
            product_id,
            variant: variant.filter(|v| !v.is_empty()).map(str::to_owned),
        }
    }

    /// Key of a product as it would be added to the cart.
    #[must_use]
    pub fn for_product(product: &Product) -> Self {
        Self::new(product.id, product.size())
    }

    /// Whether this line is targeted by a quantity update.
    ///
    /// With a size, product and size must both match. Without one, every
    /// line of the product matches regardless of its variant.
    #[must_use]
    pub fn matches(&self, product_id: ProductId, size: Option<&str>) -> bool {
        if self.product_id != product_id {
            return false;
        }
        match size.filter(|s| !s.is_empty()) {
            Some(size) => self.variant.as_deref() == Some(size),
            None => true,
        }
    }
}

impl fmt::Display for CartLineKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.variant {
            Some(variant) => write!(f, "{}-{variant}", self.product_id),
            None => write!(f, "{}", self.product_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    #[test]
    fn test_key_from_product_with_size() {
        let product = Product::new(ProductId::new(7), "Pot", Decimal::ONE).with_size("M");
        let key = CartLineKey::for_product(&product);
        assert_eq!(key, CartLineKey::new(ProductId::new(7), Some("M")));
        assert_eq!(key.to_string(), "7-M");
    }

    #[test]
    fn test_empty_size_is_no_variant() {
        assert_eq!(
            CartLineKey::new(ProductId::new(7), Some("")),
            CartLineKey::new(ProductId::new(7), None)
        );
    }

    #[test]
    fn test_sized_update_matches_only_that_size() {
        let small = CartLineKey::new(ProductId::new(7), Some("S"));
        assert!(small.matches(ProductId::new(7), Some("S")));
        assert!(!small.matches(ProductId::new(7), Some("M")));
        assert!(!small.matches(ProductId::new(8), Some("S")));
    }

    #[test]
    fn test_unsized_update_matches_every_variant() {
        let small = CartLineKey::new(ProductId::new(7), Some("S"));
        let plain = CartLineKey::new(ProductId::new(7), None);
        assert!(small.matches(ProductId::new(7), None));
        assert!(plain.matches(ProductId::new(7), None));
        assert!(!plain.matches(ProductId::new(7), Some("S")));
    }
}
