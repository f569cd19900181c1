//! Product page add-to-cart trigger.

use cartwire_core::ProductId;

/// The product page's add-to-cart button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddToCartTrigger {
    pub product_id: ProductId,
}

impl AddToCartTrigger {
    /// A trigger for `product_id`.
    #[must_use]
    pub const fn new(product_id: ProductId) -> Self {
        Self { product_id }
    }

    /// A trigger whose `data-product-id` attribute holds `value`.
    ///
    /// Returns `None` when the attribute is not an integer, in which case the
    /// page has no usable product context.
    #[must_use]
    pub fn from_attribute(value: &str) -> Option<Self> {
        value.parse().ok().map(Self::new)
    }
}
