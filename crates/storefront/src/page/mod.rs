//! Page view models.
//!
//! The controllers never touch markup directly. A loaded page is described by
//! [`Page`]: the add-to-cart trigger if the page shows a product, and the cart
//! table if it shows the cart. Events arriving from the cart table are
//! [`CartEvent`] values carrying the row they bubbled up through.

mod cart;
mod product;

use cartwire_core::CartItemId;

pub use cart::{CartPage, CartRow, RequestToken};
pub use product::AddToCartTrigger;

use crate::dom::{ClickTarget, QTY_INPUT_CLASS, has_class};

/// The controller roots found on a loaded page.
#[derive(Debug, Clone, Default)]
pub struct Page {
    /// Present on product pages.
    pub add_to_cart: Option<AddToCartTrigger>,
    /// Present on the cart page.
    pub cart: Option<CartPage>,
}

impl Page {
    /// A product page showing `trigger`.
    #[must_use]
    pub const fn product(trigger: AddToCartTrigger) -> Self {
        Self {
            add_to_cart: Some(trigger),
            cart: None,
        }
    }

    /// The cart page showing `cart`.
    #[must_use]
    pub const fn cart(cart: CartPage) -> Self {
        Self {
            add_to_cart: None,
            cart: Some(cart),
        }
    }
}

/// An event delegated from the cart table body.
///
/// `row` is the cart item id of the nearest enclosing row, or `None` when the
/// event fired outside any row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartEvent {
    /// A click on some element inside the table body.
    Click {
        row: Option<CartItemId>,
        target: ClickTarget,
    },
    /// A committed value change on some input inside the table body.
    Change {
        row: Option<CartItemId>,
        on_quantity_input: bool,
        value: String,
    },
}

impl CartEvent {
    /// A click on an element with the given `class` attribute.
    #[must_use]
    pub fn click(row: Option<CartItemId>, classes: &str) -> Self {
        Self::Click {
            row,
            target: ClickTarget::from_class_list(classes),
        }
    }

    /// A change on an element with the given `class` attribute.
    #[must_use]
    pub fn change(
        row: Option<CartItemId>,
        classes: &str,
        value: impl Into<String>,
    ) -> Self {
        Self::Change {
            row,
            on_quantity_input: has_class(classes, QTY_INPUT_CLASS),
            value: value.into(),
        }
    }

    /// A change on the quantity input of `row`.
    #[must_use]
    pub fn quantity_change(row: CartItemId, value: impl Into<String>) -> Self {
        Self::change(Some(row), QTY_INPUT_CLASS, value)
    }

    /// The row the event bubbled up through.
    #[must_use]
    pub const fn row(&self) -> Option<CartItemId> {
        match self {
            Self::Click { row, .. } | Self::Change { row, .. } => *row,
        }
    }
}
