//! Page controllers.
//!
//! # Architecture
//!
//! - [`AddToCartController`] - product page button, posts to the add endpoint
//! - [`CartController`] - cart table body, routes remove/stepper/quantity
//!   events to the remove and update endpoints and re-renders totals
//!
//! Each controller is attached only when its root element is on the page
//! ([`attach_all`]). Handlers hold no lock across a network call, so several
//! can be awaiting responses at once.

mod add_to_cart;
mod cart;
#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod scripted;

pub use add_to_cart::{AddOutcome, AddToCartController};
pub use cart::{CartController, CartOutcome};

use crate::api::CartApi;
use crate::notify::Notifier;
use crate::page::Page;

/// The controllers attached to a loaded page.
pub struct Controllers<A, N> {
    pub add_to_cart: Option<AddToCartController<A, N>>,
    pub cart: Option<CartController<A, N>>,
}

/// Attach every controller whose root element exists on `page`.
///
/// The controllers share the API client and notifier and nothing else.
pub fn attach_all<A, N>(page: Page, api: A, notifier: N) -> Controllers<A, N>
where
    A: CartApi + Clone,
    N: Notifier + Clone,
{
    Controllers {
        add_to_cart: AddToCartController::attach(page.add_to_cart, api.clone(), notifier.clone()),
        cart: CartController::attach(page.cart, api, notifier),
    }
}
