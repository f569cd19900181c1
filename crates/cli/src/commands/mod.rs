//! Command implementations.
//!
//! Each command builds the page the browser would have loaded, attaches the
//! matching controller and feeds it one event. Notifications print to
//! stderr; the rendered cart prints to stdout.

pub mod add;
pub mod cart;

use cartwire_core::CartItemId;
use cartwire_storefront::{ApiError, ConfigError, Notice, Notifier};
use thiserror::Error;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum AppError {
    /// The environment holds an invalid setting.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A request to the cart API failed.
    #[error("Cart API request failed: {0}")]
    Api(#[from] ApiError),

    /// The cart has no item with this id.
    #[error("Cart item {0} is not in the cart")]
    NotInCart(CartItemId),
}

/// Prints notices to stderr, standing in for the browser's alert box.
#[derive(Debug, Clone, Copy, Default)]
pub struct StderrNotifier;

impl Notifier for StderrNotifier {
    #[allow(clippy::print_stderr)]
    fn notify(&self, notice: Notice) {
        eprintln!("{notice}");
    }
}
