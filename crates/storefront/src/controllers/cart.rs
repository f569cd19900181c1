//! Cart page controller.
//!
//! One delegated listener on the cart table body receives every click and
//! change inside it. Clicks route by the target's class (remove button,
//! decrement, increment), changes only when they come from a row's quantity
//! input. Everything else is ignored.
//!
//! # Update flow
//!
//! 1. The candidate quantity is written into the row's input and the row
//!    takes a fresh [`RequestToken`].
//! 2. The update request is sent with the page unlocked.
//! 3. If the token is still the row's latest when the response arrives, a
//!    success renders the echoed quantity and line total and recomputes the
//!    subtotal; a failure puts the last confirmed quantity back into the
//!    input. A response for an older token is dropped.

use cartwire_core::{CartItemId, Price, Quantity, RemoveCartItemRequest, UpdateCartItemRequest};
use tokio::sync::Mutex;
use tracing::{debug, instrument, warn};

use crate::api::{ApiError, CartApi};
use crate::dom::{CART_ITEMS_BODY_ID, CART_SUBTOTAL_ID, ClickTarget};
use crate::notify::{Notice, Notifier};
use crate::page::{CartEvent, CartPage, CartRow, RequestToken};

/// What handling one cart event did.
#[derive(Debug)]
pub enum CartOutcome {
    /// The event was not for the controller (no row, no marker class, not a
    /// quantity input, or the row is gone).
    Ignored,
    /// The row was deleted on the server and removed from the page.
    Removed { id: CartItemId },
    /// The remove request failed; the row stays.
    RemoveFailed { id: CartItemId, error: ApiError },
    /// The server stored `quantity` and the row now shows it.
    Updated {
        id: CartItemId,
        quantity: Quantity,
        line_total: Option<Price>,
    },
    /// A newer update for the row was issued before this response arrived;
    /// the response was dropped.
    Superseded { id: CartItemId, token: RequestToken },
    /// The update request failed. `reconciled` is true when the request was
    /// the row's latest and its input was reset to the confirmed quantity.
    UpdateFailed {
        id: CartItemId,
        error: ApiError,
        reconciled: bool,
    },
}

#[derive(Debug, Clone, Copy)]
enum Step {
    Up,
    Down,
}

/// Handles events delegated from the cart table body.
pub struct CartController<A, N> {
    page: Mutex<CartPage>,
    api: A,
    notifier: N,
}

impl<A: CartApi, N: Notifier> CartController<A, N> {
    /// Attach to the cart table, if the page has one.
    pub fn attach(page: Option<CartPage>, api: A, notifier: N) -> Option<Self> {
        let Some(page) = page else {
            debug!(root = CART_ITEMS_BODY_ID, "No cart table on page, not attaching");
            return None;
        };
        debug!(
            root = CART_ITEMS_BODY_ID,
            rows = page.rows().len(),
            has_subtotal = page.subtotal().is_some(),
            "Cart controller attached"
        );
        Some(Self {
            page: Mutex::new(page),
            api,
            notifier,
        })
    }

    /// A copy of the page as currently rendered.
    pub async fn snapshot(&self) -> CartPage {
        self.page.lock().await.clone()
    }

    /// Route one delegated event.
    #[instrument(skip(self))]
    pub async fn handle(&self, event: CartEvent) -> CartOutcome {
        match event {
            CartEvent::Click {
                row: Some(id),
                target,
            } => match target {
                ClickTarget::Remove => self.remove(id).await,
                ClickTarget::Decrement => self.step(id, Step::Down).await,
                ClickTarget::Increment => self.step(id, Step::Up).await,
                ClickTarget::Other => CartOutcome::Ignored,
            },
            CartEvent::Change {
                row: Some(id),
                on_quantity_input: true,
                value,
            } => self.set_quantity(id, &value).await,
            _ => {
                debug!("Event outside a row or without a marker, ignoring");
                CartOutcome::Ignored
            }
        }
    }

    /// Delete the row's cart item and drop the row from the page.
    #[instrument(skip(self), fields(cart_item_id = %id))]
    pub async fn remove(&self, id: CartItemId) -> CartOutcome {
        if self.page.lock().await.row(id).is_none() {
            debug!("Row not on page, ignoring remove");
            return CartOutcome::Ignored;
        }

        match self
            .api
            .remove_item(RemoveCartItemRequest { cart_item_id: id })
            .await
        {
            Ok(_) => {
                let mut page = self.page.lock().await;
                page.remove_row(id);
                let subtotal = page.recompute_subtotal();
                debug!(
                    subtotal = %subtotal,
                    element = CART_SUBTOTAL_ID,
                    "Cart item removed"
                );
                CartOutcome::Removed { id }
            }
            Err(error) => {
                warn!(status = ?error.status(), error = %error, "Remove failed");
                self.notifier.notify(Notice::RemoveFailed);
                CartOutcome::RemoveFailed { id, error }
            }
        }
    }

    /// Increase the row's quantity by one.
    pub async fn increment(&self, id: CartItemId) -> CartOutcome {
        self.step(id, Step::Up).await
    }

    /// Decrease the row's quantity by one, never below 1.
    pub async fn decrement(&self, id: CartItemId) -> CartOutcome {
        self.step(id, Step::Down).await
    }

    /// Apply a manual entry in the row's quantity input.
    ///
    /// Blank or non-numeric text becomes 1, anything below 1 is raised to 1.
    #[instrument(skip(self), fields(cart_item_id = %id))]
    pub async fn set_quantity(&self, id: CartItemId, value: &str) -> CartOutcome {
        let candidate = Quantity::from_input(value);
        let Some(token) = self.page.lock().await.begin_update(id, candidate) else {
            debug!("Row not on page, ignoring quantity change");
            return CartOutcome::Ignored;
        };
        self.update(id, token, candidate).await
    }

    /// Replace the page with the server's current cart.
    ///
    /// Responses to requests issued before the reload are dropped when they
    /// arrive.
    #[instrument(skip(self))]
    pub async fn reload(&self) -> Result<(), ApiError> {
        let summary = self.api.summary().await?;
        let mut page = self.page.lock().await;
        let fresh = CartPage::from_summary(&summary, page.currency_code());
        page.reload_from(fresh);
        debug!(rows = page.rows().len(), "Cart page reloaded");
        Ok(())
    }

    #[instrument(skip(self), fields(cart_item_id = %id))]
    async fn step(&self, id: CartItemId, step: Step) -> CartOutcome {
        let (token, candidate) = {
            let mut page = self.page.lock().await;
            let Some(current) = page.row(id).map(CartRow::current_quantity) else {
                debug!("Row not on page, ignoring stepper");
                return CartOutcome::Ignored;
            };
            let candidate = match step {
                Step::Up => current.increment(),
                Step::Down => current.decrement(),
            };
            let Some(token) = page.begin_update(id, candidate) else {
                return CartOutcome::Ignored;
            };
            (token, candidate)
        };
        self.update(id, token, candidate).await
    }

    async fn update(&self, id: CartItemId, token: RequestToken, candidate: Quantity) -> CartOutcome {
        debug!(%token, quantity = candidate.get(), "Sending quantity update");
        let result = self
            .api
            .update_item(UpdateCartItemRequest {
                cart_item_id: id,
                quantity: candidate.get(),
            })
            .await;

        let mut page = self.page.lock().await;
        match result {
            Ok(echo) => {
                let applied = page
                    .row_mut(id)
                    .is_some_and(|row| row.confirm_update(token, echo.quantity));
                if !applied {
                    debug!(%token, "Dropping superseded update response");
                    return CartOutcome::Superseded { id, token };
                }
                let line_total = page.row(id).and_then(CartRow::line_total);
                let subtotal = page.recompute_subtotal();
                debug!(
                    %token,
                    quantity = echo.quantity.get(),
                    subtotal = %subtotal,
                    "Quantity confirmed"
                );
                CartOutcome::Updated {
                    id,
                    quantity: echo.quantity,
                    line_total,
                }
            }
            Err(error) => {
                let reconciled = page
                    .row_mut(id)
                    .is_some_and(|row| row.reject_update(token));
                drop(page);
                warn!(
                    %token,
                    reconciled,
                    status = ?error.status(),
                    error = %error,
                    "Quantity update failed"
                );
                self.notifier.notify(Notice::UpdateFailed);
                CartOutcome::UpdateFailed {
                    id,
                    error,
                    reconciled,
                }
            }
        }
    }
}
