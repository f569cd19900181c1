//! Product page add-to-cart controller.

use std::sync::atomic::{AtomicBool, Ordering};

use cartwire_core::{AddToCartRequest, ProductId, parse_quantity_input};
use tracing::{debug, info, instrument, warn};

use crate::api::{ApiError, CartApi};
use crate::dom::{ADD_TO_CART_BUTTON_ID, PRODUCT_ID_ATTR, PRODUCT_QTY_INPUT_ID};
use crate::notify::{Notice, Notifier};
use crate::page::AddToCartTrigger;

/// What a click on the add-to-cart button did.
#[derive(Debug)]
pub enum AddOutcome {
    /// The server accepted the request.
    Added { request: AddToCartRequest },
    /// The request failed; the user saw the generic error.
    Failed {
        request: AddToCartRequest,
        error: ApiError,
    },
    /// An earlier click was still waiting for its response; nothing was sent.
    InFlight,
}

impl AddOutcome {
    #[must_use]
    pub const fn is_added(&self) -> bool {
        matches!(self, Self::Added { .. })
    }
}

/// Clears the in-flight flag when the click handler finishes, however it
/// finishes.
struct InFlightGuard<'a>(&'a AtomicBool);

impl<'a> InFlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Handles clicks on the product page's add-to-cart button.
pub struct AddToCartController<A, N> {
    trigger: AddToCartTrigger,
    api: A,
    notifier: N,
    in_flight: AtomicBool,
}

impl<A: CartApi, N: Notifier> AddToCartController<A, N> {
    /// Attach to the add-to-cart button, if the page has one.
    pub fn attach(trigger: Option<AddToCartTrigger>, api: A, notifier: N) -> Option<Self> {
        let Some(trigger) = trigger else {
            debug!(
                button = ADD_TO_CART_BUTTON_ID,
                "No add-to-cart button on page, not attaching"
            );
            return None;
        };
        debug!(
            button = ADD_TO_CART_BUTTON_ID,
            attr = PRODUCT_ID_ATTR,
            input = PRODUCT_QTY_INPUT_ID,
            product_id = %trigger.product_id,
            "Add-to-cart controller attached"
        );
        Some(Self {
            trigger,
            api,
            notifier,
            in_flight: AtomicBool::new(false),
        })
    }

    #[must_use]
    pub const fn product_id(&self) -> ProductId {
        self.trigger.product_id
    }

    /// Whether a click is waiting for its response. The button is disabled
    /// while this holds.
    #[must_use]
    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Handle a click, with `quantity_input` the current text of the quantity
    /// input (empty when the page has none).
    #[instrument(skip(self), fields(product_id = %self.trigger.product_id))]
    pub async fn click(&self, quantity_input: &str) -> AddOutcome {
        let Some(_guard) = InFlightGuard::acquire(&self.in_flight) else {
            debug!("Add-to-cart already in flight, ignoring click");
            return AddOutcome::InFlight;
        };

        let request = AddToCartRequest {
            product_id: self.trigger.product_id,
            quantity: parse_quantity_input(quantity_input),
        };

        match self.api.add_item(request).await {
            Ok(_) => {
                info!(quantity = request.quantity, "Added to cart");
                self.notifier.notify(Notice::AddedToCart);
                AddOutcome::Added { request }
            }
            Err(error) => {
                warn!(
                    quantity = request.quantity,
                    status = ?error.status(),
                    error = %error,
                    "Add to cart failed"
                );
                self.notifier.notify(Notice::AddFailed);
                AddOutcome::Failed { request, error }
            }
        }
    }
}
