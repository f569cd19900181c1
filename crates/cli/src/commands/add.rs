//! `cartwire add`.

use cartwire_core::ProductId;
use cartwire_storefront::{AddOutcome, AddToCartController, AddToCartTrigger, ClientConfig, HttpCartApi};

use super::{AppError, StderrNotifier};

/// Click the add-to-cart button of `product_id` with `quantity` typed into
/// the quantity input.
pub async fn run(config: &ClientConfig, product_id: ProductId, quantity: &str) -> Result<(), AppError> {
    let api = HttpCartApi::new(config)?;
    let Some(controller) =
        AddToCartController::attach(Some(AddToCartTrigger::new(product_id)), api, StderrNotifier)
    else {
        return Ok(());
    };

    match controller.click(quantity).await {
        AddOutcome::Added { request } => {
            tracing::info!(
                product_id = %request.product_id,
                quantity = request.quantity,
                "Product added"
            );
            Ok(())
        }
        AddOutcome::Failed { error, .. } => Err(error.into()),
        AddOutcome::InFlight => Ok(()),
    }
}
