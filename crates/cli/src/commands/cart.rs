//! `cartwire show` and the cart item commands.

use cartwire_storefront::{
    CartApi, CartController, CartEvent, CartOutcome, CartPage, ClientConfig, HttpCartApi,
};

use super::{AppError, StderrNotifier};

/// Load the cart page as the server would render it.
async fn load(config: &ClientConfig) -> Result<(HttpCartApi, CartPage), AppError> {
    let api = HttpCartApi::new(config)?;
    let summary = api.summary().await?;
    let page = CartPage::from_summary(&summary, config.currency_code);
    tracing::debug!(
        rows = page.rows().len(),
        subtotal = %summary.subtotal,
        "Cart loaded"
    );
    Ok((api, page))
}

#[allow(clippy::print_stdout)]
fn render(page: &CartPage) {
    if page.is_empty() {
        println!("Cart is empty");
    } else {
        print!("{page}");
    }
}

/// Print the cart.
pub async fn show(config: &ClientConfig) -> Result<(), AppError> {
    let (_, page) = load(config).await?;
    render(&page);
    Ok(())
}

/// Deliver `event` to the cart controller and print the page it leaves
/// behind.
pub async fn dispatch(config: &ClientConfig, event: CartEvent) -> Result<(), AppError> {
    let (api, page) = load(config).await?;
    if let Some(id) = event.row().filter(|id| page.row(*id).is_none()) {
        return Err(AppError::NotInCart(id));
    }

    let Some(controller) = CartController::attach(Some(page), api, StderrNotifier) else {
        return Ok(());
    };

    match controller.handle(event).await {
        CartOutcome::RemoveFailed { error, .. } | CartOutcome::UpdateFailed { error, .. } => {
            return Err(error.into());
        }
        CartOutcome::Updated { id, quantity, .. } => {
            tracing::info!(cart_item_id = %id, %quantity, "Quantity updated");
        }
        CartOutcome::Removed { id } => {
            tracing::info!(cart_item_id = %id, "Cart item removed");
        }
        CartOutcome::Ignored | CartOutcome::Superseded { .. } => {}
    }

    render(&controller.snapshot().await);
    Ok(())
}
