//! Cart page controller against a mock backend.

use std::sync::Arc;

use cartwire_core::{CartItemId, CurrencyCode, Price, Quantity};
use cartwire_integration_tests::{TestContext, cart_item, summary_body};
use cartwire_storefront::{
    CartApi, CartController, CartEvent, CartOutcome, CartPage, CartRow, HttpCartApi, Notice,
    Page, RecordingNotifier, attach_all,
};
use httpmock::prelude::*;
use serde_json::json;

const MUG: CartItemId = CartItemId::new(42);
const TEA: CartItemId = CartItemId::new(43);

/// Serve the summary for a mug at $9.99 x1 and tea at $4.50 x2, load the
/// page from it and attach the cart controller.
async fn hydrated(ctx: &TestContext) -> CartController<HttpCartApi, Arc<RecordingNotifier>> {
    ctx.server.mock(|when, then| {
        when.method(GET).path("/api/cart/summary");
        then.status(200).json_body(summary_body(
            &[cart_item(42, "Mug", 9.99, 1), cart_item(43, "Tea", 4.5, 2)],
            18.99,
        ));
    });

    let summary = ctx
        .api
        .summary()
        .await
        .unwrap_or_else(|e| panic!("summary: {e}"));
    let page = CartPage::from_summary(&summary, CurrencyCode::USD);
    assert_eq!(page.subtotal_text().as_deref(), Some("$18.99"));

    let controllers = attach_all(Page::cart(page), ctx.api.clone(), Arc::clone(&ctx.notifier));
    assert!(controllers.add_to_cart.is_none());
    controllers
        .cart
        .unwrap_or_else(|| panic!("cart controller not attached"))
}

#[tokio::test]
async fn test_plus_renders_server_quantity() {
    let ctx = TestContext::start();
    let controller = hydrated(&ctx).await;
    let mock = ctx.server.mock(|when, then| {
        when.method(POST)
            .path("/api/cart/update")
            .json_body(json!({"cart_item_id": 42, "quantity": 2}));
        then.status(200).json_body(cart_item(42, "Mug", 9.99, 2));
    });

    let outcome = controller
        .handle(CartEvent::click(Some(MUG), "qty-btn plus"))
        .await;

    assert!(matches!(outcome, CartOutcome::Updated { id, .. } if id == MUG));
    mock.assert_calls(1);
    let page = controller.snapshot().await;
    let row = page.row(MUG).unwrap_or_else(|| panic!("row missing"));
    assert_eq!(row.quantity_input(), "2");
    assert_eq!(row.line_total_text().as_deref(), Some("$19.98"));
    assert_eq!(page.subtotal_text().as_deref(), Some("$28.98"));
    assert!(ctx.notifier.notices().is_empty());
}

#[tokio::test]
async fn test_manual_zero_is_sent_as_one() {
    let ctx = TestContext::start();
    let controller = hydrated(&ctx).await;
    let mock = ctx.server.mock(|when, then| {
        when.method(POST)
            .path("/api/cart/update")
            .json_body(json!({"cart_item_id": 43, "quantity": 1}));
        then.status(200).json_body(json!({"quantity": 1}));
    });

    controller.handle(CartEvent::quantity_change(TEA, "0")).await;

    mock.assert_calls(1);
    let page = controller.snapshot().await;
    assert_eq!(
        page.row(TEA).and_then(|row| row.line_total_text()).as_deref(),
        Some("$4.50")
    );
    assert_eq!(page.subtotal_text().as_deref(), Some("$14.49"));
}

#[tokio::test]
async fn test_rejected_update_keeps_totals() {
    let ctx = TestContext::start();
    let controller = hydrated(&ctx).await;
    ctx.server.mock(|when, then| {
        when.method(POST).path("/api/cart/update");
        then.status(500).body("boom");
    });

    let outcome = controller.handle(CartEvent::click(Some(TEA), "minus")).await;

    match outcome {
        CartOutcome::UpdateFailed {
            error, reconciled, ..
        } => {
            assert_eq!(error.status(), Some(500));
            assert!(reconciled);
        }
        other => panic!("expected failure, got {other:?}"),
    }
    let page = controller.snapshot().await;
    let row = page.row(TEA).unwrap_or_else(|| panic!("row missing"));
    assert_eq!(row.quantity_input(), "2");
    assert_eq!(row.line_total_text().as_deref(), Some("$9.00"));
    assert_eq!(page.subtotal_text().as_deref(), Some("$18.99"));
    assert_eq!(ctx.notifier.notices(), vec![Notice::UpdateFailed]);
}

#[tokio::test]
async fn test_remove_drops_row() {
    let ctx = TestContext::start();
    let controller = hydrated(&ctx).await;
    let mock = ctx.server.mock(|when, then| {
        when.method(POST)
            .path("/api/cart/remove")
            .json_body(json!({"cart_item_id": 42}));
        then.status(200).json_body(json!({"message": "Item removed"}));
    });

    let outcome = controller
        .handle(CartEvent::click(Some(MUG), "btn btn-remove-item"))
        .await;

    assert!(matches!(outcome, CartOutcome::Removed { id } if id == MUG));
    mock.assert_calls(1);
    let page = controller.snapshot().await;
    assert!(page.row(MUG).is_none());
    assert_eq!(page.subtotal_text().as_deref(), Some("$9.00"));
}

#[tokio::test]
async fn test_failed_remove_keeps_row() {
    let ctx = TestContext::start();
    let controller = hydrated(&ctx).await;
    ctx.server.mock(|when, then| {
        when.method(POST).path("/api/cart/remove");
        then.status(404).json_body(json!({"detail": "Cart item not found"}));
    });

    let outcome = controller.remove(MUG).await;

    assert!(matches!(outcome, CartOutcome::RemoveFailed { .. }));
    assert!(controller.snapshot().await.row(MUG).is_some());
    assert_eq!(ctx.notifier.notices(), vec![Notice::RemoveFailed]);
}

#[tokio::test]
async fn test_zero_echo_is_treated_as_failure() {
    let ctx = TestContext::start();
    let controller = hydrated(&ctx).await;
    ctx.server.mock(|when, then| {
        when.method(POST).path("/api/cart/update");
        then.status(200).json_body(json!({"quantity": 0}));
    });

    let outcome = controller.decrement(MUG).await;

    assert!(matches!(outcome, CartOutcome::UpdateFailed { .. }));
    let page = controller.snapshot().await;
    assert_eq!(
        page.row(MUG).map(|row| row.quantity_input().to_string()),
        Some("1".to_string())
    );
    assert_eq!(ctx.notifier.count(Notice::UpdateFailed), 1);
}

#[tokio::test]
async fn test_reload_picks_up_server_cart() {
    let ctx = TestContext::start();
    let stale = CartPage::new(
        vec![CartRow::new(MUG, Price::from_cents(999, CurrencyCode::USD), Quantity::MIN)],
        CurrencyCode::USD,
    );
    let controller = CartController::attach(Some(stale), ctx.api.clone(), Arc::clone(&ctx.notifier))
        .unwrap_or_else(|| panic!("cart controller not attached"));
    let mock = ctx.server.mock(|when, then| {
        when.method(GET).path("/api/cart/summary");
        then.status(200)
            .json_body(summary_body(&[cart_item(43, "Tea", 4.5, 5)], 22.5));
    });

    controller
        .reload()
        .await
        .unwrap_or_else(|e| panic!("reload: {e}"));

    mock.assert_calls(1);
    let page = controller.snapshot().await;
    assert!(page.row(MUG).is_none());
    assert_eq!(
        page.row(TEA).map(|row| row.quantity_input().to_string()),
        Some("5".to_string())
    );
    assert_eq!(page.subtotal_text().as_deref(), Some("$22.50"));
}
