//! Integration tests for cartwire.
//!
//! The controllers run over the real `reqwest` client against an `httpmock`
//! server standing in for the backend.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p cartwire-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `add_to_cart` - product page button against `/api/cart/add`
//! - `cart_page` - cart table events against `/api/cart/{update,remove,summary}`

use std::sync::Arc;

use cartwire_storefront::{ClientConfig, HttpCartApi, RecordingNotifier};
use httpmock::MockServer;
use secrecy::SecretString;
use serde_json::{Value, json};
use url::Url;

/// Session cookie every test client sends.
pub const SESSION_COOKIE: &str = "session=integration";

/// A mock backend plus a client and notifier pointed at it.
pub struct TestContext {
    pub server: MockServer,
    pub api: HttpCartApi,
    pub notifier: Arc<RecordingNotifier>,
}

impl TestContext {
    /// Start a mock backend and build a client with a session cookie.
    ///
    /// # Panics
    ///
    /// Panics if the mock server URL cannot be turned into a client.
    #[must_use]
    pub fn start() -> Self {
        let server = MockServer::start();
        let mut config = ClientConfig::new(
            Url::parse(&server.base_url()).unwrap_or_else(|e| panic!("mock server URL: {e}")),
        );
        config.session_cookie = Some(SecretString::from(SESSION_COOKIE.to_string()));
        let api = HttpCartApi::new(&config).unwrap_or_else(|e| panic!("client setup: {e}"));
        Self {
            server,
            api,
            notifier: Arc::new(RecordingNotifier::new()),
        }
    }
}

/// One cart item as the backend serializes it.
#[must_use]
pub fn cart_item(id: i32, name: &str, price: f64, quantity: i32) -> Value {
    json!({
        "id": id,
        "product": {"id": id + 1000, "name": name, "price": price, "image_url": null},
        "quantity": quantity,
    })
}

/// A `/api/cart/summary` body for `items`.
#[must_use]
pub fn summary_body(items: &[Value], subtotal: f64) -> Value {
    json!({"items": items, "subtotal": subtotal})
}
