//! Cart API client.
//!
//! # Architecture
//!
//! - [`CartApi`] is the seam the controllers are written against
//! - [`HttpCartApi`] implements it over `reqwest` with JSON bodies
//! - One attempt per call: no retries, no timeout, no cancellation
//!
//! # Errors
//!
//! Every failure is an [`ApiError`]. The controllers show the same generic
//! notification for all of them, but the variant keeps the cause so callers
//! and tests can tell a 401 from a dropped connection.

mod client;

use std::sync::Arc;

use async_trait::async_trait;
use cartwire_core::{
    AddToCartRequest, CartSummary, QuantityEcho, RemoveCartItemRequest, UpdateCartItemRequest,
};
use thiserror::Error;

pub use client::HttpCartApi;

/// `POST` endpoint adding a product to the cart.
pub const ADD_PATH: &str = "/api/cart/add";
/// `POST` endpoint changing a cart item's quantity.
pub const UPDATE_PATH: &str = "/api/cart/update";
/// `POST` endpoint deleting a cart item.
pub const REMOVE_PATH: &str = "/api/cart/remove";
/// `GET` endpoint returning the whole cart.
pub const SUMMARY_PATH: &str = "/api/cart/summary";

/// Errors that can occur when calling the cart API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a response (connect, TLS, body read).
    #[error("Network error: {0}")]
    Network(#[source] reqwest::Error),

    /// The server answered with a non-success status. The body is discarded.
    #[error("HTTP status {status}")]
    HttpStatus { status: u16 },

    /// The response body was not the expected JSON.
    #[error("Malformed response: {0}")]
    Decode(String),

    /// An endpoint path could not be resolved against the base URL.
    #[error("Invalid endpoint URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The HTTP client could not be constructed.
    #[error("Client setup failed: {0}")]
    Setup(String),
}

impl ApiError {
    /// Status code for [`ApiError::HttpStatus`] failures.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::HttpStatus { status } => Some(*status),
            _ => None,
        }
    }

    /// Whether the server rejected the request because no session is attached.
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::HttpStatus { status: 401 })
    }
}

/// Result type alias for `ApiError`.
pub type Result<T> = std::result::Result<T, ApiError>;

/// Operations the cart page controllers need from the backend.
#[async_trait]
pub trait CartApi: Send + Sync {
    /// `POST /api/cart/add`. The response body is returned uninspected.
    async fn add_item(&self, request: AddToCartRequest) -> Result<serde_json::Value>;

    /// `POST /api/cart/update`. Returns the quantity the server stored.
    async fn update_item(&self, request: UpdateCartItemRequest) -> Result<QuantityEcho>;

    /// `POST /api/cart/remove`. The response body is returned uninspected.
    async fn remove_item(&self, request: RemoveCartItemRequest) -> Result<serde_json::Value>;

    /// `GET /api/cart/summary`.
    async fn summary(&self) -> Result<CartSummary>;
}

#[async_trait]
impl<T: CartApi + ?Sized> CartApi for Arc<T> {
    async fn add_item(&self, request: AddToCartRequest) -> Result<serde_json::Value> {
        (**self).add_item(request).await
    }

    async fn update_item(&self, request: UpdateCartItemRequest) -> Result<QuantityEcho> {
        (**self).update_item(request).await
    }

    async fn remove_item(&self, request: RemoveCartItemRequest) -> Result<serde_json::Value> {
        (**self).remove_item(request).await
    }

    async fn summary(&self) -> Result<CartSummary> {
        (**self).summary().await
    }
}
