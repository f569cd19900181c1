//! Cart API wire model.
//!
//! Request and response bodies for the `/api/cart/*` endpoints. Quantities in
//! requests are raw integers because the product page sends whatever the
//! user typed (after defaulting); responses carry validated [`Quantity`]
//! values.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::{CartItemId, ProductId};
use super::price::{CurrencyCode, Price};
use super::quantity::Quantity;

/// Body of `POST /api/cart/add`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddToCartRequest {
    pub product_id: ProductId,
    pub quantity: i32,
}

/// Body of `POST /api/cart/update`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateCartItemRequest {
    pub cart_item_id: CartItemId,
    pub quantity: i32,
}

/// Body of `POST /api/cart/remove`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoveCartItemRequest {
    pub cart_item_id: CartItemId,
}

/// The part of an update response the cart page trusts.
///
/// Any other fields in the response are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuantityEcho {
    pub quantity: Quantity,
}

/// Product fields embedded in a cart item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItemProduct {
    pub id: ProductId,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl CartItemProduct {
    /// Unit price as a [`Price`].
    #[must_use]
    pub const fn unit_price(&self, currency_code: CurrencyCode) -> Price {
        Price::new(self.price, currency_code)
    }
}

/// A cart item as returned by the add, update and summary endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItemOut {
    pub id: CartItemId,
    pub product: CartItemProduct,
    pub quantity: Quantity,
}

/// Body of `GET /api/cart/summary`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartSummary {
    pub items: Vec<CartItemOut>,
    #[serde(with = "rust_decimal::serde::float")]
    pub subtotal: Decimal,
}
