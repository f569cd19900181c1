//! cartwire storefront library.
//!
//! Controllers for the product page and the cart page, the cart API client
//! they share, and the view models they render into.
//!
//! # Architecture
//!
//! - [`api`] - `CartApi` seam and its `reqwest` implementation
//! - [`page`] - Product and cart page view models
//! - [`dom`] - Ids, classes and attributes of the page markup
//! - [`controllers`] - Add-to-cart and cart event handlers
//! - [`notify`] - Blocking user notifications
//! - [`config`] - Client configuration from the environment
//!
//! Both controllers are attached at page load and only when their root
//! element exists; they share nothing except the API client.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod config;
pub mod controllers;
pub mod dom;
pub mod notify;
pub mod page;

pub use api::{ApiError, CartApi, HttpCartApi};
pub use config::{ClientConfig, ConfigError};
pub use controllers::{
    AddOutcome, AddToCartController, CartController, CartOutcome, Controllers, attach_all,
};
pub use notify::{Notice, Notifier, RecordingNotifier, TracingNotifier};
pub use page::{AddToCartTrigger, CartEvent, CartPage, CartRow, Page, RequestToken};
