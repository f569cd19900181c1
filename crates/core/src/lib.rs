//! cartwire core - Shared cart types.
//!
//! This crate provides the types shared by the cart page controllers and the
//! command-line driver:
//! - `storefront` - API client, page view models and controllers
//! - `cli` - Terminal driver for the controllers
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP
//! clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype ids, prices, quantities and the cart wire model

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
