//! Business logic services for storefront.
//!
//! - [`cart`] - Session-owned carts: load, dispatch one intent, save

pub mod cart;
