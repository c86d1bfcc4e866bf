//! Pizza Cart Core - cart store and shared types.
//!
//! This crate provides the cart state machine used by the storefront:
//! - [`cart`] - Line items, the [`CartStore`] and its intents, derived selectors
//! - [`types`] - Newtype IDs and currency-aware prices
//!
//! # Architecture
//!
//! The core crate contains only types and pure transitions - no I/O, no
//! sessions, no HTTP. Whoever owns a [`CartStore`] owns the cart; there is no
//! global store.
//!
//! ```
//! use pizza_cart_core::{CartAction, CartLineItem, CartStore, PizzaId, selectors};
//! use rust_decimal::Decimal;
//!
//! let mut store = CartStore::new();
//! let line = CartLineItem::new(PizzaId::new(12), "Margherita", 2, Decimal::from(10));
//! store.dispatch(CartAction::AddItem(line)).unwrap();
//!
//! assert_eq!(selectors::total_cart_quantity(store.state()), 2);
//! assert_eq!(selectors::total_cart_price(store.state()), Decimal::from(20));
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod types;

pub use cart::{
    CartAction, CartError, CartLineItem, CartState, CartStore, CartSummary, SubscriptionId, selectors,
};
pub use types::*;
