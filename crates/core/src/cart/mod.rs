//! The cart: line items, state transitions and derived selectors.
//!
//! ```text
//! intent (CartAction) -> CartStore::dispatch -> CartState transition
//!                                            -> subscribers notified
//! selectors::* read the resulting CartState
//! ```

mod action;
mod error;
mod line;
pub mod selectors;
mod state;
mod store;

pub use action::CartAction;
pub use error::CartError;
pub use line::CartLineItem;
pub use selectors::CartSummary;
pub use state::CartState;
pub use store::{CartStore, SubscriptionId};
