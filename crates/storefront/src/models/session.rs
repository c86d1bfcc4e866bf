//! Session keys.
//!
//! Every browser session owns its own cart, stored as the list of cart lines
//! and rebuilt into a `CartState` on each request.

/// Key for the session's cart lines.
pub const CART: &str = "cart";

/// Key for the shopper's display name.
pub const USERNAME: &str = "username";
