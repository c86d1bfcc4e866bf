//! Domain models for storefront.
//!
//! - [`session`] - Keys for values stored in the session
//! - [`user`] - The shopper's display name

pub mod session;
pub mod user;

pub use user::{Username, UsernameError};
