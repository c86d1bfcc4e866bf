//! Pizza Cart Storefront library.
//!
//! This crate provides the storefront as a library, allowing the router to
//! be built and driven in tests without binding a socket.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;

pub use config::StorefrontConfig;
pub use routes::app;
pub use state::AppState;
