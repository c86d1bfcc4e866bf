//! JSON API routes.

pub mod cart;
