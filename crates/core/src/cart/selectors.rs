//! Read-only projections over a [`CartState`].
//!
//! Selectors recompute on every call; carts are small enough that nothing is
//! cached.

use rust_decimal::Decimal;
use serde::Serialize;

use super::{CartLineItem, CartState};
use crate::{CurrencyCode, PizzaId, Price};

/// All lines in insertion order.
#[must_use]
pub fn cart(state: &CartState) -> &[CartLineItem] {
    state.lines()
}

/// Sum of line quantities; 0 for an empty cart. Saturates at `u32::MAX`.
#[must_use]
pub fn total_cart_quantity(state: &CartState) -> u32 {
    state
        .lines()
        .iter()
        .fold(0u32, |acc, line| acc.saturating_add(line.quantity))
}

/// Sum of line totals; 0 for an empty cart.
///
/// Transitions reject any line whose total would push this past
/// `Decimal::MAX`, so the sum is exact; the fold saturates rather than
/// panicking all the same.
#[must_use]
pub fn total_cart_price(state: &CartState) -> Decimal {
    state
        .lines()
        .iter()
        .fold(Decimal::ZERO, |acc, line| acc.saturating_add(line.total_price))
}

/// Quantity of the line for `pizza_id`, or 0 if it is not in the cart.
#[must_use]
pub fn current_quantity_by_id(state: &CartState, pizza_id: PizzaId) -> u32 {
    state.line(pizza_id).map_or(0, |line| line.quantity)
}

/// Everything the cart views and the JSON API show, computed in one pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartSummary {
    pub items: Vec<CartLineItem>,
    pub total_quantity: u32,
    pub total_price: Price,
    /// `total_price` run through the currency formatter.
    pub formatted_total: String,
}

/// Build a [`CartSummary`] priced in `currency`.
#[must_use]
pub fn summary(state: &CartState, currency: CurrencyCode) -> CartSummary {
    let total_price = Price::new(total_cart_price(state), currency);
    CartSummary {
        items: cart(state).to_vec(),
        total_quantity: total_cart_quantity(state),
        formatted_total: total_price.display(),
        total_price,
    }
}
