//! Session-owned carts.
//!
//! A request loads the session's cart into a [`CartStore`], dispatches one
//! intent and writes the result back. Stored lines are rebuilt through
//! `CartState::from`, so a tampered or stale session cannot smuggle in a
//! line that breaks the cart's invariants.

use pizza_cart_core::{CartAction, CartLineItem, CartState, CartStore, selectors};
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{Result, add_breadcrumb};
use crate::models::session;

/// The session's cart, empty if none has been stored yet.
///
/// # Errors
///
/// Returns an error if the session store cannot be read.
pub async fn load(session: &Session) -> Result<CartState> {
    let lines = session
        .get::<Vec<CartLineItem>>(session::CART)
        .await?
        .unwrap_or_default();
    Ok(CartState::from(lines))
}

/// Write the cart back to the session.
///
/// # Errors
///
/// Returns an error if the session store cannot be written.
pub async fn save(session: &Session, cart: &CartState) -> Result<()> {
    session.insert(session::CART, cart.lines()).await?;
    Ok(())
}

/// Apply one intent to the session's cart and return the new cart.
///
/// A rejected intent leaves the stored cart untouched.
///
/// # Errors
///
/// Returns the cart's rejection, or a session error.
#[instrument(skip_all, fields(action = action.name()))]
pub async fn apply(session: &Session, action: CartAction) -> Result<CartState> {
    let pizza_id = action.pizza_id();
    let name = action.name();

    let mut store = CartStore::from_state(load(session).await?);
    store.dispatch(action)?;
    let cart = store.into_state();

    save(session, &cart).await?;

    let pizza = pizza_id.map(|id| id.to_string()).unwrap_or_default();
    add_breadcrumb("cart", name, Some(&[("pizza_id", pizza.as_str())]));

    tracing::info!(
        pizza_id = pizza_id.map(|id| id.as_i32()),
        quantity = pizza_id.map(|id| selectors::current_quantity_by_id(&cart, id)),
        total_quantity = selectors::total_cart_quantity(&cart),
        "cart updated"
    );

    Ok(cart)
}
