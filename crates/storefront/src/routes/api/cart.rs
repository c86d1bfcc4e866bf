//! Cart summary as JSON.

use axum::{Json, extract::State};
use pizza_cart_core::{CartSummary, selectors};
use tower_sessions::Session;
use tracing::instrument;

use crate::error::Result;
use crate::services::cart as cart_service;
use crate::state::AppState;

/// Lines, totals and the formatted total of the session's cart.
#[instrument(skip(state, session))]
pub async fn summary(State(state): State<AppState>, session: Session) -> Result<Json<CartSummary>> {
    let cart = cart_service::load(&session).await?;
    Ok(Json(selectors::summary(&cart, state.currency())))
}
