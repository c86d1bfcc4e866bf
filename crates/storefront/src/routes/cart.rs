//! Cart route handlers.
//!
//! Cart operations use HTMX for dynamic updates without full page reloads.
//! Every mutating route dispatches exactly one cart intent and answers with
//! the refreshed cart items fragment plus an `HX-Trigger: cart-updated`
//! header so the overview bar re-fetches itself.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, State},
    response::{AppendHeaders, IntoResponse, Response},
};
use pizza_cart_core::{
    CartAction, CartLineItem, CartState, CurrencyCode, PizzaId, Price, selectors,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::models::{Username, session as session_keys};
use crate::services::cart as cart_service;
use crate::state::AppState;

/// Cart item display data for templates.
#[derive(Clone)]
pub struct CartItemView {
    pub pizza_id: i32,
    pub name: String,
    pub quantity: u32,
    pub unit_price: String,
    pub line_price: String,
}

impl CartItemView {
    fn new(line: &CartLineItem, currency: CurrencyCode) -> Self {
        Self {
            pizza_id: line.pizza_id.as_i32(),
            name: line.name.clone(),
            quantity: line.quantity,
            unit_price: Price::new(line.unit_price, currency).display(),
            line_price: Price::new(line.total_price, currency).display(),
        }
    }
}

/// Cart display data for templates.
#[derive(Clone)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub total_quantity: u32,
    pub subtotal: String,
}

impl CartView {
    /// Build the view from the cart's summary.
    #[must_use]
    pub fn new(cart: &CartState, currency: CurrencyCode) -> Self {
        let summary = selectors::summary(cart, currency);
        Self {
            items: summary
                .items
                .iter()
                .map(|line| CartItemView::new(line, currency))
                .collect(),
            total_quantity: summary.total_quantity,
            subtotal: summary.formatted_total,
        }
    }

    /// Whether there is anything to show.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

// =============================================================================
// Forms
// =============================================================================

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub pizza_id: PizzaId,
    pub name: String,
    pub unit_price: Decimal,
    pub quantity: Option<u32>,
    /// Defaults to `quantity * unit_price`.
    pub total_price: Option<Decimal>,
}

impl AddToCartForm {
    fn into_line(self) -> Result<CartLineItem> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(AppError::BadRequest("pizza name is required".to_string()));
        }

        let mut line = CartLineItem::new(
            self.pizza_id,
            name,
            self.quantity.unwrap_or(1),
            self.unit_price,
        );
        if let Some(total_price) = self.total_price {
            line.total_price = total_price;
        }
        Ok(line)
    }
}

/// Form naming one cart line (delete, increase, decrease).
#[derive(Debug, Deserialize)]
pub struct PizzaForm {
    pub pizza_id: PizzaId,
}

// =============================================================================
// Templates
// =============================================================================

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub cart: CartView,
    pub username: Option<String>,
}

/// Cart items fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_items.html")]
pub struct CartItemsTemplate {
    pub cart: CartView,
}

/// Cart overview bar fragment template (for HTMX).
///
/// Renders nothing while the cart is empty.
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_overview.html")]
pub struct CartOverviewTemplate {
    pub total_quantity: u32,
    pub total_price: String,
}

/// Quantity and delete controls for one menu item (for HTMX).
///
/// Renders nothing unless the item is in the cart.
#[derive(Template, WebTemplate)]
#[template(path = "partials/item_controls.html")]
pub struct ItemControlsTemplate {
    pub item: Option<CartItemView>,
}

/// Respond to a mutating cart request.
fn cart_updated(state: &AppState, cart: &CartState) -> Response {
    (
        AppendHeaders([("HX-Trigger", "cart-updated")]),
        CartItemsTemplate {
            cart: CartView::new(cart, state.currency()),
        },
    )
        .into_response()
}

// =============================================================================
// Handlers
// =============================================================================

/// Display cart page.
#[instrument(skip(state, session))]
pub async fn show(State(state): State<AppState>, session: Session) -> Result<CartShowTemplate> {
    let cart = cart_service::load(&session).await?;
    let username = session
        .get::<Username>(session_keys::USERNAME)
        .await?
        .map(|name| name.to_string());

    Ok(CartShowTemplate {
        cart: CartView::new(&cart, state.currency()),
        username,
    })
}

/// Cart overview bar (HTMX).
#[instrument(skip(state, session))]
pub async fn overview(
    State(state): State<AppState>,
    session: Session,
) -> Result<CartOverviewTemplate> {
    let cart = cart_service::load(&session).await?;
    let total_price = Price::new(selectors::total_cart_price(&cart), state.currency());

    Ok(CartOverviewTemplate {
        total_quantity: selectors::total_cart_quantity(&cart),
        total_price: total_price.display(),
    })
}

/// Controls for one menu item (HTMX).
#[instrument(skip(state, session))]
pub async fn item_controls(
    State(state): State<AppState>,
    session: Session,
    Path(pizza_id): Path<PizzaId>,
) -> Result<ItemControlsTemplate> {
    let cart = cart_service::load(&session).await?;

    let item = match selectors::current_quantity_by_id(&cart, pizza_id) {
        0 => None,
        _ => cart
            .line(pizza_id)
            .map(|line| CartItemView::new(line, state.currency())),
    };

    Ok(ItemControlsTemplate { item })
}

/// Add item to cart (HTMX).
#[instrument(skip(state, session))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<AddToCartForm>,
) -> Result<Response> {
    let line = form.into_line()?;
    let cart = cart_service::apply(&session, CartAction::AddItem(line)).await?;
    Ok(cart_updated(&state, &cart))
}

/// Remove item from cart (HTMX).
#[instrument(skip(state, session))]
pub async fn delete(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<PizzaForm>,
) -> Result<Response> {
    let cart = cart_service::apply(&session, CartAction::DeleteItem(form.pizza_id)).await?;
    Ok(cart_updated(&state, &cart))
}

/// Add one unit of an item (HTMX).
#[instrument(skip(state, session))]
pub async fn increase(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<PizzaForm>,
) -> Result<Response> {
    let cart = cart_service::apply(&session, CartAction::IncreaseQuantity(form.pizza_id)).await?;
    Ok(cart_updated(&state, &cart))
}

/// Remove one unit of an item (HTMX). The line goes at zero.
#[instrument(skip(state, session))]
pub async fn decrease(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<PizzaForm>,
) -> Result<Response> {
    let cart = cart_service::apply(&session, CartAction::DecreaseQuantity(form.pizza_id)).await?;
    Ok(cart_updated(&state, &cart))
}

/// Empty the cart (HTMX).
#[instrument(skip(state, session))]
pub async fn clear(State(state): State<AppState>, session: Session) -> Result<Response> {
    let cart = cart_service::apply(&session, CartAction::ClearCart).await?;
    Ok(cart_updated(&state, &cart))
}
