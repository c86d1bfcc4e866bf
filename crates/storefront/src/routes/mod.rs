//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                  - Health check
//!
//! # Cart (HTMX fragments)
//! GET  /cart                    - Cart page
//! GET  /cart/overview           - Overview bar (empty while the cart is)
//! GET  /cart/items/{pizza_id}   - Quantity + delete controls for one item
//! POST /cart/add                - Add to cart
//! POST /cart/delete             - Remove a line
//! POST /cart/increase           - One more of a line
//! POST /cart/decrease           - One fewer of a line (removed at zero)
//! POST /cart/clear              - Empty the cart
//!
//! # API
//! GET  /api/cart                - Cart summary (JSON)
//!
//! # User
//! POST /user                    - Set the shopper's name
//! ```

pub mod api;
pub mod cart;
pub mod user;

use axum::{
    Router,
    body::Body,
    http::Request,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::middleware::{create_session_layer, request_id_middleware};
use crate::state::AppState;

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/overview", get(cart::overview))
        .route("/items/{pizza_id}", get(cart::item_controls))
        .route("/add", post(cart::add))
        .route("/delete", post(cart::delete))
        .route("/increase", post(cart::increase))
        .route("/decrease", post(cart::decrease))
        .route("/clear", post(cart::clear))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        // Cart routes
        .nest("/cart", cart_routes())
        // JSON API
        .route("/api/cart", get(api::cart::summary))
        // Shopper name
        .route("/user", post(user::set_username))
}

/// Build the complete application: routes, sessions, request IDs, tracing.
///
/// Sentry layers are added by the binary on top of this.
pub fn app(state: AppState) -> Router {
    let session_layer = create_session_layer(state.config());

    let trace_layer = TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
        tracing::info_span!(
            "request",
            method = %request.method(),
            uri = %request.uri(),
            request_id = tracing::field::Empty,
        )
    });

    routes()
        .layer(session_layer)
        .layer(axum::middleware::from_fn(request_id_middleware))
        .layer(trace_layer)
        .with_state(state)
}

/// Liveness health check endpoint.
async fn health() -> &'static str {
    "ok"
}
