//! HTTP routes for the storefront API.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health                      - Liveness check
//! GET    /health/ready                - Readiness check (catalog loaded)
//!
//! # Catalog
//! GET    /api/brands                  - All brands
//! GET    /api/brands/{id}/products    - Products of one brand
//! GET    /api/products?query=         - Product search
//!
//! # Auth
//! POST   /api/login                   - Exchange credentials for a token
//!
//! # Cart (requires accessToken)
//! GET    /api/me/cart                 - Current cart
//! POST   /api/me/cart?productId=      - Add one unit of a product
//! DELETE /api/me/cart/{productId}     - Remove a line
//! POST   /api/me/cart/{productId}?quantity= - Set a line's quantity
//! ```

pub mod auth;
pub mod brands;
pub mod cart;
pub mod products;

use std::time::Duration;

use axum::{
    Router,
    extract::{Request, State},
    http::StatusCode,
    middleware,
    response::Response,
    routing::{get, post},
};
use tower_http::trace::{DefaultOnResponse, OnResponse, TraceLayer};
use tracing::Span;

use crate::error::AppError;
use crate::middleware::request_id_middleware;
use crate::state::AppState;

/// Create the `/api` router.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/brands", get(brands::index))
        .route("/brands/{id}/products", get(brands::products))
        .route("/products", get(products::index))
        .route("/login", post(auth::login))
        .route("/me/cart", get(cart::show).post(cart::add))
        .route(
            "/me/cart/{product_id}",
            post(cart::update).delete(cart::remove),
        )
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
        .nest("/api", api_routes())
        .fallback(not_found)
}

/// Build the complete application with its middleware stack.
pub fn app(state: AppState) -> Router {
    routes()
        .layer(middleware::from_fn(request_id_middleware))
        .layer(
            TraceLayer::new_for_http()
                // Path only: the query string can carry an access token.
                .make_span_with(|request: &Request| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        path = %request.uri().path(),
                        request_id = tracing::field::Empty,
                        user = tracing::field::Empty,
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                    )
                })
                .on_response(|response: &Response, latency: Duration, span: &Span| {
                    span.record("status", response.status().as_u16());
                    span.record(
                        "latency_ms",
                        u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
                    );
                    DefaultOnResponse::default().on_response(response, latency, span);
                }),
        )
        .with_state(state)
        // Sentry layers (outermost for full request coverage)
        .layer(sentry_tower::NewSentryLayer::new_from_top())
        .layer(sentry_tower::SentryHttpLayer::new().enable_transaction())
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running.
async fn health() -> &'static str {
    "ok"
}

/// JSON 404 for paths no route matches.
async fn not_found() -> AppError {
    AppError::RouteNotFound
}

/// Readiness health check endpoint.
///
/// Returns 503 Service Unavailable until the catalog has brands and products.
async fn readiness(State(state): State<AppState>) -> StatusCode {
    let store = state.read_store().await;
    if store.brands().is_empty() || store.products().is_empty() {
        StatusCode::SERVICE_UNAVAILABLE
    } else {
        StatusCode::OK
    }
}
