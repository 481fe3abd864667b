//! Axum router configuration for the product access endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    get_login_url, get_product_access, get_product_link, health, AccessAppState,
};

/// Create the access API router.
///
/// # Routes
///
/// Each route also answers with a trailing slash.
/// - `POST /product/:slug` - Product view, `restrictedFile` only if entitled
/// - `POST /login/:slug` - `{url}` logging the caller into the store
/// - `GET /products/:id/link` - `{url}` of the product page
/// - `GET /health` - Liveness probe
pub fn access_routes() -> Router<AccessAppState> {
    Router::new()
        .route("/product/:slug", post(get_product_access))
        .route("/product/:slug/", post(get_product_access))
        .route("/login/:slug", post(get_login_url))
        .route("/login/:slug/", post(get_login_url))
        .route("/products/:id/link", get(get_product_link))
        .route("/products/:id/link/", get(get_product_link))
        .route("/health", get(health))
        .route("/health/", get(health))
}

/// The access router with its state attached, ready to serve.
pub fn access_router(state: AccessAppState) -> Router {
    access_routes().with_state(state)
}
