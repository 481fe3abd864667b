//! HTTP adapter for product access.
//!
//! - `POST /product/:slug` - Product view for the caller
//! - `POST /login/:slug` - Store login URL
//! - `GET /products/:id/link` - Product page URL
//! - `GET /health` - Liveness probe

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::*;
pub use handlers::{AccessApiError, AccessAppState};
pub use routes::{access_router, access_routes};
