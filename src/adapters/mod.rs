//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `auth` - Credential verification (signed JWTs, fakes for development and tests)
//! - `commerce` - Commerce store client (WooCommerce REST, in-memory)
//! - `http` - Axum routes exposing the access gateway

pub mod auth;
pub mod commerce;
pub mod http;
