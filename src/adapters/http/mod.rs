//! HTTP adapters - REST API implementations.

pub mod access;

pub use access::{access_router, AccessAppState};
