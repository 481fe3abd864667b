//! Commerce adapters.
//!
//! Implementations of the `CommerceBackend` port:
//!
//! - `woocommerce` - REST client for a WooCommerce store
//! - `in_memory` - Seeded store with error injection for tests

mod in_memory;
mod woocommerce;

pub use in_memory::{InMemoryCommerceBackend, MethodCall};
pub use woocommerce::{
    WooCommerceClient, WooCommerceConfig, DEFAULT_API_VERSION, DEFAULT_LOGIN_PATH,
};
