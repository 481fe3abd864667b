//! Access handlers.
//!
//! ## Commands
//! - Issuing a one-time store login link
//!
//! ## Queries
//! - Get a product, redacted unless the caller is entitled
//! - Get the store page for a product id

mod get_login_url;
mod get_product_access;
mod get_product_link;

// Commands
pub use get_login_url::{GetLoginUrlCommand, GetLoginUrlHandler, GetLoginUrlResult};

// Queries
pub use get_product_access::{
    GetProductAccessHandler, GetProductAccessQuery, GetProductAccessResult,
};
pub use get_product_link::{GetProductLinkHandler, GetProductLinkQuery, GetProductLinkResult};
