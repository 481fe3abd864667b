//! Catalog domain module.
//!
//! Product records as this crate understands them, the bundle naming
//! convention on slugs, and the redacted view returned to callers.

mod errors;
mod product;
mod slug;

pub use errors::AccessError;
pub use product::{Product, ProductView};
pub use slug::{BundleParts, ProductSlug, BUNDLE_DELIMITER};
