//! User-facing access errors.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | NotFound | 404 |
//! | InvalidRecord | 406 |
//! | Upstream | 502 |
//!
//! Credential and entitlement failures are not represented here: they are
//! converted into redaction or a fallback URL and never reach the caller.

use thiserror::Error;

/// Errors surfaced by the access gateway.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessError {
    /// The requested product does not exist.
    #[error("No product matching {0}")]
    NotFound(String),

    /// The upstream record lacks required fields.
    #[error("Product '{product}' is invalid: {reason}")]
    InvalidRecord { product: String, reason: String },

    /// The commerce backend could not be reached or returned garbage while
    /// resolving the requested product itself.
    #[error("Commerce backend unavailable: {0}")]
    Upstream(String),
}

impl AccessError {
    pub fn slug_not_found(slug: impl AsRef<str>) -> Self {
        AccessError::NotFound(format!("slug '{}'", slug.as_ref()))
    }

    pub fn id_not_found(id: impl std::fmt::Display) -> Self {
        AccessError::NotFound(format!("id {}", id))
    }

    pub fn invalid_record(product: impl Into<String>, reason: impl Into<String>) -> Self {
        AccessError::InvalidRecord {
            product: product.into(),
            reason: reason.into(),
        }
    }

    pub fn upstream(message: impl Into<String>) -> Self {
        AccessError::Upstream(message.into())
    }

    /// Stable code for programmatic handling by HTTP clients.
    pub fn error_code(&self) -> &'static str {
        match self {
            AccessError::NotFound(_) => "PRODUCT_NOT_FOUND",
            AccessError::InvalidRecord { .. } => "INVALID_PRODUCT_RECORD",
            AccessError::Upstream(_) => "COMMERCE_UNAVAILABLE",
        }
    }
}
