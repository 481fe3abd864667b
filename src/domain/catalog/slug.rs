//! Product slugs and the bundle naming convention.
//!
//! A slug of the form `{bundle}_{item}` names an item sold through the bundle
//! (subscription) product `{bundle}`. The relationship lives purely in the
//! upstream slug; there is no separate data source for it.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::ValidationError;

/// Separates the bundle slug from the item slug.
pub const BUNDLE_DELIMITER: char = '_';

/// Human-readable product identifier as used in store URLs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductSlug(String);

/// The two halves of a bundle-encoded slug.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BundleParts<'a> {
    pub bundle_slug: &'a str,
    pub item_slug: &'a str,
}

impl ProductSlug {
    /// Creates a slug, rejecting empty values and path separators.
    pub fn new(slug: impl Into<String>) -> Result<Self, ValidationError> {
        let slug = slug.into();
        if slug.trim().is_empty() {
            return Err(ValidationError::empty_field("slug"));
        }
        if slug.contains('/') {
            return Err(ValidationError::invalid_format("slug", "contains '/'"));
        }
        Ok(Self(slug))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Splits at the first delimiter when both halves are non-empty.
    pub fn bundle_parts(&self) -> Option<BundleParts<'_>> {
        let (bundle_slug, item_slug) = self.0.split_once(BUNDLE_DELIMITER)?;
        if bundle_slug.is_empty() || item_slug.is_empty() {
            return None;
        }
        Some(BundleParts {
            bundle_slug,
            item_slug,
        })
    }

    /// Slug of the governing bundle product, if this slug encodes one.
    pub fn subscription_slug(&self) -> Option<&str> {
        self.bundle_parts().map(|parts| parts.bundle_slug)
    }
}

impl fmt::Display for ProductSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
