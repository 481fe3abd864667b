//! Product records and the redacted view handed to callers.

use serde::Serialize;

use crate::domain::catalog::{AccessError, ProductSlug};
use crate::domain::entitlement::Entitlement;
use crate::domain::foundation::ProductId;

/// A validated product record, resolved fresh for each request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub id: ProductId,
    pub slug: ProductSlug,
    pub permalink: String,
    pub image_url: String,
    /// The paid content. Only copied into a view for entitled callers.
    pub restricted_file: Option<String>,
    /// Governing bundle, present iff the slug encodes one.
    pub subscription_slug: Option<String>,
}

impl Product {
    /// Builds a product from upstream fields, enforcing the minimum record shape.
    ///
    /// A record without an image or permalink is upstream corruption and
    /// yields `InvalidRecord`, never `NotFound`.
    pub fn validated(
        id: ProductId,
        slug: ProductSlug,
        permalink: impl Into<String>,
        image_url: Option<String>,
        restricted_file: Option<String>,
    ) -> Result<Self, AccessError> {
        let image_url = image_url
            .filter(|src| !src.trim().is_empty())
            .ok_or_else(|| AccessError::invalid_record(slug.as_str(), "product has no image"))?;

        let permalink = permalink.into();
        if permalink.trim().is_empty() {
            return Err(AccessError::invalid_record(
                slug.as_str(),
                "product has no permalink",
            ));
        }

        let subscription_slug = slug.subscription_slug().map(str::to_string);

        Ok(Self {
            id,
            slug,
            permalink,
            image_url,
            restricted_file: restricted_file.filter(|file| !file.trim().is_empty()),
            subscription_slug,
        })
    }

    /// Whether access to this product is governed by a bundle subscription.
    pub fn is_bundle_gated(&self) -> bool {
        self.subscription_slug.is_some()
    }
}

/// What a caller sees of a product.
///
/// `restricted_file` is absent unless the caller is entitled; the rest of the
/// metadata is visible to everyone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductView {
    pub id: ProductId,
    pub slug: String,
    pub permalink: String,
    pub image_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub restricted_file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subscription_slug: Option<String>,
}

impl ProductView {
    /// Copies the product into a new view, redacting unless entitlement was granted.
    pub fn new(product: &Product, entitlement: &Entitlement) -> Self {
        let restricted_file = if entitlement.is_granted() {
            product.restricted_file.clone()
        } else {
            None
        };

        Self {
            id: product.id,
            slug: product.slug.as_str().to_string(),
            permalink: product.permalink.clone(),
            image_url: product.image_url.clone(),
            restricted_file,
            subscription_slug: product.subscription_slug.clone(),
        }
    }
}
