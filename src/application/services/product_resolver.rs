//! ProductResolver - Looks products up in the commerce backend.

use std::sync::Arc;

use crate::domain::catalog::{AccessError, Product, ProductSlug};
use crate::domain::foundation::ProductId;
use crate::ports::{CommerceBackend, CommerceProduct};

/// Resolves slugs and ids to validated products.
///
/// Transport or decode failures become `AccessError::Upstream` so an outage is
/// never reported as a missing product.
#[derive(Clone)]
pub struct ProductResolver {
    commerce: Arc<dyn CommerceBackend>,
}

impl ProductResolver {
    pub fn new(commerce: Arc<dyn CommerceBackend>) -> Self {
        Self { commerce }
    }

    /// Resolves the first product whose slug matches.
    pub async fn resolve_by_slug(&self, slug: &ProductSlug) -> Result<Product, AccessError> {
        let records = self
            .commerce
            .find_products_by_slug(slug.as_str())
            .await
            .map_err(|e| {
                tracing::warn!(slug = %slug, error = %e, "Product lookup failed");
                AccessError::upstream(e.to_string())
            })?;

        let record = records
            .into_iter()
            .next()
            .ok_or_else(|| AccessError::slug_not_found(slug.as_str()))?;

        Self::product_from_record(record)
    }

    /// Maps a product id, e.g. from an order line item, back to its slug.
    pub async fn resolve_by_id(&self, id: ProductId) -> Result<ProductSlug, AccessError> {
        let record = self
            .commerce
            .get_product(id)
            .await
            .map_err(|e| {
                tracing::warn!(product_id = %id, error = %e, "Product lookup failed");
                AccessError::upstream(e.to_string())
            })?
            .ok_or_else(|| AccessError::id_not_found(id))?;

        ProductSlug::new(record.slug)
            .map_err(|e| AccessError::invalid_record(id.to_string(), e.to_string()))
    }

    fn product_from_record(record: CommerceProduct) -> Result<Product, AccessError> {
        let image_url = record.first_image().map(str::to_string);
        let restricted_file = record.first_download().map(str::to_string);
        let slug = ProductSlug::new(record.slug)
            .map_err(|e| AccessError::invalid_record(record.id.to_string(), e.to_string()))?;

        Product::validated(record.id, slug, record.permalink, image_url, restricted_file)
    }
}
