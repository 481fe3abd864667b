//! GetProductLinkHandler - Query handler mapping a product id to its page.

use crate::application::services::{ProductResolver, StoreLinks};
use crate::domain::catalog::AccessError;
use crate::domain::foundation::ProductId;

#[derive(Debug, Clone, Copy)]
pub struct GetProductLinkQuery {
    pub product_id: ProductId,
}

pub type GetProductLinkResult = String;

pub struct GetProductLinkHandler {
    resolver: ProductResolver,
    links: StoreLinks,
}

impl GetProductLinkHandler {
    pub fn new(resolver: ProductResolver, links: StoreLinks) -> Self {
        Self { resolver, links }
    }

    pub async fn handle(
        &self,
        query: GetProductLinkQuery,
    ) -> Result<GetProductLinkResult, AccessError> {
        let slug = self.resolver.resolve_by_id(query.product_id).await?;
        Ok(self.links.product_page(&slug))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::commerce::InMemoryCommerceBackend;
    use crate::ports::CommerceError;
    use reqwest::Url;
    use std::sync::Arc;

    fn handler(store: &InMemoryCommerceBackend) -> GetProductLinkHandler {
        let links = StoreLinks::with_autologin_path(
            Url::parse("https://store.example.com").unwrap(),
            "autologin",
        )
        .unwrap();
        GetProductLinkHandler::new(ProductResolver::new(Arc::new(store.clone())), links)
    }

    fn query(id: u64) -> GetProductLinkQuery {
        GetProductLinkQuery {
            product_id: ProductId::new(id),
        }
    }

    #[tokio::test]
    async fn known_product_links_to_its_page() {
        let store = InMemoryCommerceBackend::new()
            .with_product(InMemoryCommerceBackend::catalog_product(100, "bundleA"));

        let url = handler(&store).handle(query(100)).await.unwrap();
        assert_eq!(url, "https://store.example.com/product/bundleA/");
    }

    #[tokio::test]
    async fn unknown_product_is_not_found() {
        let store = InMemoryCommerceBackend::new();
        let result = handler(&store).handle(query(100)).await;
        assert!(matches!(result, Err(AccessError::NotFound(_))));
    }

    #[tokio::test]
    async fn outage_is_upstream() {
        let store = InMemoryCommerceBackend::new();
        store.set_method_error("get_product", CommerceError::network("down"));

        let result = handler(&store).handle(query(100)).await;
        assert!(matches!(result, Err(AccessError::Upstream(_))));
    }
}
