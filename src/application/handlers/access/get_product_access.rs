//! GetProductAccessHandler - Query handler for a product as seen by a caller.

use std::sync::Arc;

use crate::application::services::{CustomerProvisioner, EntitlementEvaluator, ProductResolver};
use crate::domain::catalog::{AccessError, Product, ProductSlug, ProductView};
use crate::domain::entitlement::{DenialReason, Entitlement, LookupError};
use crate::domain::foundation::Identity;
use crate::ports::CredentialVerifier;

/// Query for a product's view.
#[derive(Debug, Clone)]
pub struct GetProductAccessQuery {
    pub slug: String,
    pub auth_token: Option<String>,
}

/// Result of a successful product access query.
pub type GetProductAccessResult = ProductView;

/// Handler resolving a product and redacting it unless the caller is entitled.
///
/// Only product resolution can fail. Every credential or entitlement problem
/// yields the same redacted view.
pub struct GetProductAccessHandler {
    verifier: Arc<dyn CredentialVerifier>,
    resolver: ProductResolver,
    provisioner: CustomerProvisioner,
    evaluator: EntitlementEvaluator,
}

impl GetProductAccessHandler {
    pub fn new(
        verifier: Arc<dyn CredentialVerifier>,
        resolver: ProductResolver,
        provisioner: CustomerProvisioner,
        evaluator: EntitlementEvaluator,
    ) -> Self {
        Self {
            verifier,
            resolver,
            provisioner,
            evaluator,
        }
    }

    pub async fn handle(
        &self,
        query: GetProductAccessQuery,
    ) -> Result<GetProductAccessResult, AccessError> {
        let slug = ProductSlug::new(query.slug.as_str())
            .map_err(|_| AccessError::slug_not_found(&query.slug))?;
        let token = query.auth_token.as_deref().unwrap_or_default();

        let (product, identity) = futures::join!(
            self.resolver.resolve_by_slug(&slug),
            self.verifier.verify(token)
        );
        let product = product?;

        let entitlement = match identity {
            Ok(identity) => Entitlement::fail_closed(self.lookup(&product, &identity).await),
            Err(_) => Entitlement::Denied(DenialReason::InvalidCredential),
        };

        match entitlement.denial_reason() {
            None => tracing::debug!(slug = %slug, "Access granted"),
            Some(reason) => tracing::debug!(slug = %slug, ?reason, "Access denied"),
        }

        Ok(ProductView::new(&product, &entitlement))
    }

    /// Customer lookup plus evaluation; a missing customer is simply unentitled.
    async fn lookup(
        &self,
        product: &Product,
        identity: &Identity,
    ) -> Result<Entitlement, LookupError> {
        let customer = self
            .provisioner
            .find_customer(&identity.subject_id)
            .await
            .map_err(|e| LookupError::commerce("find_customer", e))?;

        match customer {
            Some(customer) => self.evaluator.evaluate(product, &customer).await,
            None => Ok(Entitlement::Denied(DenialReason::CustomerNotFound)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::auth::MockCredentialVerifier;
    use crate::adapters::commerce::InMemoryCommerceBackend;
    use crate::domain::entitlement::UngatedPolicy;
    use crate::domain::foundation::{CustomerId, OrderId, ProductId, SubscriptionId};
    use crate::ports::{
        CommerceBackend, CommerceCustomer, CommerceError, LineItem, Order, OrderStatus,
        Subscription, SubscriptionStatus,
    };

    // ════════════════════════════════════════════════════════════════════════════
    // Test Helpers
    // ════════════════════════════════════════════════════════════════════════════

    fn store_with_subscription_parent(parent: u64) -> InMemoryCommerceBackend {
        InMemoryCommerceBackend::new()
            .with_product(InMemoryCommerceBackend::catalog_product(100, "bundleA"))
            .with_product(InMemoryCommerceBackend::catalog_product(7, "bundleA_item1"))
            .with_customer(CommerceCustomer {
                id: CustomerId::new(3),
                email: "0xabc@bbs.network".into(),
                username: "0xabc".into(),
            })
            .with_order(Order {
                id: OrderId::new(5001),
                status: OrderStatus::Completed,
                customer_id: CustomerId::new(3),
                line_items: vec![LineItem {
                    product_id: ProductId::new(100),
                }],
            })
            .with_subscription(Subscription {
                id: SubscriptionId::new(1),
                parent_id: OrderId::new(parent),
                status: SubscriptionStatus::Active,
            })
    }

    fn handler(store: &InMemoryCommerceBackend) -> GetProductAccessHandler {
        let commerce: Arc<dyn CommerceBackend> = Arc::new(store.clone());
        let verifier = MockCredentialVerifier::new().with_subject("good-token", "0xabc");
        let resolver = ProductResolver::new(commerce.clone());
        GetProductAccessHandler::new(
            Arc::new(verifier),
            resolver.clone(),
            CustomerProvisioner::new(commerce.clone(), "bbs.network"),
            EntitlementEvaluator::new(commerce, resolver, UngatedPolicy::Deny),
        )
    }

    fn query(slug: &str, token: Option<&str>) -> GetProductAccessQuery {
        GetProductAccessQuery {
            slug: slug.to_string(),
            auth_token: token.map(str::to_string),
        }
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Success Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn entitled_caller_sees_restricted_file() {
        let store = store_with_subscription_parent(5001);
        let view = handler(&store)
            .handle(query("bundleA_item1", Some("good-token")))
            .await
            .unwrap();

        assert_eq!(
            view.restricted_file.as_deref(),
            Some("https://cdn.example.com/premium/bundleA_item1.mp4")
        );
        assert_eq!(view.subscription_slug.as_deref(), Some("bundleA"));
    }

    #[tokio::test]
    async fn subscription_for_other_order_redacts() {
        let store = store_with_subscription_parent(9999);
        let view = handler(&store)
            .handle(query("bundleA_item1", Some("good-token")))
            .await
            .unwrap();

        assert_eq!(view.restricted_file, None);
    }

    #[tokio::test]
    async fn bad_or_missing_token_redacts_without_customer_lookup() {
        let store = store_with_subscription_parent(5001);
        let handler = handler(&store);

        for token in [None, Some(""), Some("forged")] {
            let view = handler.handle(query("bundleA_item1", token)).await.unwrap();
            assert_eq!(view.restricted_file, None);
        }
        assert!(!store.was_called("find_customers_by_email"));
    }

    #[tokio::test]
    async fn unknown_customer_redacts_and_is_not_created() {
        let store = store_with_subscription_parent(5001);
        let commerce: Arc<dyn CommerceBackend> = Arc::new(store.clone());
        let resolver = ProductResolver::new(commerce.clone());
        let handler = GetProductAccessHandler::new(
            Arc::new(MockCredentialVerifier::new().with_subject("stranger", "0xnew")),
            resolver.clone(),
            CustomerProvisioner::new(commerce.clone(), "bbs.network"),
            EntitlementEvaluator::new(commerce, resolver, UngatedPolicy::Deny),
        );

        let view = handler
            .handle(query("bundleA_item1", Some("stranger")))
            .await
            .unwrap();

        assert_eq!(view.restricted_file, None);
        assert!(!store.was_called("create_customer"));
    }

    #[tokio::test]
    async fn lookup_failure_redacts_instead_of_failing() {
        let store = store_with_subscription_parent(5001);
        store.set_method_error("list_subscriptions", CommerceError::network("reset"));

        let view = handler(&store)
            .handle(query("bundleA_item1", Some("good-token")))
            .await
            .unwrap();

        assert_eq!(view.restricted_file, None);
    }

    #[tokio::test]
    async fn repeated_unentitled_calls_are_identical() {
        let store = store_with_subscription_parent(9999);
        let handler = handler(&store);

        let first = handler.handle(query("bundleA_item1", Some("bad"))).await.unwrap();
        let second = handler.handle(query("bundleA_item1", Some("bad"))).await.unwrap();
        assert_eq!(first, second);
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Failure Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn unknown_slug_is_not_found() {
        let store = store_with_subscription_parent(5001);
        let result = handler(&store).handle(query("nope", Some("good-token"))).await;
        assert!(matches!(result, Err(AccessError::NotFound(_))));
    }

    #[tokio::test]
    async fn unusable_slug_is_not_found() {
        let store = store_with_subscription_parent(5001);
        let result = handler(&store).handle(query("", None)).await;
        assert!(matches!(result, Err(AccessError::NotFound(_))));
    }

    #[tokio::test]
    async fn store_outage_during_resolution_is_upstream() {
        let store = store_with_subscription_parent(5001);
        store.set_method_error("find_products_by_slug", CommerceError::network("down"));

        let result = handler(&store).handle(query("bundleA_item1", None)).await;
        assert!(matches!(result, Err(AccessError::Upstream(_))));
    }
}
