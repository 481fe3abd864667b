//! EntitlementEvaluator - Decides whether a customer may see a product.
//!
//! A bundle item is entitled when the customer holds a completed order for
//! the bundle product and that order is the parent of an active subscription.
//! Products outside any bundle follow the configured `UngatedPolicy`.

use std::sync::Arc;

use crate::domain::catalog::{AccessError, Product, ProductSlug};
use crate::domain::entitlement::{DenialReason, Entitlement, LookupError, UngatedPolicy};
use crate::ports::{CommerceBackend, CommerceCustomer, OrderQuery, SubscriptionStatus};

use super::ProductResolver;

#[derive(Clone)]
pub struct EntitlementEvaluator {
    commerce: Arc<dyn CommerceBackend>,
    resolver: ProductResolver,
    ungated_policy: UngatedPolicy,
}

impl EntitlementEvaluator {
    pub fn new(
        commerce: Arc<dyn CommerceBackend>,
        resolver: ProductResolver,
        ungated_policy: UngatedPolicy,
    ) -> Self {
        Self {
            commerce,
            resolver,
            ungated_policy,
        }
    }

    /// Evaluates entitlement. Lookup failures are returned, not decided.
    pub async fn evaluate(
        &self,
        product: &Product,
        customer: &CommerceCustomer,
    ) -> Result<Entitlement, LookupError> {
        let Some(bundle_slug) = product.subscription_slug.as_deref() else {
            return self.evaluate_ungated(product, customer).await;
        };

        let bundle = self.resolve_bundle(bundle_slug).await?;

        let orders = self
            .commerce
            .find_orders(OrderQuery::completed(bundle.id, customer.id))
            .await
            .map_err(|e| LookupError::commerce("find_orders", e))?;

        // Upstream order is kept as returned.
        let Some(order) = orders.first() else {
            return Ok(Entitlement::Denied(DenialReason::NoCompletedOrder));
        };

        let subscriptions = self
            .commerce
            .list_subscriptions(SubscriptionStatus::Active)
            .await
            .map_err(|e| LookupError::commerce("list_subscriptions", e))?;

        let renewed = subscriptions
            .iter()
            .any(|s| s.status == SubscriptionStatus::Active && s.parent_id == order.id);

        tracing::debug!(
            bundle = bundle_slug,
            order_id = %order.id,
            renewed,
            "Evaluated bundle subscription"
        );

        if renewed {
            Ok(Entitlement::Granted)
        } else {
            Ok(Entitlement::Denied(DenialReason::NoActiveSubscription))
        }
    }

    async fn resolve_bundle(&self, bundle_slug: &str) -> Result<Product, LookupError> {
        let slug = ProductSlug::new(bundle_slug).map_err(|e| LookupError::InvalidBundle {
            slug: bundle_slug.to_string(),
            reason: e.to_string(),
        })?;

        self.resolver
            .resolve_by_slug(&slug)
            .await
            .map_err(|e| match e {
                AccessError::NotFound(_) => LookupError::BundleNotFound(bundle_slug.to_string()),
                AccessError::InvalidRecord { reason, .. } => LookupError::InvalidBundle {
                    slug: bundle_slug.to_string(),
                    reason,
                },
                AccessError::Upstream(message) => LookupError::Commerce {
                    operation: "resolve_bundle",
                    message,
                },
            })
    }

    async fn evaluate_ungated(
        &self,
        product: &Product,
        customer: &CommerceCustomer,
    ) -> Result<Entitlement, LookupError> {
        match self.ungated_policy {
            UngatedPolicy::Deny => Ok(Entitlement::Denied(DenialReason::Ungated)),
            UngatedPolicy::Grant => Ok(Entitlement::Granted),
            UngatedPolicy::DirectPurchase => {
                let orders = self
                    .commerce
                    .find_orders(OrderQuery::completed(product.id, customer.id))
                    .await
                    .map_err(|e| LookupError::commerce("find_orders", e))?;

                if orders.is_empty() {
                    Ok(Entitlement::Denied(DenialReason::NoCompletedOrder))
                } else {
                    Ok(Entitlement::Granted)
                }
            }
        }
    }
}
