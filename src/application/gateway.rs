//! AccessGateway - Library entry point for product access.
//!
//! Wires the access handlers around one credential verifier and one commerce
//! backend. Both are explicit dependencies; the gateway holds no other state
//! and is cheap to share behind an `Arc`.
//!
//! # Example
//!
//! ```ignore
//! let gateway = AccessGateway::new(verifier, commerce, settings);
//! let view = gateway.get_product_access("bundleA_item1", Some(token)).await?;
//! let url = gateway.get_login_url("bundleA_item1", Some(token)).await;
//! ```

use std::sync::Arc;

use crate::application::handlers::{
    GetLoginUrlCommand, GetLoginUrlHandler, GetProductAccessHandler, GetProductAccessQuery,
    GetProductLinkHandler, GetProductLinkQuery,
};
use crate::application::services::{
    CustomerProvisioner, EntitlementEvaluator, ProductResolver, StoreLinks,
};
use crate::domain::catalog::{AccessError, ProductView};
use crate::domain::customer::DEFAULT_EMAIL_DOMAIN;
use crate::domain::entitlement::UngatedPolicy;
use crate::domain::foundation::ProductId;
use crate::ports::{CommerceBackend, CredentialVerifier};

/// Store-specific settings for the gateway.
#[derive(Debug, Clone)]
pub struct GatewaySettings {
    pub links: StoreLinks,
    pub email_domain: String,
    pub ungated_policy: UngatedPolicy,
}

impl GatewaySettings {
    pub fn new(links: StoreLinks) -> Self {
        Self {
            links,
            email_domain: DEFAULT_EMAIL_DOMAIN.to_string(),
            ungated_policy: UngatedPolicy::default(),
        }
    }

    pub fn with_email_domain(mut self, domain: impl Into<String>) -> Self {
        self.email_domain = domain.into();
        self
    }

    pub fn with_ungated_policy(mut self, policy: UngatedPolicy) -> Self {
        self.ungated_policy = policy;
        self
    }
}

pub struct AccessGateway {
    product_access: GetProductAccessHandler,
    login_url: GetLoginUrlHandler,
    product_link: GetProductLinkHandler,
}

impl AccessGateway {
    pub fn new(
        verifier: Arc<dyn CredentialVerifier>,
        commerce: Arc<dyn CommerceBackend>,
        settings: GatewaySettings,
    ) -> Self {
        let resolver = ProductResolver::new(commerce.clone());
        let provisioner = CustomerProvisioner::new(commerce.clone(), settings.email_domain);
        let evaluator =
            EntitlementEvaluator::new(commerce.clone(), resolver.clone(), settings.ungated_policy);

        Self {
            product_access: GetProductAccessHandler::new(
                verifier.clone(),
                resolver.clone(),
                provisioner.clone(),
                evaluator,
            ),
            login_url: GetLoginUrlHandler::new(
                verifier,
                commerce,
                provisioner,
                settings.links.clone(),
            ),
            product_link: GetProductLinkHandler::new(resolver, settings.links),
        }
    }

    /// The product as this caller may see it.
    ///
    /// Fails only when the product itself cannot be resolved.
    pub async fn get_product_access(
        &self,
        slug: &str,
        auth_token: Option<&str>,
    ) -> Result<ProductView, AccessError> {
        self.product_access
            .handle(GetProductAccessQuery {
                slug: slug.to_string(),
                auth_token: auth_token.map(str::to_string),
            })
            .await
    }

    /// A URL that logs the caller into the store, or the plain product page.
    pub async fn get_login_url(&self, slug: &str, auth_token: Option<&str>) -> String {
        self.login_url
            .handle(GetLoginUrlCommand {
                slug: slug.to_string(),
                auth_token: auth_token.map(str::to_string),
            })
            .await
    }

    /// The store page of a product given its id.
    pub async fn get_product_link(&self, product_id: ProductId) -> Result<String, AccessError> {
        self.product_link
            .handle(GetProductLinkQuery { product_id })
            .await
    }
}
