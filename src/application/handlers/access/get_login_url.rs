//! GetLoginUrlHandler - Command handler issuing a one-time store login link.

use std::sync::Arc;

use crate::application::services::{CustomerProvisioner, StoreLinks};
use crate::domain::foundation::Identity;
use crate::ports::{CommerceBackend, CommerceError, CredentialVerifier};

/// Command to issue a login link that lands on a product page.
#[derive(Debug, Clone)]
pub struct GetLoginUrlCommand {
    pub slug: String,
    pub auth_token: Option<String>,
}

/// The URL to send the caller to. Never an error.
pub type GetLoginUrlResult = String;

/// Handler for login links.
///
/// A verified caller gets an autologin URL for a freshly provisioned customer.
/// Anyone else, or any failure on the way, gets the plain product page.
pub struct GetLoginUrlHandler {
    verifier: Arc<dyn CredentialVerifier>,
    commerce: Arc<dyn CommerceBackend>,
    provisioner: CustomerProvisioner,
    links: StoreLinks,
}

impl GetLoginUrlHandler {
    pub fn new(
        verifier: Arc<dyn CredentialVerifier>,
        commerce: Arc<dyn CommerceBackend>,
        provisioner: CustomerProvisioner,
        links: StoreLinks,
    ) -> Self {
        Self {
            verifier,
            commerce,
            provisioner,
            links,
        }
    }

    pub async fn handle(&self, cmd: GetLoginUrlCommand) -> GetLoginUrlResult {
        let fallback = self.links.product_page_or_store(&cmd.slug);
        let token = cmd.auth_token.as_deref().unwrap_or_default();

        let identity = match self.verifier.verify(token).await {
            Ok(identity) => identity,
            Err(_) => return fallback,
        };

        match self.autologin(&identity, &fallback).await {
            Ok(url) => url,
            Err(e) => {
                tracing::warn!(
                    subject = %identity.subject_id,
                    error = %e,
                    "Login link issuance failed, returning product page"
                );
                fallback
            }
        }
    }

    async fn autologin(
        &self,
        identity: &Identity,
        redirect_url: &str,
    ) -> Result<String, CommerceError> {
        let provisioned = self.provisioner.upsert_customer(&identity.subject_id).await?;
        let jwt = self
            .commerce
            .issue_login_token(&provisioned.username, &provisioned.password)
            .await?;

        tracing::info!(customer_id = %provisioned.customer.id, "Issued login link");
        Ok(self.links.autologin(&jwt, redirect_url))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::auth::MockCredentialVerifier;
    use crate::adapters::commerce::InMemoryCommerceBackend;
    use reqwest::Url;

    const PRODUCT_PAGE: &str = "https://store.example.com/product/bundleA_item1/";

    fn handler(store: &InMemoryCommerceBackend) -> GetLoginUrlHandler {
        let commerce: Arc<dyn CommerceBackend> = Arc::new(store.clone());
        let links = StoreLinks::with_autologin_path(
            Url::parse("https://store.example.com").unwrap(),
            "wp-json/simple-jwt-login/v1/autologin",
        )
        .unwrap();
        GetLoginUrlHandler::new(
            Arc::new(MockCredentialVerifier::new().with_subject("good-token", "0xabc")),
            commerce.clone(),
            CustomerProvisioner::new(commerce, "bbs.network"),
            links,
        )
    }

    fn cmd(token: Option<&str>) -> GetLoginUrlCommand {
        GetLoginUrlCommand {
            slug: "bundleA_item1".to_string(),
            auth_token: token.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn verified_caller_gets_autologin_url() {
        let store = InMemoryCommerceBackend::new();

        let url = handler(&store).handle(cmd(Some("good-token"))).await;

        let parsed = Url::parse(&url).unwrap();
        assert_eq!(parsed.path(), "/wp-json/simple-jwt-login/v1/autologin");
        let pairs: Vec<(String, String)> = parsed.query_pairs().into_owned().collect();
        assert_eq!(pairs[0], ("JWT".to_string(), "jwt-for-0xabc".to_string()));
        assert_eq!(pairs[1], ("redirectUrl".to_string(), PRODUCT_PAGE.to_string()));
        assert_eq!(store.call_count("create_customer"), 1);
    }

    #[tokio::test]
    async fn empty_or_missing_token_returns_product_page() {
        let store = InMemoryCommerceBackend::new();
        let handler = handler(&store);

        assert_eq!(handler.handle(cmd(None)).await, PRODUCT_PAGE);
        assert_eq!(handler.handle(cmd(Some(""))).await, PRODUCT_PAGE);
        assert_eq!(handler.handle(cmd(Some("forged"))).await, PRODUCT_PAGE);
        assert!(store.calls().is_empty());
    }

    #[tokio::test]
    async fn provisioning_failure_returns_product_page() {
        let store = InMemoryCommerceBackend::new();
        store.set_method_error("create_customer", CommerceError::provider("boom"));

        assert_eq!(handler(&store).handle(cmd(Some("good-token"))).await, PRODUCT_PAGE);
    }

    #[tokio::test]
    async fn site_login_failure_returns_product_page() {
        let store = InMemoryCommerceBackend::new();
        store.set_method_error(
            "issue_login_token",
            CommerceError::authentication("rejected"),
        );

        assert_eq!(handler(&store).handle(cmd(Some("good-token"))).await, PRODUCT_PAGE);
    }

    #[tokio::test]
    async fn unusable_slug_returns_store_front() {
        let store = InMemoryCommerceBackend::new();
        let url = handler(&store)
            .handle(GetLoginUrlCommand {
                slug: String::new(),
                auth_token: None,
            })
            .await;
        assert_eq!(url, "https://store.example.com/");
    }
}
