//! WooCommerce REST adapter.
//!
//! Implements the `CommerceBackend` port against a WordPress site running
//! WooCommerce, WooCommerce Subscriptions and a JWT login plugin.
//!
//! # Endpoints
//!
//! All store resources live under `{store_url}/wp-json/{api_version}/` and are
//! authenticated with HTTP basic auth using the consumer key and secret.
//! Site login is a separate plugin endpoint that exchanges a customer's
//! username and password for a JWT.
//!
//! # Configuration
//!
//! ```ignore
//! let config = WooCommerceConfig::new(store_url, consumer_key, consumer_secret);
//! let client = WooCommerceClient::new(config, reqwest::Client::new());
//! ```

use async_trait::async_trait;
use reqwest::{StatusCode, Url};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;

use crate::domain::foundation::{CustomerId, ProductId};
use crate::ports::{
    CommerceBackend, CommerceCustomer, CommerceError, CommerceErrorCode, CommerceProduct,
    CreateCustomerRequest, Order, OrderQuery, Subscription, SubscriptionStatus,
};

/// REST API namespace used unless configured otherwise.
pub const DEFAULT_API_VERSION: &str = "wc/v3";

/// Path of the site login endpoint, relative to the store URL.
pub const DEFAULT_LOGIN_PATH: &str = "wp-json/simple-jwt-login/v1/auth";

/// Largest page the store will return.
const SUBSCRIPTIONS_PER_PAGE: usize = 100;

/// Pages fetched before giving up on listing subscriptions.
const DEFAULT_SUBSCRIPTION_PAGE_CAP: u32 = 50;

/// WooCommerce connection settings.
#[derive(Clone)]
pub struct WooCommerceConfig {
    store_url: Url,
    consumer_key: String,
    consumer_secret: SecretString,
    api_version: String,
    login_path: String,
    subscription_page_cap: u32,
}

impl WooCommerceConfig {
    pub fn new(
        store_url: Url,
        consumer_key: impl Into<String>,
        consumer_secret: SecretString,
    ) -> Self {
        Self {
            store_url,
            consumer_key: consumer_key.into(),
            consumer_secret,
            api_version: DEFAULT_API_VERSION.to_string(),
            login_path: DEFAULT_LOGIN_PATH.to_string(),
            subscription_page_cap: DEFAULT_SUBSCRIPTION_PAGE_CAP,
        }
    }

    pub fn with_api_version(mut self, api_version: impl Into<String>) -> Self {
        self.api_version = api_version.into();
        self
    }

    pub fn with_login_path(mut self, login_path: impl Into<String>) -> Self {
        self.login_path = login_path.into();
        self
    }

    pub fn with_subscription_page_cap(mut self, cap: u32) -> Self {
        self.subscription_page_cap = cap.max(1);
        self
    }

    /// Appends a slash separated `path` to the store URL.
    fn endpoint(&self, path: &str) -> Result<Url, CommerceError> {
        let mut url = self.store_url.clone();
        url.path_segments_mut()
            .map_err(|_| CommerceError::provider("store URL cannot carry a path"))?
            .pop_if_empty()
            .extend(path.split('/').filter(|segment| !segment.is_empty()));
        Ok(url)
    }

    fn resource_url(&self, resource: &str) -> Result<Url, CommerceError> {
        self.endpoint(&format!("wp-json/{}/{}", self.api_version, resource))
    }

    fn login_url(&self) -> Result<Url, CommerceError> {
        self.endpoint(&self.login_path)
    }
}

impl std::fmt::Debug for WooCommerceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WooCommerceConfig")
            .field("store_url", &self.store_url.as_str())
            .field("api_version", &self.api_version)
            .field("login_path", &self.login_path)
            .finish_non_exhaustive()
    }
}

/// Site login response: `{"data": {"jwt": "..."}}`.
#[derive(Deserialize)]
struct LoginResponse {
    data: LoginData,
}

#[derive(Deserialize)]
struct LoginData {
    jwt: String,
}

/// WooCommerce adapter.
#[derive(Debug, Clone)]
pub struct WooCommerceClient {
    config: WooCommerceConfig,
    http_client: reqwest::Client,
}

impl WooCommerceClient {
    /// The client is shared for the life of the process; its timeout bounds every call.
    pub fn new(config: WooCommerceConfig, http_client: reqwest::Client) -> Self {
        Self {
            config,
            http_client,
        }
    }

    fn authorized(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request.basic_auth(
            &self.config.consumer_key,
            Some(self.config.consumer_secret.expose_secret()),
        )
    }

    async fn get_resource<T: DeserializeOwned>(
        &self,
        resource: &str,
        query: &[(&str, String)],
        operation: &'static str,
    ) -> Result<T, CommerceError> {
        let url = self.config.resource_url(resource)?;
        let request = self.authorized(self.http_client.get(url).query(query));
        self.execute(request, operation).await
    }

    /// Sends a request and decodes a successful JSON body.
    async fn execute<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
        operation: &'static str,
    ) -> Result<T, CommerceError> {
        let response = request.send().await.map_err(|e| {
            tracing::error!(operation, error = %e, "Commerce request failed");
            CommerceError::network(e.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!(operation, %status, error = %error_text, "Commerce API error");
            return Err(match status {
                StatusCode::NOT_FOUND => CommerceError::not_found(operation),
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                    CommerceError::authentication(format!("{} rejected: {}", operation, status))
                }
                _ => CommerceError::provider(format!("{} returned {}", operation, status)),
            });
        }

        response.json().await.map_err(|e| {
            tracing::error!(operation, error = %e, "Failed to parse commerce response");
            CommerceError::decode(format!("Failed to parse {} response: {}", operation, e))
        })
    }
}

#[async_trait]
impl CommerceBackend for WooCommerceClient {
    async fn find_products_by_slug(
        &self,
        slug: &str,
    ) -> Result<Vec<CommerceProduct>, CommerceError> {
        self.get_resource("products", &[("slug", slug.to_string())], "find_products_by_slug")
            .await
    }

    async fn get_product(&self, id: ProductId) -> Result<Option<CommerceProduct>, CommerceError> {
        let resource = format!("products/{}", id);
        match self.get_resource(&resource, &[], "get_product").await {
            Ok(product) => Ok(Some(product)),
            Err(e) if e.code == CommerceErrorCode::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn find_customers_by_email(
        &self,
        email: &str,
    ) -> Result<Vec<CommerceCustomer>, CommerceError> {
        // The endpoint defaults to `role=customer`; subscribers carry another role.
        self.get_resource(
            "customers",
            &[("email", email.to_string()), ("role", "all".to_string())],
            "find_customers_by_email",
        )
        .await
    }

    async fn create_customer(
        &self,
        request: CreateCustomerRequest,
    ) -> Result<CommerceCustomer, CommerceError> {
        let url = self.config.resource_url("customers")?;
        let body = json!({
            "email": request.email,
            "username": request.username,
            "password": request.password.expose_secret(),
        });

        let customer: CommerceCustomer = self
            .execute(self.authorized(self.http_client.post(url).json(&body)), "create_customer")
            .await?;

        tracing::info!(customer_id = %customer.id, "Created commerce customer");
        Ok(customer)
    }

    async fn update_customer_password(
        &self,
        id: CustomerId,
        password: &SecretString,
    ) -> Result<CommerceCustomer, CommerceError> {
        let url = self.config.resource_url(&format!("customers/{}", id))?;
        let body = json!({ "password": password.expose_secret() });

        self.execute(
            self.authorized(self.http_client.put(url).json(&body)),
            "update_customer_password",
        )
        .await
    }

    async fn find_orders(&self, query: OrderQuery) -> Result<Vec<Order>, CommerceError> {
        self.get_resource(
            "orders",
            &[
                ("product", query.product.to_string()),
                ("customer", query.customer.to_string()),
                ("status", query.status.as_str().to_string()),
            ],
            "find_orders",
        )
        .await
    }

    async fn list_subscriptions(
        &self,
        status: SubscriptionStatus,
    ) -> Result<Vec<Subscription>, CommerceError> {
        let mut subscriptions = Vec::new();

        for page in 1..=self.config.subscription_page_cap {
            let batch: Vec<Subscription> = self
                .get_resource(
                    "subscriptions",
                    &[
                        ("status", status.as_str().to_string()),
                        ("per_page", SUBSCRIPTIONS_PER_PAGE.to_string()),
                        ("page", page.to_string()),
                    ],
                    "list_subscriptions",
                )
                .await?;

            let short_page = batch.len() < SUBSCRIPTIONS_PER_PAGE;
            subscriptions.extend(batch);
            if short_page {
                return Ok(subscriptions);
            }
        }

        tracing::warn!(
            pages = self.config.subscription_page_cap,
            fetched = subscriptions.len(),
            status = status.as_str(),
            "Subscription page cap reached, list may be incomplete"
        );
        Ok(subscriptions)
    }

    async fn issue_login_token(
        &self,
        username: &str,
        password: &SecretString,
    ) -> Result<SecretString, CommerceError> {
        let url = self.config.login_url()?;
        let body = json!({
            "username": username,
            "password": password.expose_secret(),
        });

        let login: LoginResponse = self
            .execute(self.http_client.post(url).json(&body), "issue_login_token")
            .await
            .map_err(|e| match e.code {
                // The login plugin answers bad credentials with 400.
                CommerceErrorCode::ProviderError => CommerceError::authentication(e.message),
                _ => e,
            })?;

        Ok(SecretString::new(login.data.jwt))
    }
}
