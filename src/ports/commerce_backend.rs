//! Commerce backend port.
//!
//! Defines the contract for the e-commerce store holding products, customers,
//! orders and subscriptions. The record types mirror the store's REST resources
//! closely enough to deserialize them directly, keeping only the fields this
//! crate reads.
//!
//! # Design
//!
//! - **Stateless**: every call goes to the store, nothing is cached
//! - **Explicit dependency**: injected as `Arc<dyn CommerceBackend>` at startup
//! - **No retries**: failures are returned to the caller, who decides

use async_trait::async_trait;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{CustomerId, OrderId, ProductId, SubscriptionId};

/// Port for the commerce store.
#[async_trait]
pub trait CommerceBackend: Send + Sync {
    /// Find products whose slug matches exactly.
    async fn find_products_by_slug(&self, slug: &str)
        -> Result<Vec<CommerceProduct>, CommerceError>;

    /// Get a product by id. `Ok(None)` when the store has no such product.
    async fn get_product(&self, id: ProductId) -> Result<Option<CommerceProduct>, CommerceError>;

    /// Find customers registered under an email address.
    async fn find_customers_by_email(
        &self,
        email: &str,
    ) -> Result<Vec<CommerceCustomer>, CommerceError>;

    /// Create a customer account.
    async fn create_customer(
        &self,
        request: CreateCustomerRequest,
    ) -> Result<CommerceCustomer, CommerceError>;

    /// Replace a customer's password.
    async fn update_customer_password(
        &self,
        id: CustomerId,
        password: &SecretString,
    ) -> Result<CommerceCustomer, CommerceError>;

    /// Find orders matching product, customer and status.
    async fn find_orders(&self, query: OrderQuery) -> Result<Vec<Order>, CommerceError>;

    /// List every subscription in the given status.
    async fn list_subscriptions(
        &self,
        status: SubscriptionStatus,
    ) -> Result<Vec<Subscription>, CommerceError>;

    /// Log a customer into the site, returning a token for its autologin URL.
    async fn issue_login_token(
        &self,
        username: &str,
        password: &SecretString,
    ) -> Result<SecretString, CommerceError>;
}

/// A product as stored by the commerce backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommerceProduct {
    pub id: ProductId,
    pub slug: String,
    #[serde(default)]
    pub permalink: String,
    #[serde(default)]
    pub images: Vec<ProductImage>,
    #[serde(default)]
    pub downloads: Vec<ProductDownload>,
}

impl CommerceProduct {
    /// Source of the first image, if any.
    pub fn first_image(&self) -> Option<&str> {
        self.images.first().map(|image| image.src.as_str())
    }

    /// File of the first downloadable, if any.
    pub fn first_download(&self) -> Option<&str> {
        self.downloads.first().map(|download| download.file.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductImage {
    #[serde(default)]
    pub src: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductDownload {
    #[serde(default)]
    pub name: String,
    pub file: String,
}

/// A customer account in the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommerceCustomer {
    pub id: CustomerId,
    pub email: String,
    #[serde(default)]
    pub username: String,
}

/// Request to create a customer.
#[derive(Debug, Clone)]
pub struct CreateCustomerRequest {
    pub email: String,
    pub username: String,
    pub password: SecretString,
}

/// Order lookup filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderQuery {
    pub product: ProductId,
    pub customer: CustomerId,
    pub status: OrderStatus,
}

impl OrderQuery {
    /// Completed orders of `product` placed by `customer`.
    pub fn completed(product: ProductId, customer: CustomerId) -> Self {
        Self {
            product,
            customer,
            status: OrderStatus::Completed,
        }
    }
}

/// An order in the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub status: OrderStatus,
    pub customer_id: CustomerId,
    #[serde(default)]
    pub line_items: Vec<LineItem>,
}

impl Order {
    pub fn contains_product(&self, product: ProductId) -> bool {
        self.line_items.iter().any(|item| item.product_id == product)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub product_id: ProductId,
}

/// Order status as reported by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrderStatus {
    Pending,
    Processing,
    OnHold,
    Completed,
    Cancelled,
    Refunded,
    Failed,
    /// Any status this crate does not know about.
    #[serde(other)]
    Unknown,
}

impl OrderStatus {
    /// Query parameter value for this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Processing => "processing",
            OrderStatus::OnHold => "on-hold",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
            OrderStatus::Refunded => "refunded",
            OrderStatus::Failed => "failed",
            OrderStatus::Unknown => "any",
        }
    }
}

/// A recurring subscription, renewed from its parent order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscription {
    pub id: SubscriptionId,
    pub parent_id: OrderId,
    pub status: SubscriptionStatus,
}

/// Subscription status as reported by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SubscriptionStatus {
    Pending,
    Active,
    OnHold,
    Cancelled,
    Switched,
    Expired,
    PendingCancel,
    #[serde(other)]
    Unknown,
}

impl SubscriptionStatus {
    /// Query parameter value for this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            SubscriptionStatus::Pending => "pending",
            SubscriptionStatus::Active => "active",
            SubscriptionStatus::OnHold => "on-hold",
            SubscriptionStatus::Cancelled => "cancelled",
            SubscriptionStatus::Switched => "switched",
            SubscriptionStatus::Expired => "expired",
            SubscriptionStatus::PendingCancel => "pending-cancel",
            SubscriptionStatus::Unknown => "any",
        }
    }
}

/// Errors from commerce backend operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommerceError {
    /// Error code for categorization.
    pub code: CommerceErrorCode,

    /// Human-readable message.
    pub message: String,
}

impl CommerceError {
    pub fn new(code: CommerceErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// The store could not be reached.
    pub fn network(message: impl Into<String>) -> Self {
        Self::new(CommerceErrorCode::NetworkError, message)
    }

    /// The addressed resource does not exist.
    pub fn not_found(resource: &str) -> Self {
        Self::new(CommerceErrorCode::NotFound, format!("{} not found", resource))
    }

    /// Credentials were rejected by the store or the site login.
    pub fn authentication(message: impl Into<String>) -> Self {
        Self::new(CommerceErrorCode::AuthenticationError, message)
    }

    /// The store answered with an error status.
    pub fn provider(message: impl Into<String>) -> Self {
        Self::new(CommerceErrorCode::ProviderError, message)
    }

    /// The store answered with a body we could not read.
    pub fn decode(message: impl Into<String>) -> Self {
        Self::new(CommerceErrorCode::DecodeError, message)
    }
}

impl std::fmt::Display for CommerceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for CommerceError {}

/// Commerce error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommerceErrorCode {
    NetworkError,
    NotFound,
    AuthenticationError,
    ProviderError,
    DecodeError,
}

impl std::fmt::Display for CommerceErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            CommerceErrorCode::NetworkError => "network_error",
            CommerceErrorCode::NotFound => "not_found",
            CommerceErrorCode::AuthenticationError => "authentication_error",
            CommerceErrorCode::ProviderError => "provider_error",
            CommerceErrorCode::DecodeError => "decode_error",
        };
        write!(f, "{}", s)
    }
}
