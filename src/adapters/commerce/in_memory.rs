//! In-memory commerce backend for testing.
//!
//! Provides a configurable implementation of `CommerceBackend` for unit and
//! integration tests. Supports:
//! - Seeded products, customers, orders and subscriptions
//! - Error injection, per method or for the next call
//! - Call tracking
//! - Password-checked site login

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};

use crate::domain::foundation::{CustomerId, ProductId};
use crate::ports::{
    CommerceBackend, CommerceCustomer, CommerceError, CommerceProduct, CreateCustomerRequest,
    Order, OrderQuery, ProductDownload, ProductImage, Subscription, SubscriptionStatus,
};

/// In-memory store.
///
/// # Example
///
/// ```ignore
/// let store = InMemoryCommerceBackend::new()
///     .with_product(InMemoryCommerceBackend::catalog_product(100, "bundleA"));
///
/// store.set_method_error("list_subscriptions", CommerceError::network("down"));
/// ```
#[derive(Default)]
pub struct InMemoryCommerceBackend {
    inner: Arc<Mutex<StoreState>>,
}

#[derive(Default)]
struct StoreState {
    products: Vec<CommerceProduct>,
    customers: Vec<CommerceCustomer>,
    passwords: HashMap<CustomerId, String>,
    orders: Vec<Order>,
    subscriptions: Vec<Subscription>,
    next_customer_id: u64,

    /// Error to return on next call.
    next_error: Option<CommerceError>,

    /// Specific errors by method name.
    method_errors: HashMap<String, CommerceError>,

    call_log: Vec<MethodCall>,
}

/// Recorded method call for assertions.
#[derive(Debug, Clone)]
pub struct MethodCall {
    pub method: String,
    pub args: Vec<String>,
}

impl InMemoryCommerceBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// A well-formed product with one image and one download.
    pub fn catalog_product(id: u64, slug: &str) -> CommerceProduct {
        CommerceProduct {
            id: ProductId::new(id),
            slug: slug.to_string(),
            permalink: format!("https://store.example.com/product/{}/", slug),
            images: vec![ProductImage {
                src: format!("https://cdn.example.com/{}.jpg", slug),
            }],
            downloads: vec![ProductDownload {
                name: slug.to_string(),
                file: format!("https://cdn.example.com/premium/{}.mp4", slug),
            }],
        }
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Seeding
    // ════════════════════════════════════════════════════════════════════════════

    pub fn with_product(self, product: CommerceProduct) -> Self {
        self.inner.lock().unwrap().products.push(product);
        self
    }

    pub fn with_customer(self, customer: CommerceCustomer) -> Self {
        {
            let mut state = self.inner.lock().unwrap();
            state.next_customer_id = state.next_customer_id.max(customer.id.get());
            state.customers.push(customer);
        }
        self
    }

    pub fn with_order(self, order: Order) -> Self {
        self.inner.lock().unwrap().orders.push(order);
        self
    }

    pub fn with_subscription(self, subscription: Subscription) -> Self {
        self.inner.lock().unwrap().subscriptions.push(subscription);
        self
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Error Injection
    // ════════════════════════════════════════════════════════════════════════════

    /// Set an error to return on the next call to any method.
    pub fn set_error(&self, error: CommerceError) {
        self.inner.lock().unwrap().next_error = Some(error);
    }

    /// Set an error for a specific method, returned until cleared.
    pub fn set_method_error(&self, method: &str, error: CommerceError) {
        self.inner
            .lock()
            .unwrap()
            .method_errors
            .insert(method.to_string(), error);
    }

    pub fn clear_errors(&self) {
        let mut state = self.inner.lock().unwrap();
        state.next_error = None;
        state.method_errors.clear();
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Inspection
    // ════════════════════════════════════════════════════════════════════════════

    pub fn calls(&self) -> Vec<MethodCall> {
        self.inner.lock().unwrap().call_log.clone()
    }

    pub fn was_called(&self, method: &str) -> bool {
        self.call_count(method) > 0
    }

    pub fn call_count(&self, method: &str) -> usize {
        self.inner
            .lock()
            .unwrap()
            .call_log
            .iter()
            .filter(|c| c.method == method)
            .count()
    }

    pub fn clear_calls(&self) {
        self.inner.lock().unwrap().call_log.clear();
    }

    pub fn customers(&self) -> Vec<CommerceCustomer> {
        self.inner.lock().unwrap().customers.clone()
    }

    /// The password currently set for a customer, if any.
    pub fn password_of(&self, id: CustomerId) -> Option<String> {
        self.inner.lock().unwrap().passwords.get(&id).cloned()
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Internal Helpers
    // ════════════════════════════════════════════════════════════════════════════

    fn record_call(&self, method: &str, args: Vec<String>) {
        self.inner.lock().unwrap().call_log.push(MethodCall {
            method: method.to_string(),
            args,
        });
    }

    fn check_error(&self, method: &str) -> Result<(), CommerceError> {
        let mut state = self.inner.lock().unwrap();

        if let Some(error) = state.method_errors.get(method) {
            return Err(error.clone());
        }

        if let Some(error) = state.next_error.take() {
            return Err(error);
        }

        Ok(())
    }
}

impl Clone for InMemoryCommerceBackend {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

#[async_trait]
impl CommerceBackend for InMemoryCommerceBackend {
    async fn find_products_by_slug(
        &self,
        slug: &str,
    ) -> Result<Vec<CommerceProduct>, CommerceError> {
        self.record_call("find_products_by_slug", vec![slug.to_string()]);
        self.check_error("find_products_by_slug")?;

        let state = self.inner.lock().unwrap();
        Ok(state
            .products
            .iter()
            .filter(|p| p.slug == slug)
            .cloned()
            .collect())
    }

    async fn get_product(&self, id: ProductId) -> Result<Option<CommerceProduct>, CommerceError> {
        self.record_call("get_product", vec![id.to_string()]);
        self.check_error("get_product")?;

        let state = self.inner.lock().unwrap();
        Ok(state.products.iter().find(|p| p.id == id).cloned())
    }

    async fn find_customers_by_email(
        &self,
        email: &str,
    ) -> Result<Vec<CommerceCustomer>, CommerceError> {
        self.record_call("find_customers_by_email", vec![email.to_string()]);
        self.check_error("find_customers_by_email")?;

        let state = self.inner.lock().unwrap();
        Ok(state
            .customers
            .iter()
            .filter(|c| c.email.eq_ignore_ascii_case(email))
            .cloned()
            .collect())
    }

    async fn create_customer(
        &self,
        request: CreateCustomerRequest,
    ) -> Result<CommerceCustomer, CommerceError> {
        self.record_call(
            "create_customer",
            vec![request.email.clone(), request.username.clone()],
        );
        self.check_error("create_customer")?;

        let mut state = self.inner.lock().unwrap();
        if state.customers.iter().any(|c| c.email == request.email) {
            return Err(CommerceError::provider(format!(
                "registration-error-email-exists: {}",
                request.email
            )));
        }

        state.next_customer_id += 1;
        let customer = CommerceCustomer {
            id: CustomerId::new(state.next_customer_id),
            email: request.email,
            username: request.username,
        };
        state.passwords.insert(
            customer.id,
            request.password.expose_secret().to_string(),
        );
        state.customers.push(customer.clone());

        Ok(customer)
    }

    async fn update_customer_password(
        &self,
        id: CustomerId,
        password: &SecretString,
    ) -> Result<CommerceCustomer, CommerceError> {
        self.record_call("update_customer_password", vec![id.to_string()]);
        self.check_error("update_customer_password")?;

        let mut state = self.inner.lock().unwrap();
        let customer = state
            .customers
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or_else(|| CommerceError::not_found(&format!("Customer {}", id)))?;
        state
            .passwords
            .insert(id, password.expose_secret().to_string());

        Ok(customer)
    }

    async fn find_orders(&self, query: OrderQuery) -> Result<Vec<Order>, CommerceError> {
        self.record_call(
            "find_orders",
            vec![
                query.product.to_string(),
                query.customer.to_string(),
                query.status.as_str().to_string(),
            ],
        );
        self.check_error("find_orders")?;

        let state = self.inner.lock().unwrap();
        Ok(state
            .orders
            .iter()
            .filter(|o| {
                o.customer_id == query.customer
                    && o.status == query.status
                    && o.contains_product(query.product)
            })
            .cloned()
            .collect())
    }

    async fn list_subscriptions(
        &self,
        status: SubscriptionStatus,
    ) -> Result<Vec<Subscription>, CommerceError> {
        self.record_call("list_subscriptions", vec![status.as_str().to_string()]);
        self.check_error("list_subscriptions")?;

        let state = self.inner.lock().unwrap();
        Ok(state
            .subscriptions
            .iter()
            .filter(|s| s.status == status)
            .cloned()
            .collect())
    }

    async fn issue_login_token(
        &self,
        username: &str,
        password: &SecretString,
    ) -> Result<SecretString, CommerceError> {
        self.record_call("issue_login_token", vec![username.to_string()]);
        self.check_error("issue_login_token")?;

        let state = self.inner.lock().unwrap();
        let customer = state
            .customers
            .iter()
            .find(|c| c.username == username)
            .ok_or_else(|| CommerceError::authentication("unknown username"))?;

        match state.passwords.get(&customer.id) {
            Some(stored) if stored == password.expose_secret() => {
                Ok(SecretString::new(format!("jwt-for-{}", username)))
            }
            _ => Err(CommerceError::authentication("wrong password")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::OrderId;
    use crate::ports::{CommerceErrorCode, LineItem, OrderStatus};

    fn customer(id: u64, name: &str) -> CommerceCustomer {
        CommerceCustomer {
            id: CustomerId::new(id),
            email: format!("{}@bbs.network", name),
            username: name.to_string(),
        }
    }

    #[tokio::test]
    async fn finds_products_by_exact_slug() {
        let store = InMemoryCommerceBackend::new()
            .with_product(InMemoryCommerceBackend::catalog_product(1, "bundleA"))
            .with_product(InMemoryCommerceBackend::catalog_product(2, "bundleA_item1"));

        let found = store.find_products_by_slug("bundleA").await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, ProductId::new(1));
        assert!(store.find_products_by_slug("missing").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn orders_filter_on_product_customer_and_status() {
        let store = InMemoryCommerceBackend::new()
            .with_order(Order {
                id: OrderId::new(5001),
                status: OrderStatus::Completed,
                customer_id: CustomerId::new(3),
                line_items: vec![LineItem {
                    product_id: ProductId::new(100),
                }],
            })
            .with_order(Order {
                id: OrderId::new(5002),
                status: OrderStatus::Processing,
                customer_id: CustomerId::new(3),
                line_items: vec![LineItem {
                    product_id: ProductId::new(100),
                }],
            });

        let orders = store
            .find_orders(OrderQuery::completed(ProductId::new(100), CustomerId::new(3)))
            .await
            .unwrap();
        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].id, OrderId::new(5001));

        let other_customer = store
            .find_orders(OrderQuery::completed(ProductId::new(100), CustomerId::new(4)))
            .await
            .unwrap();
        assert!(other_customer.is_empty());
    }

    #[tokio::test]
    async fn created_customers_get_fresh_ids_and_can_log_in() {
        let store = InMemoryCommerceBackend::new().with_customer(customer(10, "existing"));

        let created = store
            .create_customer(CreateCustomerRequest {
                email: "new@bbs.network".into(),
                username: "new".into(),
                password: SecretString::new("pw".to_string()),
            })
            .await
            .unwrap();
        assert_eq!(created.id, CustomerId::new(11));

        let token = store
            .issue_login_token("new", &SecretString::new("pw".to_string()))
            .await
            .unwrap();
        assert_eq!(token.expose_secret(), "jwt-for-new");

        let rejected = store
            .issue_login_token("new", &SecretString::new("other".to_string()))
            .await
            .unwrap_err();
        assert_eq!(rejected.code, CommerceErrorCode::AuthenticationError);
    }

    #[tokio::test]
    async fn password_update_requires_existing_customer() {
        let store = InMemoryCommerceBackend::new().with_customer(customer(10, "existing"));
        let password = SecretString::new("rotated".to_string());

        store
            .update_customer_password(CustomerId::new(10), &password)
            .await
            .unwrap();
        assert_eq!(store.password_of(CustomerId::new(10)).as_deref(), Some("rotated"));

        let err = store
            .update_customer_password(CustomerId::new(99), &password)
            .await
            .unwrap_err();
        assert_eq!(err.code, CommerceErrorCode::NotFound);
    }

    #[tokio::test]
    async fn injected_errors_and_call_log() {
        let store = InMemoryCommerceBackend::new();
        store.set_method_error("list_subscriptions", CommerceError::network("down"));
        store.set_error(CommerceError::decode("bad json"));

        let first = store.find_products_by_slug("x").await.unwrap_err();
        assert_eq!(first.code, CommerceErrorCode::DecodeError);
        assert!(store.find_products_by_slug("x").await.is_ok());

        let subs = store.list_subscriptions(SubscriptionStatus::Active).await;
        assert_eq!(subs.unwrap_err().code, CommerceErrorCode::NetworkError);

        assert_eq!(store.call_count("find_products_by_slug"), 2);
        assert!(store.was_called("list_subscriptions"));

        store.clear_errors();
        store.clear_calls();
        assert!(store.list_subscriptions(SubscriptionStatus::Active).await.is_ok());
        assert_eq!(store.calls().len(), 1);
    }
}
