//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Identity Ports
//!
//! - `CredentialVerifier` - Verifies bearer tokens into an `Identity`
//! - `PublicKeySource` - Supplies the identity provider's signing keys
//!
//! ## Commerce Ports
//!
//! - `CommerceBackend` - Products, customers, orders, subscriptions and site login

mod commerce_backend;
mod credential_verifier;
mod public_key_source;

pub use commerce_backend::{
    CommerceBackend, CommerceCustomer, CommerceError, CommerceErrorCode, CommerceProduct,
    CreateCustomerRequest, LineItem, Order, OrderQuery, OrderStatus, ProductDownload,
    ProductImage, Subscription, SubscriptionStatus,
};
pub use credential_verifier::CredentialVerifier;
pub use public_key_source::{KeySourceError, PublicKeySet, PublicKeySource};
