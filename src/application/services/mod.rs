//! Application services.
//!
//! Stateless collaborators shared by the access handlers. Each holds the
//! commerce backend as an `Arc<dyn CommerceBackend>` and is cheap to clone.

mod customer_provisioner;
mod entitlement_evaluator;
mod product_resolver;
mod store_links;

pub use customer_provisioner::{CustomerProvisioner, ProvisionedCustomer};
pub use entitlement_evaluator::EntitlementEvaluator;
pub use product_resolver::ProductResolver;
pub use store_links::StoreLinks;
