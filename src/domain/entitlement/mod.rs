//! Entitlement domain module.
//!
//! The decision of whether a caller may see a product's restricted file,
//! and the policy applied to products outside any bundle.

mod decision;
mod policy;

pub use decision::{DenialReason, Entitlement, LookupError};
pub use policy::UngatedPolicy;
