//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, identity, validation errors)
//! - `catalog` - Products, slugs and the bundle naming convention
//! - `entitlement` - Entitlement decisions and the fail-closed collapse
//! - `customer` - Commerce account naming and password rotation

pub mod catalog;
pub mod customer;
pub mod entitlement;
pub mod foundation;
