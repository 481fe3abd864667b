//! Premium - Entitlement-gated access to premium product content.
//!
//! Resolves products from a commerce store, verifies caller credentials, and
//! reveals the paid file only to callers holding an active bundle subscription.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod observability;
pub mod ports;
