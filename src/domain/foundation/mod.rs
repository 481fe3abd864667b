//! Foundation module - Shared domain primitives.
//!
//! Contains identifiers, the verified caller identity, and validation errors
//! that form the vocabulary of the premium access domain.

mod auth;
mod errors;
mod ids;

pub use auth::{Identity, InvalidCredential};
pub use errors::ValidationError;
pub use ids::{CustomerId, OrderId, ProductId, SubjectId, SubscriptionId};
