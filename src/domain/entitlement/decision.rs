//! Entitlement outcome and its fail-closed collapse.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Whether a caller may see a product's restricted file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entitlement {
    Granted,
    Denied(DenialReason),
}

/// Why entitlement was not granted.
///
/// Only ever logged. Callers see the same redacted view for every reason.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DenialReason {
    /// Token missing, malformed, expired or signed by an unknown key.
    InvalidCredential,
    /// No commerce customer for the verified identity.
    CustomerNotFound,
    /// No completed order for the governing product.
    NoCompletedOrder,
    /// The completed order is not the parent of any active subscription.
    NoActiveSubscription,
    /// The product has no governing bundle and the policy denies it.
    Ungated,
    /// A lookup failed along the way.
    LookupFailed,
}

/// A failure while gathering the facts needed to decide entitlement.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("Bundle product '{0}' not found")]
    BundleNotFound(String),

    #[error("Bundle product '{slug}' is invalid: {reason}")]
    InvalidBundle { slug: String, reason: String },

    #[error("Commerce lookup '{operation}' failed: {message}")]
    Commerce {
        operation: &'static str,
        message: String,
    },
}

impl LookupError {
    pub fn commerce(operation: &'static str, err: impl std::fmt::Display) -> Self {
        LookupError::Commerce {
            operation,
            message: err.to_string(),
        }
    }
}

impl Entitlement {
    pub fn is_granted(&self) -> bool {
        matches!(self, Entitlement::Granted)
    }

    pub fn denial_reason(&self) -> Option<DenialReason> {
        match self {
            Entitlement::Granted => None,
            Entitlement::Denied(reason) => Some(*reason),
        }
    }

    /// Collapses a lookup result into an entitlement, denying on any error.
    ///
    /// This is the only place where a lookup failure becomes a denial.
    pub fn fail_closed(result: Result<Entitlement, LookupError>) -> Entitlement {
        match result {
            Ok(entitlement) => entitlement,
            Err(err) => {
                tracing::warn!(error = %err, "entitlement lookup failed, denying access");
                Entitlement::Denied(DenialReason::LookupFailed)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fail_closed_passes_decisions_through() {
        assert_eq!(
            Entitlement::fail_closed(Ok(Entitlement::Granted)),
            Entitlement::Granted
        );
        assert_eq!(
            Entitlement::fail_closed(Ok(Entitlement::Denied(DenialReason::NoCompletedOrder))),
            Entitlement::Denied(DenialReason::NoCompletedOrder)
        );
    }

    #[test]
    fn fail_closed_denies_on_error() {
        let result = Err(LookupError::commerce("list_subscriptions", "connection reset"));
        assert_eq!(
            Entitlement::fail_closed(result),
            Entitlement::Denied(DenialReason::LookupFailed)
        );
    }

    #[test]
    fn denial_reason_is_exposed_for_logging_only() {
        assert_eq!(Entitlement::Granted.denial_reason(), None);
        assert_eq!(
            Entitlement::Denied(DenialReason::Ungated).denial_reason(),
            Some(DenialReason::Ungated)
        );
    }

    #[test]
    fn lookup_error_messages() {
        assert_eq!(
            LookupError::BundleNotFound("bundleA".into()).to_string(),
            "Bundle product 'bundleA' not found"
        );
        assert_eq!(
            LookupError::commerce("find_orders", "timeout").to_string(),
            "Commerce lookup 'find_orders' failed: timeout"
        );
    }
}
