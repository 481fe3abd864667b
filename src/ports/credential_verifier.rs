//! Credential verification port.
//!
//! Turns a bearer token issued by the identity provider into a verified
//! [`Identity`]. The gateway depends only on this trait, so tests can swap in
//! a mock and local development can use an unsigned fake.
//!
//! # Contract
//!
//! Implementations must:
//! - Verify the token signature against the current provider keys
//! - Reject expired tokens and, when configured, foreign issuers/audiences
//! - Collapse every failure into [`InvalidCredential`]
//! - Log the concrete failure reason rather than returning it

use async_trait::async_trait;

use crate::domain::foundation::{Identity, InvalidCredential};

/// Verifies bearer tokens and extracts the caller's identity.
#[async_trait]
pub trait CredentialVerifier: Send + Sync {
    /// Verify a raw token (no "Bearer " prefix).
    ///
    /// An empty token is a failed verification, not a special case.
    async fn verify(&self, token: &str) -> Result<Identity, InvalidCredential>;
}
