//! Authentication types for the domain layer.
//!
//! An `Identity` is all this crate ever learns about a caller: the subject
//! claim of a credential that passed verification. It is never persisted and
//! lives for a single request.
//!
//! Verification failures collapse into one opaque `InvalidCredential` value.
//! Callers cannot tell a malformed token from an expired one or from an
//! unknown signing key.

use super::SubjectId;
use thiserror::Error;

/// Verified caller identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    /// Subject identifier taken from the credential's custom claim.
    pub subject_id: SubjectId,
}

impl Identity {
    /// Creates an identity for a verified subject.
    pub fn new(subject_id: SubjectId) -> Self {
        Self { subject_id }
    }
}

/// The credential could not be trusted.
///
/// Carries no reason; adapters log the cause before returning it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Invalid credential")]
pub struct InvalidCredential;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_wraps_subject() {
        let identity = Identity::new(SubjectId::new("subject-1").unwrap());
        assert_eq!(identity.subject_id.as_str(), "subject-1");
    }

    #[test]
    fn invalid_credential_display_reveals_nothing() {
        assert_eq!(InvalidCredential.to_string(), "Invalid credential");
    }
}
