//! Mock credential verifier for testing.
//!
//! # Example
//!
//! ```ignore
//! use premium::adapters::auth::MockCredentialVerifier;
//!
//! let verifier = MockCredentialVerifier::new().with_subject("valid-token", "0xabc");
//! let identity = verifier.verify("valid-token").await?;
//! ```

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::foundation::{Identity, InvalidCredential, SubjectId};
use crate::ports::CredentialVerifier;

/// Maps known tokens to subjects. Any other token is invalid.
#[derive(Debug, Default)]
pub struct MockCredentialVerifier {
    tokens: RwLock<HashMap<String, SubjectId>>,
    calls: RwLock<Vec<String>>,
}

impl MockCredentialVerifier {
    /// Creates a verifier that rejects everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Accepts `token` as a credential for `subject`.
    pub fn with_subject(self, token: impl Into<String>, subject: impl Into<String>) -> Self {
        self.add_token(token, subject);
        self
    }

    /// Registers a valid token at runtime.
    pub fn add_token(&self, token: impl Into<String>, subject: impl Into<String>) {
        let subject = SubjectId::new(subject).unwrap();
        self.tokens.write().unwrap().insert(token.into(), subject);
    }

    /// Removes a token, making it invalid.
    pub fn remove_token(&self, token: &str) {
        self.tokens.write().unwrap().remove(token);
    }

    /// Tokens passed to `verify`, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.read().unwrap().clone()
    }
}

#[async_trait]
impl CredentialVerifier for MockCredentialVerifier {
    async fn verify(&self, token: &str) -> Result<Identity, InvalidCredential> {
        self.calls.write().unwrap().push(token.to_string());

        self.tokens
            .read()
            .unwrap()
            .get(token)
            .cloned()
            .map(Identity::new)
            .ok_or(InvalidCredential)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn known_token_verifies() {
        let verifier = MockCredentialVerifier::new().with_subject("t1", "0xabc");
        let identity = verifier.verify("t1").await.unwrap();
        assert_eq!(identity.subject_id.as_str(), "0xabc");
    }

    #[tokio::test]
    async fn unknown_and_removed_tokens_fail() {
        let verifier = MockCredentialVerifier::new().with_subject("t1", "0xabc");
        assert_eq!(verifier.verify("t2").await, Err(InvalidCredential));

        verifier.remove_token("t1");
        assert_eq!(verifier.verify("t1").await, Err(InvalidCredential));
        assert_eq!(verifier.calls(), vec!["t2", "t1"]);
    }
}
