//! Unsigned credential verifier for local development.
//!
//! Decodes tokens and reads the subject claim without checking the signature.
//! Expiry is still enforced. Only built when `auth.fake_mode` is set, and
//! configuration validation refuses it in production.

use async_trait::async_trait;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};

use super::jwt::{subject_from_claims, Claims, DEFAULT_SUBJECT_CLAIM};
use crate::domain::foundation::{Identity, InvalidCredential};
use crate::ports::CredentialVerifier;

/// Accepts any well-formed, unexpired token.
#[derive(Debug, Clone)]
pub struct FakeCredentialVerifier {
    subject_claim: String,
}

impl Default for FakeCredentialVerifier {
    fn default() -> Self {
        Self::new(DEFAULT_SUBJECT_CLAIM)
    }
}

impl FakeCredentialVerifier {
    pub fn new(subject_claim: impl Into<String>) -> Self {
        tracing::warn!("Credential signatures are NOT verified (fake mode)");
        Self {
            subject_claim: subject_claim.into(),
        }
    }
}

#[async_trait]
impl CredentialVerifier for FakeCredentialVerifier {
    async fn verify(&self, token: &str) -> Result<Identity, InvalidCredential> {
        let mut validation = Validation::new(Algorithm::RS256);
        validation.insecure_disable_signature_validation();
        validation.validate_aud = false;

        let token_data = decode::<Claims>(token, &DecodingKey::from_secret(&[]), &validation)
            .map_err(|e| {
                tracing::debug!("Fake verification failed: {}", e);
                InvalidCredential
            })?;

        let subject = subject_from_claims(&token_data.claims, &self.subject_claim)?;
        Ok(Identity::new(subject))
    }
}
