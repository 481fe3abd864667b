//! RS256 JWT adapter for credential verification.
//!
//! This adapter implements the `CredentialVerifier` port for tokens issued by
//! the identity provider. It verifies tokens by:
//!
//! 1. Reading the `kid` from the unverified token header
//! 2. Fetching the current key set from a `PublicKeySource`
//! 3. Verifying the RS256 signature with the matching PEM key
//! 4. Validating `exp` (required), `nbf`, and `iss`/`aud` when configured
//! 5. Taking the subject from the configured custom claim
//!
//! Every failure becomes `InvalidCredential`; the reason is only logged.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use premium::adapters::auth::{HttpKeySource, JwtConfig, JwtCredentialVerifier};
//!
//! let keys = HttpKeySource::new(reqwest::Client::new(), "https://id.example.com/keys");
//! let verifier = JwtCredentialVerifier::new(JwtConfig::new(), Arc::new(keys));
//! let identity = verifier.verify("eyJ...").await?;
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use jsonwebtoken::{decode, decode_header, Algorithm, DecodingKey, Validation};
use serde_json::Value;

use crate::domain::foundation::{Identity, InvalidCredential, SubjectId};
use crate::ports::{CredentialVerifier, PublicKeySource};

/// Claim holding the subject when none is configured.
pub const DEFAULT_SUBJECT_CLAIM: &str = "blockchainId";

/// Claims are read loosely; only the subject claim is interpreted here.
pub(super) type Claims = HashMap<String, Value>;

/// Configuration for JWT verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JwtConfig {
    /// Custom claim carrying the subject identifier.
    pub subject_claim: String,

    /// Expected `iss`, if any.
    pub issuer: Option<String>,

    /// Expected `aud`, if any.
    pub audience: Option<String>,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl JwtConfig {
    pub fn new() -> Self {
        Self {
            subject_claim: DEFAULT_SUBJECT_CLAIM.to_string(),
            issuer: None,
            audience: None,
        }
    }

    pub fn with_subject_claim(mut self, claim: impl Into<String>) -> Self {
        self.subject_claim = claim.into();
        self
    }

    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = Some(issuer.into());
        self
    }

    pub fn with_audience(mut self, audience: impl Into<String>) -> Self {
        self.audience = Some(audience.into());
        self
    }

    fn validation(&self) -> Validation {
        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_required_spec_claims(&["exp"]);
        validation.validate_exp = true;
        validation.validate_nbf = true;

        if let Some(issuer) = &self.issuer {
            validation.set_issuer(&[issuer]);
        }

        match &self.audience {
            Some(audience) => validation.set_audience(&[audience]),
            None => validation.validate_aud = false,
        }

        validation
    }
}

/// Takes the subject from `claim`: the first element of an array, or a plain string.
pub(super) fn subject_from_claims(
    claims: &Claims,
    claim: &str,
) -> Result<SubjectId, InvalidCredential> {
    let raw = match claims.get(claim) {
        Some(Value::Array(values)) => values.first().and_then(Value::as_str),
        Some(Value::String(value)) => Some(value.as_str()),
        _ => None,
    };

    let raw = raw.ok_or_else(|| {
        tracing::warn!(claim, "Token missing subject claim");
        InvalidCredential
    })?;

    SubjectId::new(raw).map_err(|_| {
        tracing::warn!(claim, "Token subject claim is empty");
        InvalidCredential
    })
}

/// Verifies RS256 tokens against the identity provider's published keys.
pub struct JwtCredentialVerifier {
    config: JwtConfig,
    keys: Arc<dyn PublicKeySource>,
}

impl JwtCredentialVerifier {
    pub fn new(config: JwtConfig, keys: Arc<dyn PublicKeySource>) -> Self {
        Self { config, keys }
    }
}

#[async_trait]
impl CredentialVerifier for JwtCredentialVerifier {
    async fn verify(&self, token: &str) -> Result<Identity, InvalidCredential> {
        if token.trim().is_empty() {
            tracing::debug!("No credential presented");
            return Err(InvalidCredential);
        }

        let header = decode_header(token).map_err(|e| {
            tracing::debug!("Failed to decode JWT header: {}", e);
            InvalidCredential
        })?;

        let kid = header.kid.ok_or_else(|| {
            tracing::warn!("JWT missing 'kid' header");
            InvalidCredential
        })?;

        let keys = self.keys.fetch_keys().await.map_err(|e| {
            tracing::warn!(error = %e, "Could not obtain signing keys");
            InvalidCredential
        })?;

        let pem = keys.get(&kid).ok_or_else(|| {
            tracing::warn!(kid = %kid, "No matching key found");
            InvalidCredential
        })?;

        let decoding_key = DecodingKey::from_rsa_pem(pem.as_bytes()).map_err(|e| {
            tracing::warn!(kid = %kid, "Failed to create decoding key: {}", e);
            InvalidCredential
        })?;

        let token_data =
            decode::<Claims>(token, &decoding_key, &self.config.validation()).map_err(|e| {
                use jsonwebtoken::errors::ErrorKind;
                match e.kind() {
                    ErrorKind::ExpiredSignature => tracing::debug!("Token expired"),
                    ErrorKind::ImmatureSignature => tracing::debug!("Token not yet valid"),
                    ErrorKind::InvalidIssuer => tracing::warn!("Invalid issuer in token"),
                    ErrorKind::InvalidAudience => tracing::warn!("Invalid audience in token"),
                    _ => tracing::warn!("Token validation failed: {}", e),
                }
                InvalidCredential
            })?;

        let subject = subject_from_claims(&token_data.claims, &self.config.subject_claim)?;
        Ok(Identity::new(subject))
    }
}

impl std::fmt::Debug for JwtCredentialVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtCredentialVerifier")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
