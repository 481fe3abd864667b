//! Authentication configuration

use serde::Deserialize;

use super::error::ValidationError;
use super::server::Environment;

/// Credential verification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Endpoint serving `{kid: pem}` signing keys
    #[serde(default)]
    pub keys_url: String,

    /// Claim carrying the subject identifier
    #[serde(default = "default_subject_claim")]
    pub subject_claim: String,

    /// Expected token issuer, if enforced
    pub issuer: Option<String>,

    /// Expected token audience, if enforced
    pub audience: Option<String>,

    /// Skip signature checks (local development only)
    #[serde(default)]
    pub fake_mode: bool,
}

impl AuthConfig {
    /// Validate authentication configuration
    ///
    /// In production, requires HTTPS for the key endpoint and forbids fake mode.
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        if self.fake_mode {
            if *environment == Environment::Production {
                return Err(ValidationError::FakeModeInProduction);
            }
            return Ok(());
        }

        if self.keys_url.is_empty() {
            return Err(ValidationError::MissingRequired("AUTH__KEYS_URL"));
        }
        if reqwest::Url::parse(&self.keys_url).is_err() {
            return Err(ValidationError::InvalidUrl("AUTH__KEYS_URL"));
        }
        if *environment == Environment::Production && !self.keys_url.starts_with("https://") {
            return Err(ValidationError::MustBeHttps("AUTH__KEYS_URL"));
        }
        if self.subject_claim.trim().is_empty() {
            return Err(ValidationError::MissingRequired("AUTH__SUBJECT_CLAIM"));
        }

        Ok(())
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            keys_url: String::new(),
            subject_claim: default_subject_claim(),
            issuer: None,
            audience: None,
            fake_mode: false,
        }
    }
}

fn default_subject_claim() -> String {
    "blockchainId".to_string()
}
