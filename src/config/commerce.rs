//! Commerce store configuration

use std::time::Duration;

use reqwest::Url;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::error::ValidationError;
use super::server::Environment;

/// Commerce store configuration (WooCommerce REST API + JWT login plugin)
#[derive(Debug, Clone, Deserialize)]
pub struct CommerceConfig {
    /// Store base URL, e.g. `https://store.example.com`
    #[serde(default)]
    pub store_url: String,

    /// REST API consumer key
    #[serde(default)]
    pub consumer_key: String,

    /// REST API consumer secret
    #[serde(default = "empty_secret")]
    pub consumer_secret: SecretString,

    /// REST API namespace
    #[serde(default = "default_api_version")]
    pub api_version: String,

    /// Login plugin token endpoint, relative to the store
    #[serde(default = "default_login_path")]
    pub login_path: String,

    /// Login plugin autologin endpoint, relative to the store
    #[serde(default = "default_autologin_path")]
    pub autologin_path: String,

    /// Domain used for derived customer emails
    #[serde(default = "default_customer_email_domain")]
    pub customer_email_domain: String,

    /// Timeout for each call to the store, in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Upper bound on subscription pages fetched per lookup
    #[serde(default = "default_subscription_page_cap")]
    pub subscription_page_cap: u32,
}

impl CommerceConfig {
    /// Parsed store URL
    pub fn store_url(&self) -> Result<Url, ValidationError> {
        Url::parse(&self.store_url).map_err(|_| ValidationError::InvalidUrl("COMMERCE__STORE_URL"))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Validate commerce configuration
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        if self.store_url.is_empty() {
            return Err(ValidationError::MissingRequired("COMMERCE__STORE_URL"));
        }
        let url = self.store_url()?;
        if url.cannot_be_a_base() {
            return Err(ValidationError::InvalidUrl("COMMERCE__STORE_URL"));
        }
        if *environment == Environment::Production && url.scheme() != "https" {
            return Err(ValidationError::MustBeHttps("COMMERCE__STORE_URL"));
        }

        if self.consumer_key.is_empty() {
            return Err(ValidationError::MissingRequired("COMMERCE__CONSUMER_KEY"));
        }
        if self.consumer_secret.expose_secret().is_empty() {
            return Err(ValidationError::MissingRequired("COMMERCE__CONSUMER_SECRET"));
        }
        if self.customer_email_domain.trim().is_empty() {
            return Err(ValidationError::MissingRequired("COMMERCE__CUSTOMER_EMAIL_DOMAIN"));
        }
        if self.request_timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }

        Ok(())
    }
}

impl Default for CommerceConfig {
    fn default() -> Self {
        Self {
            store_url: String::new(),
            consumer_key: String::new(),
            consumer_secret: empty_secret(),
            api_version: default_api_version(),
            login_path: default_login_path(),
            autologin_path: default_autologin_path(),
            customer_email_domain: default_customer_email_domain(),
            request_timeout_secs: default_request_timeout_secs(),
            subscription_page_cap: default_subscription_page_cap(),
        }
    }
}

fn empty_secret() -> SecretString {
    SecretString::new(String::new())
}

fn default_api_version() -> String {
    "wc/v3".to_string()
}

fn default_login_path() -> String {
    "wp-json/simple-jwt-login/v1/auth".to_string()
}

fn default_autologin_path() -> String {
    "wp-json/simple-jwt-login/v1/autologin".to_string()
}

fn default_customer_email_domain() -> String {
    "bbs.network".to_string()
}

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_subscription_page_cap() -> u32 {
    50
}
