//! Public key sources for JWT verification.
//!
//! - `HttpKeySource` - fetches the provider's key endpoint on every call, so a
//!   rotated key is honoured on the very next request
//! - `StaticKeySource` - a fixed key set, for tests and pinned deployments

use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;

use crate::ports::{KeySourceError, PublicKeySet, PublicKeySource};

/// Fetches `{kid: pem}` from the identity provider's key endpoint.
#[derive(Debug, Clone)]
pub struct HttpKeySource {
    http_client: reqwest::Client,
    keys_url: String,
}

impl HttpKeySource {
    pub fn new(http_client: reqwest::Client, keys_url: impl Into<String>) -> Self {
        Self {
            http_client,
            keys_url: keys_url.into(),
        }
    }

    pub fn keys_url(&self) -> &str {
        &self.keys_url
    }
}

#[async_trait]
impl PublicKeySource for HttpKeySource {
    async fn fetch_keys(&self) -> Result<PublicKeySet, KeySourceError> {
        tracing::debug!("Fetching signing keys from {}", self.keys_url);

        let response = self
            .http_client
            .get(&self.keys_url)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to fetch signing keys: {}", e);
                KeySourceError::Unreachable(e.to_string())
            })?;

        if !response.status().is_success() {
            let status = response.status();
            tracing::error!("Key endpoint returned {}", status);
            return Err(KeySourceError::Unreachable(format!(
                "key endpoint returned {}",
                status
            )));
        }

        let keys: PublicKeySet = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse signing keys: {}", e);
            KeySourceError::Malformed(e.to_string())
        })?;

        tracing::debug!("Fetched {} signing keys", keys.len());

        Ok(keys)
    }
}

/// A key set held in memory.
#[derive(Debug, Default)]
pub struct StaticKeySource {
    keys: RwLock<PublicKeySet>,
}

impl StaticKeySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a key under `kid`.
    pub fn with_key(self, kid: impl Into<String>, pem: impl Into<String>) -> Self {
        self.add_key(kid, pem);
        self
    }

    /// Adds or replaces a key at runtime, simulating rotation.
    pub fn add_key(&self, kid: impl Into<String>, pem: impl Into<String>) {
        self.keys
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(kid.into(), pem.into());
    }

    /// Removes a key, simulating revocation.
    pub fn remove_key(&self, kid: &str) {
        self.keys.write().unwrap_or_else(PoisonError::into_inner).remove(kid);
    }
}

#[async_trait]
impl PublicKeySource for StaticKeySource {
    async fn fetch_keys(&self) -> Result<PublicKeySet, KeySourceError> {
        Ok(self.keys.read().unwrap_or_else(PoisonError::into_inner).clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn static_source_reflects_rotation() {
        let source = StaticKeySource::new().with_key("old", "pem-old");
        source.add_key("new", "pem-new");
        source.remove_key("old");

        let keys = source.fetch_keys().await.unwrap();
        assert_eq!(keys.len(), 1);
        assert_eq!(keys.get("new").map(String::as_str), Some("pem-new"));
    }

    #[tokio::test]
    async fn http_source_reports_unreachable_endpoint() {
        let source = HttpKeySource::new(reqwest::Client::new(), "http://127.0.0.1:1/keys");
        let result = source.fetch_keys().await;
        assert!(matches!(result, Err(KeySourceError::Unreachable(_))));
    }

    #[test]
    fn http_source_keeps_url() {
        let source = HttpKeySource::new(reqwest::Client::new(), "https://id.example.com/keys");
        assert_eq!(source.keys_url(), "https://id.example.com/keys");
    }
}
