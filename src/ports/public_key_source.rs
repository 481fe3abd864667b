//! Public key source port.
//!
//! Supplies the identity provider's signing keys as a map of key id to PEM
//! encoded public key, the shape served by the provider's key endpoint:
//!
//! ```json
//! { "2024-01": "-----BEGIN PUBLIC KEY-----\n..." }
//! ```

use async_trait::async_trait;
use std::collections::HashMap;
use thiserror::Error;

/// Key id to PEM public key.
pub type PublicKeySet = HashMap<String, String>;

/// Errors fetching the key set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeySourceError {
    #[error("Key endpoint unreachable: {0}")]
    Unreachable(String),

    #[error("Key endpoint returned an unexpected body: {0}")]
    Malformed(String),
}

/// Provides the current set of token signing keys.
#[async_trait]
pub trait PublicKeySource: Send + Sync {
    /// Fetch the current key set.
    ///
    /// Called for every verification; implementations decide whether to cache.
    async fn fetch_keys(&self) -> Result<PublicKeySet, KeySourceError>;
}
