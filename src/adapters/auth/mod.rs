//! Authentication adapters.
//!
//! Implementations of the `CredentialVerifier` and `PublicKeySource` ports:
//!
//! - `jwt` - Production RS256 verification against the provider's keys
//! - `key_source` - HTTP and static key sets
//! - `fake` - Unsigned verification for local development
//! - `mock` - Test implementation that doesn't require tokens at all

mod fake;
mod jwt;
mod key_source;
mod mock;

pub use fake::FakeCredentialVerifier;
pub use jwt::{JwtConfig, JwtCredentialVerifier, DEFAULT_SUBJECT_CLAIM};
pub use key_source::{HttpKeySource, StaticKeySource};
pub use mock::MockCredentialVerifier;
